//! CLI output formatting for the build stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each post is shown by
//! its listing position and title, with date, category and source file as
//! indented context lines. The output reads as a content inventory while still
//! pointing back at the Markdown file each post came from.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Posts
//! 001 年度计划 [pinned]
//!     Date: 2024年1月15日 · 计划日记
//!     Source: plans.md
//! 002 春日随笔
//!     Date: 2024年3月1日 · 人生感悟
//!     Source: 2024-spring.md
//!
//! Skipped
//!     draft.md: missing required field `date`
//!
//! Found 2 posts in 3 files
//! ```
//!
//! ## Generate
//!
//! ```text
//! Pages
//!     posts/plans.html
//!     posts/2024-spring.html
//!     index.html
//!     posts.html
//!
//! Generated 4 pages
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::date::format_date;
use crate::generate::GenerateSummary;
use crate::scan::ScanResult;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Path relative to `root` when it lies inside it, else as given.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_scan_output(result: &ScanResult, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    if !result.posts.is_empty() {
        lines.push("Posts".to_string());
        for (i, (post, source)) in result.posts.iter().zip(&result.sources).enumerate() {
            let marker = if post.pinned { " [pinned]" } else { "" };
            lines.push(format!("{} {}{}", format_index(i + 1), post.title, marker));
            lines.push(format!(
                "{}Date: {} · {}",
                indent(1),
                format_date(&post.date),
                post.category
            ));
            lines.push(format!(
                "{}Source: {}",
                indent(1),
                display_path(source, source_root)
            ));
        }
    }

    if !result.skipped.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Skipped".to_string());
        for skipped in &result.skipped {
            lines.push(format!(
                "{}{}: {}",
                indent(1),
                display_path(&skipped.file, source_root),
                skipped.reason
            ));
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    if result.file_count == 0 {
        lines.push(format!(
            "No Markdown files in {}",
            source_root.display()
        ));
    } else {
        lines.push(format!(
            "Found {} in {}",
            plural(result.posts.len(), "post"),
            plural(result.file_count, "file")
        ));
    }

    lines
}

pub fn print_scan_output(result: &ScanResult, source_root: &Path) {
    for line in format_scan_output(result, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate_output(summary: &GenerateSummary, output_root: &Path) -> Vec<String> {
    if summary.written.is_empty() {
        return vec!["No posts to publish, nothing generated".to_string()];
    }

    let mut lines = vec!["Pages".to_string()];
    for path in &summary.written {
        lines.push(format!("{}{}", indent(1), display_path(path, output_root)));
    }
    lines.push(String::new());
    lines.push(format!("Generated {}", plural(summary.written.len(), "page")));
    lines
}

pub fn print_generate_output(summary: &GenerateSummary, output_root: &Path) {
    for line in format_generate_output(summary, output_root) {
        println!("{}", line);
    }
}
