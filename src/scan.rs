//! Post discovery.
//!
//! Stage 1 of the build pipeline. Reads every Markdown file directly inside
//! the source directory and assembles it into a [`Post`]:
//!
//! ```text
//! markdown/                        # Source directory
//! ├── config.toml                  # Site configuration (optional)
//! ├── 2024-spring.md               # → posts/2024-spring.html
//! ├── plans.md                     # → posts/plans.html
//! ├── .about.md                    # Dotfiles are posts too → posts/.about.html
//! └── drafts/                      # Subdirectories are not scanned
//! ```
//!
//! ## Rules
//!
//! - Only files ending in `.md` (any case) are posts; the file stem is the slug.
//! - A post missing `title` or `date` is skipped with a warning, not an error.
//! - A missing source directory is created, producing an empty result.
//! - The returned posts are already in listing order (pinned first, newest first).

use crate::config::SiteConfig;
use crate::post::{self, Post};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Everything discovered in the source directory.
#[derive(Debug, Serialize)]
pub struct ScanResult {
    /// Posts in listing order.
    pub posts: Vec<Post>,
    /// Source file of each post, index-aligned with `posts`.
    pub sources: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<Skipped>,
    /// Markdown files read, including skipped ones.
    pub file_count: usize,
}

/// A Markdown file that could not become a post.
#[derive(Debug, Clone, Serialize)]
pub struct Skipped {
    pub file: PathBuf,
    pub reason: String,
}

pub fn scan(source: &Path, config: &SiteConfig) -> Result<ScanResult, ScanError> {
    if !source.exists() {
        info!(dir = %source.display(), "creating missing source directory");
        fs::create_dir_all(source)?;
    }

    let defaults = config.posts.defaults();
    let mut loaded: Vec<(Post, PathBuf)> = Vec::new();
    let mut skipped = Vec::new();
    let mut file_count = 0;

    for path in markdown_files(source)? {
        file_count += 1;
        let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
            skip(&mut skipped, &path, "file name is not valid UTF-8".to_string());
            continue;
        };

        let raw = match String::from_utf8(fs::read(&path)?) {
            Ok(raw) => raw,
            Err(_) => {
                skip(&mut skipped, &path, "content is not valid UTF-8".to_string());
                continue;
            }
        };

        match Post::from_source(slug, &raw, &defaults) {
            Ok(post) => {
                debug!(slug, title = %post.title, pinned = post.pinned, "loaded post");
                loaded.push((post, path));
            }
            Err(e) => skip(&mut skipped, &path, e.to_string()),
        }
    }

    loaded.sort_by(|(a, _), (b, _)| post::compare_posts(a, b));
    let (posts, sources) = loaded.into_iter().unzip();
    Ok(ScanResult {
        posts,
        sources,
        skipped,
        file_count,
    })
}

fn skip(skipped: &mut Vec<Skipped>, path: &Path, reason: String) {
    warn!(file = %path.display(), %reason, "skipping post");
    skipped.push(Skipped {
        file: path.to_path_buf(),
        reason,
    });
}

/// `.md` files directly inside `dir`, sorted by file name.
fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !is_markdown(path) {
            continue;
        }
        files.push(path.to_path_buf());
    }
    Ok(files)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md"))
}
