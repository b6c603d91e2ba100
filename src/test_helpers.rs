//! Shared test utilities for the suixiang test suite.
//!
//! Provides fixture setup and lookup helpers that work with scan-phase data
//! (`ScanResult`, `Post`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let result = scan(tmp.path(), &SiteConfig::default()).unwrap();
//!
//! let post = find_post(&result, "plans");
//! assert!(post.pinned);
//! assert_eq!(post_slugs(&result), vec!["plans", "2024-spring", "winter"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::post::Post;
use crate::scan::ScanResult;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/markdown/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/markdown");
    for entry in std::fs::read_dir(&fixtures).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), tmp.path().join(entry.file_name())).unwrap();
    }
    tmp
}

/// Write a post with the given frontmatter lines and body into `dir`.
pub fn write_post(dir: &Path, slug: &str, frontmatter: &[(&str, &str)], body: &str) {
    let mut doc = String::from("---\n");
    for (key, value) in frontmatter {
        doc.push_str(&format!("{key}: {value}\n"));
    }
    doc.push_str("---\n");
    doc.push_str(body);
    std::fs::write(dir.join(format!("{slug}.md")), doc).unwrap();
}

// =========================================================================
// Lookups
// =========================================================================

/// Find a post by slug. Panics with the available slugs if not found.
pub fn find_post<'a>(result: &'a ScanResult, slug: &str) -> &'a Post {
    result
        .posts
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| {
            panic!(
                "post '{slug}' not found; available: {:?}",
                post_slugs(result)
            )
        })
}

/// Post slugs in listing order.
pub fn post_slugs(result: &ScanResult) -> Vec<&str> {
    result.posts.iter().map(|p| p.slug.as_str()).collect()
}
