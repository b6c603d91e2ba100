//! Post assembly and ordering.
//!
//! A [`Post`] is everything the page templates need about one article:
//! metadata resolved from the frontmatter plus the rendered HTML fragment.
//!
//! ## Field resolution
//!
//! | Field | Source | Fallback |
//! |-------|--------|----------|
//! | `title` | `title:` | none, the document is rejected |
//! | `date` | `date:` | none, the document is rejected |
//! | `category` | `category:` | configured default (`随想杂记`) |
//! | `excerpt` | `excerpt:` | first N characters of the body, markup stripped, plus `...` |
//! | `pinned` | `pinned: true` | `false` |
//! | `slug` | file name without `.md` | |
//!
//! A field counts as missing when the key is absent, its value is empty, or
//! its value is the boolean `false`.

use crate::date;
use crate::frontmatter::{self, Frontmatter, ParsedDocument, Value};
use crate::markup;
use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;

pub const DEFAULT_CATEGORY: &str = "随想杂记";
pub const DEFAULT_EXCERPT_LENGTH: usize = 100;

const EXCERPT_MARKER: &str = "...";
const EXCERPT_STRIPPED: &[char] = &['#', '*', '_', '`', '[', ']'];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}

/// Values applied when a post leaves optional fields unset.
#[derive(Debug, Clone)]
pub struct PostDefaults<'a> {
    pub category: &'a str,
    pub excerpt_length: usize,
}

impl Default for PostDefaults<'_> {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY,
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
        }
    }
}

/// A fully resolved article, ready for the page templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub title: String,
    /// Raw frontmatter date, expected as `YYYY-MM-DD`.
    pub date: String,
    pub category: String,
    pub excerpt: String,
    pub pinned: bool,
    /// File name without the `.md` extension; also the output file name.
    pub slug: String,
    /// Rendered HTML fragment of the body.
    pub content: String,
}

impl Post {
    /// Parse and render a raw source document.
    pub fn from_source(
        slug: &str,
        raw: &str,
        defaults: &PostDefaults<'_>,
    ) -> Result<Self, PostError> {
        Self::from_parsed(slug, &frontmatter::parse(raw), defaults)
    }

    pub fn from_parsed(
        slug: &str,
        doc: &ParsedDocument,
        defaults: &PostDefaults<'_>,
    ) -> Result<Self, PostError> {
        let fm = &doc.frontmatter;
        let title = text_field(fm, "title").ok_or(PostError::MissingField("title"))?;
        let date = text_field(fm, "date").ok_or(PostError::MissingField("date"))?;
        let category =
            text_field(fm, "category").unwrap_or_else(|| defaults.category.to_string());
        let excerpt = text_field(fm, "excerpt")
            .unwrap_or_else(|| derive_excerpt(&doc.body, defaults.excerpt_length));

        Ok(Self {
            title,
            date,
            category,
            excerpt,
            pinned: is_pinned(fm),
            slug: slug.to_string(),
            content: markup::render(&doc.body),
        })
    }
}

fn text_field(fm: &Frontmatter, key: &str) -> Option<String> {
    fm.get(key)
        .filter(|value| value.is_truthy())
        .map(Value::to_string)
}

fn is_pinned(fm: &Frontmatter) -> bool {
    match fm.get("pinned") {
        Some(Value::Bool(b)) => *b,
        Some(Value::Str(s)) => s == "true",
        None => false,
    }
}

/// Build a plain-text teaser from the start of a raw body.
///
/// Takes the first `length` characters, drops Markdown control characters
/// (`# * _ \` [ ]`), trims, and appends `...`.
pub fn derive_excerpt(body: &str, length: usize) -> String {
    let head: String = body
        .chars()
        .take(length)
        .filter(|c| !EXCERPT_STRIPPED.contains(c))
        .collect();
    format!("{}{}", head.trim(), EXCERPT_MARKER)
}

/// Pinned posts first, then newest first.
///
/// Dates that do not parse sort after every parseable date in the same
/// pinned group. Ties keep their input order.
pub fn compare_posts(a: &Post, b: &Post) -> Ordering {
    b.pinned.cmp(&a.pinned).then_with(|| {
        match (date::parse_date(&a.date), date::parse_date(&b.date)) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    })
}

pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(compare_posts);
}
