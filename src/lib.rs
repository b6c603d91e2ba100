//! # Suixiang
//!
//! A small static blog generator. Markdown files with a frontmatter header
//! become article pages, a home page with the newest posts, and a full
//! listing page.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      markdown/*.md  →  Vec<Post>    (parse, render, order)
//! 2. Generate  Vec<Post>      →  ./           (index.html, posts.html, posts/*.html)
//! ```
//!
//! Each post passes through the same steps during scan: [`frontmatter::parse`]
//! splits the metadata header from the body, [`markup::render`] turns the body
//! into an HTML fragment, and [`post::Post::from_parsed`] resolves defaults and
//! the excerpt. [`post::sort_posts`] then puts pinned posts first and the rest
//! newest first.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`frontmatter`] | Splits the `---` metadata block from the body; flat `key: value` parsing |
//! | [`markup`] | Line-oriented Markdown subset → HTML fragment as an ordered list of regex passes |
//! | [`post`] | Post assembly, excerpt derivation, listing order |
//! | [`date`] | Date parsing for ordering and `2024年3月1日` display |
//! | [`scan`] | Stage 1: reads the source directory into ordered posts |
//! | [`generate`] | Stage 2: renders the pages with Maud |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting for scan and generate results |
//!
//! # Design Decisions
//!
//! ## A Deliberately Small Markdown Dialect
//!
//! The converter is not CommonMark. It handles headings, blockquotes, emphasis,
//! inline code, links, images, flat lists, rules and paragraphs, one line at a
//! time. Its quirks (a numbered list renders as `<ul>`, no nesting) are part of
//! the output format that existing posts and stylesheets depend on.
//!
//! ## Maud Over Template Engines
//!
//! Pages are generated with [Maud](https://maud.lambda.xyz/). Post metadata is
//! escaped automatically; only the rendered body is inserted raw.

pub mod config;
pub mod date;
pub mod frontmatter;
pub mod generate;
pub mod markup;
pub mod output;
pub mod post;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
