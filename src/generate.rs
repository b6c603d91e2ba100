//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the ordered posts from the scan stage
//! and writes the static pages.
//!
//! ## Generated Pages
//!
//! - **Home page** (`/index.html`): hero, a grid of the newest post cards, a
//!   featured quote
//! - **Listing page** (`/posts.html`): every post in listing order
//! - **Article pages** (`/posts/{slug}.html`): the rendered post body
//!
//! ## Output Structure
//!
//! ```text
//! ./
//! ├── index.html
//! ├── posts.html
//! ├── css/style.css              # Not generated; linked from every page
//! └── posts/
//!     ├── 2024-spring.html
//!     └── plans.html
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Titles, categories and excerpts are escaped by maud; the rendered post
//! body is inserted as-is.

use crate::config::SiteConfig;
use crate::date::format_date;
use crate::post::Post;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const HOME_PAGE: &str = "index.html";
pub const LISTING_PAGE: &str = "posts.html";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Files written by one [`generate`] run, in write order.
#[derive(Debug, Default)]
pub struct GenerateSummary {
    pub written: Vec<PathBuf>,
}

/// Which navigation entry is marked active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Home,
    Posts,
    Article,
}

pub fn generate(
    posts: &[Post],
    output: &Path,
    config: &SiteConfig,
) -> Result<GenerateSummary, GenerateError> {
    let mut summary = GenerateSummary::default();
    if posts.is_empty() {
        info!("no posts found, leaving existing pages untouched");
        return Ok(summary);
    }

    let article_dir = output.join(&config.posts.dir);
    fs::create_dir_all(&article_dir)?;

    for post in posts {
        let path = article_dir.join(format!("{}.html", post.slug));
        write_page(&path, render_article_page(post, config), &mut summary)?;
    }

    write_page(
        &output.join(HOME_PAGE),
        render_home_page(posts, config),
        &mut summary,
    )?;
    write_page(
        &output.join(LISTING_PAGE),
        render_listing_page(posts, config),
        &mut summary,
    )?;

    Ok(summary)
}

fn write_page(
    path: &Path,
    page: Markup,
    summary: &mut GenerateSummary,
) -> Result<(), GenerateError> {
    fs::write(path, page.into_string())?;
    info!(path = %path.display(), "wrote page");
    summary.written.push(path.to_path_buf());
    Ok(())
}

/// Relative prefix from a page in `dir` back to the site root.
fn root_prefix(dir: &str) -> String {
    let depth = Path::new(dir)
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count();
    "../".repeat(depth)
}

fn post_href(post: &Post, config: &SiteConfig) -> String {
    format!("{}/{}.html", config.posts.dir.trim_end_matches('/'), post.slug)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the full document around a page's main content.
///
/// `root` is the relative path back to the site root (`""` or `"../"`).
fn base_document(
    title: &str,
    root: &str,
    section: Section,
    config: &SiteConfig,
    content: Markup,
) -> Markup {
    let site = &config.site;
    html! {
        (DOCTYPE)
        html lang=(site.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href={ (root) (site.stylesheet) };
                @if !site.font_url.is_empty() {
                    link rel="preconnect" href="https://fonts.googleapis.com";
                    link rel="preconnect" href="https://fonts.gstatic.com" crossorigin;
                    link href=(site.font_url) rel="stylesheet";
                }
            }
            body {
                (site_header(root, section, config))
                main.main-content {
                    (content)
                }
                footer.site-footer {
                    div.footer-content {
                        p { (site.footer) }
                    }
                }
            }
        }
    }
}

/// Renders the site header with logo and navigation
fn site_header(root: &str, section: Section, config: &SiteConfig) -> Markup {
    html! {
        header.site-header {
            nav.nav-container role="navigation" aria-label=(config.nav.aria_label) {
                a.logo href={ (root) (HOME_PAGE) } { (config.site.name) }
                (render_nav(root, section, config))
            }
        }
    }
}

/// Renders the navigation links, marking the current section.
fn render_nav(root: &str, section: Section, config: &SiteConfig) -> Markup {
    let nav = &config.nav;
    let items = [
        (HOME_PAGE, nav.home.as_str(), section == Section::Home),
        (LISTING_PAGE, nav.posts.as_str(), section == Section::Posts),
        (nav.about_href.as_str(), nav.about.as_str(), false),
    ];
    html! {
        ul.nav-links {
            @for (href, label, active) in items {
                li {
                    a href={ (root) (href) }
                        class=[active.then_some("active")]
                        aria-current=[active.then_some("page")] { (label) }
                }
            }
        }
    }
}

/// Date, category and pinned badge shared by cards and list items.
fn post_meta(post: &Post, config: &SiteConfig) -> Markup {
    html! {
        div.post-meta {
            span.post-date { (format_date(&post.date)) }
            span.post-category { (post.category) }
            @if post.pinned {
                span.post-pinned { (config.labels.pinned_badge) }
            }
        }
    }
}

/// Home page grid card.
fn post_card(post: &Post, config: &SiteConfig) -> Markup {
    html! {
        article.post-card.pinned[post.pinned] {
            (post_meta(post, config))
            h3.post-title {
                a href=(post_href(post, config)) { (post.title) }
            }
            p.post-excerpt { (post.excerpt) }
        }
    }
}

/// Listing page entry.
fn post_list_item(post: &Post, config: &SiteConfig) -> Markup {
    html! {
        article.post-list-item.pinned[post.pinned] {
            (post_meta(post, config))
            h2.post-list-title {
                a href=(post_href(post, config)) { (post.title) }
            }
            p.post-excerpt { (post.excerpt) }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_home_page(posts: &[Post], config: &SiteConfig) -> Markup {
    let site = &config.site;
    let labels = &config.labels;
    let content = html! {
        section.hero {
            div.hero-content {
                h1.hero-title { (site.tagline) }
                p.hero-subtitle { (site.subtitle) }
            }
        }
        section.featured-posts {
            h2.section-title { (labels.latest_posts) }
            div.posts-grid {
                @for post in posts.iter().take(config.posts.home_count) {
                    (post_card(post, config))
                }
            }
            div.view-all {
                a.view-all-link href=(LISTING_PAGE) { (labels.view_all) }
            }
        }
        @if !site.featured_quote.is_empty() {
            section.quote-section {
                blockquote.featured-quote {
                    p { "\"" (site.featured_quote) "\"" }
                }
            }
        }
    };
    base_document(&site.home_title, "", Section::Home, config, content)
}

fn render_listing_page(posts: &[Post], config: &SiteConfig) -> Markup {
    let labels = &config.labels;
    let title = format!("{} | {}", labels.all_posts, config.site.name);
    let content = html! {
        section.page-header {
            h1.page-title { (labels.all_posts) }
            p.page-description { (labels.all_posts_description) }
        }
        section.posts-list {
            @for post in posts {
                (post_list_item(post, config))
            }
        }
    };
    base_document(&title, "", Section::Posts, config, content)
}

fn render_article_page(post: &Post, config: &SiteConfig) -> Markup {
    let root = root_prefix(&config.posts.dir);
    let title = format!("{} | {}", post.title, config.site.name);
    let content = html! {
        article.article-container {
            header.article-header {
                p.article-category { (post.category) }
                h1.article-title { (post.title) }
                p.article-date { (format_date(&post.date)) }
            }
            div.article-content {
                (PreEscaped(&post.content))
            }
            footer.article-footer {
                a.back-link href={ (root) (LISTING_PAGE) } { (config.labels.back_to_list) }
            }
        }
    };
    base_document(&title, &root, Section::Article, config, content)
}
