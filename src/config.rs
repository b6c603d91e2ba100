//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the source directory next to the Markdown posts:
//!
//! ```text
//! markdown/
//! ├── config.toml              # Site config (optional)
//! ├── 2024-spring.md
//! └── plans.md
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "随想录"              # Logo text and page title suffix
//! lang = "zh-CN"
//! home_title = "我的随想录 | 个人博客"
//! tagline = "记录生活的点滴"    # Home page hero title
//! subtitle = "人生感悟 · 计划日记 · 随想杂记"
//! footer = "© 2024 随想录 | 用心记录每一刻"
//! featured_quote = "生活不是等待暴风雨过去，而是学会在雨中起舞。"
//! stylesheet = "css/style.css" # Relative to the site root
//! font_url = "https://fonts.googleapis.com/css2?..."  # Empty to disable
//!
//! [nav]
//! aria_label = "主导航"
//! home = "首页"
//! posts = "文章"
//! about = "关于我"
//! about_href = "about.html"
//!
//! [posts]
//! dir = "posts"                # Article pages go to <output>/<dir>/<slug>.html
//! default_category = "随想杂记"
//! excerpt_length = 100         # Characters taken from the body for derived excerpts
//! home_count = 6               # Posts shown on the home page
//!
//! [labels]
//! latest_posts = "最新文章"
//! view_all = "查看全部文章 →"
//! all_posts = "全部文章"
//! all_posts_description = "记录生活，沉淀思考"
//! back_to_list = "← 返回文章列表"
//! pinned_badge = "📌 置顶"
//! ```
//!
//! Config files are sparse: stock defaults are serialized to a TOML table and
//! the user file is merged on top. Unknown keys are rejected to catch typos
//! early.

use crate::post::{DEFAULT_CATEGORY, DEFAULT_EXCERPT_LENGTH, PostDefaults};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity and fixed page text.
    pub site: SiteMeta,
    /// Navigation labels.
    pub nav: NavConfig,
    /// Post assembly and listing settings.
    pub posts: PostsConfig,
    /// Fixed UI strings on listing and article pages.
    pub labels: Labels,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.posts.excerpt_length == 0 {
            return Err(ConfigError::Validation(
                "posts.excerpt_length must be greater than 0".into(),
            ));
        }
        if self.posts.home_count == 0 {
            return Err(ConfigError::Validation(
                "posts.home_count must be greater than 0".into(),
            ));
        }
        if self.posts.default_category.trim().is_empty() {
            return Err(ConfigError::Validation(
                "posts.default_category must not be empty".into(),
            ));
        }
        let dir = Path::new(self.posts.dir.trim());
        let inside_output = dir
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !inside_output || !dir.components().any(|c| matches!(c, Component::Normal(_))) {
            return Err(ConfigError::Validation(
                "posts.dir must be a relative path inside the output directory".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// Logo text and suffix of article page titles.
    pub name: String,
    /// `lang` attribute of every page.
    pub lang: String,
    /// `<title>` of the home page.
    pub home_title: String,
    pub tagline: String,
    pub subtitle: String,
    pub footer: String,
    /// Quote shown below the latest posts on the home page.
    pub featured_quote: String,
    /// Stylesheet path relative to the site root.
    pub stylesheet: String,
    /// Web font stylesheet. Empty disables the font links.
    pub font_url: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            name: "随想录".to_string(),
            lang: "zh-CN".to_string(),
            home_title: "我的随想录 | 个人博客".to_string(),
            tagline: "记录生活的点滴".to_string(),
            subtitle: "人生感悟 · 计划日记 · 随想杂记".to_string(),
            footer: "© 2024 随想录 | 用心记录每一刻".to_string(),
            featured_quote: "生活不是等待暴风雨过去，而是学会在雨中起舞。".to_string(),
            stylesheet: "css/style.css".to_string(),
            font_url: "https://fonts.googleapis.com/css2?family=Noto+Serif+SC:wght@400;600&family=Inter:wght@300;400;500&display=swap".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    pub aria_label: String,
    pub home: String,
    pub posts: String,
    pub about: String,
    /// Link target of the about entry, relative to the site root.
    pub about_href: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            aria_label: "主导航".to_string(),
            home: "首页".to_string(),
            posts: "文章".to_string(),
            about: "关于我".to_string(),
            about_href: "about.html".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostsConfig {
    /// Output subdirectory for article pages.
    pub dir: String,
    /// Category for posts without a `category:` field.
    pub default_category: String,
    /// Characters of body text used for derived excerpts.
    pub excerpt_length: usize,
    /// Number of posts listed on the home page.
    pub home_count: usize,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            dir: "posts".to_string(),
            default_category: DEFAULT_CATEGORY.to_string(),
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
            home_count: 6,
        }
    }
}

impl PostsConfig {
    pub fn defaults(&self) -> PostDefaults<'_> {
        PostDefaults {
            category: &self.default_category,
            excerpt_length: self.excerpt_length,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Labels {
    pub latest_posts: String,
    pub view_all: String,
    pub all_posts: String,
    pub all_posts_description: String,
    pub back_to_list: String,
    pub pinned_badge: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            latest_posts: "最新文章".to_string(),
            view_all: "查看全部文章 →".to_string(),
            all_posts: "全部文章".to_string(),
            all_posts_description: "记录生活，沉淀思考".to_string(),
            back_to_list: "← 返回文章列表".to_string(),
            pinned_badge: "📌 置顶".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, on top of the
/// stock defaults.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Printed by the `gen-config` command.
pub fn stock_config_toml() -> &'static str {
    r##"# suixiang configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.
#
# Place this file next to your posts: markdown/config.toml

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Logo text, and the suffix of every article page title.
name = "随想录"
lang = "zh-CN"
# <title> of the home page.
home_title = "我的随想录 | 个人博客"
# Home page hero.
tagline = "记录生活的点滴"
subtitle = "人生感悟 · 计划日记 · 随想杂记"
footer = "© 2024 随想录 | 用心记录每一刻"
featured_quote = "生活不是等待暴风雨过去，而是学会在雨中起舞。"
# Stylesheet path, relative to the site root.
stylesheet = "css/style.css"
# Web font stylesheet. Set to "" to drop the font links.
font_url = "https://fonts.googleapis.com/css2?family=Noto+Serif+SC:wght@400;600&family=Inter:wght@300;400;500&display=swap"

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[nav]
aria_label = "主导航"
home = "首页"
posts = "文章"
about = "关于我"
about_href = "about.html"

# ---------------------------------------------------------------------------
# Posts
# ---------------------------------------------------------------------------
[posts]
# Article pages are written to <output>/<dir>/<slug>.html
dir = "posts"
# Category used when a post has no `category:` field.
default_category = "随想杂记"
# Characters taken from the body when a post has no `excerpt:` field.
excerpt_length = 100
# Number of posts on the home page.
home_count = 6

# ---------------------------------------------------------------------------
# Page labels
# ---------------------------------------------------------------------------
[labels]
latest_posts = "最新文章"
view_all = "查看全部文章 →"
all_posts = "全部文章"
all_posts_description = "记录生活，沉淀思考"
back_to_list = "← 返回文章列表"
pinned_badge = "📌 置顶"
"##
}
