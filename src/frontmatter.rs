//! Frontmatter parsing.
//!
//! A post may open with a metadata block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: "第一篇文章"
//! date: 2024-03-01
//! pinned: true
//! ---
//! Body text starts here.
//! ```
//!
//! Each line inside the fence is split on its first colon into a trimmed key
//! and a trimmed value. Matching surrounding quotes (`"…"` or `'…'`) are
//! stripped, then the literals `true` and `false` become booleans. Everything
//! else stays a string. Lines without a colon, or starting with one, are
//! ignored. A repeated key keeps its last value.
//!
//! If the document does not start with a complete fence (opening line,
//! closing line, newline after the closing line) the whole input is the body
//! and the metadata is empty. Parsing never fails.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^---\s*\n([\s\S]*?)\n---\s*\n([\s\S]*)$").expect("frontmatter pattern is valid")
});

/// A metadata value after quote stripping and boolean coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Str(String),
}

impl Value {
    /// Coerce a raw (already trimmed) value string.
    fn coerce(raw: &str) -> Self {
        match strip_quotes(raw) {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            other => Value::Str(other.to_string()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Str(_) => None,
        }
    }

    /// `false` and the empty string count as "not set" for optional fields.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

/// Key/value metadata from a document's fenced header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Frontmatter(BTreeMap<String, Value>);

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn insert(&mut self, key: String, value: Value) {
        self.0.insert(key, value);
    }
}

/// A source document split into metadata and raw (unrendered) body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    pub frontmatter: Frontmatter,
    pub body: String,
}

/// Split a raw document into frontmatter and body.
pub fn parse(raw: &str) -> ParsedDocument {
    let Some(caps) = FENCED_BLOCK.captures(raw) else {
        return ParsedDocument {
            frontmatter: Frontmatter::default(),
            body: raw.to_string(),
        };
    };

    let mut frontmatter = Frontmatter::default();
    for line in caps[1].split('\n') {
        if let Some((key, value)) = parse_line(line) {
            frontmatter.insert(key, value);
        }
    }

    ParsedDocument {
        frontmatter,
        body: caps[2].to_string(),
    }
}

fn parse_line(line: &str) -> Option<(String, Value)> {
    let colon = line.find(':')?;
    if colon == 0 {
        return None;
    }
    let key = line[..colon].trim();
    if key.is_empty() {
        return None;
    }
    let value = line[colon + 1..].trim();
    Some((key.to_string(), Value::coerce(value)))
}

/// Remove one pair of matching surrounding quotes.
///
/// A lone quote character counts as both the opening and the closing quote,
/// leaving an empty string.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.starts_with(quote) && value.ends_with(quote) {
            return value.get(1..value.len() - 1).unwrap_or("");
        }
    }
    value
}
