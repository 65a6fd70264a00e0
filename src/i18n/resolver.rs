//! Dotted-key resolution and `{{name}}` interpolation.
//!
//! Resolution never fails outward: a missing key, or a key that lands on a
//! list or a section, resolves to the key itself so the gap is visible in
//! the rendered widget.

use crate::i18n::catalog::{Catalog, Node};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::OnceLock;
use tracing::warn;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX
        .get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("placeholder regex is valid"))
}

/// Named interpolation values.
///
/// ```ignore
/// let params = Params::new().with("count", 3).with("name", "Anna");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: HashMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value; any `Display` type is stringified.
    pub fn with(mut self, name: &str, value: impl Display) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        }
    }
}

/// Outcome of a lookup that did not produce text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Miss {
    /// Some segment of the path does not exist.
    NotFound,
    /// The path exists but ends on a list or a section.
    NotText(&'static str),
}

/// Walk `key` to a text leaf, without interpolation.
pub fn lookup_text<'a>(tree: &'a Catalog, key: &str) -> Result<&'a str, Miss> {
    match tree.lookup(key) {
        None => Err(Miss::NotFound),
        Some(Node::Text(text)) => Ok(text.as_str()),
        Some(other) => Err(Miss::NotText(other.kind())),
    }
}

/// Resolve `key` against `tree` and interpolate `params`.
///
/// Returns the key unchanged (and logs a warning) when the key is missing or
/// does not name a string.
pub fn resolve(tree: &Catalog, key: &str, params: &Params) -> String {
    match lookup_text(tree, key) {
        Ok(text) => interpolate(text, params),
        Err(miss) => {
            report_miss(key, miss);
            key.to_string()
        }
    }
}

pub(crate) fn report_miss(key: &str, miss: Miss) {
    match miss {
        Miss::NotFound => warn!("Translation key not found: {}", key),
        Miss::NotText(kind) => warn!("Translation value is not a string: {} ({})", key, kind),
    }
}

/// Replace each `{{name}}` with `params[name]`; unknown names stay literal.
///
/// Single pass: substituted values are never scanned for placeholders.
pub fn interpolate(template: &str, params: &Params) -> String {
    if !template.contains("{{") {
        return template.to_string();
    }
    placeholder_regex()
        .replace_all(template, |caps: &Captures| match params.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Placeholder names used in a template, in order of appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    placeholder_regex()
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}
