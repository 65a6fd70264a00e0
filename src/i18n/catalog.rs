//! Translation catalogs and the sources they are loaded from.
//!
//! A catalog is a tree of sections whose leaves are either a string or an
//! ordered list of strings (lens feature bullet points). Catalogs are data
//! assets: the bundled ones live in `locales/<code>.json` and are embedded at
//! compile time.
//!
//! ## Adding a language
//!
//! 1. Make sure the code is in the registry (`registry.rs`)
//! 2. Add `locales/<code>.json` (missing keys may be omitted)
//! 3. Add the file to `BUNDLED_CATALOGS` below

use crate::i18n::I18nError;
use futures::future::{self, BoxFuture};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Catalogs compiled into the binary.
const BUNDLED_CATALOGS: &[(&str, &str)] = &[
    ("en", include_str!("../../locales/en.json")),
    ("sv", include_str!("../../locales/sv.json")),
    ("de", include_str!("../../locales/de.json")),
    ("fr", include_str!("../../locales/fr.json")),
    ("es", include_str!("../../locales/es.json")),
];

/// A node of the translation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    List(Vec<String>),
    Section(BTreeMap<String, Node>),
}

impl Node {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Node::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_section(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Section(children) => Some(children),
            _ => None,
        }
    }

    /// Short name of the node shape, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Text(_) => "text",
            Node::List(_) => "list",
            Node::Section(_) => "section",
        }
    }
}

/// Full key → text tree for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    sections: BTreeMap<String, Node>,
}

impl Catalog {
    /// Parse a catalog from its JSON form.
    pub fn from_json(code: &str, json: &str) -> Result<Catalog, I18nError> {
        serde_json::from_str(json).map_err(|source| I18nError::InvalidCatalog {
            code: code.to_string(),
            source,
        })
    }

    /// Top-level sections (`widget`, `modal`, `upload`, ...).
    pub fn sections(&self) -> &BTreeMap<String, Node> {
        &self.sections
    }

    /// Insert or replace a top-level section.
    pub fn insert(&mut self, name: String, node: Node) -> Option<Node> {
        self.sections.insert(name, node)
    }

    /// Walk a dotted path (`lens_type.standard.features`) to a node.
    pub fn lookup(&self, key: &str) -> Option<&Node> {
        let mut segments = key.split('.');
        let mut node = self.sections.get(segments.next()?)?;
        for segment in segments {
            node = node.as_section()?.get(segment)?;
        }
        Some(node)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Where the translation store gets catalogs on a cache miss.
///
/// `fetch` returns `Ok(None)` when the source simply has no catalog for the
/// code; `Err` is reserved for a source that could not answer.
pub trait CatalogSource: Send + Sync {
    /// Name used in log messages.
    fn name(&self) -> &str;

    fn fetch<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<Option<Catalog>, I18nError>>;
}

/// Catalogs held in memory, by default the ones bundled with the crate.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedCatalogs {
    catalogs: HashMap<String, Catalog>,
}

impl EmbeddedCatalogs {
    /// The catalogs compiled into the crate.
    ///
    /// # Panics
    /// Panics if a bundled JSON file is malformed. The test suite parses every
    /// bundled file, so this indicates a broken build.
    pub fn bundled() -> Self {
        Self::from_json_sources(BUNDLED_CATALOGS).expect("bundled catalogs should be valid JSON")
    }

    /// Build from `(code, json)` pairs.
    pub fn from_json_sources(sources: &[(&str, &str)]) -> Result<Self, I18nError> {
        let catalogs = sources
            .iter()
            .map(|(code, json)| Catalog::from_json(code, json).map(|c| (code.to_string(), c)))
            .collect::<Result<HashMap<_, _>, I18nError>>()?;
        Ok(Self { catalogs })
    }

    pub fn with_catalog(mut self, code: &str, catalog: Catalog) -> Self {
        self.catalogs.insert(code.to_string(), catalog);
        self
    }

    pub fn get(&self, code: &str) -> Option<&Catalog> {
        self.catalogs.get(code)
    }

    /// Codes with a catalog, sorted.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<_> = self.catalogs.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

impl CatalogSource for EmbeddedCatalogs {
    fn name(&self) -> &str {
        "embedded"
    }

    fn fetch<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<Option<Catalog>, I18nError>> {
        Box::pin(future::ready(Ok(self.catalogs.get(code).cloned())))
    }
}
