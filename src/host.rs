//! Read-only inspection surface of the page hosting the widget.
//!
//! The language detector only ever talks to a [`HostEnvironment`]. Every
//! accessor may fail (a sandboxed frame, a detached document); callers treat
//! a failure the same as an absent signal.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("host page access failed for {what}: {reason}")]
pub struct HostError {
    pub what: &'static str,
    pub reason: String,
}

impl HostError {
    pub fn new(what: &'static str, reason: impl Into<String>) -> Self {
        Self {
            what,
            reason: reason.into(),
        }
    }
}

pub type HostResult<T> = Result<Option<T>, HostError>;

/// Signals the hosting document and browser expose about language.
pub trait HostEnvironment {
    /// The document element's `lang` attribute.
    fn document_lang(&self) -> HostResult<String>;

    /// Content of `<meta http-equiv="{name}">`.
    fn meta_http_equiv(&self, name: &str) -> HostResult<String>;

    /// Content of `<meta name="{name}">`.
    fn meta_name(&self, name: &str) -> HostResult<String>;

    /// `navigator.language`.
    fn navigator_language(&self) -> HostResult<String>;

    /// `navigator.languages`, in preference order.
    fn navigator_languages(&self) -> HostResult<Vec<String>>;

    /// Path component of the page URL.
    fn url_path(&self) -> HostResult<String>;

    /// Visible text content of the document body.
    fn body_text(&self) -> HostResult<String>;
}

/// Meta tag captured from a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MetaTag {
    #[serde(default)]
    pub http_equiv: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// A captured copy of a host page, used by the CLI and by tests.
///
/// Missing fields deserialize to "signal absent".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageSnapshot {
    pub lang: Option<String>,
    pub meta: Vec<MetaTag>,
    pub navigator_language: Option<String>,
    pub navigator_languages: Vec<String>,
    pub path: Option<String>,
    pub body_text: Option<String>,
}

impl PageSnapshot {
    pub fn with_lang(mut self, lang: &str) -> Self {
        self.lang = Some(lang.to_string());
        self
    }

    pub fn with_meta_http_equiv(mut self, http_equiv: &str, content: &str) -> Self {
        self.meta.push(MetaTag {
            http_equiv: Some(http_equiv.to_string()),
            name: None,
            content: Some(content.to_string()),
        });
        self
    }

    pub fn with_meta_name(mut self, name: &str, content: &str) -> Self {
        self.meta.push(MetaTag {
            http_equiv: None,
            name: Some(name.to_string()),
            content: Some(content.to_string()),
        });
        self
    }

    pub fn with_navigator_language(mut self, language: &str) -> Self {
        self.navigator_language = Some(language.to_string());
        self
    }

    pub fn with_navigator_languages(mut self, languages: &[&str]) -> Self {
        self.navigator_languages = languages.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    pub fn with_body_text(mut self, text: &str) -> Self {
        self.body_text = Some(text.to_string());
        self
    }

    fn meta_content(&self, matches: impl Fn(&MetaTag) -> bool) -> Option<String> {
        self.meta
            .iter()
            .find(|tag| matches(tag))
            .and_then(|tag| tag.content.clone())
    }
}

impl HostEnvironment for PageSnapshot {
    fn document_lang(&self) -> HostResult<String> {
        Ok(self.lang.clone())
    }

    // Attribute values are matched case-insensitively, as selectors do in HTML.
    fn meta_http_equiv(&self, name: &str) -> HostResult<String> {
        Ok(self.meta_content(|tag| {
            tag.http_equiv
                .as_deref()
                .is_some_and(|value| value.eq_ignore_ascii_case(name))
        }))
    }

    fn meta_name(&self, name: &str) -> HostResult<String> {
        Ok(self.meta_content(|tag| {
            tag.name
                .as_deref()
                .is_some_and(|value| value.eq_ignore_ascii_case(name))
        }))
    }

    fn navigator_language(&self) -> HostResult<String> {
        Ok(self.navigator_language.clone())
    }

    fn navigator_languages(&self) -> HostResult<Vec<String>> {
        Ok(Some(self.navigator_languages.clone()))
    }

    fn url_path(&self) -> HostResult<String> {
        Ok(self.path.clone())
    }

    fn body_text(&self) -> HostResult<String> {
        Ok(self.body_text.clone())
    }
}
