use thiserror::Error;

/// Errors produced by the translation service.
///
/// Most failures in this crate degrade to fallback text instead of surfacing;
/// these variants cover the cases a caller can actually observe.
#[derive(Debug, Error)]
pub enum I18nError {
    #[error("unsupported language code: '{0}'")]
    UnsupportedLanguage(String),

    #[error("no catalog available for '{requested}' and no English fallback")]
    MissingCatalog { requested: String },

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("catalog request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("invalid catalog for '{code}': {source}")]
    InvalidCatalog {
        code: String,
        #[source]
        source: serde_json::Error,
    },
}

impl I18nError {
    /// Whether retrying the failed operation might succeed.
    ///
    /// Network errors, rate limiting (429) and server errors (5xx) are
    /// transient; other client errors and malformed catalogs are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            Self::UnsupportedLanguage(_) | Self::MissingCatalog { .. } | Self::InvalidCatalog { .. } => {
                false
            }
        }
    }
}
