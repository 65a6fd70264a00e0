//! Language type: validated language representation.
//!
//! A `Language` can only be constructed for a code present in the
//! `LanguageRegistry`, so holding one proves the code is supported.

use crate::i18n::registry::{LanguageConfig, LanguageRegistry, TextDirection, DEFAULT_LANGUAGE};
use crate::i18n::I18nError;
use std::fmt;

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "sv")
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };
    pub const SWEDISH: Language = Language { code: "sv" };

    /// Create a Language from an exact registry code.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is a registry key
    /// * `Err(I18nError::UnsupportedLanguage)` otherwise
    pub fn from_code(code: &str) -> Result<Language, I18nError> {
        LanguageRegistry::get()
            .get_by_code(code)
            .map(|config| Language {
                code: config.code, // Use the static str from the registry
            })
            .ok_or_else(|| I18nError::UnsupportedLanguage(code.to_string()))
    }

    /// Create a Language from a language tag such as `"sv-SE"` or `" DE "`.
    ///
    /// Takes the primary subtag (text before the first `-`), trims and
    /// lower-cases it, and accepts it only if it is a registry key.
    pub fn from_tag(tag: &str) -> Option<Language> {
        let primary = tag.split('-').next()?.trim().to_lowercase();
        if primary.is_empty() {
            return None;
        }
        Language::from_code(&primary).ok()
    }

    /// The default language (English).
    pub fn default_language() -> Language {
        Language {
            code: LanguageRegistry::get().default_language().code,
        }
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the language code is not found in the registry. This cannot
    /// happen for a Language built through `from_code`, `from_tag` or the
    /// constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Display name of the language (e.g., "Svenska").
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn direction(&self) -> TextDirection {
        TextDirection::for_code(self.code)
    }

    pub fn is_default(&self) -> bool {
        self.code == DEFAULT_LANGUAGE
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::default_language()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
