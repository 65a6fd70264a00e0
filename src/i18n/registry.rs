//! Language registry: Single source of truth for all supported languages.
//!
//! The registry is closed and ordered. Every language code used anywhere else
//! in the crate must be a key of this registry. It uses a singleton pattern
//! with `OnceLock` because the table is immutable and shared by every
//! translation service instance.

use std::sync::OnceLock;

/// Code of the default language, used whenever nothing better is known.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Language codes written right-to-left.
const RTL_LANGUAGES: &[&str] = &["ar", "he", "fa", "ur"];

/// Writing direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Direction for an arbitrary language code (registry member or not).
    pub fn for_code(code: &str) -> TextDirection {
        if RTL_LANGUAGES.contains(&code) {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }

    /// The HTML `dir` attribute value.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "sv")
    pub code: &'static str,

    /// Display name, written in the language itself (e.g., "Svenska")
    pub name: &'static str,

    /// Whether this is the default language (only one should be true)
    pub is_default: bool,
}

impl LanguageConfig {
    pub fn direction(&self) -> TextDirection {
        TextDirection::for_code(self.code)
    }
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// Lookup is exact: codes are expected lower-case, without region suffix.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All languages in registry order.
    pub fn list(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Get the default language configuration.
    ///
    /// # Panics
    /// Panics if the table does not contain exactly one default language
    /// (this indicates a programming error in `default_languages`).
    pub fn default_language(&self) -> &LanguageConfig {
        let defaults: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default language found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default languages found in registry"),
        }
    }

    /// Check if a language code is a registry key.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// Number of supported languages.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

/// Supported languages, in the order they are offered in the language picker.
fn default_languages() -> Vec<LanguageConfig> {
    [
        ("en", "English"),
        ("sv", "Svenska"),
        ("no", "Norsk"),
        ("da", "Dansk"),
        ("de", "Deutsch"),
        ("fr", "Français"),
        ("es", "Español"),
        ("it", "Italiano"),
        ("nl", "Nederlands"),
        ("fi", "Suomi"),
    ]
    .into_iter()
    .map(|(code, name)| LanguageConfig {
        code,
        name,
        is_default: code == DEFAULT_LANGUAGE,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        // Should return the same instance (same memory address)
        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_registry_has_ten_languages() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.len(), 10);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_registry_order_is_stable() {
        let codes: Vec<_> = LanguageRegistry::get()
            .list()
            .iter()
            .map(|lang| lang.code)
            .collect();
        assert_eq!(
            codes,
            vec!["en", "sv", "no", "da", "de", "fr", "es", "it", "nl", "fi"]
        );
    }

    #[test]
    fn test_get_by_code_swedish() {
        let config = LanguageRegistry::get().get_by_code("sv").unwrap();
        assert_eq!(config.code, "sv");
        assert_eq!(config.name, "Svenska");
        assert!(!config.is_default);
    }

    #[test]
    fn test_get_by_code_is_exact() {
        let registry = LanguageRegistry::get();
        assert!(registry.get_by_code("SV").is_none());
        assert!(registry.get_by_code("sv-SE").is_none());
        assert!(registry.get_by_code("").is_none());
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("xx").is_none());
    }

    #[test]
    fn test_default_language_is_english() {
        let default = LanguageRegistry::get().default_language();
        assert_eq!(default.code, DEFAULT_LANGUAGE);
        assert_eq!(default.name, "English");
        assert!(default.is_default);
    }

    #[test]
    fn test_is_supported() {
        let registry = LanguageRegistry::get();
        assert!(registry.is_supported("fi"));
        assert!(registry.is_supported("it"));
        assert!(!registry.is_supported("pt"));
    }

    #[test]
    fn test_direction_for_codes() {
        assert_eq!(TextDirection::for_code("en"), TextDirection::Ltr);
        assert_eq!(TextDirection::for_code("ar"), TextDirection::Rtl);
        assert_eq!(TextDirection::for_code("he").as_str(), "rtl");
        assert_eq!(TextDirection::for_code("xx").as_str(), "ltr");
    }

    #[test]
    fn test_all_registry_languages_are_ltr() {
        for lang in LanguageRegistry::get().list() {
            assert_eq!(lang.direction(), TextDirection::Ltr, "{}", lang.code);
        }
    }
}
