//! Language detection for the page hosting the widget.
//!
//! Signals are consulted in a strict priority order and the first one naming
//! a supported language wins:
//!
//! 1. `<html lang>`
//! 2. `<meta http-equiv="content-language">`, then `<meta name="language">`
//! 3. `navigator.language`, then the first entry of `navigator.languages`
//! 4. a two-letter prefix of the URL path (`/sv/...`)
//! 5. eyewear vocabulary in the visible page text
//!
//! Detection never fails. A host accessor that errors is logged and skipped.

use crate::host::{HostEnvironment, HostResult};
use crate::i18n::Language;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Keyword lists for the lexical fallback, in evaluation order.
///
/// Lists overlap (`vista` for es/it, `briller`/`optiker`/`syn` for no/da);
/// the earlier entry wins.
const KEYWORD_HEURISTICS: &[(&str, &[&str])] = &[
    ("sv", &["receptglas", "glasögon", "synundersökning", "ögonoptiker"]),
    ("de", &["brille", "sehtest", "augenoptiker", "sehkraft"]),
    ("fr", &["lunettes", "verres", "opticien", "vue"]),
    ("es", &["gafas", "lentes", "óptica", "vista"]),
    ("it", &["occhiali", "lenti", "ottico", "vista"]),
    ("nl", &["bril", "lenzen", "opticien", "zicht"]),
    ("no", &["briller", "synundersøkelse", "optiker", "syn"]),
    ("da", &["briller", "synstest", "optiker", "syn"]),
    ("fi", &["silmälasit", "linssit", "optikko", "näkö"]),
];

static PATH_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();

/// Detect the best supported language for the hosting page.
///
/// Pure read of the environment; calling it twice on an unchanged page gives
/// the same answer.
pub fn detect_language(host: &dyn HostEnvironment) -> Language {
    let detected = from_document_lang(host)
        .or_else(|| from_meta_tags(host))
        .or_else(|| from_navigator(host))
        .or_else(|| from_url_path(host))
        .or_else(|| from_page_text(host));

    match detected {
        Some((language, method)) => {
            debug!("Detected language {} from {}", language, method);
            language
        }
        None => {
            let fallback = Language::default_language();
            debug!("No language signal on host page, using {}", fallback);
            fallback
        }
    }
}

type Detection = Option<(Language, &'static str)>;

/// Unwrap a host accessor result, logging and discarding failures.
fn signal<T>(what: &str, result: HostResult<T>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("Language detection skipped {}: {}", what, e);
            None
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn from_document_lang(host: &dyn HostEnvironment) -> Detection {
    let lang = non_empty(signal("document lang", host.document_lang()))?;
    Language::from_tag(&lang).map(|l| (l, "document lang attribute"))
}

fn from_meta_tags(host: &dyn HostEnvironment) -> Detection {
    let content = non_empty(signal(
        "meta http-equiv",
        host.meta_http_equiv("content-language"),
    ))
    .or_else(|| non_empty(signal("meta name", host.meta_name("language"))))?;
    Language::from_tag(&content).map(|l| (l, "language meta tag"))
}

fn from_navigator(host: &dyn HostEnvironment) -> Detection {
    let language = non_empty(signal("navigator.language", host.navigator_language()))
        .or_else(|| {
            signal("navigator.languages", host.navigator_languages())
                .and_then(|languages| non_empty(languages.into_iter().next()))
        })?;
    Language::from_tag(&language).map(|l| (l, "browser language"))
}

fn from_url_path(host: &dyn HostEnvironment) -> Detection {
    let path = signal("url path", host.url_path())?;
    let regex = PATH_PREFIX_REGEX
        .get_or_init(|| Regex::new(r"^/([a-z]{2})(?:/|$)").expect("path prefix regex is valid"));
    let code = regex.captures(&path)?.get(1)?.as_str();
    Language::from_code(code).ok().map(|l| (l, "URL path prefix"))
}

fn from_page_text(host: &dyn HostEnvironment) -> Detection {
    let text = signal("body text", host.body_text())?.to_lowercase();
    if text.is_empty() {
        return None;
    }

    KEYWORD_HEURISTICS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .and_then(|(code, _)| Language::from_code(code).ok())
        .map(|l| (l, "page vocabulary"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostError, PageSnapshot};
    use crate::i18n::LanguageRegistry;

    fn detect(page: &PageSnapshot) -> &'static str {
        detect_language(page).code()
    }

    /// Host whose every accessor fails.
    struct BrokenHost;

    impl HostEnvironment for BrokenHost {
        fn document_lang(&self) -> HostResult<String> {
            Err(HostError::new("document.lang", "detached"))
        }
        fn meta_http_equiv(&self, _name: &str) -> HostResult<String> {
            Err(HostError::new("meta", "detached"))
        }
        fn meta_name(&self, _name: &str) -> HostResult<String> {
            Err(HostError::new("meta", "detached"))
        }
        fn navigator_language(&self) -> HostResult<String> {
            Err(HostError::new("navigator", "blocked"))
        }
        fn navigator_languages(&self) -> HostResult<Vec<String>> {
            Err(HostError::new("navigator", "blocked"))
        }
        fn url_path(&self) -> HostResult<String> {
            Err(HostError::new("location", "cross-origin"))
        }
        fn body_text(&self) -> HostResult<String> {
            Err(HostError::new("body", "missing"))
        }
    }

    /// Host where only the document lang accessor fails.
    struct FailingLangHost(PageSnapshot);

    impl HostEnvironment for FailingLangHost {
        fn document_lang(&self) -> HostResult<String> {
            Err(HostError::new("document.lang", "detached"))
        }
        fn meta_http_equiv(&self, name: &str) -> HostResult<String> {
            self.0.meta_http_equiv(name)
        }
        fn meta_name(&self, name: &str) -> HostResult<String> {
            self.0.meta_name(name)
        }
        fn navigator_language(&self) -> HostResult<String> {
            self.0.navigator_language()
        }
        fn navigator_languages(&self) -> HostResult<Vec<String>> {
            self.0.navigator_languages()
        }
        fn url_path(&self) -> HostResult<String> {
            self.0.url_path()
        }
        fn body_text(&self) -> HostResult<String> {
            self.0.body_text()
        }
    }

    // ==================== Document Lang Tests ====================

    #[test]
    fn test_every_registry_code_detected_from_lang() {
        for config in LanguageRegistry::get().list() {
            let page = PageSnapshot::default().with_lang(config.code);
            assert_eq!(detect(&page), config.code);

            let regional = PageSnapshot::default().with_lang(&format!("{}-XX", config.code));
            assert_eq!(detect(&regional), config.code);
        }
    }

    #[test]
    fn test_lang_is_case_insensitive() {
        assert_eq!(detect(&PageSnapshot::default().with_lang("SV-se")), "sv");
    }

    #[test]
    fn test_unsupported_lang_falls_back_to_default() {
        for code in ["pt", "ja", "xx", "zh-Hant", "english"] {
            assert_eq!(detect(&PageSnapshot::default().with_lang(code)), "en", "{}", code);
        }
    }

    #[test]
    fn test_lang_beats_conflicting_meta() {
        let page = PageSnapshot::default()
            .with_lang("de")
            .with_meta_http_equiv("content-language", "fr");
        assert_eq!(detect(&page), "de");
    }

    #[test]
    fn test_unsupported_lang_falls_through_to_meta() {
        let page = PageSnapshot::default()
            .with_lang("pt-BR")
            .with_meta_http_equiv("content-language", "fr");
        assert_eq!(detect(&page), "fr");
    }

    // ==================== Meta Tag Tests ====================

    #[test]
    fn test_meta_http_equiv_before_meta_name() {
        let page = PageSnapshot::default()
            .with_meta_name("language", "nl")
            .with_meta_http_equiv("content-language", "da-DK");
        assert_eq!(detect(&page), "da");
    }

    #[test]
    fn test_meta_name_used_when_http_equiv_absent() {
        let page = PageSnapshot::default().with_meta_name("language", "nl");
        assert_eq!(detect(&page), "nl");
    }

    #[test]
    fn test_empty_http_equiv_falls_to_meta_name() {
        let page = PageSnapshot::default()
            .with_meta_http_equiv("content-language", "")
            .with_meta_name("language", "fi");
        assert_eq!(detect(&page), "fi");
    }

    #[test]
    fn test_meta_beats_navigator() {
        let page = PageSnapshot::default()
            .with_meta_name("language", "es")
            .with_navigator_language("sv-SE");
        assert_eq!(detect(&page), "es");
    }

    // ==================== Navigator Tests ====================

    #[test]
    fn test_navigator_language() {
        let page = PageSnapshot::default().with_navigator_language("nb-NO").with_path("/no/");
        // "nb" is not a registry code; the path prefix is next in line
        assert_eq!(detect(&page), "no");

        let page = PageSnapshot::default().with_navigator_language("it-IT");
        assert_eq!(detect(&page), "it");
    }

    #[test]
    fn test_navigator_languages_first_entry() {
        let page = PageSnapshot::default().with_navigator_languages(&["fi-FI", "en-US"]);
        assert_eq!(detect(&page), "fi");
    }

    #[test]
    fn test_navigator_language_takes_precedence_over_list() {
        let page = PageSnapshot::default()
            .with_navigator_language("de")
            .with_navigator_languages(&["sv"]);
        assert_eq!(detect(&page), "de");
    }

    // ==================== URL Path Tests ====================

    #[test]
    fn test_url_path_prefix() {
        assert_eq!(detect(&PageSnapshot::default().with_path("/sv/produkter")), "sv");
        assert_eq!(detect(&PageSnapshot::default().with_path("/fr")), "fr");
    }

    #[test]
    fn test_url_path_requires_two_letter_segment() {
        assert_eq!(detect(&PageSnapshot::default().with_path("/svenska/")), "en");
        assert_eq!(detect(&PageSnapshot::default().with_path("/SV/")), "en");
        assert_eq!(detect(&PageSnapshot::default().with_path("/shop/sv/")), "en");
    }

    #[test]
    fn test_url_path_unknown_code() {
        assert_eq!(detect(&PageSnapshot::default().with_path("/pt/")), "en");
    }

    // ==================== Heuristic Tests ====================

    #[test]
    fn test_swedish_vocabulary() {
        let page = PageSnapshot::default().with_body_text("Köp dina GLASÖGON hos oss");
        assert_eq!(detect(&page), "sv");
    }

    #[test]
    fn test_german_vocabulary() {
        let page = PageSnapshot::default().with_body_text("Ihr Augenoptiker in Berlin");
        assert_eq!(detect(&page), "de");
    }

    #[test]
    fn test_finnish_vocabulary() {
        let page = PageSnapshot::default().with_body_text("Uudet silmälasit");
        assert_eq!(detect(&page), "fi");
    }

    #[test]
    fn test_overlapping_keywords_keep_evaluation_order() {
        // "vista" is listed for both Spanish and Italian
        let page = PageSnapshot::default().with_body_text("la vista");
        assert_eq!(detect(&page), "es");

        // "optiker" is listed for both Norwegian and Danish
        let page = PageSnapshot::default().with_body_text("din optiker");
        assert_eq!(detect(&page), "no");
    }

    #[test]
    fn test_earlier_signal_beats_vocabulary() {
        let page = PageSnapshot::default()
            .with_path("/nl/")
            .with_body_text("receptglas");
        assert_eq!(detect(&page), "nl");
    }

    #[test]
    fn test_no_vocabulary_match() {
        let page = PageSnapshot::default().with_body_text("Welcome to our shop");
        assert_eq!(detect(&page), "en");
    }

    // ==================== Failure Tests ====================

    #[test]
    fn test_broken_host_returns_default() {
        assert_eq!(detect_language(&BrokenHost), Language::ENGLISH);
    }

    #[test]
    fn test_failing_accessor_falls_through() {
        let host = FailingLangHost(PageSnapshot::default().with_meta_name("language", "sv"));
        assert_eq!(detect_language(&host), Language::SWEDISH);
    }

    #[test]
    fn test_detection_is_idempotent() {
        let page = PageSnapshot::default()
            .with_navigator_languages(&["da-DK"])
            .with_body_text("briller");
        assert_eq!(detect_language(&page), detect_language(&page));
    }
}
