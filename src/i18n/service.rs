//! The translation service: owner of the active language and the live tree.
//!
//! A service is an ordinary value. Create one per widget instance (or per
//! test); nothing here is process-global.
//!
//! Merging is shallow: each top-level section of a newly loaded catalog
//! replaces the live section of the same name, and live sections the new
//! catalog lacks stay in place. Partial catalogs therefore keep showing the
//! previous language's text for sections they do not translate.

use crate::host::HostEnvironment;
use crate::i18n::catalog::{Catalog, CatalogSource, EmbeddedCatalogs, Node};
use crate::i18n::detector::detect_language;
use crate::i18n::metrics::TranslationMetrics;
use crate::i18n::registry::{LanguageConfig, LanguageRegistry, TextDirection};
use crate::i18n::resolver::{interpolate, lookup_text, report_miss, Params};
use crate::i18n::store::TranslationStore;
use crate::i18n::{I18nError, Language};
use crate::storage::{PreferenceStore, LANGUAGE_PREFERENCE_KEY};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

struct LiveState {
    language: Language,
    tree: Catalog,
}

pub struct TranslationService {
    store: TranslationStore,
    preferences: Arc<dyn PreferenceStore>,
    metrics: Arc<TranslationMetrics>,
    state: RwLock<LiveState>,
    /// Serializes initialize/change so their steps never interleave.
    change_lock: Mutex<()>,
    notifier: watch::Sender<Language>,
}

impl TranslationService {
    pub fn new(source: Arc<dyn CatalogSource>, preferences: Arc<dyn PreferenceStore>) -> Self {
        let metrics = Arc::new(TranslationMetrics::new());
        let language = Language::default_language();
        let (notifier, _) = watch::channel(language);

        Self {
            store: TranslationStore::new(source, Arc::clone(&metrics)),
            preferences,
            metrics,
            state: RwLock::new(LiveState {
                language,
                tree: Catalog::default(),
            }),
            change_lock: Mutex::new(()),
            notifier,
        }
    }

    /// Service backed by the catalogs compiled into the crate.
    pub fn with_bundled_catalogs(preferences: Arc<dyn PreferenceStore>) -> Self {
        Self::new(Arc::new(EmbeddedCatalogs::bundled()), preferences)
    }

    /// Pick the starting language and load it.
    ///
    /// Order: `explicit` (if supported), then the stored preference (if
    /// supported), then detection on `host`. Does not write the preference.
    ///
    /// # Errors
    /// Returns the store's error if the catalog cannot be loaded; the live
    /// state is left as it was.
    pub async fn initialize(
        &self,
        explicit: Option<&str>,
        host: &dyn HostEnvironment,
    ) -> Result<Language, I18nError> {
        let _guard = self.change_lock.lock().await;

        let code = match explicit {
            Some(code) if LanguageRegistry::get().is_supported(code) => code.to_string(),
            _ => {
                if let Some(code) = explicit {
                    warn!("Ignoring unsupported initial language: {}", code);
                }
                match self.stored_preference() {
                    Some(code) => code,
                    None => detect_language(host).code().to_string(),
                }
            }
        };

        let language = Language::from_code(&code).unwrap_or_else(|_| {
            warn!("Unsupported language: {}, falling back to English", code);
            Language::default_language()
        });

        let catalog = self.store.load(language.code()).await?;
        self.apply(language, &catalog);
        self.notifier.send_replace(language);

        info!("Translations initialized for {} ({})", language.name(), language);
        Ok(language)
    }

    /// Switch the active language.
    ///
    /// Returns `false` without touching any state if `code` is unsupported or
    /// its catalog cannot be loaded. On success the choice is persisted; a
    /// storage failure is logged and does not fail the change.
    pub async fn change_language(&self, code: &str) -> bool {
        let language = match Language::from_code(code) {
            Ok(language) => language,
            Err(e) => {
                warn!("Language change refused: {}", e);
                self.metrics.record_rejected_change();
                return false;
            }
        };

        let _guard = self.change_lock.lock().await;

        let catalog = match self.store.load(language.code()).await {
            Ok(catalog) => catalog,
            Err(e) => {
                error!("Failed to change language to {}: {}", language, e);
                self.metrics.record_rejected_change();
                return false;
            }
        };

        self.apply(language, &catalog);

        if let Err(e) = self.preferences.set(LANGUAGE_PREFERENCE_KEY, language.code()) {
            warn!("Failed to save language preference: {}", e);
        }

        self.notifier.send_replace(language);
        self.metrics.record_language_change();
        info!("Language changed to {} ({})", language.name(), language);
        true
    }

    /// Merge `catalog` into the live tree and make `language` current.
    fn apply(&self, language: Language, catalog: &Catalog) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        for (name, node) in catalog.sections() {
            state.tree.insert(name.clone(), node.clone());
        }
        state.language = language;
    }

    fn stored_preference(&self) -> Option<String> {
        match self.preferences.get(LANGUAGE_PREFERENCE_KEY) {
            Ok(Some(code)) if LanguageRegistry::get().is_supported(&code) => {
                debug!("Using stored language preference {}", code);
                Some(code)
            }
            Ok(Some(code)) => {
                warn!("Ignoring unsupported stored language preference: {}", code);
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read language preference: {}", e);
                None
            }
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, LiveState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    // ==================== Lookups ====================

    /// Resolve a dotted key to display text, interpolating `params`.
    ///
    /// Missing keys and non-text leaves resolve to the key itself.
    pub fn resolve(&self, key: &str, params: &Params) -> String {
        let state = self.read_state();
        match lookup_text(&state.tree, key) {
            Ok(text) => interpolate(text, params),
            Err(miss) => {
                self.metrics.record_missing_key();
                report_miss(key, miss);
                key.to_string()
            }
        }
    }

    /// Resolve a key that takes no parameters.
    pub fn t(&self, key: &str) -> String {
        self.resolve(key, &Params::new())
    }

    /// Raw node at `key`, for callers that handle lists or whole sections.
    pub fn lookup(&self, key: &str) -> Option<Node> {
        self.read_state().tree.lookup(key).cloned()
    }

    /// List of strings at `key` (e.g. `lens_type.standard.features`).
    pub fn list(&self, key: &str) -> Option<Vec<String>> {
        self.read_state()
            .tree
            .lookup(key)
            .and_then(Node::as_list)
            .map(<[String]>::to_vec)
    }

    // ==================== State Queries ====================

    pub fn current_language(&self) -> Language {
        self.read_state().language
    }

    pub fn direction(&self) -> TextDirection {
        self.current_language().direction()
    }

    pub fn supported_languages(&self) -> Vec<&'static LanguageConfig> {
        LanguageRegistry::get().list()
    }

    pub fn is_language_supported(&self, code: &str) -> bool {
        LanguageRegistry::get().is_supported(code)
    }

    /// Receiver notified with the new language after every successful
    /// initialization or change.
    pub fn subscribe(&self) -> watch::Receiver<Language> {
        self.notifier.subscribe()
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    /// Warm the catalog cache for `codes`, returning how many loaded.
    ///
    /// Does not change the active language.
    pub async fn preload(&self, codes: &[&str]) -> usize {
        self.store.preload(codes).await
    }
}
