//! Translation store with cache-once semantics.
//!
//! Once a code is cached, every later load returns the same catalog. Fetches
//! run without holding the cache lock, so loads of different codes proceed in
//! parallel. The cache is never evicted; it is bounded by the number of
//! distinct codes ever requested.

use crate::i18n::catalog::{Catalog, CatalogSource};
use crate::i18n::metrics::TranslationMetrics;
use crate::i18n::registry::DEFAULT_LANGUAGE;
use crate::i18n::I18nError;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

pub struct TranslationStore {
    source: Arc<dyn CatalogSource>,
    cache: Mutex<HashMap<String, Arc<Catalog>>>,
    metrics: Arc<TranslationMetrics>,
}

impl TranslationStore {
    pub fn new(source: Arc<dyn CatalogSource>, metrics: Arc<TranslationMetrics>) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
            metrics,
        }
    }

    /// Load the catalog for `code`.
    ///
    /// A code without a catalog gets the English catalog, cached under the
    /// requested code so later requests do not resolve again. Only a failing
    /// source produces an error; failures are not cached.
    pub async fn load(&self, code: &str) -> Result<Arc<Catalog>, I18nError> {
        if let Some(catalog) = self.cache.lock().await.get(code) {
            self.metrics.record_cache_hit();
            debug!("Catalog cache hit for {}", code);
            return Ok(Arc::clone(catalog));
        }
        self.metrics.record_cache_miss();

        // The cache is not locked while fetching; concurrent loads of the
        // same code may both fetch, and the first insert wins.
        let catalog = match self.fetch(code).await? {
            Some(catalog) => catalog,
            None if code == DEFAULT_LANGUAGE => {
                return Err(I18nError::MissingCatalog {
                    requested: code.to_string(),
                })
            }
            None => {
                debug!("No {} catalog for '{}', using English", self.source.name(), code);
                self.fetch(DEFAULT_LANGUAGE)
                    .await?
                    .ok_or_else(|| I18nError::MissingCatalog {
                        requested: code.to_string(),
                    })?
            }
        };

        let mut cache = self.cache.lock().await;
        let cached = cache
            .entry(code.to_string())
            .or_insert_with(|| Arc::new(catalog));
        Ok(Arc::clone(cached))
    }

    async fn fetch(&self, code: &str) -> Result<Option<Catalog>, I18nError> {
        self.source.fetch(code).await.map_err(|e| {
            self.metrics.record_source_failure();
            error!("Failed to load {} catalog for '{}': {}", self.source.name(), code, e);
            e
        })
    }

    /// Load several codes concurrently, returning how many succeeded.
    pub async fn preload(&self, codes: &[&str]) -> usize {
        let results = join_all(codes.iter().map(|code| self.load(code))).await;
        results
            .iter()
            .zip(codes)
            .filter(|(result, code)| match result {
                Ok(_) => true,
                Err(e) => {
                    warn!("Preloading '{}' failed: {}", code, e);
                    false
                }
            })
            .count()
    }

    /// Codes currently in the cache, sorted.
    pub async fn cached_codes(&self) -> Vec<String> {
        let mut codes: Vec<_> = self.cache.lock().await.keys().cloned().collect();
        codes.sort_unstable();
        codes
    }
}
