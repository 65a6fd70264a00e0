//! Translation metrics and observability module.
//!
//! Counters are owned by a translation service instance (shared with its
//! store through an `Arc`), so isolated services keep isolated numbers.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for one translation service.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Catalog loads answered from the cache
    cache_hits: AtomicUsize,

    /// Catalog loads that went to the catalog source
    cache_misses: AtomicUsize,

    /// Catalog source calls that returned an error
    source_failures: AtomicUsize,

    /// Lookups that fell back to the key (missing key or non-text leaf)
    missing_keys: AtomicUsize,

    /// Successful language changes
    language_changes: AtomicUsize,

    /// Language changes that were refused or failed
    rejected_changes: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_source_failure(&self) {
        self.source_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_missing_key(&self) {
        self.missing_keys.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_language_change(&self) {
        self.language_changes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected_change(&self) {
        self.rejected_changes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn source_failures(&self) -> usize {
        self.source_failures.load(Ordering::Relaxed)
    }

    pub fn missing_keys(&self) -> usize {
        self.missing_keys.load(Ordering::Relaxed)
    }

    pub fn language_changes(&self) -> usize {
        self.language_changes.load(Ordering::Relaxed)
    }

    pub fn rejected_changes(&self) -> usize {
        self.rejected_changes.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total_loads = hits + misses;
        let cache_hit_rate = if total_loads > 0 {
            (hits as f64 / total_loads as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            source_failures: self.source_failures(),
            missing_keys: self.missing_keys(),
            language_changes: self.language_changes(),
            rejected_changes: self.rejected_changes(),
        }
    }
}

/// Snapshot of the translation counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,

    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,

    pub source_failures: usize,
    pub missing_keys: usize,
    pub language_changes: usize,
    pub rejected_changes: usize,
}
