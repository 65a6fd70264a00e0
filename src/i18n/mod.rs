//! Internationalization (i18n) module for the LensHero widget.
//!
//! Everything the widget needs to render its UI in the visitor's language
//! lives here: which languages exist, how the page's language is guessed,
//! where catalogs come from, and how a dotted key becomes display text.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported languages and their metadata
//! - `language`: Type-safe Language type backed by the registry
//! - `detector`: Page language detection from host signals
//! - `catalog`: Translation trees and the sources that produce them
//! - `store`: Per-language catalog cache with English fallback
//! - `remote`: Catalogs fetched over HTTP
//! - `resolver`: Dotted-key lookup and `{{name}}` interpolation
//! - `service`: The active language, merged tree and change notifications
//! - `validator`: Catalog quality validation
//! - `metrics`: Translation observability and metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use lenshero_i18n::host::PageSnapshot;
//! use lenshero_i18n::i18n::{Params, TranslationService};
//! use lenshero_i18n::storage::MemoryPreferenceStore;
//!
//! let service = TranslationService::with_bundled_catalogs(Arc::new(MemoryPreferenceStore::new()));
//! let page = PageSnapshot::default().with_lang("sv-SE");
//! service.initialize(None, &page).await?;
//!
//! let heading = service.t("widget.heading");
//! let greeting = service.resolve("greeting", &Params::new().with("name", "Anna"));
//! ```

mod catalog;
mod detector;
mod error;
mod language;
mod metrics;
mod registry;
mod remote;
mod resolver;
mod service;
mod store;
mod validator;

pub use catalog::{Catalog, CatalogSource, EmbeddedCatalogs, Node};
pub use detector::detect_language;
pub use error::I18nError;
pub use language::Language;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LanguageConfig, LanguageRegistry, TextDirection, DEFAULT_LANGUAGE};
pub use remote::RemoteCatalogSource;
pub use resolver::{interpolate, placeholders, resolve, Params};
pub use service::TranslationService;
pub use store::TranslationStore;
pub use validator::{CatalogValidator, ValidationReport};
