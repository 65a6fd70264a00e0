use anyhow::{Context, Result};
use lenshero_i18n::config::Config;
use lenshero_i18n::host::PageSnapshot;
use lenshero_i18n::i18n::{
    CatalogSource, EmbeddedCatalogs, Params, RemoteCatalogSource, TranslationService,
};
use lenshero_i18n::storage::FilePreferenceStore;
use std::sync::Arc;
use tracing::info;

const DEFAULT_KEY: &str = "widget.heading";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lenshero_i18n=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    // Usage: lenshero-i18n [PAGE_SNAPSHOT_JSON] [KEY] [name=value ...]
    let mut args = std::env::args().skip(1);
    let page = match args.next() {
        Some(path) => load_snapshot(&path)?,
        None => PageSnapshot::default(),
    };
    let key = args.next().unwrap_or_else(|| DEFAULT_KEY.to_string());
    let params: Params = args
        .filter_map(|arg| {
            arg.split_once('=')
                .map(|(name, value)| (name.to_string(), value.to_string()))
        })
        .collect();

    let source: Arc<dyn CatalogSource> = match &config.catalog_url {
        Some(url) => {
            info!("Loading catalogs from {}", url);
            Arc::new(RemoteCatalogSource::new(url, config.catalog_timeout)?)
        }
        None => Arc::new(EmbeddedCatalogs::bundled()),
    };
    let preferences = Arc::new(FilePreferenceStore::new(&config.preference_file));

    let service = TranslationService::new(source, preferences);

    if !config.preload.is_empty() {
        let codes: Vec<&str> = config.preload.iter().map(String::as_str).collect();
        let loaded = service.preload(&codes).await;
        info!("Preloaded {}/{} catalogs", loaded, codes.len());
    }

    let language = service
        .initialize(config.language.as_deref(), &page)
        .await
        .context("Failed to initialize translations")?;

    println!("language:  {} ({}, {})", language.name(), language, service.direction().as_str());
    println!("{}: {}", key, service.resolve(&key, &params));
    println!("{}", serde_json::to_string_pretty(&service.metrics().report())?);

    Ok(())
}

fn load_snapshot(path: &str) -> Result<PageSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read page snapshot {}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid page snapshot {}", path))
}
