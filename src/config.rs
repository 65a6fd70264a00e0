use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Language
    pub language: Option<String>,

    // Preference storage
    pub preference_file: PathBuf,

    // Remote catalogs
    pub catalog_url: Option<String>,
    pub catalog_timeout: Duration,
    pub preload: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let catalog_timeout_secs = match non_empty_var("LENSHERO_CATALOG_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .with_context(|| format!("LENSHERO_CATALOG_TIMEOUT_SECS is not a number: {}", value))?,
            None => 10,
        };

        Ok(Self {
            // Explicit language; skips stored preference and detection
            language: non_empty_var("LENSHERO_LANGUAGE"),

            preference_file: non_empty_var("LENSHERO_PREFERENCE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".lenshero/preferences.json")),

            // Catalogs come from the bundled locales when no URL is set
            catalog_url: non_empty_var("LENSHERO_CATALOG_URL"),
            catalog_timeout: Duration::from_secs(catalog_timeout_secs),

            // Comma-separated codes to fetch before first use
            preload: non_empty_var("LENSHERO_PRELOAD")
                .map(|v| {
                    v.split(',')
                        .map(|code| code.trim().to_string())
                        .filter(|code| !code.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
