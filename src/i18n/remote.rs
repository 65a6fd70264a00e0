//! Catalogs served over HTTP.
//!
//! Expects one JSON document per language at `{base_url}/{code}.json`, in the
//! same shape as the bundled `locales/` files. A 404 means "no catalog for
//! this language" and lets the store fall back to English.

use crate::i18n::catalog::{Catalog, CatalogSource};
use crate::i18n::I18nError;
use crate::retry::{with_retry_if, RetryConfig};
use futures::future::BoxFuture;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

pub struct RemoteCatalogSource {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl RemoteCatalogSource {
    /// Create a source with its own HTTP client.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, I18nError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryConfig::catalog_fetch(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn catalog_url(&self, code: &str) -> String {
        format!("{}/{}.json", self.base_url, code)
    }

    async fn fetch_once(
        client: reqwest::Client,
        url: String,
        code: &str,
    ) -> Result<Option<Catalog>, I18nError> {
        let response = client.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("No remote catalog at {}", url);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(I18nError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Catalog::from_json(code, &body).map(Some)
    }
}

impl CatalogSource for RemoteCatalogSource {
    fn name(&self) -> &str {
        "remote"
    }

    fn fetch<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<Option<Catalog>, I18nError>> {
        Box::pin(async move {
            let url = self.catalog_url(code);
            with_retry_if(
                &self.retry,
                &format!("Catalog fetch ({})", code),
                || Self::fetch_once(self.client.clone(), url.clone(), code),
                I18nError::is_transient,
            )
            .await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::catalog::Node;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn source(server: &MockServer) -> RemoteCatalogSource {
        RemoteCatalogSource::new(&server.uri(), Duration::from_secs(5))
            .unwrap()
            .with_retry(RetryConfig::new(3, Duration::from_millis(1)))
    }

    // ==================== URL Tests ====================

    #[test]
    fn test_catalog_url_trims_trailing_slash() {
        let source = RemoteCatalogSource::with_client(
            reqwest::Client::new(),
            "https://cdn.example.com/lenshero/locales/",
        );
        assert_eq!(
            source.catalog_url("sv"),
            "https://cdn.example.com/lenshero/locales/sv.json"
        );
        assert_eq!(source.name(), "remote");
    }

    // ==================== Fetch Tests ====================

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sv.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"modal": {"close": "Stäng"}}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let catalog = source(&server).fetch("sv").await.unwrap().unwrap();
        assert_eq!(catalog.lookup("modal.close").and_then(Node::as_text), Some("Stäng"));
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/it.json"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        assert!(source(&server).fetch("it").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fetch_retries_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/de.json"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/de.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"modal": {"close": "Schließen"}}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let catalog = source(&server).fetch("de").await.unwrap().unwrap();
        assert_eq!(
            catalog.lookup("modal.close").and_then(Node::as_text),
            Some("Schließen")
        );
    }

    #[tokio::test]
    async fn test_fetch_exhausts_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fr.json"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&server)
            .await;

        let result = source(&server).fetch("fr").await;
        assert!(matches!(result, Err(I18nError::HttpStatus { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_fetch_no_retry_on_client_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/es.json"))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&server)
            .await;

        let result = source(&server).fetch("es").await;
        assert!(matches!(result, Err(I18nError::HttpStatus { status: 403, .. })));
    }

    #[tokio::test]
    async fn test_fetch_invalid_json_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nl.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let result = source(&server).fetch("nl").await;
        assert!(matches!(result, Err(I18nError::InvalidCatalog { ref code, .. }) if code == "nl"));
    }
}
