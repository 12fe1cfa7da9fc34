//! API Ninjas COVID-19 provider implementation.
//!
//! This module fetches per-country case series from the `/covid19` endpoint:
//! - One GET per call, country name percent-encoded into the query
//! - Authentication via the `X-Api-Key` header
//! - Both the per-date and the legacy flat response shapes are accepted
//!
//! API documentation: https://api-ninjas.com/api/covid19

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::errors::ProviderError;
use crate::models::{parse_records, CountryId, CountryRecord};
use crate::provider::{CaseDataProvider, ProviderConfig};

const PROVIDER_ID: &str = "API_NINJAS";
const COVID_ROUTE: &str = "/covid19";
const API_KEY_HEADER: &str = "X-Api-Key";

/// API Ninjas case data provider.
pub struct ApiNinjasProvider {
    client: Client,
    config: ProviderConfig,
}

impl ApiNinjasProvider {
    /// Create a new provider from connection settings.
    pub fn new(config: ProviderConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    /// Create a provider around an existing HTTP client.
    ///
    /// The client's own timeout applies; `config.timeout` is ignored.
    pub fn with_client(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    /// Full request URL for a country.
    pub fn request_url(&self, country: &CountryId) -> String {
        format!(
            "{}{}?country={}",
            self.config.base_url.trim_end_matches('/'),
            COVID_ROUTE,
            urlencoding::encode(country.as_str())
        )
    }

    fn unreachable(message: String) -> ProviderError {
        ProviderError::Unreachable {
            provider: PROVIDER_ID.to_string(),
            message,
        }
    }

    /// Make the GET request and return the body of a successful response.
    async fn fetch(&self, url: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Self::unreachable("Request timed out".to_string())
                } else {
                    Self::unreachable(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::unreachable(format!("HTTP {} - {}", status, body)));
        }

        response
            .text()
            .await
            .map_err(|e| Self::unreachable(format!("Failed to read response: {}", e)))
    }
}

#[async_trait]
impl CaseDataProvider for ApiNinjasProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_country(
        &self,
        country: &CountryId,
    ) -> Result<Vec<CountryRecord>, ProviderError> {
        let url = self.request_url(country);
        debug!("API Ninjas request for '{}'", country);

        let body = self.fetch(&url).await?;
        debug!("Raw API Ninjas response for '{}': {}", country, body);

        let records = parse_records(&body).map_err(|e| {
            warn!("Failed to decode API Ninjas response for '{}': {}", country, e);
            ProviderError::MalformedResponse {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
                payload: body.clone(),
            }
        })?;

        if records.is_empty() {
            return Err(ProviderError::NoData {
                provider: PROVIDER_ID.to_string(),
                country: country.to_string(),
            });
        }

        debug!(
            "API Ninjas returned {} records for '{}'",
            records.len(),
            country
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve one canned HTTP response on a local port.
    ///
    /// Returns the base URL and a receiver yielding the raw request head.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            let _ = tx.send(String::from_utf8_lossy(&request).to_string());
        });

        (format!("http://{}", addr), rx)
    }

    fn provider_for(base_url: String) -> ApiNinjasProvider {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        ApiNinjasProvider::with_client(
            client,
            ProviderConfig {
                base_url,
                api_key: "test_key".to_string(),
                timeout: Duration::from_secs(5),
            },
        )
    }

    #[test]
    fn test_provider_id() {
        let provider = ApiNinjasProvider::new(ProviderConfig::new("test_key"));
        assert_eq!(provider.id(), "API_NINJAS");
    }

    #[test]
    fn test_request_url_percent_encodes_country() {
        let provider = ApiNinjasProvider::new(ProviderConfig::new("test_key"));
        let url = provider.request_url(&CountryId::from("United Kingdom"));
        assert_eq!(
            url,
            "https://api.api-ninjas.com/v1/covid19?country=United%20Kingdom"
        );
    }

    #[test]
    fn test_request_url_tolerates_trailing_slash() {
        let provider = provider_for("http://localhost:9/v1/".to_string());
        let url = provider.request_url(&CountryId::from("Côte d'Ivoire"));
        assert_eq!(
            url,
            "http://localhost:9/v1/covid19?country=C%C3%B4te%20d%27Ivoire"
        );
    }

    #[tokio::test]
    async fn test_fetch_parses_records_and_sends_key() {
        let (base_url, request) = serve_once(
            "200 OK",
            r#"[{"country": "Mexico", "region": "", "cases": {"2023-03-08": {"total": 7483444, "new": 0}}}]"#,
        )
        .await;

        let records = provider_for(base_url)
            .fetch_country(&CountryId::from("Mexico"))
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].country_name, "Mexico");
        assert_eq!(records[0].series.latest_stats().total, 7_483_444);

        let head = request.await.unwrap().to_lowercase();
        assert!(head.starts_with("get /covid19?country=mexico "));
        assert!(head.contains("x-api-key: test_key"));
    }

    #[tokio::test]
    async fn test_empty_array_is_no_data() {
        let (base_url, _request) = serve_once("200 OK", "[]").await;

        let result = provider_for(base_url)
            .fetch_country(&CountryId::from("Mexico"))
            .await;

        assert!(matches!(result, Err(ProviderError::NoData { .. })));
    }

    #[tokio::test]
    async fn test_unparseable_body_keeps_payload() {
        let (base_url, _request) = serve_once("200 OK", r#"{"unexpected": true}"#).await;

        let result = provider_for(base_url)
            .fetch_country(&CountryId::from("Mexico"))
            .await;

        match result {
            Err(ProviderError::MalformedResponse { payload, .. }) => {
                assert_eq!(payload, r#"{"unexpected": true}"#);
            }
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_is_unreachable() {
        let (base_url, _request) =
            serve_once("401 Unauthorized", r#"{"error": "Invalid API Key."}"#).await;

        let result = provider_for(base_url)
            .fetch_country(&CountryId::from("Mexico"))
            .await;

        match result {
            Err(ProviderError::Unreachable { message, .. }) => {
                assert!(message.contains("401"));
            }
            other => panic!("Expected Unreachable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_unreachable() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = provider_for(format!("http://{}", addr))
            .fetch_country(&CountryId::from("Mexico"))
            .await;

        assert!(matches!(result, Err(ProviderError::Unreachable { .. })));
    }
}
