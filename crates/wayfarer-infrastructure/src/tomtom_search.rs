//! TomTom place search client.
//!
//! Sends `GET {base}/search/{query}.json?key=..&limit=..` requests and maps
//! the provider's `results` into [`SearchResult`] values. Provider failures
//! are surfaced as `WayfarerError::Search` with the HTTP status and, when the
//! body carries one, the provider's `errorCode`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use wayfarer_core::config::ProviderConfig;
use wayfarer_core::search::{PlaceSearch, SearchAddress, SearchPosition, SearchResult};
use wayfarer_core::{Result, WayfarerError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Place search backed by the TomTom Search API.
#[derive(Clone)]
pub struct TomTomSearchClient {
    client: Client,
    api_key: String,
    base_url: Url,
    limit: u32,
}

// Hand-written so the API key never appears in debug output.
impl std::fmt::Debug for TomTomSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TomTomSearchClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl TomTomSearchClient {
    /// Creates a client from the provider settings.
    ///
    /// # Errors
    ///
    /// `WayfarerError::Config` if the API key is blank or the base URL cannot
    /// be parsed.
    pub fn new(provider: &ProviderConfig) -> Result<Self> {
        if provider.api_key.trim().is_empty() {
            return Err(WayfarerError::config("TomTom API key is not configured"));
        }

        let base_url = Url::parse(&provider.search_base_url).map_err(|e| {
            WayfarerError::config(format!(
                "Invalid search base URL '{}': {}",
                provider.search_base_url, e
            ))
        })?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| WayfarerError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: provider.api_key.clone(),
            base_url,
            limit: provider.search_limit,
        })
    }

    fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| WayfarerError::config("Search base URL cannot be a base"))?
            .pop_if_empty()
            .push("search")
            .push(&format!("{query}.json"));
        Ok(url)
    }

    async fn perform_search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = self.search_url(query)?;
        let limit = self.limit.to_string();

        let response = self
            .client
            .get(url)
            .query(&[("key", self.api_key.as_str()), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|err| WayfarerError::search(format!("TomTom search request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = map_http_error(status, &body);
            tracing::error!(
                "[Search] TomTom search failed (status: {}, code: {:?})",
                status.as_u16(),
                error.provider_code()
            );
            return Err(error);
        }

        let payload: SearchResponse = response.json().await.map_err(|err| {
            WayfarerError::search(format!("Failed to parse TomTom search response: {err}"))
        })?;

        let results: Vec<SearchResult> = payload.results.into_iter().map(Into::into).collect();
        tracing::info!("[Search] {} result(s) for query", results.len());
        Ok(results)
    }
}

#[async_trait]
impl PlaceSearch for TomTomSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(WayfarerError::validation("Search query cannot be empty"));
        }

        tracing::debug!("[Search] Searching places for '{}'", trimmed);
        self.perform_search(trimmed).await
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    results: Vec<RawResult>,
}

#[derive(Deserialize)]
struct RawResult {
    #[serde(default)]
    id: String,
    #[serde(default)]
    address: RawAddress,
    position: RawPosition,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawAddress {
    #[serde(default)]
    freeform_address: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    country_code: Option<String>,
    #[serde(default)]
    municipality: Option<String>,
}

#[derive(Deserialize)]
struct RawPosition {
    lat: f64,
    lon: f64,
}

impl From<RawResult> for SearchResult {
    fn from(raw: RawResult) -> Self {
        SearchResult {
            id: raw.id,
            address: SearchAddress {
                freeform_address: raw.address.freeform_address.unwrap_or_default(),
                country: raw.address.country.unwrap_or_default(),
                country_code: raw.address.country_code.unwrap_or_default(),
                municipality: raw.address.municipality.unwrap_or_default(),
            },
            position: SearchPosition {
                lat: raw.position.lat,
                lon: raw.position.lon,
            },
        }
    }
}

fn map_http_error(status: StatusCode, body: &str) -> WayfarerError {
    let json = serde_json::from_str::<Value>(body).ok();

    let code = json.as_ref().and_then(|json| {
        json.get("errorCode")
            .or_else(|| json.get("detailedError").and_then(|d| d.get("code")))
            .and_then(|code| match code {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    });

    let detail = json
        .as_ref()
        .and_then(|json| {
            json.get("errorText")
                .or_else(|| json.get("detailedError").and_then(|d| d.get("message")))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

    WayfarerError::search_status(
        format!("Search failed ({}): {}", status.as_u16(), detail),
        status.as_u16(),
        code,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base: &str) -> ProviderConfig {
        ProviderConfig {
            api_key: "test-key".to_string(),
            search_base_url: base.to_string(),
            ..ProviderConfig::default()
        }
    }

    #[test]
    fn test_rejects_blank_key() {
        let mut config = provider("https://api.tomtom.com/search/2");
        config.api_key = String::new();
        assert!(TomTomSearchClient::new(&config).unwrap_err().is_config());
    }

    #[test]
    fn test_search_url_encodes_query() {
        let client = TomTomSearchClient::new(&provider("https://api.tomtom.com/search/2")).unwrap();
        let url = client.search_url("Tour Eiffel/Paris").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.tomtom.com/search/2/search/Tour%20Eiffel%2FParis.json"
        );
    }

    #[test]
    fn test_search_url_with_trailing_slash() {
        let client = TomTomSearchClient::new(&provider("http://127.0.0.1:9000/")).unwrap();
        let url = client.search_url("Lyon").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/search/Lyon.json");
    }

    #[test]
    fn test_map_http_error_extracts_code() {
        let err = map_http_error(
            StatusCode::FORBIDDEN,
            r#"{"errorText":"Developer Inactive","detailedError":{"code":"Forbidden","message":"Key inactive"}}"#,
        );
        assert_eq!(err.provider_code(), Some("Forbidden"));
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn test_map_http_error_without_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "");
        assert_eq!(err.provider_code(), None);
        match err {
            WayfarerError::Search { status, .. } => assert_eq!(status, Some(502)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_raw_result_mapping_tolerates_missing_fields() {
        let raw: RawResult =
            serde_json::from_str(r#"{"id":"x","position":{"lat":1.5,"lon":2.5}}"#).unwrap();
        let result: SearchResult = raw.into();
        assert_eq!(result.address.freeform_address, "");
        assert_eq!(result.position.lon, 2.5);
    }
}
