//! myGasFeed HTTP client.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::debug;

use crate::error::{ProviderError, Service};
use crate::http::{decode_json, read_text, send_error};
use crate::planner::{GasPriceLookup, GasPriceQuery};

use super::types::GasPriceResponse;

/// Start of the JSON object in a station search response.
///
/// The API sometimes emits stray output ahead of the object.
const JSON_START: &str = "{\"status\":";

/// Configuration for the myGasFeed client.
#[derive(Debug, Clone)]
pub struct MyGasFeedConfig {
    /// API key, sent as the last path segment
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MyGasFeedConfig {
    /// Create a new config with the given base URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout_secs: 10,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the myGasFeed station search.
#[derive(Debug, Clone)]
pub struct MyGasFeedClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl MyGasFeedClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MyGasFeedConfig) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, query: &GasPriceQuery) -> String {
        format!(
            "{}/{}/{}/{}/{}/{}/{}.json",
            self.base_url,
            query.near.latitude(),
            query.near.longitude(),
            query.radius_miles,
            query.fuel,
            query.sort_by,
            self.api_key,
        )
    }
}

impl GasPriceLookup for MyGasFeedClient {
    async fn nearby_prices(
        &self,
        query: &GasPriceQuery,
    ) -> Result<GasPriceResponse, ProviderError> {
        debug!(near = %query.near, fuel = %query.fuel, "Requesting gas prices");

        let response = self
            .http
            .get(self.url(query))
            .send()
            .await
            .map_err(|e| send_error(Service::GasPrices, e))?;

        let body = read_text(response, Service::GasPrices).await?;
        decode_station_search(&body)
    }
}

/// Decode a station search body, skipping anything before the JSON object.
pub fn decode_station_search(body: &str) -> Result<GasPriceResponse, ProviderError> {
    let start = body.find(JSON_START).ok_or_else(|| {
        ProviderError::malformed(Service::GasPrices, "no status object in body", Some(body))
    })?;
    decode_json(Service::GasPrices, &body[start..])
}
