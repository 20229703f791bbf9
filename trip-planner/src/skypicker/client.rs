//! Skypicker HTTP client.
//!
//! Provides async access to the `locations` and `flights` endpoints.
//! Handles concurrency limiting and maps failures to `ProviderError`.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::error::{ProviderError, Service};
use crate::http::{decode_json, read_text, send_error};
use crate::planner::{FlightQuery, FlightSearch, LocationQuery, LocationSearch};

use super::types::{FlightsResponse, LocationsResponse};

/// Default base URL for the Skypicker API.
pub const DEFAULT_BASE_URL: &str = "https://api.skypicker.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Configuration for the Skypicker client.
#[derive(Debug, Clone)]
pub struct SkypickerConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SkypickerConfig {
    /// Create a new config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for SkypickerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Skypicker API client.
///
/// Uses a semaphore to limit concurrent requests so the flight fan-out
/// stays under the API's rate limit.
#[derive(Debug, Clone)]
pub struct SkypickerClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl SkypickerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SkypickerConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    async fn get(
        &self,
        service: Service,
        resource: &str,
        params: &[(&str, String)],
    ) -> Result<String, ProviderError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ProviderError::Api {
                service,
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/{}", self.base_url, resource);
        debug!(url = %url, "Requesting Skypicker");

        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| send_error(service, e))?;

        read_text(response, service).await
    }
}

impl LocationSearch for SkypickerClient {
    async fn search_locations(
        &self,
        query: &LocationQuery,
    ) -> Result<LocationsResponse, ProviderError> {
        let body = self
            .get(Service::Locations, "locations", &location_params(query))
            .await?;
        decode_json(Service::Locations, &body)
    }
}

impl FlightSearch for SkypickerClient {
    async fn search_flights(&self, query: &FlightQuery) -> Result<FlightsResponse, ProviderError> {
        let body = self
            .get(Service::Flights, "flights", &flight_params(query))
            .await?;
        decode_json(Service::Flights, &body)
    }
}

fn location_params(query: &LocationQuery) -> Vec<(&'static str, String)> {
    vec![
        ("type", "box".to_string()),
        ("low_lat", query.bbox.low_lat.to_string()),
        ("high_lat", query.bbox.high_lat.to_string()),
        ("low_lon", query.bbox.low_lon.to_string()),
        ("high_lon", query.bbox.high_lon.to_string()),
        ("locale", query.locale.clone()),
        ("location_types", "airport".to_string()),
        ("limit", query.limit.to_string()),
    ]
}

fn flight_params(query: &FlightQuery) -> Vec<(&'static str, String)> {
    vec![
        ("flyFrom", format!("airport:{}", query.origin)),
        ("to", format!("airport:{}", query.destination)),
        ("dateFrom", format_date(query.date_from)),
        ("dateTo", format_date(query.date_to)),
        ("partner", query.partner.clone()),
    ]
}

/// Dates are sent as `dd/mm/yyyy`.
fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
