//! Google Maps Distance Matrix HTTP client.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::Coordinate;
use crate::error::{ProviderError, Service};
use crate::http::{decode_json, read_text, send_error};
use crate::planner::DistanceMatrix;

use super::types::DistanceMatrixResponse;

/// Default base URL for the Maps API.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Separator between points in `origins` and `destinations`.
const POINT_SEPARATOR: &str = "|";

/// Configuration for the Distance Matrix client.
#[derive(Debug, Clone)]
pub struct GoogleMapsConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GoogleMapsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Distance Matrix API client.
#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl GoogleMapsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GoogleMapsConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }
}

impl DistanceMatrix for GoogleMapsClient {
    async fn distance_matrix(
        &self,
        origins: &[Coordinate],
        destinations: &[Coordinate],
    ) -> Result<DistanceMatrixResponse, ProviderError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ProviderError::Api {
                service: Service::DistanceMatrix,
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/distancematrix/json", self.base_url);
        let origins = join_points(origins);
        let destinations = join_points(destinations);
        debug!(origins = %origins, destinations = %destinations, "Requesting distance matrix");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("origins", origins.as_str()),
                ("destinations", destinations.as_str()),
            ])
            .send()
            .await
            .map_err(|e| send_error(Service::DistanceMatrix, e))?;

        let body = read_text(response, Service::DistanceMatrix).await?;
        decode_json(Service::DistanceMatrix, &body)
    }
}

/// `lat,lon|lat,lon|...` in slice order.
fn join_points(points: &[Coordinate]) -> String {
    points
        .iter()
        .map(Coordinate::to_string)
        .collect::<Vec<_>>()
        .join(POINT_SEPARATOR)
}
