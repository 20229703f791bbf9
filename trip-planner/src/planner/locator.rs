//! Airport discovery around a coordinate.
//!
//! Airports do not move, so lookups are memoized by box centre and limit.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{Airport, AirportCode, BoundingBox, Coordinate};
use crate::error::ProviderError;
use crate::skypicker::convert_locations;

use super::config::PlannerConfig;
use super::provider::{LocationQuery, LocationSearch};

/// Airports near a point, keyed by code.
pub type AirportMap = BTreeMap<AirportCode, Airport>;

/// Cache key: box centre in 1e-4 degrees, then result limit.
type LocatorKey = (i64, i64, usize);

/// TTL for memoized airport lookups.
pub const AIRPORT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Maximum number of memoized airport lookups.
pub const AIRPORT_CACHE_CAPACITY: u64 = 1000;

/// Finds airports within a fixed degree box of a coordinate.
///
/// Makes a single attempt per lookup; callers decide whether to retry.
pub struct AirportLocator<L: LocationSearch> {
    client: L,
    cache: MokaCache<LocatorKey, Arc<AirportMap>>,
    box_degrees: f64,
    locale: String,
}

impl<L: LocationSearch> AirportLocator<L> {
    pub fn new(client: L, config: &PlannerConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(AIRPORT_CACHE_TTL)
            .max_capacity(AIRPORT_CACHE_CAPACITY)
            .build();

        Self {
            client,
            cache,
            box_degrees: config.airport_box_degrees,
            locale: config.locale.clone(),
        }
    }

    /// Up to `limit` airports inside the box around `center`.
    pub async fn locate(
        &self,
        center: Coordinate,
        limit: usize,
    ) -> Result<Arc<AirportMap>, ProviderError> {
        let key = cache_key(center, limit);
        if let Some(airports) = self.cache.get(&key).await {
            debug!(center = %center, count = airports.len(), "Airport cache hit");
            return Ok(airports);
        }

        let query = LocationQuery {
            bbox: BoundingBox::around(center, self.box_degrees),
            locale: self.locale.clone(),
            limit,
        };
        let response = self.client.search_locations(&query).await?;
        let airports = Arc::new(convert_locations(response)?);
        debug!(center = %center, count = airports.len(), "Located airports");

        self.cache.insert(key, Arc::clone(&airports)).await;
        Ok(airports)
    }

    /// Number of memoized lookups.
    pub fn cached_lookups(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Drop every memoized lookup.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

fn cache_key(center: Coordinate, limit: usize) -> LocatorKey {
    let scale = |deg: f64| (deg * 1e4).round() as i64;
    (scale(center.latitude()), scale(center.longitude()), limit)
}
