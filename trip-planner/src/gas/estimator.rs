//! Fuel cost estimates for driving legs.

use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{Coordinate, PriceSource};
use crate::planner::{GasPriceLookup, GasPriceQuery};

use super::cache::{DEFAULT_TTL, GasPriceCache};
use super::types::{FuelType, SortBy};

/// Liters in a US gallon.
pub const LITERS_PER_GALLON: f64 = 3.78541;

/// Default fuel use of a typical car.
pub const DEFAULT_LITERS_PER_METER: f64 = 0.0001;

/// Price used when no live price is available.
pub const DEFAULT_COST_PER_LITER: f64 = 0.75;

/// Default station search radius.
pub const DEFAULT_SEARCH_RADIUS_MILES: u32 = 50;

/// Configuration for fuel cost estimates.
#[derive(Debug, Clone)]
pub struct GasConfig {
    /// Fuel consumption
    pub liters_per_meter: f64,
    /// Fallback price per liter
    pub default_cost_per_liter: f64,
    /// How far from the trip origin to look for stations
    pub search_radius_miles: u32,
    pub fuel: FuelType,
    pub sort_by: SortBy,
    /// How long a fetched price is reused
    pub price_ttl: Duration,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            liters_per_meter: DEFAULT_LITERS_PER_METER,
            default_cost_per_liter: DEFAULT_COST_PER_LITER,
            search_radius_miles: DEFAULT_SEARCH_RADIUS_MILES,
            fuel: FuelType::default(),
            sort_by: SortBy::default(),
            price_ttl: DEFAULT_TTL,
        }
    }
}

impl GasConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_liters_per_meter(mut self, liters: f64) -> Self {
        self.liters_per_meter = liters;
        self
    }

    pub fn with_default_cost_per_liter(mut self, cost: f64) -> Self {
        self.default_cost_per_liter = cost;
        self
    }

    pub fn with_search_radius(mut self, miles: u32) -> Self {
        self.search_radius_miles = miles;
        self
    }

    pub fn with_fuel(mut self, fuel: FuelType) -> Self {
        self.fuel = fuel;
        self
    }

    pub fn with_price_ttl(mut self, ttl: Duration) -> Self {
        self.price_ttl = ttl;
        self
    }
}

/// Fuel cost of one drive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasEstimate {
    pub cost: f64,
    pub cost_per_liter: f64,
    pub source: PriceSource,
}

/// Estimates fuel cost from distance and local prices.
///
/// Lookup failures never fail an estimate: the configured default price
/// is used instead, and is not cached. Concurrent misses share one lookup.
pub struct GasPriceEstimator<G: GasPriceLookup> {
    lookup: G,
    cache: GasPriceCache,
    config: GasConfig,
    refresh: Mutex<()>,
}

impl<G: GasPriceLookup> GasPriceEstimator<G> {
    /// Create an estimator with a fresh cache honouring `config.price_ttl`.
    pub fn new(lookup: G, config: GasConfig) -> Self {
        let cache = GasPriceCache::new(config.price_ttl);
        Self::with_cache(lookup, cache, config)
    }

    pub fn with_cache(lookup: G, cache: GasPriceCache, config: GasConfig) -> Self {
        Self {
            lookup,
            cache,
            config,
            refresh: Mutex::new(()),
        }
    }

    pub fn cache(&self) -> &GasPriceCache {
        &self.cache
    }

    pub fn config(&self) -> &GasConfig {
        &self.config
    }

    /// Fuel cost of driving `distance_meters`, priced near `near`.
    pub async fn estimate(&self, distance_meters: u32, near: Coordinate) -> GasEstimate {
        let (cost_per_liter, source) = self.cost_per_liter(near).await;
        let liters = f64::from(distance_meters) * self.config.liters_per_meter;
        GasEstimate {
            cost: liters * cost_per_liter,
            cost_per_liter,
            source,
        }
    }

    /// Current price per liter and where it came from.
    pub async fn cost_per_liter(&self, near: Coordinate) -> (f64, PriceSource) {
        if let Some(per_gallon) = self.cache.get().await {
            debug!(per_gallon, "Using cached gas price");
            return (per_gallon / LITERS_PER_GALLON, PriceSource::Cached);
        }

        let _refresh = self.refresh.lock().await;
        // Another caller may have stored a price while we waited.
        if let Some(per_gallon) = self.cache.get().await {
            debug!(per_gallon, "Using gas price fetched by a concurrent estimate");
            return (per_gallon / LITERS_PER_GALLON, PriceSource::Cached);
        }

        match self.fetch_per_gallon(near).await {
            Some(per_gallon) => {
                self.cache.store(per_gallon).await;
                (per_gallon / LITERS_PER_GALLON, PriceSource::Live)
            }
            None => (self.config.default_cost_per_liter, PriceSource::Default),
        }
    }

    async fn fetch_per_gallon(&self, near: Coordinate) -> Option<f64> {
        let query = GasPriceQuery {
            near,
            radius_miles: self.config.search_radius_miles,
            fuel: self.config.fuel,
            sort_by: self.config.sort_by,
        };

        let response = match self.lookup.nearby_prices(&query).await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Gas price lookup failed, using default price");
                return None;
            }
        };

        if response.status.code != 200 {
            warn!(
                code = response.status.code,
                error = response.status.error.as_deref().unwrap_or(""),
                "Gas price lookup returned error status, using default price"
            );
            return None;
        }

        let price = response
            .stations
            .iter()
            .find_map(|s| s.price_for(self.config.fuel));
        if price.is_none() {
            info!(
                stations = response.stations.len(),
                "No priced stations nearby, using default price"
            );
        }
        price
    }
}
