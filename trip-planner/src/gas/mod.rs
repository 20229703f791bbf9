//! Fuel prices from myGasFeed and the driving cost estimates built on them.

mod cache;
mod client;
mod estimator;
mod types;

pub use cache::{CachedPrice, Clock, DEFAULT_TTL, GasPriceCache, ManualClock, SystemClock};
pub use client::{MyGasFeedClient, MyGasFeedConfig, decode_station_search};
pub use estimator::{
    DEFAULT_COST_PER_LITER, DEFAULT_LITERS_PER_METER, DEFAULT_SEARCH_RADIUS_MILES, GasConfig,
    GasEstimate, GasPriceEstimator, LITERS_PER_GALLON,
};
pub use types::{FuelType, GasPriceResponse, GasStatus, PriceField, StationPrice, SortBy};
