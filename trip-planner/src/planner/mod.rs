//! Trip planner.
//!
//! Answers: "What are my options for getting from here to there on this
//! day, and which is best once my time is priced in?"
//!
//! Flight options come from searching every pair of nearby airports;
//! the driving option from a single road lookup and a fuel estimate.
//! Both are ranked together by equivalent cost.

mod air;
mod config;
mod fanout;
mod ground;
mod locator;
mod plan;
mod provider;
mod rank;

#[cfg(test)]
mod air_tests;
#[cfg(test)]
mod mock;

pub use air::{AirOptionAggregator, AirOptions};
pub use config::PlannerConfig;
pub use fanout::{Outcome, fan_out};
pub use ground::GroundOptionAggregator;
pub use locator::{AIRPORT_CACHE_CAPACITY, AIRPORT_CACHE_TTL, AirportLocator, AirportMap};
pub use plan::{TripPlan, TripPlanner, TripRequest};
pub use provider::{
    DistanceMatrix, FlightQuery, FlightSearch, GasPriceLookup, GasPriceQuery, LocationQuery,
    LocationSearch,
};
pub use rank::{RankedOption, TimeValue, rank_options};
