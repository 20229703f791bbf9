//! Domain types for the trip planner.
//!
//! This module contains the validated value types that flow through the
//! planner. Types enforce their invariants at construction time, so code
//! that receives them can trust their validity.

mod airport;
mod coordinate;
mod duration;
mod error;
mod flight;
mod leg;
mod option;

pub use airport::{Airport, AirportCode, InvalidAirportCode};
pub use coordinate::{BoundingBox, Coordinate};
pub use duration::{DurationError, DurationFormat};
pub use error::DomainError;
pub use flight::{FlightId, FlightOption, SEGMENT_DELIMITER};
pub use leg::{TravelLeg, format_distance};
pub use option::{
    DrivingDetails, FlightDetails, PriceSource, TravelMethod, TravelMode, TravelOption,
};
