//! Door-to-door trip planner.
//!
//! Answers: "Should I fly or drive from here to there on this day, once
//! the value of my time is counted?" Flight options come from searching
//! every pair of airports near the two ends of the trip; the driving
//! option from a road lookup and local fuel prices. Everything is ranked
//! by price plus a personal, calibrated value of travel time.

pub mod config;
pub mod distance;
pub mod domain;
pub mod error;
pub mod gas;
pub mod planner;
pub mod retry;
pub mod skypicker;
pub mod telemetry;

mod http;
