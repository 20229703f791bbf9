//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They
//! are distinct from provider (HTTP) and configuration errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Coordinate outside the valid latitude/longitude ranges
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(&'static str),

    /// A travel option must take some time
    #[error("travel time must be positive")]
    ZeroTravelTime,

    /// Costs must be finite and non-negative
    #[error("invalid monetary cost: {0}")]
    InvalidCost(f64),
}
