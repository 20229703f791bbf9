//! Error types shared across the planner.
//!
//! * [`ProviderError`]: an external service failed or answered with
//!   something we could not use. Scoped to the call that produced it.
//! * [`ConfigError`]: bad calibration or settings. Aborts the request.
//! * [`PartialResultWarning`]: part of the plan (a flight pair or the
//!   driving option) produced nothing.
//!   Not an error; carried alongside a successful plan.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::domain::{AirportCode, DomainError};

/// The external services the planner talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Locations,
    Flights,
    DistanceMatrix,
    GasPrices,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Service::Locations => "location search",
            Service::Flights => "flight search",
            Service::DistanceMatrix => "distance matrix",
            Service::GasPrices => "gas price lookup",
        })
    }
}

/// Errors from an external service call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with an error status
    #[error("{service} error {status}: {message}")]
    Api {
        service: Service,
        status: u16,
        message: String,
    },

    /// Rate limited by the service
    #[error("rate limited by {0}")]
    RateLimited(Service),

    /// Credentials rejected
    #[error("unauthorized by {0} (check API key)")]
    Unauthorized(Service),

    /// Response did not have the expected shape
    #[error("malformed {service} response: {message}")]
    Malformed {
        service: Service,
        message: String,
        body: Option<String>,
    },

    /// Service did not answer in time
    #[error("{0} timed out")]
    Timeout(Service),
}

impl ProviderError {
    /// Build a `Malformed` error, keeping the start of the offending payload.
    pub fn malformed(service: Service, message: impl Into<String>, body: Option<&str>) -> Self {
        ProviderError::Malformed {
            service,
            message: message.into(),
            body: body.map(|b| b.chars().take(500).collect()),
        }
    }

    /// `Malformed` error for a decoded response that lacks what we need.
    ///
    /// The response is logged and kept on the error in its debug form.
    pub fn malformed_payload(
        service: Service,
        message: impl Into<String>,
        payload: &impl fmt::Debug,
    ) -> Self {
        let message = message.into();
        let body = format!("{payload:?}");
        let err = Self::malformed(service, message, Some(&body));
        if let ProviderError::Malformed { message, body, .. } = &err {
            warn!(
                service = %service,
                body = body.as_deref().unwrap_or_default(),
                "Malformed provider response: {message}"
            );
        }
        err
    }

    /// Whether retrying the same call might succeed.
    ///
    /// Transport failures, timeouts, 5xx and 429 are transient. Other
    /// statuses and bad payloads fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ProviderError::Api { status, .. } => *status >= 500,
            ProviderError::RateLimited(_) | ProviderError::Timeout(_) => true,
            ProviderError::Unauthorized(_) | ProviderError::Malformed { .. } => false,
        }
    }
}

/// Invalid inputs or settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Time-value calibration points cannot define the curve
    #[error(
        "invalid calibration: value of one hour ({one_hour}) and ten hours ({ten_hours}) must be positive and finite"
    )]
    InvalidCalibration { one_hour: f64, ten_hours: f64 },

    /// Duration pattern is not one of the supported layouts
    #[error("unsupported duration format: {0:?}")]
    UnsupportedDurationFormat(String),

    /// Required environment variable is missing
    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    /// A setting has an unusable value
    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Errors that abort a whole trip plan.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Part of the flight fan-out that contributed no options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PartialResultWarning {
    /// Flight search for the pair failed after retries.
    PairFailed {
        origin: AirportCode,
        destination: AirportCode,
        attempts: u32,
        error: String,
    },

    /// Flight search for the pair had not finished by the deadline.
    PairTimedOut {
        origin: AirportCode,
        destination: AirportCode,
    },

    /// No road route between the airport and the trip endpoint.
    AirportUnreachable { airport: AirportCode },

    /// The driving lookup failed; only flights were ranked.
    DrivingUnavailable { error: String },
}

impl fmt::Display for PartialResultWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartialResultWarning::PairFailed {
                origin,
                destination,
                attempts,
                error,
            } => write!(
                f,
                "flights {origin} to {destination} failed after {attempts} attempt(s): {error}"
            ),
            PartialResultWarning::PairTimedOut {
                origin,
                destination,
            } => write!(f, "flights {origin} to {destination} timed out"),
            PartialResultWarning::AirportUnreachable { airport } => {
                write!(f, "no road route to or from {airport}")
            }
            PartialResultWarning::DrivingUnavailable { error } => {
                write!(f, "driving option unavailable: {error}")
            }
        }
    }
}
