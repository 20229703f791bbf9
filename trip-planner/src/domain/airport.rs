//! Airport codes and airports.

use std::fmt;

use serde::{Serialize, Serializer};

use super::Coordinate;

/// Error returned when parsing an invalid airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airport code: {reason}")]
pub struct InvalidAirportCode {
    reason: &'static str,
}

/// A valid 3-letter IATA airport code.
///
/// Codes are always 3 uppercase ASCII letters. Any `AirportCode` value is
/// valid by construction, and it is `Copy`, so it can be used freely as a
/// map key and inside pair keys.
///
/// # Examples
///
/// ```
/// use trip_planner::domain::AirportCode;
///
/// let sfo = AirportCode::parse("SFO").unwrap();
/// assert_eq!(sfo.as_str(), "SFO");
///
/// assert!(AirportCode::parse("sfo").is_err());
/// assert!(AirportCode::parse("SF").is_err());
/// assert!(AirportCode::parse("KSFO").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AirportCode([u8; 3]);

impl AirportCode {
    /// Parse an airport code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidAirportCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidAirportCode {
                reason: "must be exactly 3 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidAirportCode {
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        Ok(AirportCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirportCode({})", self.as_str())
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AirportCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// An airport found near a search coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Airport {
    pub code: AirportCode,
    pub location: Coordinate,
}

impl Airport {
    pub fn new(code: AirportCode, location: Coordinate) -> Self {
        Self { code, location }
    }
}
