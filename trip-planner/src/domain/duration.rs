//! Human-readable duration strings.
//!
//! The flight search API reports flight time as strings such as `"5h 30m"`.
//! The set of understood layouts is closed: a [`DurationFormat`] can only be
//! obtained for a known pattern, so an unsupported layout is rejected when
//! the format is chosen rather than when the first string is parsed.

use std::fmt;

use crate::error::ConfigError;

/// Error returned when a duration string does not match its format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid duration {input:?}: {reason}")]
pub struct DurationError {
    input: String,
    reason: &'static str,
}

impl DurationError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// A supported duration layout.
///
/// # Examples
///
/// ```
/// use trip_planner::domain::DurationFormat;
///
/// let fmt = DurationFormat::from_pattern("..h ..m").unwrap();
/// assert_eq!(fmt.parse("5h 30m").unwrap(), 19_800);
/// assert_eq!(fmt.format(19_859), "5h 30m");
///
/// assert!(DurationFormat::from_pattern("..d").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationFormat {
    /// `"5h 30m"`, pattern `..h ..m`.
    HoursMinutes,
    /// `"5:30"`, pattern `..:..`.
    Clock,
}

impl DurationFormat {
    /// Select the format for a pattern string.
    pub fn from_pattern(pattern: &str) -> Result<Self, ConfigError> {
        match pattern {
            "..h ..m" => Ok(Self::HoursMinutes),
            "..:.." => Ok(Self::Clock),
            other => Err(ConfigError::UnsupportedDurationFormat(other.to_string())),
        }
    }

    /// The pattern string this format was selected by.
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::HoursMinutes => "..h ..m",
            Self::Clock => "..:..",
        }
    }

    /// Parse a duration string into seconds.
    pub fn parse(&self, s: &str) -> Result<u32, DurationError> {
        let trimmed = s.trim();
        let (hours, minutes) = match self {
            Self::HoursMinutes => {
                let (hours, rest) = trimmed
                    .split_once("h ")
                    .ok_or_else(|| DurationError::new(s, "expected \"..h ..m\""))?;
                let minutes = rest
                    .strip_suffix('m')
                    .ok_or_else(|| DurationError::new(s, "missing minutes suffix"))?;
                (hours, minutes)
            }
            Self::Clock => trimmed
                .split_once(':')
                .ok_or_else(|| DurationError::new(s, "expected \"..:..\""))?,
        };

        let hours = parse_digits(hours).ok_or_else(|| DurationError::new(s, "invalid hours"))?;
        let minutes =
            parse_digits(minutes).ok_or_else(|| DurationError::new(s, "invalid minutes"))?;
        if minutes > 59 {
            return Err(DurationError::new(s, "minutes must be 0-59"));
        }

        hours
            .checked_mul(60)
            .and_then(|m| m.checked_add(minutes))
            .and_then(|m| m.checked_mul(60))
            .ok_or_else(|| DurationError::new(s, "duration too long"))
    }

    /// Render seconds in this format.
    ///
    /// Only whole minutes are shown; leftover seconds are truncated, not
    /// rounded.
    pub fn format(&self, seconds: u32) -> String {
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        match self {
            Self::HoursMinutes => format!("{hours}h {minutes}m"),
            Self::Clock => format!("{hours}:{minutes:02}"),
        }
    }
}

impl fmt::Display for DurationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

/// Parse a non-empty run of ASCII digits.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
