//! Provider endpoints and credentials.

use crate::error::ConfigError;

pub const SKYPICKER_API_ROUTE: &str = "SKYPICKER_API_ROUTE";
pub const GOOGLE_MAPS_API_ROUTE: &str = "GOOGLE_MAPS_API_ROUTE";
pub const GOOGLE_MAPS_API_KEY: &str = "GOOGLE_MAPS_API_KEY";
pub const MYGASFEED_API_ROUTE: &str = "MYGASFEED_API_ROUTE";
pub const MYGASFEED_API_KEY: &str = "MYGASFEED_API_KEY";

/// Where each external service lives and how to authenticate with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub skypicker_route: String,
    pub google_maps_route: String,
    pub google_maps_key: String,
    pub gas_feed_route: String,
    pub gas_feed_key: String,
}

impl ProviderSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    ///
    /// The Skypicker and Google Maps routes fall back to the public
    /// endpoints. Keys and the gas feed route are required.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let optional = |name: &'static str, default: &str| -> Result<String, ConfigError> {
            match lookup(name) {
                Some(value) => non_empty(name, value),
                None => Ok(default.to_string()),
            }
        };
        let required = |name: &'static str| -> Result<String, ConfigError> {
            let value = lookup(name).ok_or(ConfigError::MissingEnv(name))?;
            non_empty(name, value)
        };

        Ok(Self {
            skypicker_route: optional(SKYPICKER_API_ROUTE, crate::skypicker::DEFAULT_BASE_URL)?,
            google_maps_route: optional(GOOGLE_MAPS_API_ROUTE, crate::distance::DEFAULT_BASE_URL)?,
            google_maps_key: required(GOOGLE_MAPS_API_KEY)?,
            gas_feed_route: required(MYGASFEED_API_ROUTE)?,
            gas_feed_key: required(MYGASFEED_API_KEY)?,
        })
    }
}

fn non_empty(name: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidValue {
            name,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}
