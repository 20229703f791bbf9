//! myGasFeed API types.

use std::fmt;

use serde::Deserialize;

/// Grade of fuel to price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FuelType {
    #[default]
    Regular,
    Midgrade,
    Premium,
    Diesel,
}

impl FuelType {
    /// Path segment used by the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Regular => "reg",
            FuelType::Midgrade => "mid",
            FuelType::Premium => "pre",
            FuelType::Diesel => "diesel",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Station ordering requested from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Distance,
    Price,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Distance => "distance",
            SortBy::Price => "price",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response from a station search.
#[derive(Debug, Clone, Deserialize)]
pub struct GasPriceResponse {
    pub status: GasStatus,

    #[serde(default)]
    pub stations: Vec<StationPrice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GasStatus {
    /// HTTP-like status code; 200 on success.
    pub code: u16,

    pub error: Option<String>,
}

/// Prices at one station, per gallon.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationPrice {
    pub station: Option<String>,
    pub reg_price: Option<PriceField>,
    pub mid_price: Option<PriceField>,
    pub pre_price: Option<PriceField>,
    pub diesel_price: Option<PriceField>,
}

impl StationPrice {
    /// Price per gallon for `fuel`, if the station reports a usable one.
    pub fn price_for(&self, fuel: FuelType) -> Option<f64> {
        let field = match fuel {
            FuelType::Regular => &self.reg_price,
            FuelType::Midgrade => &self.mid_price,
            FuelType::Premium => &self.pre_price,
            FuelType::Diesel => &self.diesel_price,
        };
        field
            .as_ref()
            .and_then(PriceField::value)
            .filter(|p| p.is_finite() && *p > 0.0)
    }
}

/// Prices arrive as strings (`"3.59"`, `"N/A"`) or, occasionally, numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Number(f64),
    Text(String),
}

impl PriceField {
    pub fn value(&self) -> Option<f64> {
        match self {
            PriceField::Number(n) => Some(*n),
            PriceField::Text(s) => s.trim().parse().ok(),
        }
    }
}
