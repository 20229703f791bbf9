//! Cost-equivalence ranking of travel options.
//!
//! Travel time is priced with a power law `f(h) = a * h^b` fitted through
//! two points the traveler supplies: what one hour of travel is worth to
//! them, and what ten hours is worth. Each option's equivalent cost is its
//! price plus `f` of its door-to-door hours; cheaper ranks first.

use serde::Serialize;

use crate::domain::TravelOption;
use crate::error::ConfigError;

/// A traveler's calibrated value of time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeValue {
    a: f64,
    b: f64,
}

impl TimeValue {
    /// Fit the curve through `(1, one_hour)` and `(10, ten_hours)`.
    ///
    /// Both values must be positive and finite.
    pub fn calibrate(one_hour: f64, ten_hours: f64) -> Result<Self, ConfigError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(one_hour) || !valid(ten_hours) {
            return Err(ConfigError::InvalidCalibration {
                one_hour,
                ten_hours,
            });
        }

        Ok(Self {
            a: one_hour,
            b: (ten_hours / one_hour).ln() / 10f64.ln(),
        })
    }

    /// Scale factor; the value of one hour.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Exponent. Positive when longer trips cost more per trip.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Dollar value of `hours` of travel.
    pub fn value(&self, hours: f64) -> f64 {
        self.a * hours.powf(self.b)
    }

    /// Dollar value of `secs` seconds of travel.
    pub fn value_of_secs(&self, secs: u32) -> f64 {
        self.value(f64::from(secs) / 3600.0)
    }
}

/// A travel option with its place in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedOption {
    #[serde(flatten)]
    pub option: TravelOption,
    /// Monetary cost plus the value of the travel time.
    pub equivalent_cost: f64,
    /// 0-based position, best first.
    pub rank: usize,
}

/// Rank options by equivalent cost, cheapest first.
///
/// Ties keep their input order. Ranks are dense, `0..n`.
pub fn rank_options(options: Vec<TravelOption>, time_value: &TimeValue) -> Vec<RankedOption> {
    let mut scored: Vec<(f64, TravelOption)> = options
        .into_iter()
        .map(|option| {
            let cost =
                option.monetary_cost() + time_value.value_of_secs(option.total_travel_time_secs());
            (cost, option)
        })
        .collect();

    scored.sort_by(|(a, _), (b, _)| a.total_cmp(b));

    scored
        .into_iter()
        .enumerate()
        .map(|(rank, (equivalent_cost, option))| RankedOption {
            option,
            equivalent_cost,
            rank,
        })
        .collect()
}
