//! Planner configuration.

use std::time::Duration;

use crate::retry::RetryPolicy;

/// Configuration parameters for trip planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Maximum number of airports to consider on each side.
    pub airport_limit: usize,

    /// Half the side of the airport search box, in degrees.
    /// Not normalized by latitude.
    pub airport_box_degrees: f64,

    /// Security and boarding buffer at each airport (minutes).
    pub dwell_time_mins: u32,

    /// Maximum number of flight searches in flight at once.
    /// Should respect the flight search rate limit.
    pub max_concurrent_searches: usize,

    /// How long to wait for the flight fan-out before returning what
    /// has arrived. `None` waits for every pair to settle.
    pub fan_out_timeout: Option<Duration>,

    /// Partner tag sent with flight searches.
    pub partner: String,

    /// Locale sent with location searches.
    pub locale: String,

    /// Retries for every external call the planner makes.
    pub retry: RetryPolicy,
}

impl PlannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_airport_limit(mut self, limit: usize) -> Self {
        self.airport_limit = limit;
        self
    }

    pub fn with_dwell_time_mins(mut self, mins: u32) -> Self {
        self.dwell_time_mins = mins;
        self
    }

    pub fn with_max_concurrent_searches(mut self, n: usize) -> Self {
        self.max_concurrent_searches = n;
        self
    }

    pub fn with_fan_out_timeout(mut self, timeout: Duration) -> Self {
        self.fan_out_timeout = Some(timeout);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Dwell time in seconds.
    pub fn dwell_secs(&self) -> u32 {
        self.dwell_time_mins.saturating_mul(60)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            airport_limit: 20,
            airport_box_degrees: 0.5,
            dwell_time_mins: 90,
            max_concurrent_searches: 8,
            fan_out_timeout: None,
            partner: "picky".to_string(),
            locale: "en-US".to_string(),
            retry: RetryPolicy::default(),
        }
    }
}
