//! Travel options: the common record produced by every aggregator.

use serde::Serialize;

use super::{AirportCode, DomainError, DurationFormat, FlightId, TravelLeg, format_distance};

/// How the traveler gets there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMethod {
    Flight,
    Driving,
}

/// Where a fuel price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// Fetched from the gas price service for this estimate.
    Live,
    /// Reused from an earlier lookup.
    Cached,
    /// The configured fallback price.
    Default,
}

/// Door-to-door breakdown of a flight option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightDetails {
    pub origin_airport: AirportCode,
    pub destination_airport: AirportCode,
    pub flight_id: FlightId,
    pub airlines: Vec<String>,
    /// Provider route records, passed through untouched.
    pub routes: Vec<serde_json::Value>,
    pub flight_duration_secs: u32,
    /// Drive from the trip origin to the departure airport.
    pub access_secs: u32,
    /// Drive from the arrival airport to the trip destination.
    pub egress_secs: u32,
    /// Security and boarding buffer, spent once at each airport.
    pub dwell_secs: u32,
}

impl FlightDetails {
    /// Flight time plus both drives plus a dwell at each airport.
    pub fn total_travel_secs(&self) -> u32 {
        self.flight_duration_secs
            .saturating_add(self.access_secs)
            .saturating_add(self.egress_secs)
            .saturating_add(self.dwell_secs.saturating_mul(2))
    }
}

/// Breakdown of a driving option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrivingDetails {
    pub distance_meters: u32,
    pub distance: String,
    pub cost_per_liter: f64,
    pub price_source: PriceSource,
}

/// Method-specific part of a travel option.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "travel_method", rename_all = "snake_case")]
pub enum TravelMode {
    Flight(FlightDetails),
    Driving(DrivingDetails),
}

/// One way of making the trip, before ranking.
///
/// Always takes a positive amount of time and costs a finite,
/// non-negative amount; the constructors refuse anything else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelOption {
    #[serde(flatten)]
    mode: TravelMode,
    total_travel_time_secs: u32,
    travel_time: String,
    monetary_cost: f64,
}

impl TravelOption {
    /// A flight option costing the ticket price.
    pub fn flight(details: FlightDetails, price: f64) -> Result<Self, DomainError> {
        let total = details.total_travel_secs();
        Self::new(TravelMode::Flight(details), total, price)
    }

    /// A driving option costing the estimated fuel.
    pub fn driving(
        leg: TravelLeg,
        fuel_cost: f64,
        cost_per_liter: f64,
        price_source: PriceSource,
    ) -> Result<Self, DomainError> {
        let details = DrivingDetails {
            distance_meters: leg.distance_meters,
            distance: format_distance(leg.distance_meters),
            cost_per_liter,
            price_source,
        };
        Self::new(TravelMode::Driving(details), leg.duration_secs, fuel_cost)
    }

    fn new(mode: TravelMode, total_secs: u32, cost: f64) -> Result<Self, DomainError> {
        if total_secs == 0 {
            return Err(DomainError::ZeroTravelTime);
        }
        if !cost.is_finite() || cost < 0.0 {
            return Err(DomainError::InvalidCost(cost));
        }
        Ok(Self {
            mode,
            total_travel_time_secs: total_secs,
            travel_time: DurationFormat::HoursMinutes.format(total_secs),
            monetary_cost: cost,
        })
    }

    pub fn method(&self) -> TravelMethod {
        match self.mode {
            TravelMode::Flight(_) => TravelMethod::Flight,
            TravelMode::Driving(_) => TravelMethod::Driving,
        }
    }

    pub fn mode(&self) -> &TravelMode {
        &self.mode
    }

    pub fn origin_airport(&self) -> Option<AirportCode> {
        match &self.mode {
            TravelMode::Flight(f) => Some(f.origin_airport),
            TravelMode::Driving(_) => None,
        }
    }

    pub fn destination_airport(&self) -> Option<AirportCode> {
        match &self.mode {
            TravelMode::Flight(f) => Some(f.destination_airport),
            TravelMode::Driving(_) => None,
        }
    }

    pub fn total_travel_time_secs(&self) -> u32 {
        self.total_travel_time_secs
    }

    /// Travel time as `"{h}h {m}m"`.
    pub fn travel_time(&self) -> &str {
        &self.travel_time
    }

    pub fn monetary_cost(&self) -> f64 {
        self.monetary_cost
    }
}
