//! Trip planning: gather air and ground options, then rank them.

use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::time::Instant;
use tracing::{info, instrument, warn};

use crate::config::ProviderSettings;
use crate::distance::{GoogleMapsClient, GoogleMapsConfig};
use crate::domain::Coordinate;
use crate::error::{PartialResultWarning, PlanError};
use crate::gas::{GasConfig, GasPriceEstimator, MyGasFeedClient, MyGasFeedConfig};
use crate::skypicker::{SkypickerClient, SkypickerConfig};

use super::air::AirOptionAggregator;
use super::config::PlannerConfig;
use super::ground::GroundOptionAggregator;
use super::locator::AirportLocator;
use super::provider::{DistanceMatrix, FlightSearch, GasPriceLookup, LocationSearch};
use super::rank::{RankedOption, TimeValue, rank_options};

/// Request to plan a trip.
#[derive(Debug, Clone)]
pub struct TripRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub travel_date: NaiveDate,

    /// What one hour of travel is worth to the traveler, in dollars.
    pub value_of_one_hour: f64,

    /// What ten hours of travel is worth to the traveler, in dollars.
    pub value_of_ten_hours: f64,

    /// Overrides the configured fan-out timeout for this request.
    pub timeout: Option<Duration>,
}

impl TripRequest {
    pub fn new(
        origin: Coordinate,
        destination: Coordinate,
        travel_date: NaiveDate,
        value_of_one_hour: f64,
        value_of_ten_hours: f64,
    ) -> Self {
        Self {
            origin,
            destination,
            travel_date,
            value_of_one_hour,
            value_of_ten_hours,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Ranked options for a trip.
#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    /// Best first.
    pub options: Vec<RankedOption>,

    /// Parts of the search that contributed nothing.
    pub warnings: Vec<PartialResultWarning>,
}

impl TripPlan {
    /// Whether an option may be missing because a lookup failed or timed out.
    ///
    /// Unreachable airports are not counted: they were looked up and have
    /// no road route.
    pub fn is_partial(&self) -> bool {
        self.warnings.iter().any(|w| {
            matches!(
                w,
                PartialResultWarning::PairFailed { .. }
                    | PartialResultWarning::PairTimedOut { .. }
                    | PartialResultWarning::DrivingUnavailable { .. }
            )
        })
    }
}

/// Plans trips against a set of external services.
pub struct TripPlanner<L, F, D, G>
where
    L: LocationSearch,
    F: FlightSearch,
    D: DistanceMatrix,
    G: GasPriceLookup,
{
    locator: AirportLocator<L>,
    flights: F,
    distances: D,
    gas: GasPriceEstimator<G>,
    config: PlannerConfig,
}

impl TripPlanner<SkypickerClient, SkypickerClient, GoogleMapsClient, MyGasFeedClient> {
    /// Build a planner talking to the real services.
    pub fn connect(
        settings: &ProviderSettings,
        config: PlannerConfig,
        gas_config: GasConfig,
    ) -> Result<Self, PlanError> {
        let skypicker = SkypickerClient::new(
            SkypickerConfig::new(settings.skypicker_route.clone())
                .with_max_concurrent(config.max_concurrent_searches),
        )?;
        let maps = GoogleMapsClient::new(
            GoogleMapsConfig::new(settings.google_maps_key.clone())
                .with_base_url(settings.google_maps_route.clone()),
        )?;
        let gas = MyGasFeedClient::new(MyGasFeedConfig::new(
            settings.gas_feed_route.clone(),
            settings.gas_feed_key.clone(),
        ))?;

        Ok(Self::new(
            skypicker.clone(),
            skypicker,
            maps,
            GasPriceEstimator::new(gas, gas_config),
            config,
        ))
    }
}

impl<L, F, D, G> TripPlanner<L, F, D, G>
where
    L: LocationSearch,
    F: FlightSearch,
    D: DistanceMatrix,
    G: GasPriceLookup,
{
    pub fn new(
        locations: L,
        flights: F,
        distances: D,
        gas: GasPriceEstimator<G>,
        config: PlannerConfig,
    ) -> Self {
        Self {
            locator: AirportLocator::new(locations, &config),
            flights,
            distances,
            gas,
            config,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn gas(&self) -> &GasPriceEstimator<G> {
        &self.gas
    }

    pub fn locator(&self) -> &AirportLocator<L> {
        &self.locator
    }

    /// Find and rank every way of making the trip.
    ///
    /// Calibration is checked before any service is called. Flight searches
    /// still running when the timeout passes are abandoned and the plan is
    /// returned with what arrived. A failed driving lookup leaves the
    /// flights in place and is reported as a warning.
    #[instrument(
        skip(self, request),
        fields(
            origin = %request.origin,
            destination = %request.destination,
            date = %request.travel_date,
        )
    )]
    pub async fn plan_trip(&self, request: &TripRequest) -> Result<TripPlan, PlanError> {
        let time_value =
            TimeValue::calibrate(request.value_of_one_hour, request.value_of_ten_hours)?;

        let deadline = request
            .timeout
            .or(self.config.fan_out_timeout)
            .map(|t| Instant::now() + t);

        let air = AirOptionAggregator::new(&self.locator, &self.flights, &self.distances, &self.config);
        let ground = GroundOptionAggregator::new(&self.distances, &self.gas, &self.config.retry);

        let (air, ground) = futures::join!(
            air.options(request.origin, request.destination, request.travel_date, deadline),
            ground.option(request.origin, request.destination),
        );
        let air = air?;

        let mut options = air.options;
        let mut warnings = air.warnings;
        match ground {
            Ok(driving) => options.extend(driving),
            Err(e) => {
                warn!(error = %e, "Driving lookup failed, ranking flights only");
                warnings.push(PartialResultWarning::DrivingUnavailable {
                    error: e.to_string(),
                });
            }
        }

        let options = rank_options(options, &time_value);
        info!(
            options = options.len(),
            warnings = warnings.len(),
            "Planned trip"
        );

        Ok(TripPlan { options, warnings })
    }
}
