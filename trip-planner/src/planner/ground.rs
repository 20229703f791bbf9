//! The driving option.

use tracing::{debug, info};

use crate::distance::{GeoDistanceProvider, Waypoint};
use crate::domain::{Coordinate, TravelOption};
use crate::error::PlanError;
use crate::gas::GasPriceEstimator;
use crate::retry::RetryPolicy;

use super::provider::{DistanceMatrix, GasPriceLookup};

/// Drives straight from origin to destination and prices the fuel.
pub struct GroundOptionAggregator<'a, D: DistanceMatrix, G: GasPriceLookup> {
    distances: GeoDistanceProvider<'a, D>,
    gas: &'a GasPriceEstimator<G>,
}

impl<'a, D: DistanceMatrix, G: GasPriceLookup> GroundOptionAggregator<'a, D, G> {
    pub fn new(distances: &'a D, gas: &'a GasPriceEstimator<G>, retry: &'a RetryPolicy) -> Self {
        Self {
            distances: GeoDistanceProvider::new(distances, retry),
            gas,
        }
    }

    /// The driving option, or `None` when there is no road route.
    pub async fn option(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Option<TravelOption>, PlanError> {
        let table = self
            .distances
            .table(
                &[(Waypoint::Origin, origin)],
                &[(Waypoint::Destination, destination)],
            )
            .await?;

        let Some(leg) = table.get(Waypoint::Origin, Waypoint::Destination) else {
            info!("No road route between origin and destination");
            return Ok(None);
        };
        if leg.duration_secs == 0 {
            debug!(distance_meters = leg.distance_meters, "Zero-length drive, no driving option");
            return Ok(None);
        }

        let estimate = self.gas.estimate(leg.distance_meters, origin).await;
        debug!(
            distance_meters = leg.distance_meters,
            cost = estimate.cost,
            source = ?estimate.source,
            "Estimated driving cost"
        );

        let option = TravelOption::driving(
            leg,
            estimate.cost,
            estimate.cost_per_liter,
            estimate.source,
        )?;
        Ok(Some(option))
    }
}
