//! Flight-based travel options between two coordinates.
//!
//! 1. Find airports near each end of the trip.
//! 2. One distance lookup per side: trip origin to every departure
//!    airport, every arrival airport to the trip destination.
//! 3. Search flights for every (departure, arrival) airport pair.
//! 4. Turn each flight into a door-to-door option.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::distance::{GeoDistanceProvider, Grouping, Waypoint};
use crate::domain::{
    Airport, AirportCode, Coordinate, DurationFormat, FlightDetails, FlightId, FlightOption,
    TravelLeg, TravelOption,
};
use crate::error::{PartialResultWarning, ProviderError};
use crate::skypicker::convert_flights;

use super::config::PlannerConfig;
use super::fanout::{Outcome, fan_out};
use super::locator::{AirportLocator, AirportMap};
use super::provider::{DistanceMatrix, FlightQuery, FlightSearch, LocationSearch};

/// Flight options and whatever went missing while gathering them.
#[derive(Debug, Default)]
pub struct AirOptions {
    pub options: Vec<TravelOption>,
    pub warnings: Vec<PartialResultWarning>,
}

/// Composes airport discovery, road legs and flight search.
pub struct AirOptionAggregator<'a, L, F, D>
where
    L: LocationSearch,
    F: FlightSearch,
    D: DistanceMatrix,
{
    locator: &'a AirportLocator<L>,
    flights: &'a F,
    distances: GeoDistanceProvider<'a, D>,
    config: &'a PlannerConfig,
}

impl<'a, L, F, D> AirOptionAggregator<'a, L, F, D>
where
    L: LocationSearch,
    F: FlightSearch,
    D: DistanceMatrix,
{
    pub fn new(
        locator: &'a AirportLocator<L>,
        flights: &'a F,
        distances: &'a D,
        config: &'a PlannerConfig,
    ) -> Self {
        Self {
            locator,
            flights,
            distances: GeoDistanceProvider::new(distances, &config.retry),
            config,
        }
    }

    /// Every flight option found between `origin` and `destination` on `date`.
    ///
    /// Airport and distance lookups failing fails the whole call. A single
    /// airport pair failing, or not finishing before `deadline`, only
    /// leaves a warning.
    pub async fn options(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        date: NaiveDate,
        deadline: Option<Instant>,
    ) -> Result<AirOptions, ProviderError> {
        let (origin_airports, destination_airports) =
            futures::try_join!(self.locate(origin), self.locate(destination))?;

        debug!(
            origin_airports = origin_airports.len(),
            destination_airports = destination_airports.len(),
            "Located airports"
        );

        if origin_airports.is_empty() || destination_airports.is_empty() {
            info!("No airports on one side of the trip");
            return Ok(AirOptions::default());
        }

        let (access, egress) = futures::try_join!(
            self.access_legs(origin, &origin_airports),
            self.egress_legs(destination, &destination_airports),
        )?;

        let mut result = AirOptions::default();
        let departures = reachable(&origin_airports, &access, &mut result.warnings);
        let arrivals = reachable(&destination_airports, &egress, &mut result.warnings);

        let pairs: Vec<(AirportCode, AirportCode)> = departures
            .iter()
            .flat_map(|&from| arrivals.iter().map(move |&to| (from, to)))
            // An airport inside both boxes is never paired with itself.
            .filter(|(from, to)| from != to)
            .collect();

        info!(pairs = pairs.len(), "Searching flights");

        let flights = self.flights;
        let retry = &self.config.retry;
        let partner = self.config.partner.as_str();
        let outcomes = fan_out(
            pairs,
            self.config.max_concurrent_searches,
            deadline,
            move |(from, to)| async move {
                let query = FlightQuery::single_day(from, to, date, partner);
                retry.run(|| search_pair(flights, &query)).await
            },
        )
        .await;

        let dwell_secs = self.config.dwell_secs();
        for ((from, to), outcome) in outcomes {
            match outcome {
                Outcome::Done(found) => {
                    debug!(origin = %from, destination = %to, flights = found.len(), "Pair searched");
                    for flight in found.into_values() {
                        let details = FlightDetails {
                            origin_airport: from,
                            destination_airport: to,
                            flight_id: flight.id,
                            airlines: flight.airlines,
                            routes: flight.routes,
                            flight_duration_secs: flight.flight_duration_secs,
                            access_secs: access[&from].duration_secs,
                            egress_secs: egress[&to].duration_secs,
                            dwell_secs,
                        };
                        match TravelOption::flight(details, flight.price) {
                            Ok(option) => result.options.push(option),
                            Err(e) => warn!(origin = %from, destination = %to, error = %e, "Skipping flight"),
                        }
                    }
                }
                Outcome::Failed(e) => {
                    warn!(
                        origin = %from,
                        destination = %to,
                        attempts = e.attempts,
                        error = %e.error,
                        "Flight search failed"
                    );
                    result.warnings.push(PartialResultWarning::PairFailed {
                        origin: from,
                        destination: to,
                        attempts: e.attempts,
                        error: e.error.to_string(),
                    });
                }
                Outcome::TimedOut => {
                    warn!(origin = %from, destination = %to, "Flight search timed out");
                    result.warnings.push(PartialResultWarning::PairTimedOut {
                        origin: from,
                        destination: to,
                    });
                }
            }
        }

        Ok(result)
    }

    async fn locate(&self, center: Coordinate) -> Result<std::sync::Arc<AirportMap>, ProviderError> {
        let limit = self.config.airport_limit;
        Ok(self
            .config
            .retry
            .run(|| self.locator.locate(center, limit))
            .await?)
    }

    /// Drive from the trip origin to each departure airport.
    async fn access_legs(
        &self,
        origin: Coordinate,
        airports: &AirportMap,
    ) -> Result<HashMap<AirportCode, TravelLeg>, ProviderError> {
        let mut grouped = self
            .distances
            .lookup(&[(Waypoint::Origin, origin)], &waypoints(airports), Grouping::ByOrigin)
            .await?;
        Ok(by_airport(grouped.remove(&Waypoint::Origin)))
    }

    /// Drive from each arrival airport to the trip destination.
    async fn egress_legs(
        &self,
        destination: Coordinate,
        airports: &AirportMap,
    ) -> Result<HashMap<AirportCode, TravelLeg>, ProviderError> {
        let mut grouped = self
            .distances
            .lookup(
                &waypoints(airports),
                &[(Waypoint::Destination, destination)],
                Grouping::ByDestination,
            )
            .await?;
        Ok(by_airport(grouped.remove(&Waypoint::Destination)))
    }
}

async fn search_pair<F: FlightSearch>(
    flights: &F,
    query: &FlightQuery,
) -> Result<BTreeMap<FlightId, FlightOption>, ProviderError> {
    let response = flights.search_flights(query).await?;
    convert_flights(response, DurationFormat::HoursMinutes)
}

fn waypoints(airports: &AirportMap) -> Vec<(Waypoint, Coordinate)> {
    airports
        .values()
        .map(|a: &Airport| (Waypoint::Airport(a.code), a.location))
        .collect()
}

fn by_airport(
    legs: Option<HashMap<Waypoint, TravelLeg>>,
) -> HashMap<AirportCode, TravelLeg> {
    legs.unwrap_or_default()
        .into_iter()
        .filter_map(|(waypoint, leg)| match waypoint {
            Waypoint::Airport(code) => Some((code, leg)),
            Waypoint::Origin | Waypoint::Destination => None,
        })
        .collect()
}

/// Airports with a road leg, in code order. The rest become warnings.
fn reachable(
    airports: &AirportMap,
    legs: &HashMap<AirportCode, TravelLeg>,
    warnings: &mut Vec<PartialResultWarning>,
) -> Vec<AirportCode> {
    let mut codes = Vec::with_capacity(airports.len());
    for &code in airports.keys() {
        if legs.contains_key(&code) {
            codes.push(code);
        } else {
            debug!(airport = %code, "No road route to airport");
            warnings.push(PartialResultWarning::AirportUnreachable { airport: code });
        }
    }
    codes
}
