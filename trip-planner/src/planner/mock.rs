//! In-memory collaborators for planner tests.
//!
//! Each mock counts its calls so tests can assert how the planner used it.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::distance::{DistanceMatrixResponse, MatrixElement, MatrixRow, Measure};
use crate::domain::{AirportCode, Coordinate};
use crate::error::{ProviderError, Service};
use crate::gas::{GasPriceResponse, GasStatus, PriceField, StationPrice};
use crate::skypicker::{FlightDto, FlightsResponse, LatLon, LocationDto, LocationsResponse};

use super::provider::{
    DistanceMatrix, FlightQuery, FlightSearch, GasPriceLookup, GasPriceQuery, LocationQuery,
    LocationSearch,
};

pub fn code(s: &str) -> AirportCode {
    AirportCode::parse(s).unwrap()
}

pub fn point(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

/// Airports served by whichever search box contains them.
pub struct MockLocations {
    airports: Vec<(String, f64, f64)>,
    failure: Option<fn() -> ProviderError>,
    calls: AtomicUsize,
}

impl MockLocations {
    pub fn new(airports: &[(&str, f64, f64)]) -> Self {
        Self {
            airports: airports
                .iter()
                .map(|&(c, lat, lon)| (c.to_string(), lat, lon))
                .collect(),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(failure: fn() -> ProviderError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new(&[])
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LocationSearch for MockLocations {
    async fn search_locations(
        &self,
        query: &LocationQuery,
    ) -> Result<LocationsResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = self.failure {
            return Err(failure());
        }

        let locations = self
            .airports
            .iter()
            .filter(|(_, lat, lon)| query.bbox.contains(point(*lat, *lon)))
            .take(query.limit)
            .map(|(c, lat, lon)| LocationDto {
                code: Some(c.clone()),
                name: None,
                location: Some(LatLon {
                    lat: *lat,
                    lon: *lon,
                }),
            })
            .collect();

        Ok(LocationsResponse {
            locations: Some(locations),
        })
    }
}

/// How a pair's flight search misbehaves.
#[derive(Debug, Clone, Copy)]
pub enum PairFault {
    /// Transient failure on every attempt.
    Network,
    /// Response without a `data` field.
    Malformed,
    /// Answers only after this long.
    Slow(Duration),
}

/// Flights per airport pair, with optional per-pair faults.
#[derive(Default)]
pub struct MockFlights {
    flights: HashMap<(AirportCode, AirportCode), Vec<FlightDto>>,
    faults: HashMap<(AirportCode, AirportCode), PairFault>,
    calls: Mutex<Vec<(AirportCode, AirportCode)>>,
    running: AtomicUsize,
    peak: AtomicUsize,
}

impl MockFlights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flight from `from` to `to`.
    pub fn with_flight(mut self, from: &str, to: &str, id: &str, price: f64, duration: &str) -> Self {
        self.flights
            .entry((code(from), code(to)))
            .or_default()
            .push(FlightDto {
                id: id.to_string(),
                price,
                fly_duration: duration.to_string(),
                airlines: vec!["WN".to_string()],
                routes: vec![serde_json::json!([from, to])],
            });
        self
    }

    pub fn with_fault(mut self, from: &str, to: &str, fault: PairFault) -> Self {
        self.faults.insert((code(from), code(to)), fault);
        self
    }

    pub fn calls(&self) -> Vec<(AirportCode, AirportCode)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, from: &str, to: &str) -> usize {
        let pair = (code(from), code(to));
        self.calls().iter().filter(|p| **p == pair).count()
    }

    pub fn distinct_pairs(&self) -> HashSet<(AirportCode, AirportCode)> {
        self.calls().into_iter().collect()
    }

    /// Most searches seen in flight at once.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl FlightSearch for MockFlights {
    async fn search_flights(&self, query: &FlightQuery) -> Result<FlightsResponse, ProviderError> {
        let pair = (query.origin, query.destination);
        self.calls.lock().unwrap().push(pair);

        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        // Yield so concurrent searches overlap.
        tokio::time::sleep(Duration::from_millis(2)).await;

        let result = match self.faults.get(&pair) {
            Some(PairFault::Network) => Err(ProviderError::Timeout(Service::Flights)),
            Some(PairFault::Malformed) => Ok(FlightsResponse { data: None }),
            Some(PairFault::Slow(delay)) => {
                tokio::time::sleep(*delay).await;
                Ok(self.answer(pair))
            }
            None => Ok(self.answer(pair)),
        };

        self.running.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

impl MockFlights {
    fn answer(&self, pair: (AirportCode, AirportCode)) -> FlightsResponse {
        FlightsResponse {
            data: Some(self.flights.get(&pair).cloned().unwrap_or_default()),
        }
    }
}

/// Road network where every cell has the same short leg, except that the
/// long trip between far-apart points gets a long leg.
///
/// Points listed as unreachable have no route to or from anywhere. A
/// failing route rejects the single-cell request between its two points.
pub struct MockDistances {
    unreachable: Vec<Coordinate>,
    failing: Option<(Coordinate, Coordinate)>,
    calls: Mutex<Vec<(usize, usize)>>,
}

/// Short drive: 30 km, 30 minutes.
pub const SHORT_LEG: (u64, u64) = (30_000, 1_800);

/// Long drive: 612 km, 6 hours.
pub const LONG_LEG: (u64, u64) = (612_000, 21_600);

impl MockDistances {
    pub fn new() -> Self {
        Self {
            unreachable: vec![],
            failing: None,
            calls: Mutex::new(vec![]),
        }
    }

    pub fn with_unreachable(mut self, point: Coordinate) -> Self {
        self.unreachable.push(point);
        self
    }

    pub fn with_failing_route(mut self, from: Coordinate, to: Coordinate) -> Self {
        self.failing = Some((from, to));
        self
    }

    /// `(origins, destinations)` sizes of every request.
    pub fn calls(&self) -> Vec<(usize, usize)> {
        self.calls.lock().unwrap().clone()
    }

    fn element(&self, from: Coordinate, to: Coordinate) -> MatrixElement {
        if self.unreachable.contains(&from) || self.unreachable.contains(&to) {
            return MatrixElement {
                status: Some("ZERO_RESULTS".to_string()),
                distance: None,
                duration: None,
            };
        }

        let far = (from.latitude() - to.latitude()).abs() > 1.0;
        let (meters, secs) = if far { LONG_LEG } else { SHORT_LEG };
        MatrixElement {
            status: Some("OK".to_string()),
            distance: Some(Measure {
                value: meters,
                text: None,
            }),
            duration: Some(Measure {
                value: secs,
                text: None,
            }),
        }
    }
}

impl DistanceMatrix for MockDistances {
    async fn distance_matrix(
        &self,
        origins: &[Coordinate],
        destinations: &[Coordinate],
    ) -> Result<DistanceMatrixResponse, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((origins.len(), destinations.len()));

        let failing = self
            .failing
            .is_some_and(|(from, to)| origins == [from] && destinations == [to]);
        if failing {
            return Err(ProviderError::Api {
                service: Service::DistanceMatrix,
                status: 400,
                message: "bad".to_string(),
            });
        }

        let rows = origins
            .iter()
            .map(|&from| MatrixRow {
                elements: destinations
                    .iter()
                    .map(|&to| self.element(from, to))
                    .collect(),
            })
            .collect();

        Ok(DistanceMatrixResponse {
            status: Some("OK".to_string()),
            error_message: None,
            rows: Some(rows),
        })
    }
}

/// Gas stations with fixed regular prices per gallon.
pub struct MockGas {
    prices: Vec<String>,
    calls: AtomicUsize,
}

impl MockGas {
    pub fn new(prices: &[&str]) -> Self {
        Self {
            prices: prices.iter().map(|p| p.to_string()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GasPriceLookup for MockGas {
    async fn nearby_prices(
        &self,
        _query: &GasPriceQuery,
    ) -> Result<GasPriceResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GasPriceResponse {
            status: GasStatus {
                code: 200,
                error: None,
            },
            stations: self
                .prices
                .iter()
                .map(|p| StationPrice {
                    station: Some("Test".to_string()),
                    reg_price: Some(PriceField::Text(p.clone())),
                    ..Default::default()
                })
                .collect(),
        })
    }
}
