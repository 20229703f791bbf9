//! Scenario tests for the flight option aggregator.

use super::mock::*;
use super::*;
use crate::domain::{TravelMethod, TravelMode};
use crate::error::PartialResultWarning;
use crate::retry::RetryPolicy;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::Instant;

const AIRPORTS: &[(&str, f64, f64)] = &[
    ("SFO", 37.6189, -122.375),
    ("OAK", 37.7126, -122.2197),
    ("LAX", 33.9416, -118.4085),
    ("BUR", 34.2007, -118.3585),
    // Outside both search boxes.
    ("SAN", 32.7338, -117.1933),
];

fn origin() -> crate::domain::Coordinate {
    point(37.6738, -122.0795)
}

fn destination() -> crate::domain::Coordinate {
    point(34.0933, -118.1165)
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 6, 1).unwrap()
}

fn config() -> PlannerConfig {
    PlannerConfig::default().with_retry(RetryPolicy {
        max_attempts: 2,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(1),
    })
}

fn pair_set(options: &[crate::domain::TravelOption]) -> HashSet<(String, String)> {
    options
        .iter()
        .map(|o| {
            (
                o.origin_airport().unwrap().to_string(),
                o.destination_airport().unwrap().to_string(),
            )
        })
        .collect()
}

fn owned(pairs: &[(&str, &str)]) -> HashSet<(String, String)> {
    pairs
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

#[tokio::test]
async fn options_for_every_pair_with_flights() {
    let locations = MockLocations::new(AIRPORTS);
    let flights = MockFlights::new()
        .with_flight("SFO", "LAX", "sfo-lax-1", 89.0, "1h 25m")
        .with_flight("SFO", "LAX", "sfo-lax-2", 129.0, "1h 30m")
        .with_flight("SFO", "BUR", "sfo-bur", 99.0, "1h 20m")
        .with_flight("OAK", "LAX", "oak-lax", 79.0, "1h 25m");
    let distances = MockDistances::new();
    let config = config();
    let locator = AirportLocator::new(&locations, &config);

    let air = AirOptionAggregator::new(&locator, &flights, &distances, &config);
    let result = air
        .options(origin(), destination(), date(), None)
        .await
        .unwrap();

    // Every pair was searched, OAK-BUR found nothing.
    assert_eq!(flights.distinct_pairs().len(), 4);
    assert_eq!(result.options.len(), 4);
    assert_eq!(
        pair_set(&result.options),
        owned(&[("SFO", "LAX"), ("SFO", "BUR"), ("OAK", "LAX")])
    );
    assert!(result.warnings.is_empty());
    assert!(
        result
            .options
            .iter()
            .all(|o| o.method() == TravelMethod::Flight)
    );
}

#[tokio::test]
async fn door_to_door_time_includes_drives_and_dwell() {
    let locations = MockLocations::new(AIRPORTS);
    let flights = MockFlights::new().with_flight("OAK", "BUR", "oak-bur", 65.0, "1h 25m");
    let distances = MockDistances::new();
    let config = config();
    let locator = AirportLocator::new(&locations, &config);

    let air = AirOptionAggregator::new(&locator, &flights, &distances, &config);
    let result = air
        .options(origin(), destination(), date(), None)
        .await
        .unwrap();

    assert_eq!(result.options.len(), 1);
    let option = &result.options[0];
    let (access, egress) = (SHORT_LEG.1 as u32, SHORT_LEG.1 as u32);
    assert_eq!(
        option.total_travel_time_secs(),
        5_100 + access + egress + 2 * 5_400
    );
    assert_eq!(option.monetary_cost(), 65.0);

    match option.mode() {
        TravelMode::Flight(details) => {
            assert_eq!(details.flight_id.as_str(), "oak-bur");
            assert_eq!(details.access_secs, access);
            assert_eq!(details.egress_secs, egress);
            assert_eq!(details.airlines, vec!["WN".to_string()]);
            assert_eq!(details.routes.len(), 1);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn one_distance_lookup_per_side() {
    let locations = MockLocations::new(AIRPORTS);
    let flights = MockFlights::new();
    let distances = MockDistances::new();
    let config = config();
    let locator = AirportLocator::new(&locations, &config);

    let air = AirOptionAggregator::new(&locator, &flights, &distances, &config);
    air.options(origin(), destination(), date(), None)
        .await
        .unwrap();

    let mut calls = distances.calls();
    calls.sort();
    // Origin to 2 airports, 2 airports to destination.
    assert_eq!(calls, vec![(1, 2), (2, 1)]);
}

#[tokio::test]
async fn failed_pair_does_not_sink_the_others() {
    let locations = MockLocations::new(AIRPORTS);
    let flights = MockFlights::new()
        .with_flight("SFO", "LAX", "a", 89.0, "1h 25m")
        .with_flight("SFO", "BUR", "b", 99.0, "1h 20m")
        .with_flight("OAK", "LAX", "c", 79.0, "1h 25m")
        .with_flight("OAK", "BUR", "d", 59.0, "1h 25m")
        .with_fault("OAK", "LAX", PairFault::Network);
    let distances = MockDistances::new();
    let config = config();
    let locator = AirportLocator::new(&locations, &config);

    let air = AirOptionAggregator::new(&locator, &flights, &distances, &config);
    let result = air
        .options(origin(), destination(), date(), None)
        .await
        .unwrap();

    assert_eq!(
        pair_set(&result.options),
        owned(&[("SFO", "LAX"), ("SFO", "BUR"), ("OAK", "BUR")])
    );
    // Transient failures are retried.
    assert_eq!(flights.calls_for("OAK", "LAX"), 2);
    assert_eq!(result.warnings.len(), 1);
    match &result.warnings[0] {
        PartialResultWarning::PairFailed {
            origin,
            destination,
            attempts,
            ..
        } => {
            assert_eq!(origin.as_str(), "OAK");
            assert_eq!(destination.as_str(), "LAX");
            assert_eq!(*attempts, 2);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn malformed_pair_is_not_retried() {
    let locations = MockLocations::new(AIRPORTS);
    let flights = MockFlights::new()
        .with_flight("SFO", "LAX", "a", 89.0, "1h 25m")
        .with_fault("SFO", "BUR", PairFault::Malformed);
    let distances = MockDistances::new();
    let config = config();
    let locator = AirportLocator::new(&locations, &config);

    let air = AirOptionAggregator::new(&locator, &flights, &distances, &config);
    let result = air
        .options(origin(), destination(), date(), None)
        .await
        .unwrap();

    assert_eq!(result.options.len(), 1);
    assert_eq!(flights.calls_for("SFO", "BUR"), 1);
    assert!(matches!(
        result.warnings[..],
        [PartialResultWarning::PairFailed { attempts: 1, .. }]
    ));
}

#[tokio::test]
async fn deadline_returns_what_arrived() {
    let locations = MockLocations::new(AIRPORTS);
    let flights = MockFlights::new()
        .with_flight("SFO", "LAX", "a", 89.0, "1h 25m")
        .with_flight("OAK", "BUR", "d", 59.0, "1h 25m")
        .with_fault("OAK", "BUR", PairFault::Slow(Duration::from_secs(30)));
    let distances = MockDistances::new();
    let config = config();
    let locator = AirportLocator::new(&locations, &config);

    let air = AirOptionAggregator::new(&locator, &flights, &distances, &config);
    let started = Instant::now();
    let deadline = started + Duration::from_millis(300);
    let result = air
        .options(origin(), destination(), date(), Some(deadline))
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(pair_set(&result.options), owned(&[("SFO", "LAX")]));
    assert_eq!(
        result.warnings,
        vec![PartialResultWarning::PairTimedOut {
            origin: code("OAK"),
            destination: code("BUR"),
        }]
    );
}

#[tokio::test]
async fn unreachable_airport_is_skipped() {
    let locations = MockLocations::new(AIRPORTS);
    let flights = MockFlights::new()
        .with_flight("SFO", "LAX", "a", 89.0, "1h 25m")
        .with_flight("OAK", "BUR", "d", 59.0, "1h 25m");
    let distances = MockDistances::new().with_unreachable(point(34.2007, -118.3585));
    let config = config();
    let locator = AirportLocator::new(&locations, &config);

    let air = AirOptionAggregator::new(&locator, &flights, &distances, &config);
    let result = air
        .options(origin(), destination(), date(), None)
        .await
        .unwrap();

    assert_eq!(pair_set(&result.options), owned(&[("SFO", "LAX")]));
    assert_eq!(flights.calls_for("OAK", "BUR"), 0);
    assert_eq!(
        result.warnings,
        vec![PartialResultWarning::AirportUnreachable {
            airport: code("BUR")
        }]
    );
}

#[tokio::test]
async fn no_airports_means_no_searches() {
    let locations = MockLocations::new(&[("SFO", 37.6189, -122.375)]);
    let flights = MockFlights::new();
    let distances = MockDistances::new();
    let config = config();
    let locator = AirportLocator::new(&locations, &config);

    let air = AirOptionAggregator::new(&locator, &flights, &distances, &config);
    let result = air
        .options(origin(), destination(), date(), None)
        .await
        .unwrap();

    assert!(result.options.is_empty());
    assert!(flights.calls().is_empty());
    assert!(distances.calls().is_empty());
}

#[tokio::test]
async fn fan_out_respects_concurrency_limit() {
    let many: Vec<(String, f64, f64)> = (0..6)
        .flat_map(|i| {
            let d = i as f64 * 0.01;
            [
                (format!("O{}A", (b'A' + i) as char), 37.6 + d, -122.1),
                (format!("D{}A", (b'A' + i) as char), 34.1 + d, -118.1),
            ]
        })
        .collect();
    let airports: Vec<(&str, f64, f64)> = many
        .iter()
        .map(|(c, lat, lon)| (c.as_str(), *lat, *lon))
        .collect();

    let locations = MockLocations::new(&airports);
    let flights = MockFlights::new();
    let distances = MockDistances::new();
    let config = config().with_max_concurrent_searches(3);
    let locator = AirportLocator::new(&locations, &config);

    let air = AirOptionAggregator::new(&locator, &flights, &distances, &config);
    air.options(origin(), destination(), date(), None)
        .await
        .unwrap();

    assert_eq!(flights.distinct_pairs().len(), 36);
    assert!(flights.peak_concurrency() <= 3);
    assert!(flights.peak_concurrency() >= 1);
}

#[tokio::test]
async fn airport_lookup_failure_fails_the_call() {
    let locations = MockLocations::failing(|| {
        crate::error::ProviderError::Unauthorized(crate::error::Service::Locations)
    });
    let flights = MockFlights::new();
    let distances = MockDistances::new();
    let config = config();
    let locator = AirportLocator::new(&locations, &config);

    let air = AirOptionAggregator::new(&locator, &flights, &distances, &config);
    let err = air
        .options(origin(), destination(), date(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, crate::error::ProviderError::Unauthorized(_)));
    assert!(flights.calls().is_empty());
}

#[tokio::test]
async fn airport_in_both_boxes_is_not_paired_with_itself() {
    let locations = MockLocations::new(AIRPORTS);
    let flights = MockFlights::new()
        .with_flight("SFO", "OAK", "sfo-oak", 49.0, "0h 45m")
        .with_flight("OAK", "SFO", "oak-sfo", 49.0, "0h 45m");
    let distances = MockDistances::new();
    let config = config();
    let locator = AirportLocator::new(&locations, &config);

    // Both ends of the trip sit in the Bay Area, so SFO and OAK fall in
    // both search boxes.
    let air = AirOptionAggregator::new(&locator, &flights, &distances, &config);
    let result = air
        .options(origin(), point(37.9, -122.3), date(), None)
        .await
        .unwrap();

    assert_eq!(
        flights
            .distinct_pairs()
            .into_iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect::<HashSet<_>>(),
        owned(&[("SFO", "OAK"), ("OAK", "SFO")])
    );
    assert_eq!(
        pair_set(&result.options),
        owned(&[("SFO", "OAK"), ("OAK", "SFO")])
    );
}
