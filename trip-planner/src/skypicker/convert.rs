//! Conversion from Skypicker DTOs to domain types.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::{Airport, AirportCode, Coordinate, DurationFormat, FlightId, FlightOption};
use crate::error::{ProviderError, Service};

use super::types::{FlightsResponse, LocationsResponse};

/// Airports in a location search response, keyed by code.
///
/// Entries without a valid code or position are skipped. A later entry
/// with the same code replaces an earlier one.
pub fn convert_locations(
    response: LocationsResponse,
) -> Result<BTreeMap<AirportCode, Airport>, ProviderError> {
    if response.locations.is_none() {
        return Err(ProviderError::malformed_payload(
            Service::Locations,
            "missing field `locations`",
            &response,
        ));
    }
    let locations = response.locations.unwrap_or_default();

    let mut airports = BTreeMap::new();
    for location in locations {
        let Some(raw_code) = location.code.as_deref() else {
            debug!(name = ?location.name, "Skipping location without a code");
            continue;
        };
        let code = match AirportCode::parse(raw_code) {
            Ok(code) => code,
            Err(e) => {
                debug!(code = raw_code, error = %e, "Skipping location with invalid code");
                continue;
            }
        };
        let position = location
            .location
            .and_then(|p| Coordinate::new(p.lat, p.lon).ok());
        let Some(position) = position else {
            debug!(code = %code, "Skipping location without a usable position");
            continue;
        };

        airports.insert(code, Airport::new(code, position));
    }

    Ok(airports)
}

/// Flights in a flight search response, keyed by id.
///
/// Flights with an unparseable duration or an invalid price are skipped.
pub fn convert_flights(
    response: FlightsResponse,
    duration_format: DurationFormat,
) -> Result<BTreeMap<FlightId, FlightOption>, ProviderError> {
    if response.data.is_none() {
        return Err(ProviderError::malformed_payload(
            Service::Flights,
            "missing field `data`",
            &response,
        ));
    }
    let data = response.data.unwrap_or_default();

    let mut flights = BTreeMap::new();
    for flight in data {
        let duration = match duration_format.parse(&flight.fly_duration) {
            Ok(duration) => duration,
            Err(e) => {
                warn!(
                    id = %flight.id,
                    fly_duration = %flight.fly_duration,
                    error = %e,
                    "Skipping flight with unparseable duration"
                );
                continue;
            }
        };

        if !flight.price.is_finite() || flight.price < 0.0 {
            warn!(id = %flight.id, price = flight.price, "Skipping flight with invalid price");
            continue;
        }

        let id = FlightId::new(flight.id);
        flights.insert(
            id.clone(),
            FlightOption {
                id,
                price: flight.price,
                flight_duration_secs: duration,
                airlines: flight.airlines,
                routes: flight.routes,
            },
        );
    }

    Ok(flights)
}
