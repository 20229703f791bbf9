//! Traits for the external services the planner depends on.
//!
//! These abstractions let the planner run against the real HTTP clients
//! or against in-memory mocks in tests.

use chrono::NaiveDate;

use crate::distance::DistanceMatrixResponse;
use crate::domain::{AirportCode, BoundingBox, Coordinate};
use crate::error::ProviderError;
use crate::gas::{FuelType, GasPriceResponse, SortBy};
use crate::skypicker::{FlightsResponse, LocationsResponse};

/// Request for airports inside a bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationQuery {
    pub bbox: BoundingBox,
    pub locale: String,
    pub limit: usize,
}

/// Request for flights between two airports over a departure window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightQuery {
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub partner: String,
}

impl FlightQuery {
    /// Flights departing on a single day.
    pub fn single_day(
        origin: AirportCode,
        destination: AirportCode,
        date: NaiveDate,
        partner: impl Into<String>,
    ) -> Self {
        Self {
            origin,
            destination,
            date_from: date,
            date_to: date,
            partner: partner.into(),
        }
    }
}

/// Request for fuel prices near a point.
#[derive(Debug, Clone, PartialEq)]
pub struct GasPriceQuery {
    pub near: Coordinate,
    pub radius_miles: u32,
    pub fuel: FuelType,
    pub sort_by: SortBy,
}

/// Searches for airports by area.
pub trait LocationSearch {
    async fn search_locations(&self, query: &LocationQuery)
    -> Result<LocationsResponse, ProviderError>;
}

/// Searches for priced flights between two airports.
pub trait FlightSearch {
    async fn search_flights(&self, query: &FlightQuery) -> Result<FlightsResponse, ProviderError>;
}

/// Looks up road distance and duration between sets of points.
///
/// Rows of the response follow `origins`, elements within a row follow
/// `destinations`.
pub trait DistanceMatrix {
    async fn distance_matrix(
        &self,
        origins: &[Coordinate],
        destinations: &[Coordinate],
    ) -> Result<DistanceMatrixResponse, ProviderError>;
}

/// Looks up fuel prices at nearby stations.
pub trait GasPriceLookup {
    async fn nearby_prices(&self, query: &GasPriceQuery)
    -> Result<GasPriceResponse, ProviderError>;
}

impl<T: LocationSearch + ?Sized> LocationSearch for &T {
    async fn search_locations(
        &self,
        query: &LocationQuery,
    ) -> Result<LocationsResponse, ProviderError> {
        (**self).search_locations(query).await
    }
}

impl<T: FlightSearch + ?Sized> FlightSearch for &T {
    async fn search_flights(&self, query: &FlightQuery) -> Result<FlightsResponse, ProviderError> {
        (**self).search_flights(query).await
    }
}

impl<T: DistanceMatrix + ?Sized> DistanceMatrix for &T {
    async fn distance_matrix(
        &self,
        origins: &[Coordinate],
        destinations: &[Coordinate],
    ) -> Result<DistanceMatrixResponse, ProviderError> {
        (**self).distance_matrix(origins, destinations).await
    }
}

impl<T: GasPriceLookup + ?Sized> GasPriceLookup for &T {
    async fn nearby_prices(
        &self,
        query: &GasPriceQuery,
    ) -> Result<GasPriceResponse, ProviderError> {
        (**self).nearby_prices(query).await
    }
}
