//! Decoding distance matrices into a table keyed by (origin, destination).
//!
//! The matrix API answers positionally: row `i` belongs to the `i`th origin
//! sent, element `j` of a row to the `j`th destination. The table checks
//! the row and column counts against the labels before trusting that
//! alignment, then stores each cell under an explicit pair key.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{AirportCode, TravelLeg};
use crate::error::{ProviderError, Service};

use super::types::{DistanceMatrixResponse, MatrixElement};

/// A labelled point in a distance lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Waypoint {
    /// Where the trip starts.
    Origin,
    /// Where the trip ends.
    Destination,
    Airport(AirportCode),
}

/// Which axis a grouped view is keyed by first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    ByOrigin,
    ByDestination,
}

/// Nested view: outer label, then the other axis's label.
pub type GroupedLegs = HashMap<Waypoint, HashMap<Waypoint, TravelLeg>>;

/// Road legs between every origin and destination of one lookup.
///
/// Cells the service could not route are kept as `None`.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    cells: HashMap<(Waypoint, Waypoint), Option<TravelLeg>>,
}

impl DistanceTable {
    /// Table with no cells, for lookups with nothing on one side.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a matrix response for the given origin and destination labels.
    ///
    /// Labels must be in the order their points were sent.
    pub fn decode(
        origins: &[Waypoint],
        destinations: &[Waypoint],
        response: DistanceMatrixResponse,
    ) -> Result<Self, ProviderError> {
        check_status(&response)?;

        let malformed = |message: String| {
            ProviderError::malformed_payload(Service::DistanceMatrix, message, &response)
        };
        let Some(rows) = response.rows.as_ref() else {
            return Err(malformed("missing field `rows`".to_string()));
        };
        if rows.len() != origins.len() {
            return Err(malformed(format!(
                "expected {} rows, got {}",
                origins.len(),
                rows.len()
            )));
        }
        if let Some((row_idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.elements.len() != destinations.len())
        {
            return Err(malformed(format!(
                "row {row_idx}: expected {} elements, got {}",
                destinations.len(),
                row.elements.len()
            )));
        }

        let rows = response.rows.unwrap_or_default();
        let mut cells = HashMap::with_capacity(origins.len() * destinations.len());
        for (origin, row) in origins.iter().zip(rows) {
            for (destination, element) in destinations.iter().zip(row.elements) {
                let leg = decode_element(&element)?;
                if leg.is_none() {
                    debug!(
                        origin = ?origin,
                        destination = ?destination,
                        status = ?element.status,
                        "No road route"
                    );
                }
                cells.insert((*origin, *destination), leg);
            }
        }

        Ok(Self { cells })
    }

    /// The leg between two labels, if the lookup covered and routed it.
    pub fn get(&self, origin: Waypoint, destination: Waypoint) -> Option<TravelLeg> {
        self.cells.get(&(origin, destination)).copied().flatten()
    }

    /// Number of cells, routed or not.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Nested map keyed first by origins or destinations.
    ///
    /// Unrouted cells are left out.
    pub fn grouped(&self, grouping: Grouping) -> GroupedLegs {
        let mut grouped: GroupedLegs = HashMap::new();
        for (&(origin, destination), leg) in &self.cells {
            let Some(leg) = leg else { continue };
            let (outer, inner) = match grouping {
                Grouping::ByOrigin => (origin, destination),
                Grouping::ByDestination => (destination, origin),
            };
            grouped.entry(outer).or_default().insert(inner, *leg);
        }
        grouped
    }
}

fn check_status(response: &DistanceMatrixResponse) -> Result<(), ProviderError> {
    let message = || response.error_message.clone().unwrap_or_default();
    match response.status.as_deref() {
        None | Some("OK") => Ok(()),
        Some("OVER_QUERY_LIMIT") | Some("OVER_DAILY_LIMIT") => {
            Err(ProviderError::RateLimited(Service::DistanceMatrix))
        }
        Some("REQUEST_DENIED") => Err(ProviderError::Unauthorized(Service::DistanceMatrix)),
        Some("UNKNOWN_ERROR") => Err(ProviderError::Api {
            service: Service::DistanceMatrix,
            status: 500,
            message: message(),
        }),
        Some(other) => Err(ProviderError::malformed_payload(
            Service::DistanceMatrix,
            format!("status {other}: {}", message()),
            response,
        )),
    }
}

/// A routed element becomes a leg; an unrouted one becomes `None`.
fn decode_element(element: &MatrixElement) -> Result<Option<TravelLeg>, ProviderError> {
    if element.status.as_deref().is_some_and(|s| s != "OK") {
        return Ok(None);
    }
    let (Some(distance), Some(duration)) = (&element.distance, &element.duration) else {
        return Ok(None);
    };

    let too_large = |what: &str, value: u64| {
        ProviderError::malformed(
            Service::DistanceMatrix,
            format!("{what} {value} out of range"),
            None,
        )
    };
    let meters = u32::try_from(distance.value).map_err(|_| too_large("distance", distance.value))?;
    let secs = u32::try_from(duration.value).map_err(|_| too_large("duration", duration.value))?;

    Ok(Some(TravelLeg::new(meters, secs)))
}
