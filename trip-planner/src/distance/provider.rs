//! Labelled distance lookups on top of a [`DistanceMatrix`] service.

use crate::domain::Coordinate;
use crate::error::ProviderError;
use crate::planner::DistanceMatrix;
use crate::retry::RetryPolicy;

use super::table::{DistanceTable, GroupedLegs, Grouping, Waypoint};

/// Runs one matrix request per lookup and decodes it by label.
///
/// Labels travel with their points, so the order sent to the service and
/// the order used to decode the answer cannot drift apart.
pub struct GeoDistanceProvider<'a, D: DistanceMatrix> {
    client: &'a D,
    retry: &'a RetryPolicy,
}

impl<'a, D: DistanceMatrix> GeoDistanceProvider<'a, D> {
    pub fn new(client: &'a D, retry: &'a RetryPolicy) -> Self {
        Self { client, retry }
    }

    /// Legs between every origin and every destination.
    ///
    /// Makes no request when either side is empty.
    pub async fn table(
        &self,
        origins: &[(Waypoint, Coordinate)],
        destinations: &[(Waypoint, Coordinate)],
    ) -> Result<DistanceTable, ProviderError> {
        if origins.is_empty() || destinations.is_empty() {
            return Ok(DistanceTable::empty());
        }

        let (origin_labels, origin_points): (Vec<_>, Vec<_>) = origins.iter().copied().unzip();
        let (destination_labels, destination_points): (Vec<_>, Vec<_>) =
            destinations.iter().copied().unzip();

        let response = self
            .retry
            .run(|| self.client.distance_matrix(&origin_points, &destination_points))
            .await?;

        DistanceTable::decode(&origin_labels, &destination_labels, response)
    }

    /// Same lookup, returned as a nested map keyed per `grouping`.
    pub async fn lookup(
        &self,
        origins: &[(Waypoint, Coordinate)],
        destinations: &[(Waypoint, Coordinate)],
        grouping: Grouping,
    ) -> Result<GroupedLegs, ProviderError> {
        Ok(self.table(origins, destinations).await?.grouped(grouping))
    }
}
