//! Trip metrics aggregation.
//!
//! Sums distance and time over the exact connections a route records and
//! converts the distance into a fare.

use crate::domain::{DomainError, Route, TripMetrics};
use crate::network::Network;

use super::config::FareConfig;

/// Compute distance, time and fare for a route.
///
/// Each hop is evaluated against the connection the route recorded for it,
/// never re-resolved, so parallel connections are counted exactly as the
/// planner chose them.
///
/// # Errors
///
/// Returns `InvalidRoute` if a recorded connection does not exist in
/// `network` or does not join the two stops of its hop. Routes from the
/// planner never trigger this.
pub fn compute_metrics(
    network: &Network,
    route: &Route,
    fare: &FareConfig,
) -> Result<TripMetrics, DomainError> {
    let mut distance_km = 0.0;
    let mut time_min = 0.0;

    for (from, to, leg) in route.hops() {
        let connection = network
            .connection(leg)
            .ok_or_else(|| DomainError::InvalidRoute(format!("connection {leg} does not exist")))?;

        if !connection.joins(from, to) {
            return Err(DomainError::InvalidRoute(format!(
                "connection {leg} does not join {from} and {to}"
            )));
        }

        distance_km += connection.distance_km;
        time_min += connection.time_min;
    }

    Ok(TripMetrics {
        distance_km,
        time_min,
        fare: fare.fare_for(distance_km),
    })
}
