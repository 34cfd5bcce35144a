//! Routes and trip metrics.
//!
//! A `Route` is what the planner produces for one query; `TripMetrics` is
//! what the aggregator derives from it.

use serde::Serialize;

use super::{ConnectionId, DomainError, StopId};

/// An ordered, connected sequence of stops from a source to a destination.
///
/// Alongside the stops, a route records which connection was used for each
/// hop. When a pair of stops has parallel connections, this is what lets the
/// metrics be summed over the same edges the planner chose.
///
/// # Invariants
///
/// - At least two stops
/// - Exactly one leg per consecutive pair of stops
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    stops: Vec<StopId>,
    legs: Vec<ConnectionId>,
}

impl Route {
    /// Construct a route from its stops and the connection used for each hop.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRoute` if there are fewer than two stops, or if the
    /// number of legs is not one less than the number of stops.
    pub fn new(stops: Vec<StopId>, legs: Vec<ConnectionId>) -> Result<Self, DomainError> {
        if stops.len() < 2 {
            return Err(DomainError::InvalidRoute(
                "a route needs at least two stops".to_string(),
            ));
        }
        if legs.len() + 1 != stops.len() {
            return Err(DomainError::InvalidRoute(format!(
                "{} stops need {} legs, got {}",
                stops.len(),
                stops.len() - 1,
                legs.len()
            )));
        }
        Ok(Self { stops, legs })
    }

    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    pub fn legs(&self) -> &[ConnectionId] {
        &self.legs
    }

    pub fn source(&self) -> &StopId {
        &self.stops[0]
    }

    pub fn destination(&self) -> &StopId {
        &self.stops[self.stops.len() - 1]
    }

    /// Iterate over hops as (from, to, connection).
    pub fn hops(&self) -> impl Iterator<Item = (&StopId, &StopId, ConnectionId)> + '_ {
        self.stops
            .windows(2)
            .zip(self.legs.iter())
            .map(|(pair, leg)| (&pair[0], &pair[1], *leg))
    }

    /// Stop names joined with " -> ", e.g. "Miyapur -> JNTU".
    pub fn display_path(&self) -> String {
        self.stops
            .iter()
            .map(StopId::as_str)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// Aggregated totals for one route.
///
/// The fare is kept unrounded; rounding to two decimals is presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TripMetrics {
    pub distance_km: f64,
    pub time_min: f64,
    pub fare: f64,
}

/// Format minutes the way users read them: whole numbers without a decimal
/// point, anything else as-is.
pub fn format_minutes(minutes: f64) -> String {
    if minutes.fract() == 0.0 && minutes.abs() < 1e15 {
        format!("{}", minutes as i64)
    } else {
        format!("{}", minutes)
    }
}
