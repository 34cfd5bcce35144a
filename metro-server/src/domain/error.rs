//! Domain error types.
//!
//! These errors represent validation failures in static network data and
//! broken invariants between the planner and the aggregator. They are
//! distinct from query outcomes such as "no path".

use super::StopId;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A stop with this name is already registered
    #[error("duplicate stop: {0}")]
    DuplicateStop(StopId),

    /// A connection references a stop that was never registered
    #[error("unknown stop: {0}")]
    UnknownStop(String),

    /// Stop definition is malformed
    #[error("invalid stop: {0}")]
    InvalidStop(&'static str),

    /// Coordinates are not finite or out of range
    #[error("invalid position: ({lat}, {lon})")]
    InvalidPosition { lat: f64, lon: f64 },

    /// Distance or time is not a positive finite number
    #[error("invalid weight on {a} - {b}: distance {distance_km} km, time {time_min} min")]
    InvalidWeight {
        a: StopId,
        b: StopId,
        distance_km: f64,
        time_min: f64,
    },

    /// A connection from a stop to itself
    #[error("connection from {0} to itself")]
    SelfLoop(StopId),

    /// Metric name not recognised
    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    /// A route does not line up with the network it is evaluated against
    #[error("invalid route: {0}")]
    InvalidRoute(String),
}
