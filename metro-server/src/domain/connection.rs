//! Weighted links between stops.

use std::fmt;

use serde::Serialize;

use super::{DomainError, Metric, StopId};

/// Identifies one connection within a network.
///
/// Ids are assigned in insertion order, so two parallel connections between
/// the same pair of stops always have distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ConnectionId(pub usize);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An undirected link between two stops with independent distance and time
/// weights.
///
/// # Invariants
///
/// - Both weights are finite and strictly positive
/// - The endpoints are distinct
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub a: StopId,
    pub b: StopId,
    pub distance_km: f64,
    pub time_min: f64,
}

impl Connection {
    /// Construct a connection, validating its weights and endpoints.
    pub fn new(
        id: ConnectionId,
        a: StopId,
        b: StopId,
        distance_km: f64,
        time_min: f64,
    ) -> Result<Self, DomainError> {
        if a == b {
            return Err(DomainError::SelfLoop(a));
        }
        if !is_valid_weight(distance_km) || !is_valid_weight(time_min) {
            return Err(DomainError::InvalidWeight {
                a,
                b,
                distance_km,
                time_min,
            });
        }
        Ok(Self {
            id,
            a,
            b,
            distance_km,
            time_min,
        })
    }

    /// Returns the weight of this connection under `metric`.
    pub fn weight(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Distance => self.distance_km,
            Metric::Time => self.time_min,
        }
    }

    /// Returns true if this connection joins `x` and `y`, in either order.
    pub fn joins(&self, x: &StopId, y: &StopId) -> bool {
        (&self.a == x && &self.b == y) || (&self.a == y && &self.b == x)
    }

    /// Returns the endpoint opposite `from`, or `None` if `from` is not an
    /// endpoint.
    pub fn other_end(&self, from: &StopId) -> Option<&StopId> {
        if &self.a == from {
            Some(&self.b)
        } else if &self.b == from {
            Some(&self.a)
        } else {
            None
        }
    }
}

fn is_valid_weight(w: f64) -> bool {
    w.is_finite() && w > 0.0
}
