//! The transit network.
//!
//! Stops and the weighted connections between them form an undirected
//! multigraph. The network is populated once at startup and read-only from
//! then on; every query borrows it immutably.

mod builder;
mod sample;

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{Connection, ConnectionId, DomainError, Metric, Position, Stop, StopId};

pub use builder::NetworkBuilder;
pub use sample::{CONNECTIONS as SAMPLE_CONNECTIONS, FARE_PER_KM, STOPS as SAMPLE_STOPS, hyderabad_metro};

/// An undirected multigraph of stops and connections.
///
/// Parallel connections between the same pair of stops are kept as separate
/// edges, each with its own weights. Stops and connections are stored in
/// insertion order, which makes every traversal deterministic.
#[derive(Debug, Clone, Default)]
pub struct Network {
    stops: Vec<Stop>,
    index: HashMap<StopId, usize>,
    connections: Vec<Connection>,
    /// Stop indices of each connection's endpoints, parallel to `connections`.
    endpoints: Vec<(usize, usize)>,
    /// Connections incident to each stop, in insertion order.
    adjacency: Vec<Vec<ConnectionId>>,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stop.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateStop` if a stop with the same name already exists,
    /// or `InvalidStop` if the name is blank.
    pub fn add_stop(
        &mut self,
        name: &str,
        line: &str,
        position: Position,
    ) -> Result<&Stop, DomainError> {
        let id = StopId::parse(name)?;
        if self.index.contains_key(&id) {
            return Err(DomainError::DuplicateStop(id));
        }

        let idx = self.stops.len();
        self.index.insert(id.clone(), idx);
        self.stops.push(Stop::new(id, line.trim(), position));
        self.adjacency.push(Vec::new());

        Ok(&self.stops[idx])
    }

    /// Register a connection between two existing stops.
    ///
    /// Connections are undirected. Adding a second connection between the
    /// same pair creates a parallel edge rather than replacing the first.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStop` if either endpoint is missing, `InvalidWeight`
    /// if either weight is not a positive finite number, and `SelfLoop` if
    /// both endpoints are the same stop.
    pub fn add_connection(
        &mut self,
        a: &str,
        b: &str,
        distance_km: f64,
        time_min: f64,
    ) -> Result<ConnectionId, DomainError> {
        let ia = self
            .index_of(a)
            .ok_or_else(|| DomainError::UnknownStop(a.to_string()))?;
        let ib = self
            .index_of(b)
            .ok_or_else(|| DomainError::UnknownStop(b.to_string()))?;

        let id = ConnectionId(self.connections.len());
        let connection = Connection::new(
            id,
            self.stops[ia].id.clone(),
            self.stops[ib].id.clone(),
            distance_km,
            time_min,
        )?;

        debug!(
            connection = %id,
            a = %connection.a,
            b = %connection.b,
            distance_km,
            time_min,
            "added connection"
        );

        self.connections.push(connection);
        self.endpoints.push((ia, ib));
        self.adjacency[ia].push(id);
        self.adjacency[ib].push(id);

        Ok(id)
    }

    /// Look up a stop by name.
    pub fn stop(&self, name: &str) -> Option<&Stop> {
        self.index_of(name).map(|idx| &self.stops[idx])
    }

    /// Returns the line and position of a stop, for labelling and maps.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStop` if no stop has this name.
    pub fn describe_stop(&self, name: &str) -> Result<&Stop, DomainError> {
        self.stop(name)
            .ok_or_else(|| DomainError::UnknownStop(name.to_string()))
    }

    /// Check whether a stop is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// All stops, in registration order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// All connections, in registration order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Look up a connection by id.
    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id.0)
    }

    /// Every connection touching `name`, in registration order.
    ///
    /// Empty if the stop is unknown.
    pub fn connections_of(&self, name: &str) -> impl Iterator<Item = &Connection> + '_ {
        self.index_of(name)
            .map(|idx| self.adjacency[idx].as_slice())
            .unwrap_or_default()
            .iter()
            .map(|id| &self.connections[id.0])
    }

    /// Every parallel connection between `a` and `b`, in registration order.
    pub fn connections_between(&self, a: &str, b: &str) -> Vec<&Connection> {
        let (Some(a), Some(b)) = (self.stop(a), self.stop(b)) else {
            return Vec::new();
        };
        self.connections_of(a.id.as_str())
            .filter(|c| c.joins(&a.id, &b.id))
            .collect()
    }

    /// Stops directly connected to `name`.
    ///
    /// Each neighbour appears once even when joined by parallel connections,
    /// ordered by its first connection.
    pub fn neighbors(&self, name: &str) -> Vec<&StopId> {
        let Some(stop) = self.stop(name) else {
            return Vec::new();
        };
        let mut seen: Vec<&StopId> = Vec::new();
        for c in self.connections_of(name) {
            if let Some(other) = c.other_end(&stop.id) {
                if !seen.contains(&other) {
                    seen.push(other);
                }
            }
        }
        seen
    }

    /// The cheapest weight under `metric` among the connections between
    /// `a` and `b`, or `None` if they are not adjacent.
    ///
    /// This collapses parallel edges and is meant for display. The planner
    /// walks `connections_between` instead.
    pub fn edge_weight(&self, a: &str, b: &str, metric: Metric) -> Option<f64> {
        self.connections_between(a, b)
            .into_iter()
            .map(|c| c.weight(metric))
            .min_by(f64::total_cmp)
    }

    /// Whether a connection links two different lines.
    pub fn is_interchange(&self, id: ConnectionId) -> bool {
        self.endpoints
            .get(id.0)
            .is_some_and(|&(ia, ib)| self.stops[ia].line != self.stops[ib].line)
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name.trim()).copied()
    }

    pub(crate) fn stop_at(&self, idx: usize) -> &Stop {
        &self.stops[idx]
    }

    pub(crate) fn incident(&self, idx: usize) -> &[ConnectionId] {
        &self.adjacency[idx]
    }

    /// The endpoint of `id` opposite stop `from`.
    pub(crate) fn opposite(&self, id: ConnectionId, from: usize) -> usize {
        let (ia, ib) = self.endpoints[id.0];
        if ia == from { ib } else { ia }
    }
}
