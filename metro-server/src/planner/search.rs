//! Shortest-path route search.
//!
//! Finds the minimum-weight route between two stops under one metric using
//! Dijkstra's algorithm. Every connection is relaxed on its own, so when two
//! stops are joined by parallel connections the cheaper one is always found.
//!
//! Ties are broken deterministically: the frontier is ordered by cost and
//! then by discovery order, connections are scanned in registration order,
//! and a stop's predecessor is only replaced by a strictly cheaper one. The
//! first equal-cost path discovered therefore wins, and identical queries
//! always yield identical routes.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::debug;

use crate::domain::{ConnectionId, DomainError, Metric, Route, StopId, TripMetrics};
use crate::network::Network;

use super::config::FareConfig;
use super::metrics::compute_metrics;

/// Error from route search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Source or destination is not in the network
    #[error("unknown stop: {0}")]
    UnknownStop(String),

    /// Source and destination are the same stop
    #[error("source and destination are both {0}")]
    SameStop(StopId),

    /// Destination is unreachable from source
    #[error("no path from {from} to {to}")]
    NoPath { from: StopId, to: StopId },

    /// The planner produced a route the aggregator could not evaluate
    #[error("internal error: {0}")]
    Internal(#[from] DomainError),
}

impl PlanError {
    /// Whether this is an expected query outcome to show the user, as opposed
    /// to a defect.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, PlanError::Internal(_))
    }
}

/// Request for route search.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    /// Name of the stop to start from.
    pub source: String,

    /// Name of the stop to reach.
    pub destination: String,

    /// The weight to minimise.
    pub metric: Metric,
}

impl RouteRequest {
    /// Create a new route request.
    pub fn new(source: impl Into<String>, destination: impl Into<String>, metric: Metric) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            metric,
        }
    }
}

/// A planned trip: the route and what it costs.
#[derive(Debug, Clone)]
pub struct Trip {
    pub route: Route,
    pub metrics: TripMetrics,
    pub metric: Metric,

    /// Number of stops settled during search.
    pub stops_explored: usize,
}

/// Frontier cost. Weights are validated finite, so a total order is safe.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Route planner over a read-only network.
///
/// The planner holds no state between calls.
pub struct Planner<'a> {
    network: &'a Network,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(network: &'a Network) -> Self {
        Self { network }
    }

    /// Compute the minimum-weight route from `source` to `destination`.
    ///
    /// # Errors
    ///
    /// - `UnknownStop` if either stop is not in the network
    /// - `SameStop` if source and destination are the same stop
    /// - `NoPath` if the destination cannot be reached
    pub fn compute_route(
        &self,
        source: &str,
        destination: &str,
        metric: Metric,
    ) -> Result<Route, PlanError> {
        self.search(source, destination, metric)
            .map(|(route, _)| route)
    }

    /// Compute a route and its metrics in one step.
    pub fn plan(&self, request: &RouteRequest, fare: &FareConfig) -> Result<Trip, PlanError> {
        let (route, stops_explored) =
            self.search(&request.source, &request.destination, request.metric)?;
        let metrics = compute_metrics(self.network, &route, fare)?;

        debug!(
            source = %route.source(),
            destination = %route.destination(),
            metric = request.metric.as_str(),
            stops = route.stops().len(),
            distance_km = metrics.distance_km,
            time_min = metrics.time_min,
            stops_explored,
            "planned trip"
        );

        Ok(Trip {
            route,
            metrics,
            metric: request.metric,
            stops_explored,
        })
    }

    fn search(
        &self,
        source: &str,
        destination: &str,
        metric: Metric,
    ) -> Result<(Route, usize), PlanError> {
        let src = self
            .network
            .index_of(source)
            .ok_or_else(|| PlanError::UnknownStop(source.trim().to_string()))?;
        let dst = self
            .network
            .index_of(destination)
            .ok_or_else(|| PlanError::UnknownStop(destination.trim().to_string()))?;

        if src == dst {
            return Err(PlanError::SameStop(self.network.stop_at(src).id.clone()));
        }

        let n = self.network.stop_count();
        let connections = self.network.connections();

        let mut best = vec![f64::INFINITY; n];
        let mut settled = vec![false; n];
        // Predecessor stop and the connection used to reach each stop.
        let mut via: Vec<Option<(usize, ConnectionId)>> = vec![None; n];

        let mut heap: BinaryHeap<Reverse<(Cost, usize, usize)>> = BinaryHeap::new();
        let mut discovered = 0usize;
        let mut explored = 0usize;

        best[src] = 0.0;
        heap.push(Reverse((Cost(0.0), discovered, src)));

        while let Some(Reverse((Cost(cost), _, u))) = heap.pop() {
            if settled[u] {
                continue;
            }
            settled[u] = true;
            explored += 1;

            if u == dst {
                break;
            }

            for &cid in self.network.incident(u) {
                let v = self.network.opposite(cid, u);
                if settled[v] {
                    continue;
                }

                let next = cost + connections[cid.0].weight(metric);
                if next < best[v] {
                    best[v] = next;
                    via[v] = Some((u, cid));
                    discovered += 1;
                    heap.push(Reverse((Cost(next), discovered, v)));
                }
            }
        }

        if !settled[dst] {
            return Err(PlanError::NoPath {
                from: self.network.stop_at(src).id.clone(),
                to: self.network.stop_at(dst).id.clone(),
            });
        }

        // Walk predecessors back from the destination.
        let mut stops = vec![self.network.stop_at(dst).id.clone()];
        let mut legs = Vec::new();
        let mut current = dst;
        while let Some((prev, cid)) = via[current] {
            stops.push(self.network.stop_at(prev).id.clone());
            legs.push(cid);
            current = prev;
        }
        stops.reverse();
        legs.reverse();

        let route = Route::new(stops, legs)?;
        Ok((route, explored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{NetworkBuilder, hyderabad_metro};

    fn names(route: &Route) -> Vec<&str> {
        route.stops().iter().map(StopId::as_str).collect()
    }

    /// A -- B -- D is short, A -- C -- D is quick.
    fn diamond() -> Network {
        NetworkBuilder::new()
            .stop("A", "Red", (0.0, 0.0))
            .stop("B", "Red", (0.0, 1.0))
            .stop("C", "Blue", (1.0, 0.0))
            .stop("D", "Red", (1.0, 1.0))
            .connection("A", "B", 1.0, 10.0)
            .connection("B", "D", 1.0, 10.0)
            .connection("A", "C", 5.0, 2.0)
            .connection("C", "D", 5.0, 2.0)
            .build()
            .unwrap()
    }

    #[test]
    fn sample_distance_route_crosses_transfer_edge() {
        let net = hyderabad_metro().unwrap();
        let planner = Planner::new(&net);

        let route = planner
            .compute_route("Miyapur", "Charminar", Metric::Distance)
            .unwrap();

        assert_eq!(
            names(&route),
            vec![
                "Miyapur",
                "JNTU",
                "KPHB",
                "Kukatpally",
                "Bal Nagar",
                "Moosapet",
                "Bharat Nagar",
                "Ameerpet",
                "Begumpet",
                "Secunderabad",
                "Paradise",
                "Charminar",
            ]
        );

        // The Bharat Nagar -> Ameerpet hop uses the 0.5 km transfer link.
        let transfer = route.legs()[6];
        assert_eq!(net.connection(transfer).unwrap().distance_km, 0.5);
    }

    #[test]
    fn metric_changes_route_but_not_endpoints() {
        let net = diamond();
        let planner = Planner::new(&net);

        let short = planner.compute_route("A", "D", Metric::Distance).unwrap();
        let quick = planner.compute_route("A", "D", Metric::Time).unwrap();

        assert_eq!(names(&short), vec!["A", "B", "D"]);
        assert_eq!(names(&quick), vec!["A", "C", "D"]);
        assert_eq!(short.source(), quick.source());
        assert_eq!(short.destination(), quick.destination());
    }

    #[test]
    fn route_is_reversible() {
        let net = diamond();
        let planner = Planner::new(&net);

        let back = planner.compute_route("D", "A", Metric::Distance).unwrap();
        assert_eq!(names(&back), vec!["D", "B", "A"]);
    }

    #[test]
    fn isolated_stop_has_no_path() {
        let net = NetworkBuilder::new()
            .stop("A", "Red", (0.0, 0.0))
            .stop("B", "Red", (0.0, 1.0))
            .stop("Lonely", "Red", (1.0, 1.0))
            .connection("A", "B", 1.0, 1.0)
            .build()
            .unwrap();
        let planner = Planner::new(&net);

        for other in ["A", "B"] {
            for metric in Metric::ALL {
                assert!(matches!(
                    planner.compute_route("Lonely", other, metric),
                    Err(PlanError::NoPath { .. })
                ));
                assert!(matches!(
                    planner.compute_route(other, "Lonely", metric),
                    Err(PlanError::NoPath { .. })
                ));
            }
        }
    }

    #[test]
    fn disconnected_components_have_no_path() {
        let net = NetworkBuilder::new()
            .stop("A", "Red", (0.0, 0.0))
            .stop("B", "Red", (0.0, 1.0))
            .stop("C", "Blue", (1.0, 0.0))
            .stop("D", "Blue", (1.0, 1.0))
            .connection("A", "B", 1.0, 1.0)
            .connection("C", "D", 1.0, 1.0)
            .build()
            .unwrap();
        let planner = Planner::new(&net);

        let err = planner.compute_route("A", "D", Metric::Time).unwrap_err();
        assert_eq!(
            err,
            PlanError::NoPath {
                from: StopId::parse("A").unwrap(),
                to: StopId::parse("D").unwrap(),
            }
        );
        assert!(err.is_user_facing());
    }

    #[test]
    fn equal_cost_tie_is_deterministic() {
        // A -- B -- D and A -- C -- D cost the same.
        let net = NetworkBuilder::new()
            .stop("A", "Red", (0.0, 0.0))
            .stop("B", "Red", (0.0, 1.0))
            .stop("C", "Red", (1.0, 0.0))
            .stop("D", "Red", (1.0, 1.0))
            .connection("A", "B", 2.0, 2.0)
            .connection("A", "C", 2.0, 2.0)
            .connection("B", "D", 2.0, 2.0)
            .connection("C", "D", 2.0, 2.0)
            .build()
            .unwrap();
        let planner = Planner::new(&net);

        let first = planner.compute_route("A", "D", Metric::Distance).unwrap();
        for _ in 0..20 {
            let again = planner.compute_route("A", "D", Metric::Distance).unwrap();
            assert_eq!(again, first);
        }

        // First discovered path wins.
        assert_eq!(names(&first), vec!["A", "B", "D"]);
    }

    #[test]
    fn cheaper_parallel_edge_is_selected() {
        let net = NetworkBuilder::new()
            .stop("A", "Red", (0.0, 0.0))
            .stop("B", "Blue", (0.0, 1.0))
            .connection("A", "B", 5.0, 7.0)
            .connection("A", "B", 0.5, 9.0)
            .build()
            .unwrap();
        let planner = Planner::new(&net);

        let by_distance = planner.compute_route("A", "B", Metric::Distance).unwrap();
        assert_eq!(by_distance.legs(), &[ConnectionId(1)]);

        let by_time = planner.compute_route("A", "B", Metric::Time).unwrap();
        assert_eq!(by_time.legs(), &[ConnectionId(0)]);
    }

    #[test]
    fn cheaper_parallel_edge_registered_first_is_kept() {
        let net = NetworkBuilder::new()
            .stop("A", "Red", (0.0, 0.0))
            .stop("B", "Blue", (0.0, 1.0))
            .connection("A", "B", 0.5, 1.0)
            .connection("B", "A", 5.0, 7.0)
            .build()
            .unwrap();
        let planner = Planner::new(&net);

        let route = planner.compute_route("B", "A", Metric::Distance).unwrap();
        assert_eq!(route.legs(), &[ConnectionId(0)]);
    }

    #[test]
    fn unknown_stop_rejected() {
        let net = diamond();
        let planner = Planner::new(&net);

        assert_eq!(
            planner.compute_route("A", "Z", Metric::Distance),
            Err(PlanError::UnknownStop("Z".into()))
        );
        assert_eq!(
            planner.compute_route("Z", "A", Metric::Distance),
            Err(PlanError::UnknownStop("Z".into()))
        );
    }

    #[test]
    fn same_stop_rejected() {
        let net = diamond();
        let planner = Planner::new(&net);

        assert_eq!(
            planner.compute_route("A", "A", Metric::Time),
            Err(PlanError::SameStop(StopId::parse("A").unwrap()))
        );
    }

    #[test]
    fn plan_includes_metrics() {
        let net = hyderabad_metro().unwrap();
        let planner = Planner::new(&net);
        let request = RouteRequest::new("Miyapur", "Charminar", Metric::Time);

        let trip = planner.plan(&request, &FareConfig::default()).unwrap();

        assert_eq!(trip.metric, Metric::Time);
        assert_eq!(trip.metrics.time_min, 48.0);
        assert!((trip.metrics.distance_km - 31.7).abs() < 1e-9);
        assert!(trip.stops_explored >= trip.route.stops().len());
    }
}
