//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Metric, Route, Stop, TripMetrics};
use crate::favorites::FavoriteEntry;
use crate::network::Network;
use crate::planner::{FareConfig, Trip};

/// Route query, from a query string or form.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteQuery {
    /// Source stop name
    pub source: String,

    /// Destination stop name
    pub destination: String,

    /// Metric to minimise (defaults to distance)
    pub metric: Option<Metric>,
}

impl RouteQuery {
    pub fn metric(&self) -> Metric {
        self.metric.unwrap_or_default()
    }
}

/// A stop with its line and coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopResult {
    pub name: String,
    pub line: String,
    pub lat: f64,
    pub lon: f64,
}

impl StopResult {
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            name: stop.id.to_string(),
            line: stop.line.clone(),
            lat: stop.position.lat,
            lon: stop.position.lon,
        }
    }
}

/// Response listing stops.
#[derive(Debug, Serialize)]
pub struct StopsResponse {
    pub stops: Vec<StopResult>,
}

/// One hop of a route.
#[derive(Debug, Clone, Serialize)]
pub struct HopResult {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
    pub time_min: f64,

    /// Whether the hop changes line
    pub interchange: bool,
}

/// A route with its metrics, as returned to clients.
///
/// `stops` carries coordinates in route order so a client can draw the
/// route on a map.
#[derive(Debug, Clone, Serialize)]
pub struct RouteResult {
    pub source: String,
    pub destination: String,
    pub metric: Metric,
    pub preference: &'static str,

    /// Stop names joined with " -> "
    pub path: String,
    pub stops: Vec<StopResult>,
    pub hops: Vec<HopResult>,

    pub distance_km: f64,
    pub time_min: f64,
    pub fare: f64,

    /// Fare rounded with currency, e.g. "₹79.25"
    pub fare_display: String,
}

impl RouteResult {
    /// Create from a route and its metrics.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRoute` or `UnknownStop` if the route does not belong
    /// to `network`.
    pub fn from_route(
        network: &Network,
        route: &Route,
        metric: Metric,
        metrics: &TripMetrics,
        fare: &FareConfig,
    ) -> Result<Self, DomainError> {
        let stops = route
            .stops()
            .iter()
            .map(|id| network.describe_stop(id.as_str()).map(StopResult::from_stop))
            .collect::<Result<Vec<_>, _>>()?;

        let hops = route
            .hops()
            .map(|(from, to, leg)| {
                let connection = network.connection(leg).ok_or_else(|| {
                    DomainError::InvalidRoute(format!("connection {leg} does not exist"))
                })?;
                Ok(HopResult {
                    from: from.to_string(),
                    to: to.to_string(),
                    distance_km: connection.distance_km,
                    time_min: connection.time_min,
                    interchange: network.is_interchange(leg),
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(Self {
            source: route.source().to_string(),
            destination: route.destination().to_string(),
            metric,
            preference: metric.label(),
            path: route.display_path(),
            stops,
            hops,
            distance_km: metrics.distance_km,
            time_min: metrics.time_min,
            fare: metrics.fare,
            fare_display: fare.format(metrics.fare),
        })
    }

    /// Create from a planned trip.
    pub fn from_trip(network: &Network, trip: &Trip, fare: &FareConfig) -> Result<Self, DomainError> {
        Self::from_route(network, &trip.route, trip.metric, &trip.metrics, fare)
    }
}

/// A saved favourite.
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteResult {
    pub index: usize,
    pub summary: String,

    /// RFC 3339 timestamp
    pub saved_at: String,
    pub route: RouteResult,
}

impl FavoriteResult {
    pub fn from_entry(
        network: &Network,
        index: usize,
        entry: &FavoriteEntry,
        fare: &FareConfig,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            index,
            summary: entry.summary(),
            saved_at: entry.saved_at.to_rfc3339(),
            route: RouteResult::from_route(network, &entry.route, entry.metric, &entry.metrics, fare)?,
        })
    }
}

/// Response listing favourites.
#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<FavoriteResult>,
}

/// Response after saving a favourite.
#[derive(Debug, Serialize)]
pub struct SaveFavoriteResponse {
    pub index: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
