//! Saved favourite routes.
//!
//! An append-only log of trip snapshots that lives as long as the server.
//! Entries are never deduplicated, edited or reordered; the planner core
//! never reads or writes this log.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::RwLock;

use crate::domain::{Metric, Route, StopId, TripMetrics};
use crate::planner::Trip;

/// A snapshot of a planned trip at the moment it was saved.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteEntry {
    pub source: StopId,
    pub destination: StopId,
    pub metric: Metric,
    pub route: Route,
    pub metrics: TripMetrics,
    pub saved_at: DateTime<Local>,
}

impl FavoriteEntry {
    /// Snapshot a trip.
    pub fn from_trip(trip: &Trip, saved_at: DateTime<Local>) -> Self {
        Self {
            source: trip.route.source().clone(),
            destination: trip.route.destination().clone(),
            metric: trip.metric,
            route: trip.route.clone(),
            metrics: trip.metrics,
            saved_at,
        }
    }

    /// One-line summary, e.g. "Miyapur -> Charminar (Shortest Distance)".
    pub fn summary(&self) -> String {
        format!(
            "{} -> {} ({})",
            self.source,
            self.destination,
            self.metric.label()
        )
    }
}

/// Thread-safe append-only favourites log.
///
/// Cloning shares the same underlying log.
#[derive(Clone, Default)]
pub struct Favorites {
    inner: Arc<RwLock<Vec<FavoriteEntry>>>,
}

impl Favorites {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its index.
    pub async fn append(&self, entry: FavoriteEntry) -> usize {
        let mut guard = self.inner.write().await;
        guard.push(entry);
        guard.len() - 1
    }

    /// All entries, oldest first.
    pub async fn list(&self) -> Vec<FavoriteEntry> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// Look up an entry by index.
    pub async fn get(&self, index: usize) -> Option<FavoriteEntry> {
        let guard = self.inner.read().await;
        guard.get(index).cloned()
    }

    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }
}
