//! Route planning and trip metrics.
//!
//! This module implements the core of the planner: given a source, a
//! destination and a metric, find the minimum-weight route through the
//! network, then total up its distance, time and fare.

mod config;
mod metrics;
mod search;

pub use config::FareConfig;
pub use metrics::compute_metrics;
pub use search::{PlanError, Planner, RouteRequest, Trip};
