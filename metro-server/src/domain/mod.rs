//! Domain types for the metro route planner.
//!
//! This module contains the core domain model types that represent
//! validated network data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod connection;
mod error;
mod metric;
mod route;
mod stop;

pub use connection::{Connection, ConnectionId};
pub use error::DomainError;
pub use metric::Metric;
pub use route::{Route, TripMetrics, format_minutes};
pub use stop::{Position, Stop, StopId};
