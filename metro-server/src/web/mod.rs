//! Web layer for the metro route planner.
//!
//! Provides HTTP endpoints for planning routes, saving favourites and
//! downloading trip receipts.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
