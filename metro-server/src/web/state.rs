//! Application state for the web layer.

use std::sync::Arc;

use crate::favorites::Favorites;
use crate::network::Network;
use crate::planner::FareConfig;

/// Shared application state.
///
/// Contains everything needed to handle requests. The network and fare are
/// read-only; the favourites log is the only state that changes.
#[derive(Clone)]
pub struct AppState {
    /// The transit network
    pub network: Arc<Network>,

    /// Fare settings
    pub fare: Arc<FareConfig>,

    /// Saved favourite routes
    pub favorites: Favorites,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: Network, fare: FareConfig) -> Self {
        Self {
            network: Arc::new(network),
            fare: Arc::new(fare),
            favorites: Favorites::new(),
        }
    }
}
