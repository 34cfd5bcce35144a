//! Fluent construction of a network from static data.

use crate::domain::{DomainError, Position};

use super::Network;

/// Builder for creating a network.
///
/// Provides a fluent API for adding stops and connections. The first
/// configuration error is remembered and returned from `build`; later calls
/// are ignored once an error has occurred.
///
/// # Example
///
/// ```
/// use metro_server::network::NetworkBuilder;
///
/// let network = NetworkBuilder::new()
///     .stop("Ameerpet", "Green", (17.4376, 78.4481))
///     .stop("Begumpet", "Green", (17.4470, 78.4678))
///     .connection("Ameerpet", "Begumpet", 3.0, 4.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(network.stop_count(), 2);
///
/// let err = NetworkBuilder::new()
///     .stop("Ameerpet", "Green", (17.4376, 78.4481))
///     .connection("Ameerpet", "Nowhere", 1.0, 1.0)
///     .build();
/// assert!(err.is_err());
/// ```
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    inner: Network,
    error: Option<DomainError>,
}

impl NetworkBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop at `(lat, lon)`.
    pub fn stop(mut self, name: &str, line: &str, (lat, lon): (f64, f64)) -> Self {
        if self.error.is_none() {
            let result = Position::new(lat, lon)
                .and_then(|position| self.inner.add_stop(name, line, position).map(|_| ()));
            self.error = result.err();
        }
        self
    }

    /// Add a connection between two stops already added.
    pub fn connection(mut self, a: &str, b: &str, distance_km: f64, time_min: f64) -> Self {
        if self.error.is_none() {
            self.error = self
                .inner
                .add_connection(a, b, distance_km, time_min)
                .err();
        }
        self
    }

    /// Build the network, or return the first error encountered.
    pub fn build(self) -> Result<Network, DomainError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.inner),
        }
    }
}
