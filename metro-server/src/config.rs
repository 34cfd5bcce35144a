//! Startup configuration.
//!
//! The network and fare rate come either from the built-in sample or from a
//! JSON file. Server settings come from the environment.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Position};
use crate::network::{FARE_PER_KM, Network, SAMPLE_CONNECTIONS, SAMPLE_STOPS};
use crate::planner::FareConfig;

/// Default listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Errors loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for a network
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Fare rate is negative or not finite
    #[error("invalid fare rate: {0}")]
    InvalidFare(f64),

    /// Listen address could not be parsed
    #[error("invalid listen address: {0}")]
    InvalidAddr(String),

    /// Network data failed validation
    #[error(transparent)]
    Network(#[from] DomainError),
}

/// A stop as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopConfig {
    pub name: String,
    pub line: String,
    /// `[lat, lon]`
    pub position: (f64, f64),
}

/// A connection as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
    pub time_min: f64,
}

/// Static network definition plus fare settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_fare_per_km")]
    pub fare_per_km: f64,

    #[serde(default = "default_currency")]
    pub currency: String,

    pub stops: Vec<StopConfig>,

    #[serde(default)]
    pub connections: Vec<ConnectionConfig>,
}

fn default_fare_per_km() -> f64 {
    FARE_PER_KM
}

fn default_currency() -> String {
    FareConfig::default().currency
}

impl NetworkConfig {
    /// Read a network definition from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The built-in Hyderabad sample network.
    pub fn hyderabad() -> Self {
        Self {
            fare_per_km: FARE_PER_KM,
            currency: default_currency(),
            stops: SAMPLE_STOPS
                .iter()
                .map(|&(name, line, position)| StopConfig {
                    name: name.to_string(),
                    line: line.to_string(),
                    position,
                })
                .collect(),
            connections: SAMPLE_CONNECTIONS
                .iter()
                .map(|&(from, to, distance_km, time_min)| ConnectionConfig {
                    from: from.to_string(),
                    to: to.to_string(),
                    distance_km,
                    time_min,
                })
                .collect(),
        }
    }

    /// Build the network, validating every stop and connection.
    pub fn build_network(&self) -> Result<Network, DomainError> {
        let mut network = Network::new();
        for s in &self.stops {
            let position = Position::new(s.position.0, s.position.1)?;
            network.add_stop(&s.name, &s.line, position)?;
        }
        for c in &self.connections {
            network.add_connection(&c.from, &c.to, c.distance_km, c.time_min)?;
        }
        Ok(network)
    }

    /// The fare settings.
    pub fn fare(&self) -> Result<FareConfig, ConfigError> {
        if !self.fare_per_km.is_finite() || self.fare_per_km < 0.0 {
            return Err(ConfigError::InvalidFare(self.fare_per_km));
        }
        Ok(FareConfig::new(self.fare_per_km, self.currency.clone()))
    }
}

/// Server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// Network definition file; the built-in sample is used when absent.
    pub network_file: Option<PathBuf>,

    /// Directory of static assets.
    pub static_dir: String,
}

impl ServerConfig {
    /// Read settings from `METRO_ADDR`, `METRO_NETWORK_FILE` and
    /// `METRO_STATIC_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr_str = get("METRO_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_str
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(addr_str.clone()))?;

        let network_file = get("METRO_NETWORK_FILE")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let static_dir = get("METRO_STATIC_DIR").unwrap_or_else(|| "static".to_string());

        Ok(Self {
            addr,
            network_file,
            static_dir,
        })
    }

    /// Load the network configuration this server should use.
    pub fn network_config(&self) -> Result<NetworkConfig, ConfigError> {
        match &self.network_file {
            Some(path) => NetworkConfig::load(path),
            None => Ok(NetworkConfig::hyderabad()),
        }
    }
}
