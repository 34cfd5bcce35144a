//! Stop identity and metadata.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// The unique name of a stop, e.g. "Miyapur".
///
/// Stop names are the network's keys. Surrounding whitespace is trimmed on
/// construction and an empty name is rejected.
///
/// # Examples
///
/// ```
/// use metro_server::domain::StopId;
///
/// let id = StopId::parse("  Ameerpet ").unwrap();
/// assert_eq!(id.as_str(), "Ameerpet");
///
/// assert!(StopId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopId(String);

impl StopId {
    /// Parse a stop name.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidStop("stop name must not be empty"));
        }
        Ok(StopId(trimmed.to_string()))
    }

    /// Returns the stop name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StopId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StopId::parse(&value)
    }
}

impl From<StopId> for String {
    fn from(id: StopId) -> Self {
        id.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    /// Create a position, rejecting non-finite or out-of-range coordinates.
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::InvalidPosition { lat, lon });
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::InvalidPosition { lat, lon });
        }
        Ok(Self { lat, lon })
    }
}

/// A stop in the network: its name, the line it belongs to, and where it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub id: StopId,
    pub line: String,
    pub position: Position,
}

impl Stop {
    pub fn new(id: StopId, line: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            line: line.into(),
            position,
        }
    }

    /// Label used for tooltips and lists, e.g. "JNTU (Orange Line)".
    pub fn label(&self) -> String {
        format!("{} ({} Line)", self.id, self.line)
    }
}
