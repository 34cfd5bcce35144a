//! Optimisation criteria.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// The weight dimension a route is optimised for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Minimise total kilometres travelled.
    #[default]
    Distance,
    /// Minimise total minutes travelled.
    Time,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Distance, Metric::Time];

    /// Human-readable preference label, as shown to users and in receipts.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Distance => "Shortest Distance",
            Metric::Time => "Shortest Time",
        }
    }

    /// Wire name used in query strings and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Distance => "distance",
            Metric::Time => "time",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = DomainError;

    /// Accepts the wire name or the label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "distance" | "shortest distance" => Ok(Metric::Distance),
            "time" | "shortest time" => Ok(Metric::Time),
            _ => Err(DomainError::UnknownMetric(s.to_string())),
        }
    }
}
