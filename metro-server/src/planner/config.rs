//! Fare configuration for the metrics aggregator.

use serde::{Deserialize, Serialize};

use crate::network::FARE_PER_KM;

/// Flat per-kilometre fare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareConfig {
    /// Currency units charged per kilometre.
    pub fare_per_km: f64,

    /// Symbol prefixed to displayed fares.
    pub currency: String,
}

impl FareConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(fare_per_km: f64, currency: impl Into<String>) -> Self {
        Self {
            fare_per_km,
            currency: currency.into(),
        }
    }

    /// The unrounded fare for a distance.
    pub fn fare_for(&self, distance_km: f64) -> f64 {
        distance_km * self.fare_per_km
    }

    /// A fare rounded to two decimals with the currency prefix, e.g. "₹79.25".
    pub fn format(&self, fare: f64) -> String {
        format!("{}{:.2}", self.currency, fare)
    }
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            fare_per_km: FARE_PER_KM,
            currency: "₹".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = FareConfig::default();

        assert_eq!(config.fare_per_km, 2.5);
        assert_eq!(config.currency, "₹");
    }

    #[test]
    fn fare_is_linear_in_distance() {
        let config = FareConfig::new(2.0, "$");

        assert_eq!(config.fare_for(0.0), 0.0);
        assert_eq!(config.fare_for(3.5), 7.0);
        assert_eq!(config.fare_for(10.0), 20.0);
    }

    #[test]
    fn format_rounds_only_for_display() {
        let config = FareConfig::default();
        let fare = config.fare_for(3.333);

        assert!((fare - 8.3325).abs() < 1e-12);
        assert_eq!(config.format(fare), "₹8.33");
        assert_eq!(config.format(79.25), "₹79.25");
    }
}
