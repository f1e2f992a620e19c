//! Analytics configuration.
//!
//! Every tunable of the engine in one place. Missing fields in a config file
//! fall back to the defaults below.

use crate::error::{DopError, Result};
use crate::flags::DEFAULT_OVERSTIM_THRESHOLD;
use crate::risk::{DEFAULT_IDEAL_SLEEP, SLEEP_DEBT_WINDOW};
use nalgebra::Vector4;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-dimension weights of the neighbor distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceWeights {
    pub coffee: f64,
    pub cig: f64,
    pub sleep: f64,
    pub gaming: f64,
}

impl Default for DistanceWeights {
    fn default() -> Self {
        Self {
            coffee: 1.2,
            cig: 1.4,
            sleep: 0.8,
            gaming: 0.7,
        }
    }
}

impl DistanceWeights {
    /// Weights in (coffee, cig, sleep, gaming) order
    pub fn as_vector(&self) -> Vector4<f64> {
        Vector4::new(self.coffee, self.cig, self.sleep, self.gaming)
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Nightly sleep target for sleep debt (hours)
    pub ideal_sleep: f64,

    /// Trailing records counted for sleep debt
    pub sleep_debt_window: usize,

    /// DLS above which the overstimulation flag fires
    pub overstim_threshold: f64,

    /// Neighbors averaged by the prediction
    pub neighbor_count: usize,

    /// Neighbor distance weights
    pub distance_weights: DistanceWeights,

    /// Calendar days covered by the weekly summary
    pub weekly_window_days: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            ideal_sleep: DEFAULT_IDEAL_SLEEP,
            sleep_debt_window: SLEEP_DEBT_WINDOW,
            overstim_threshold: DEFAULT_OVERSTIM_THRESHOLD,
            neighbor_count: 5,
            distance_weights: DistanceWeights::default(),
            weekly_window_days: 7,
        }
    }
}

impl AnalyticsConfig {
    /// Reject values the analytics cannot work with
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(DopError::ConfigError(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )))
            }
        };

        positive("ideal_sleep", self.ideal_sleep)?;
        positive("overstim_threshold", self.overstim_threshold)?;
        positive("distance_weights.coffee", self.distance_weights.coffee)?;
        positive("distance_weights.cig", self.distance_weights.cig)?;
        positive("distance_weights.sleep", self.distance_weights.sleep)?;
        positive("distance_weights.gaming", self.distance_weights.gaming)?;

        if self.sleep_debt_window == 0 {
            return Err(DopError::ConfigError("sleep_debt_window must be at least 1".into()));
        }
        if self.neighbor_count == 0 {
            return Err(DopError::ConfigError("neighbor_count must be at least 1".into()));
        }
        if self.weekly_window_days == 0 {
            return Err(DopError::ConfigError("weekly_window_days must be at least 1".into()));
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DopError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            DopError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| DopError::SerializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.ideal_sleep, 7.0);
        assert_eq!(config.sleep_debt_window, 7);
        assert_eq!(config.neighbor_count, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            AnalyticsConfig::from_json(r#"{"ideal_sleep": 8.0, "distance_weights": {"cig": 2.0}}"#)
                .unwrap();
        assert_eq!(config.ideal_sleep, 8.0);
        assert_eq!(config.distance_weights.cig, 2.0);
        assert_eq!(config.distance_weights.coffee, 1.2);
        assert_eq!(config.overstim_threshold, 8.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(AnalyticsConfig::from_json(r#"{"neighbor_count": 0}"#).is_err());
        assert!(AnalyticsConfig::from_json(r#"{"ideal_sleep": -1.0}"#).is_err());
        assert!(AnalyticsConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_serialization() {
        let config = AnalyticsConfig::default();
        let json = config.to_json().unwrap();
        let restored = AnalyticsConfig::from_json(&json).unwrap();
        assert_eq!(config, restored);
    }
}
