//! Planner tuning parameters.

use serde::Deserialize;

use crate::error::PlannerError;

/// Assumed courier speed on campus (~18 km/h).
pub const DEFAULT_AVERAGE_SPEED_MPS: f64 = 5.0;

/// Time spent handing over orders at each stop.
pub const DEFAULT_DWELL_SECS: f64 = 300.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Flat travel speed in meters per second. No traffic or road modelling.
    pub average_speed_mps: f64,
    /// Dwell applied to every newly constructed stop, in seconds.
    pub dwell_secs: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            average_speed_mps: DEFAULT_AVERAGE_SPEED_MPS,
            dwell_secs: DEFAULT_DWELL_SECS,
        }
    }
}

impl PlannerConfig {
    pub fn with_average_speed(mut self, meters_per_second: f64) -> Self {
        self.average_speed_mps = meters_per_second;
        self
    }

    pub fn with_dwell_secs(mut self, secs: f64) -> Self {
        self.dwell_secs = secs;
        self
    }

    /// Reject values that would produce infinite or negative durations.
    pub fn validate(&self) -> Result<(), PlannerError> {
        if !self.average_speed_mps.is_finite() || self.average_speed_mps <= 0.0 {
            return Err(PlannerError::InvalidConfig(format!(
                "average_speed_mps must be positive, got {}",
                self.average_speed_mps
            )));
        }
        if !self.dwell_secs.is_finite() || self.dwell_secs < 0.0 {
            return Err(PlannerError::InvalidConfig(format!(
                "dwell_secs must be non-negative, got {}",
                self.dwell_secs
            )));
        }
        Ok(())
    }

    /// Travel time for a leg of `meters` at the configured speed.
    pub fn travel_secs(&self, meters: f64) -> f64 {
        meters / self.average_speed_mps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.average_speed_mps, 5.0);
        assert_eq!(config.dwell_secs, 300.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_travel_secs() {
        let config = PlannerConfig::default();
        // 1500 m at 5 m/s
        assert_eq!(config.travel_secs(1500.0), 300.0);
    }

    #[test]
    fn test_rejects_zero_speed() {
        let config = PlannerConfig::default().with_average_speed(0.0);
        assert!(matches!(config.validate(), Err(PlannerError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_negative_dwell() {
        let config = PlannerConfig::default().with_dwell_secs(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: PlannerConfig = serde_json::from_str(r#"{"average_speed_mps": 4.0}"#).unwrap();
        assert_eq!(config.average_speed_mps, 4.0);
        assert_eq!(config.dwell_secs, DEFAULT_DWELL_SECS);
    }
}
