//! Engine configuration types
//!
//! The engine only needs a handful of timing constants. Everything about which
//! events exist and what they display lives in the catalog.

use crate::types::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for one control session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Control tick period in seconds (default: 0.01)
    #[serde(default = "default_tick_duration")]
    pub tick_duration_secs: f64,

    /// Remaining soft-disable time below which soft-disable alerts escalate to
    /// immediate-disable alerts (default: 0.5s)
    #[serde(default = "default_soft_disable_immediate")]
    pub soft_disable_immediate_secs: f64,

    /// Render speeds and distances in metric units
    #[serde(default = "default_true")]
    pub metric: bool,
}

fn default_tick_duration() -> f64 {
    0.01
}

fn default_soft_disable_immediate() -> f64 {
    0.5
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_duration_secs: default_tick_duration(),
            soft_disable_immediate_secs: default_soft_disable_immediate(),
            metric: true,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the tick period
    pub fn with_tick_duration(mut self, secs: f64) -> Self {
        self.tick_duration_secs = secs;
        self
    }

    /// Builder method: set the soft-disable escalation threshold
    pub fn with_soft_disable_immediate(mut self, secs: f64) -> Self {
        self.soft_disable_immediate_secs = secs;
        self
    }

    /// Builder method: choose metric or imperial units
    pub fn with_metric(mut self, metric: bool) -> Self {
        self.metric = metric;
        self
    }

    /// Soft-disable escalation threshold in ticks
    pub fn soft_disable_immediate_ticks(&self) -> u32 {
        crate::types::secs_to_ticks(self.soft_disable_immediate_secs, self.tick_duration_secs)
    }

    /// Reject values the tick loop cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.tick_duration_secs.is_finite() || self.tick_duration_secs <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "tick_duration_secs must be positive, got {}",
                self.tick_duration_secs
            )));
        }
        if !self.soft_disable_immediate_secs.is_finite() || self.soft_disable_immediate_secs < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "soft_disable_immediate_secs must be non-negative, got {}",
                self.soft_disable_immediate_secs
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_builder() {
        let config = EngineConfig::new()
            .with_tick_duration(0.05)
            .with_soft_disable_immediate(1.0)
            .with_metric(false);

        assert_eq!(config.tick_duration_secs, 0.05);
        assert_eq!(config.soft_disable_immediate_ticks(), 20);
        assert!(!config.metric);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.tick_duration_secs, 0.01);
        assert_eq!(config.soft_disable_immediate_ticks(), 50);
        assert!(config.metric);
    }

    #[test]
    fn test_invalid_tick_duration() {
        assert!(EngineConfig::new().with_tick_duration(0.0).validate().is_err());
        assert!(EngineConfig::new().with_tick_duration(f64::NAN).validate().is_err());
        assert!(EngineConfig::new()
            .with_soft_disable_immediate(-1.0)
            .validate()
            .is_err());
    }
}
