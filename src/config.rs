//! Engine configuration.
//!
//! All fields have defaults, so a host can pass `{}` or only the keys it
//! wants to override.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::preset::PresetId;
use crate::telemetry::DEFAULT_HISTORY_CAPACITY;

/// Throttle change per wheel tick.
pub const DEFAULT_SCROLL_STEP: f64 = 0.02;

/// Time constant of the frequency glide, in seconds.
pub const DEFAULT_GLIDE_TIME_CONSTANT: f64 = 0.05;

pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// Tunables for an [`EngineState`](crate::engine::EngineState).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Number of telemetry samples kept for the chart.
    pub history_capacity: usize,
    pub scroll_step: f64,
    pub glide_time_constant: f64,
    /// Preset selected when the engine is created.
    pub default_preset: PresetId,
    /// Output rate of the built-in synth.
    pub sample_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            scroll_step: DEFAULT_SCROLL_STEP,
            glide_time_constant: DEFAULT_GLIDE_TIME_CONSTANT,
            default_preset: PresetId::default(),
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.history_capacity == 0 {
            return Err(EngineError::InvalidConfig(
                "historyCapacity must be at least 1".to_string(),
            ));
        }
        if !(self.scroll_step.is_finite() && self.scroll_step > 0.0 && self.scroll_step <= 1.0) {
            return Err(EngineError::InvalidConfig(format!(
                "scrollStep must be in (0, 1], got {}",
                self.scroll_step
            )));
        }
        if !(self.glide_time_constant.is_finite() && self.glide_time_constant > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "glideTimeConstant must be positive, got {}",
                self.glide_time_constant
            )));
        }
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "sampleRate must be positive, got {}",
                self.sample_rate
            )));
        }
        Ok(())
    }
}
