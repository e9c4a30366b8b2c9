//! Error types for the engine core.

use thiserror::Error;

/// Everything that can go wrong while driving an [`EngineState`](crate::engine::EngineState).
///
/// Failures are reported once and never retried. No variant leaves the
/// engine in a partially updated state.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The preset identifier is not part of the built-in catalog.
    #[error("unknown engine preset '{0}'")]
    InvalidPreset(String),

    /// The signal generator backend could not be brought up.
    #[error("audio initialization failed: {0}")]
    AudioInitializationFailure(String),

    /// Preset parameters violate `0 < base < max` or `gain ∈ (0, 1]`.
    #[error("invalid preset parameters: base={base} Hz, max={max} Hz, gain={gain}")]
    InvalidPresetParameters { base: f64, max: f64, gain: f64 },

    /// Engine configuration was rejected.
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),

    /// A control event or config could not be decoded.
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}
