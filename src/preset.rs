//! Engine presets: the built-in catalog of simulated engines.
//!
//! A preset bundles the frequency range an engine sweeps through as the
//! throttle opens, the raw waveform of its oscillator, and its output gain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Oscillator waveform shapes an engine can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sawtooth,
    Square,
    Triangle,
}

impl Waveform {
    pub fn as_str(self) -> &'static str {
        match self {
            Waveform::Sawtooth => "sawtooth",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
        }
    }
}

/// Identifiers of the built-in presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetId {
    #[default]
    Porsche,
    Ferrari,
    Tesla,
}

impl PresetId {
    /// Every built-in preset, in catalog order.
    pub const ALL: [PresetId; 3] = [PresetId::Porsche, PresetId::Ferrari, PresetId::Tesla];

    pub fn as_str(self) -> &'static str {
        match self {
            PresetId::Porsche => "porsche",
            PresetId::Ferrari => "ferrari",
            PresetId::Tesla => "tesla",
        }
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetId {
    type Err = EngineError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        PresetId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| EngineError::InvalidPreset(s.to_string()))
    }
}

/// Acoustic parameters of one simulated engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnginePreset {
    /// Frequency in Hz at zero throttle.
    pub base_frequency: f64,
    /// Frequency in Hz at full throttle.
    pub max_frequency: f64,
    pub waveform: Waveform,
    /// Output level (0, 1].
    pub gain: f64,
}

impl EnginePreset {
    /// Build a preset, checking `0 < base < max` and `0 < gain <= 1`.
    pub fn new(
        base_frequency: f64,
        max_frequency: f64,
        waveform: Waveform,
        gain: f64,
    ) -> Result<Self, EngineError> {
        let range_ok = base_frequency > 0.0 && base_frequency < max_frequency && max_frequency.is_finite();
        let gain_ok = gain > 0.0 && gain <= 1.0;
        if !range_ok || !gain_ok {
            return Err(EngineError::InvalidPresetParameters {
                base: base_frequency,
                max: max_frequency,
                gain,
            });
        }
        Ok(EnginePreset {
            base_frequency,
            max_frequency,
            waveform,
            gain,
        })
    }

    /// The parameters of a built-in preset.
    pub const fn builtin(id: PresetId) -> Self {
        match id {
            PresetId::Porsche => EnginePreset {
                base_frequency: 40.0,
                max_frequency: 2000.0,
                waveform: Waveform::Sawtooth,
                gain: 0.3,
            },
            PresetId::Ferrari => EnginePreset {
                base_frequency: 80.0,
                max_frequency: 4000.0,
                waveform: Waveform::Square,
                gain: 0.2,
            },
            PresetId::Tesla => EnginePreset {
                base_frequency: 30.0,
                max_frequency: 1500.0,
                waveform: Waveform::Triangle,
                gain: 0.5,
            },
        }
    }

    /// Width of the swept frequency band.
    pub fn span(&self) -> f64 {
        self.max_frequency - self.base_frequency
    }
}

/// A catalog row as shown in the preset picker.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: PresetId,
    #[serde(flatten)]
    pub preset: EnginePreset,
}

/// All built-in presets with their identifiers.
pub fn catalog() -> Vec<CatalogEntry> {
    PresetId::ALL
        .into_iter()
        .map(|id| CatalogEntry {
            id,
            preset: EnginePreset::builtin(id),
        })
        .collect()
}
