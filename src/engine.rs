//! Throttle engine. Turns throttle and preset into synth parameters and telemetry.
//!
//! The engine is a two-state machine. It starts `Idle`, where preset and
//! throttle changes are only stored. `start()` moves it to `Running` for the
//! rest of its lifetime; from then on every [`EngineState::recompute`] glides
//! the generator to the new frequency and appends a telemetry sample.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::dsp::generator::{NullGenerator, SignalGenerator};
use crate::error::EngineError;
use crate::preset::{EnginePreset, PresetId, Waveform};
use crate::telemetry::{TelemetryHistory, TelemetrySample};

/// Lifecycle of the engine. `Running` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineStatus {
    Idle,
    Running,
}

/// Oscillator frequency for a throttle position: linear between base and max.
pub fn target_frequency(preset: &EnginePreset, throttle: f64) -> f64 {
    preset.base_frequency + preset.span() * throttle
}

pub fn rpm_from_frequency(frequency: f64) -> i64 {
    frequency.round() as i64
}

/// Displayed speed: one unit per 100 Hz.
pub fn speed_from_frequency(frequency: f64) -> i64 {
    (frequency / 100.0).round() as i64
}

/// Snapshot handed to the display layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReadout {
    pub preset: PresetId,
    pub waveform: Waveform,
    pub status: EngineStatus,
    pub throttle: f64,
    /// Current frequency rounded to whole Hz.
    pub frequency: i64,
    pub rpm: i64,
    pub speed: i64,
    pub history: Vec<TelemetrySample>,
}

/// The engine state for one session.
#[derive(Debug)]
pub struct EngineState<G = NullGenerator> {
    config: EngineConfig,
    preset_id: PresetId,
    preset: EnginePreset,
    throttle: f64,
    status: EngineStatus,
    /// Waveform the generator was started with.
    started_waveform: Option<Waveform>,
    history: TelemetryHistory,
    generator: G,
}

impl<G: SignalGenerator> EngineState<G> {
    pub fn new(config: EngineConfig, generator: G) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::build(config, generator))
    }

    /// An engine with the default config.
    pub fn with_generator(generator: G) -> Self {
        Self::build(EngineConfig::default(), generator)
    }

    fn build(config: EngineConfig, generator: G) -> Self {
        let preset_id = config.default_preset;
        EngineState {
            preset_id,
            preset: EnginePreset::builtin(preset_id),
            throttle: 0.0,
            status: EngineStatus::Idle,
            started_waveform: None,
            history: TelemetryHistory::with_capacity(config.history_capacity),
            config,
            generator,
        }
    }

    // ── Operations ──────────────────────────────────────────

    /// Select a preset by name. Unknown names keep the current selection.
    ///
    /// Returns whether the selection changed.
    pub fn select_preset(&mut self, name: &str) -> Result<bool, EngineError> {
        let id = name.parse::<PresetId>().inspect_err(|_| {
            warn!("rejected unknown preset '{name}', keeping {}", self.preset_id);
        })?;
        Ok(self.select_preset_id(id))
    }

    pub fn select_preset_id(&mut self, id: PresetId) -> bool {
        if id == self.preset_id {
            return false;
        }
        info!("preset {} -> {id}", self.preset_id);
        self.preset_id = id;
        self.preset = EnginePreset::builtin(id);
        match self.started_waveform {
            Some(started) if started != self.preset.waveform => debug!(
                "keeping {} oscillator; {id} frequencies apply from now on",
                started.as_str()
            ),
            _ => {}
        }
        true
    }

    /// Start sound generation. A no-op once running.
    ///
    /// Returns `Ok(true)` when this call made the engine run. On failure the
    /// engine stays idle.
    pub fn start(&mut self) -> Result<bool, EngineError> {
        if self.status == EngineStatus::Running {
            return Ok(false);
        }
        let preset = self.preset;
        self.generator
            .initialize(preset.waveform, preset.base_frequency, preset.gain)
            .inspect_err(|e| warn!("engine start failed: {e}"))?;

        info!(
            "engine running: {} ({}, {}..{} Hz)",
            self.preset_id,
            preset.waveform.as_str(),
            preset.base_frequency,
            preset.max_frequency
        );
        self.status = EngineStatus::Running;
        self.started_waveform = Some(preset.waveform);
        Ok(true)
    }

    /// Set the throttle to an absolute position, clamped to [0, 1].
    ///
    /// Returns whether the stored value changed. NaN is ignored.
    pub fn set_throttle(&mut self, value: f64) -> bool {
        if value.is_nan() {
            warn!("ignoring NaN throttle");
            return false;
        }
        let clamped = value.clamp(0.0, 1.0);
        if clamped == self.throttle {
            return false;
        }
        self.throttle = clamped;
        true
    }

    /// Move the throttle by `delta`, clamped to [0, 1].
    pub fn adjust_throttle(&mut self, delta: f64) -> bool {
        self.set_throttle(self.throttle + delta)
    }

    /// One wheel tick in `direction`, using the configured step.
    pub fn scroll(&mut self, direction: ScrollDirection) -> bool {
        let step = self.config.scroll_step;
        match direction {
            ScrollDirection::Up => self.adjust_throttle(step),
            ScrollDirection::Down => self.adjust_throttle(-step),
        }
    }

    /// Push the current throttle through to sound and telemetry.
    ///
    /// Does nothing while idle. Otherwise glides the generator to the new
    /// frequency and returns the telemetry sample it recorded.
    pub fn recompute(&mut self) -> Option<TelemetrySample> {
        if self.status != EngineStatus::Running {
            return None;
        }
        let frequency = self.current_frequency();
        self.generator
            .glide_to(frequency, self.config.glide_time_constant);

        let sample = self.history.push(
            rpm_from_frequency(frequency),
            speed_from_frequency(frequency),
        );
        debug!(
            "recompute #{}: throttle {:.2} -> {frequency:.1} Hz, speed {}",
            sample.index, self.throttle, sample.speed
        );
        Some(sample)
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn current_frequency(&self) -> f64 {
        target_frequency(&self.preset, self.throttle)
    }

    pub fn throttle(&self) -> f64 {
        self.throttle
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == EngineStatus::Running
    }

    pub fn preset_id(&self) -> PresetId {
        self.preset_id
    }

    pub fn preset(&self) -> &EnginePreset {
        &self.preset
    }

    pub fn history(&self) -> &TelemetryHistory {
        &self.history
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    pub fn readout(&self) -> DashboardReadout {
        let frequency = self.current_frequency();
        DashboardReadout {
            preset: self.preset_id,
            waveform: self.started_waveform.unwrap_or(self.preset.waveform),
            status: self.status,
            throttle: self.throttle,
            frequency: rpm_from_frequency(frequency),
            rpm: rpm_from_frequency(frequency),
            speed: speed_from_frequency(frequency),
            history: self.history.to_vec(),
        }
    }
}

impl Default for EngineState<NullGenerator> {
    fn default() -> Self {
        Self::with_generator(NullGenerator)
    }
}

/// Direction of one mouse-wheel tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    /// Away from the user; opens the throttle.
    Up,
    Down,
}

impl ScrollDirection {
    /// Map a DOM `WheelEvent.deltaY`. Zero or NaN carries no direction.
    pub fn from_wheel_delta(delta_y: f64) -> Option<Self> {
        if delta_y < 0.0 {
            Some(ScrollDirection::Up)
        } else if delta_y > 0.0 {
            Some(ScrollDirection::Down)
        } else {
            None
        }
    }
}
