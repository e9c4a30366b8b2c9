pub mod config;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod event;
pub mod preset;
pub mod telemetry;

use std::fmt::Display;

use crate::config::EngineConfig;
use crate::dsp::EngineSynth;
use crate::engine::{EngineState, ScrollDirection};
use wasm_bindgen::prelude::*;

pub use crate::engine::{DashboardReadout, EngineStatus};
pub use crate::error::EngineError;
pub use crate::event::ControlEvent;
pub use crate::preset::{EnginePreset, PresetId, Waveform};
pub use crate::telemetry::{TelemetryHistory, TelemetrySample};

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn js_err(e: impl Display) -> JsValue {
    JsValue::from_str(&format!("{e}"))
}

/// WASM-exposed: return the revline-core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed: the built-in presets as `[{id, baseFrequency, ...}]`.
#[wasm_bindgen]
pub fn preset_catalog() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&preset::catalog()).map_err(js_err)
}

/// WASM-exposed engine owned by the page's event handlers.
///
/// The page forwards wheel, slider and button events here, pulls
/// [`readout`](EngineHandle::readout) for the dashboard, and pulls
/// [`renderSamples`](EngineHandle::render_samples) from its AudioWorklet.
#[wasm_bindgen]
pub struct EngineHandle {
    engine: EngineState<EngineSynth>,
}

#[wasm_bindgen]
impl EngineHandle {
    /// `config` may be `undefined`, `null`, or a partial config object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<EngineHandle, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(js_err)?
        };
        EngineHandle::from_config(config).map_err(js_err)
    }

    #[wasm_bindgen(js_name = selectPreset)]
    pub fn select_preset(&mut self, name: &str) -> Result<(), JsValue> {
        self.apply(ControlEvent::SelectPreset {
            name: name.to_string(),
        })
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        self.apply(ControlEvent::Start)
    }

    /// Forward a `WheelEvent.deltaY`; one call is one throttle step.
    pub fn wheel(&mut self, delta_y: f64) -> Result<(), JsValue> {
        match ScrollDirection::from_wheel_delta(delta_y) {
            Some(direction) => self.apply(ControlEvent::Scroll { direction }),
            None => Ok(()),
        }
    }

    #[wasm_bindgen(js_name = setThrottle)]
    pub fn set_throttle(&mut self, value: f64) -> Result<(), JsValue> {
        self.apply(ControlEvent::SetThrottle { value })
    }

    /// Dispatch an event given as JSON, e.g. `{"type":"start"}`.
    #[wasm_bindgen(js_name = dispatchJson)]
    pub fn dispatch_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.engine.dispatch_json(json).map(|_| ()).map_err(js_err)
    }

    /// Dashboard snapshot: frequency, rpm, speed and chart history.
    pub fn readout(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.engine.readout()).map_err(js_err)
    }

    /// Next block of mono samples for AudioWorklet playback.
    #[wasm_bindgen(js_name = renderSamples)]
    pub fn render_samples(&mut self, num_samples: usize) -> Vec<f32> {
        self.engine.generator_mut().render(num_samples)
    }

    #[wasm_bindgen(js_name = sampleRate)]
    pub fn sample_rate(&self) -> f64 {
        self.engine.generator().sample_rate()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn throttle(&self) -> f64 {
        self.engine.throttle()
    }

    /// Current target frequency, rounded to whole Hz.
    pub fn frequency(&self) -> f64 {
        self.engine.current_frequency().round()
    }
}

impl EngineHandle {
    pub fn from_config(config: EngineConfig) -> Result<Self, EngineError> {
        let synth = EngineSynth::new(config.sample_rate);
        Ok(EngineHandle {
            engine: EngineState::new(config, synth)?,
        })
    }

    fn apply(&mut self, event: ControlEvent) -> Result<(), JsValue> {
        self.engine.dispatch(event).map(|_| ()).map_err(js_err)
    }
}
