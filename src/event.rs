//! Control events and their dispatch.
//!
//! Every UI interaction becomes one [`ControlEvent`]. Dispatch applies it to
//! the engine and then recomputes explicitly if the engine is running and
//! the event changed something.

use serde::{Deserialize, Serialize};

use crate::dsp::generator::SignalGenerator;
use crate::engine::{EngineState, ScrollDirection};
use crate::error::EngineError;
use crate::telemetry::TelemetrySample;

/// An inbound control event.
///
/// JSON form is tagged by `type`, e.g. `{"type":"setThrottle","value":0.5}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ControlEvent {
    SelectPreset { name: String },
    Scroll { direction: ScrollDirection },
    SetThrottle { value: f64 },
    AdjustThrottle { delta: f64 },
    Start,
}

impl ControlEvent {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<G: SignalGenerator> EngineState<G> {
    /// Apply one event, then recompute if it changed a running engine.
    ///
    /// Returns the telemetry sample recorded by the recomputation, if any.
    /// A failing event changes nothing.
    pub fn dispatch(&mut self, event: ControlEvent) -> Result<Option<TelemetrySample>, EngineError> {
        let changed = match event {
            ControlEvent::SelectPreset { name } => self.select_preset(&name)?,
            ControlEvent::Scroll { direction } => self.scroll(direction),
            ControlEvent::SetThrottle { value } => self.set_throttle(value),
            ControlEvent::AdjustThrottle { delta } => self.adjust_throttle(delta),
            ControlEvent::Start => self.start()?,
        };
        Ok(if changed { self.recompute() } else { None })
    }

    /// Decode and dispatch a JSON event.
    pub fn dispatch_json(&mut self, json: &str) -> Result<Option<TelemetrySample>, EngineError> {
        self.dispatch(ControlEvent::from_json(json)?)
    }
}
