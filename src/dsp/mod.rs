//! DSP: sound generation for the engine.
//!
//! The engine only talks to [`SignalGenerator`]. [`EngineSynth`] is the
//! in-process implementation used by the WASM bindings.

pub mod generator;
pub mod glide;
pub mod oscillator;
pub mod synth;

pub use generator::{NullGenerator, SignalGenerator};
pub use synth::EngineSynth;
