//! The seam between the engine and whatever produces sound.

use crate::error::EngineError;
use crate::preset::Waveform;

/// An audio signal generator the engine parameterizes.
///
/// `initialize` is called once, when the engine starts. Every later
/// recomputation calls `glide_to`.
pub trait SignalGenerator {
    fn initialize(&mut self, waveform: Waveform, frequency: f64, gain: f64) -> Result<(), EngineError>;

    /// Move toward `frequency` with an exponential ramp of `time_constant` seconds.
    fn glide_to(&mut self, frequency: f64, time_constant: f64);
}

/// A generator that accepts every command and makes no sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGenerator;

impl SignalGenerator for NullGenerator {
    fn initialize(&mut self, _waveform: Waveform, _frequency: f64, _gain: f64) -> Result<(), EngineError> {
        Ok(())
    }

    fn glide_to(&mut self, _frequency: f64, _time_constant: f64) {}
}

impl<G: SignalGenerator + ?Sized> SignalGenerator for Box<G> {
    fn initialize(&mut self, waveform: Waveform, frequency: f64, gain: f64) -> Result<(), EngineError> {
        (**self).initialize(waveform, frequency, gain)
    }

    fn glide_to(&mut self, frequency: f64, time_constant: f64) {
        (**self).glide_to(frequency, time_constant)
    }
}
