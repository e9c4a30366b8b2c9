//! EngineSynth, the built-in generator: one oscillator following a glide.
//!
//! The browser pulls blocks of mono samples from it for AudioWorklet
//! playback.

use log::{debug, info};

use crate::error::EngineError;
use crate::preset::Waveform;

use super::generator::SignalGenerator;
use super::glide::FrequencyGlide;
use super::oscillator::Oscillator;

#[derive(Debug, Clone)]
struct Voice {
    oscillator: Oscillator,
    glide: FrequencyGlide,
    gain: f64,
}

/// Single-voice engine synthesizer. Silent until initialized.
#[derive(Debug, Clone)]
pub struct EngineSynth {
    sample_rate: f64,
    voice: Option<Voice>,
}

impl EngineSynth {
    pub fn new(sample_rate: f64) -> Self {
        EngineSynth {
            sample_rate,
            voice: None,
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn is_initialized(&self) -> bool {
        self.voice.is_some()
    }

    /// Instantaneous oscillator frequency, if sounding.
    pub fn frequency(&self) -> Option<f64> {
        self.voice.as_ref().map(|v| v.glide.current())
    }

    /// Frequency the glide is heading to, if sounding.
    pub fn target_frequency(&self) -> Option<f64> {
        self.voice.as_ref().map(|v| v.glide.target())
    }

    /// Render `num_samples` mono samples, scaled by the preset gain.
    pub fn render(&mut self, num_samples: usize) -> Vec<f32> {
        let mut out = vec![0.0f32; num_samples];
        self.render_into(&mut out);
        out
    }

    /// Fill `buffer` with the next block. Writes silence before start.
    pub fn render_into(&mut self, buffer: &mut [f32]) {
        let Some(voice) = self.voice.as_mut() else {
            buffer.fill(0.0);
            return;
        };
        for sample in buffer.iter_mut() {
            voice.oscillator.frequency = voice.glide.next_sample();
            *sample = (voice.oscillator.next_sample() * voice.gain) as f32;
        }
    }
}

impl SignalGenerator for EngineSynth {
    fn initialize(&mut self, waveform: Waveform, frequency: f64, gain: f64) -> Result<(), EngineError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(EngineError::AudioInitializationFailure(format!(
                "unusable sample rate {}",
                self.sample_rate
            )));
        }
        if self.voice.is_some() {
            return Ok(());
        }

        info!(
            "EngineSynth starting ({} @ {frequency} Hz, gain {gain}, {} Hz)",
            waveform.as_str(),
            self.sample_rate
        );
        self.voice = Some(Voice {
            oscillator: Oscillator::new(waveform, frequency, self.sample_rate),
            glide: FrequencyGlide::new(frequency, self.sample_rate),
            gain,
        });
        Ok(())
    }

    fn glide_to(&mut self, frequency: f64, time_constant: f64) {
        if let Some(voice) = self.voice.as_mut() {
            debug!("glide -> {frequency:.1} Hz (tau {time_constant}s)");
            voice.glide.set_target(frequency, time_constant);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_before_initialize() {
        let mut synth = EngineSynth::new(44100.0);
        assert!(synth.render(256).iter().all(|&s| s == 0.0));
        assert_eq!(synth.frequency(), None);
    }

    #[test]
    fn output_bounded_by_gain() {
        let mut synth = EngineSynth::new(44100.0);
        synth.initialize(Waveform::Triangle, 220.0, 0.5).unwrap();
        let out = synth.render(4410);
        assert!(out.iter().any(|s| s.abs() > 0.1));
        assert!(out.iter().all(|s| s.abs() <= 0.5 + 1e-6));
    }

    #[test]
    fn glide_moves_frequency_toward_target() {
        let mut synth = EngineSynth::new(44100.0);
        synth.initialize(Waveform::Sawtooth, 40.0, 0.3).unwrap();
        synth.glide_to(2000.0, 0.05);
        assert_eq!(synth.target_frequency(), Some(2000.0));

        synth.render(2205);
        let f = synth.frequency().unwrap();
        assert!(f > 40.0 && f < 2000.0, "mid-glide frequency {f}");

        synth.render(44100);
        assert!((synth.frequency().unwrap() - 2000.0).abs() < 1.0);
    }

    #[test]
    fn glide_speed_follows_requested_time_constant() {
        let mut fast = EngineSynth::new(44100.0);
        let mut slow = EngineSynth::new(44100.0);
        for (synth, tau) in [(&mut fast, 0.01), (&mut slow, 0.5)] {
            synth.initialize(Waveform::Sawtooth, 40.0, 0.3).unwrap();
            synth.glide_to(2000.0, tau);
            synth.render(441);
        }
        let fast_f = fast.frequency().unwrap();
        let slow_f = slow.frequency().unwrap();
        // 10 ms is one time constant for the fast glide.
        let expected = 40.0 + 1960.0 * (1.0 - (-1.0f64).exp());
        assert!((fast_f - expected).abs() < 1.0, "fast glide at {fast_f}");
        assert!(slow_f < 200.0, "slow glide at {slow_f}");
    }

    #[test]
    fn bad_sample_rate_fails_initialization() {
        let mut synth = EngineSynth::new(0.0);
        let err = synth.initialize(Waveform::Square, 80.0, 0.2).unwrap_err();
        assert!(matches!(err, EngineError::AudioInitializationFailure(_)));
        assert!(!synth.is_initialized());
    }

    #[test]
    fn glide_before_initialize_is_ignored() {
        let mut synth = EngineSynth::new(44100.0);
        synth.glide_to(1000.0, 0.05);
        assert_eq!(synth.target_frequency(), None);
    }
}
