//! Frequency glide: exponential approach toward a target.
//!
//! Matches the WebAudio `setTargetAtTime` curve: after one time constant the
//! value has covered about 63% of the distance to the target.

#[derive(Debug, Clone)]
pub struct FrequencyGlide {
    current: f64,
    target: f64,
    /// Fraction of the remaining distance covered per sample.
    coeff: f64,
    sample_rate: f64,
}

impl FrequencyGlide {
    /// Holds `initial` until the first `set_target`.
    pub fn new(initial: f64, sample_rate: f64) -> Self {
        FrequencyGlide {
            current: initial,
            target: initial,
            coeff: 1.0,
            sample_rate,
        }
    }

    pub fn set_target(&mut self, target: f64, time_constant: f64) {
        self.target = target;
        self.coeff = coefficient(time_constant, self.sample_rate);
    }

    /// Advance one sample and return the new value.
    #[inline]
    pub fn next_sample(&mut self) -> f64 {
        self.current += (self.target - self.current) * self.coeff;
        self.current
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }
}

/// `1 - e^(-1 / (tau * sr))`; a non-positive tau jumps immediately.
fn coefficient(time_constant: f64, sample_rate: f64) -> f64 {
    let samples = time_constant * sample_rate;
    if samples.is_finite() && samples > 0.0 {
        1.0 - (-1.0 / samples).exp()
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_initial_value() {
        let mut g = FrequencyGlide::new(40.0, 44100.0);
        assert_eq!(g.next_sample(), 40.0);
    }

    #[test]
    fn one_time_constant_covers_63_percent() {
        let mut g = FrequencyGlide::new(0.0, 1000.0);
        g.set_target(100.0, 0.05);
        for _ in 0..50 {
            g.next_sample();
        }
        let expected = 100.0 * (1.0 - (-1.0f64).exp());
        assert!((g.current() - expected).abs() < 0.5, "got {}", g.current());
    }

    #[test]
    fn converges_without_overshoot() {
        let mut g = FrequencyGlide::new(40.0, 44100.0);
        g.set_target(2000.0, 0.05);
        for _ in 0..44100 {
            let v = g.next_sample();
            assert!(v <= 2000.0 + 1e-9);
        }
        assert!((g.current() - 2000.0).abs() < 1e-3);
    }

    #[test]
    fn zero_time_constant_jumps() {
        let mut g = FrequencyGlide::new(40.0, 44100.0);
        g.set_target(500.0, 0.0);
        assert_eq!(g.next_sample(), 500.0);
    }
}
