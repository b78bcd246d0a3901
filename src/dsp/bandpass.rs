//! Bandpass stage
//!
//! Cascaded high-pass and low-pass biquads at the era's interpolated
//! cutoffs. Coefficients follow the Audio EQ Cookbook at Butterworth Q;
//! math runs in f64 and per-channel state keeps the cascade independent
//! across channels.

use crate::audio::AudioBuffer;
use crate::dsp::Effect;
use crate::error::{PatinaError, Result};
use crate::params::FilterFrequencies;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Butterworth Q for a maximally flat passband
const BUTTERWORTH_Q: f64 = FRAC_1_SQRT_2;

/// Biquad filter coefficients (normalized, a0 = 1)
#[derive(Debug, Clone, Copy, Default)]
struct BiquadCoeffs {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl BiquadCoeffs {
    fn low_pass(sample_rate: f64, frequency: f64) -> Self {
        let freq = frequency.clamp(20.0, sample_rate / 2.0 - 1.0);
        let w0 = 2.0 * PI * freq / sample_rate;
        let cos_w0 = w0.cos();
        let alpha = w0.sin() / (2.0 * BUTTERWORTH_Q);

        let b0 = (1.0 - cos_w0) / 2.0;
        let b1 = 1.0 - cos_w0;
        let b2 = (1.0 - cos_w0) / 2.0;
        Self::normalize(b0, b1, b2, cos_w0, alpha)
    }

    fn high_pass(sample_rate: f64, frequency: f64) -> Self {
        let freq = frequency.clamp(20.0, sample_rate / 2.0 - 1.0);
        let w0 = 2.0 * PI * freq / sample_rate;
        let cos_w0 = w0.cos();
        let alpha = w0.sin() / (2.0 * BUTTERWORTH_Q);

        let b0 = (1.0 + cos_w0) / 2.0;
        let b1 = -(1.0 + cos_w0);
        let b2 = (1.0 + cos_w0) / 2.0;
        Self::normalize(b0, b1, b2, cos_w0, alpha)
    }

    fn normalize(b0: f64, b1: f64, b2: f64, cos_w0: f64, alpha: f64) -> Self {
        let a0 = 1.0 + alpha;
        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: -2.0 * cos_w0 / a0,
            a2: (1.0 - alpha) / a0,
        }
    }
}

/// Biquad filter state (Direct Form I)
#[derive(Debug, Clone, Copy, Default)]
struct BiquadState {
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiquadState {
    fn process(&mut self, input: f64, coeffs: &BiquadCoeffs) -> f64 {
        let output = coeffs.b0 * input + coeffs.b1 * self.x1 + coeffs.b2 * self.x2
            - coeffs.a1 * self.y1
            - coeffs.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Band-limiting stage
pub struct Bandpass {
    freqs: FilterFrequencies,
    sample_rate: u32,
    hp_coeffs: BiquadCoeffs,
    lp_coeffs: BiquadCoeffs,
    hp_states: Vec<BiquadState>,
    lp_states: Vec<BiquadState>,
}

impl Bandpass {
    /// Create from an interpolated frequency pair
    ///
    /// The low cutoff must be positive and below the high cutoff.
    pub fn new(freqs: FilterFrequencies) -> Result<Self> {
        if freqs.low_hz <= 0.0 {
            return Err(PatinaError::InvalidParameter {
                param: "low_hz".to_string(),
                value: freqs.low_hz,
                min: 1.0,
                max: 20_000.0,
            });
        }
        if freqs.high_hz <= freqs.low_hz {
            return Err(PatinaError::InvalidParameter {
                param: "high_hz".to_string(),
                value: freqs.high_hz,
                min: freqs.low_hz,
                max: 20_000.0,
            });
        }

        let mut bandpass = Self {
            freqs,
            sample_rate: 44100,
            hp_coeffs: BiquadCoeffs::default(),
            lp_coeffs: BiquadCoeffs::default(),
            hp_states: Vec::new(),
            lp_states: Vec::new(),
        };
        bandpass.update_coefficients();
        Ok(bandpass)
    }

    /// Get the frequency pair this stage was built from
    pub fn frequencies(&self) -> FilterFrequencies {
        self.freqs
    }

    fn update_coefficients(&mut self) {
        let sample_rate = f64::from(self.sample_rate);
        self.hp_coeffs = BiquadCoeffs::high_pass(sample_rate, f64::from(self.freqs.low_hz));
        self.lp_coeffs = BiquadCoeffs::low_pass(sample_rate, f64::from(self.freqs.high_hz));
    }
}

impl Effect for Bandpass {
    fn effect_type(&self) -> &'static str {
        "bandpass"
    }

    fn prepare(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
        self.update_coefficients();
        self.reset();
    }

    fn process(&mut self, buffer: &mut AudioBuffer) -> Result<()> {
        let channels = buffer.channels() as usize;
        if self.hp_states.len() < channels {
            self.hp_states.resize_with(channels, BiquadState::default);
            self.lp_states.resize_with(channels, BiquadState::default);
        }

        for frame in buffer.samples_mut().chunks_exact_mut(channels) {
            for (ch, sample) in frame.iter_mut().enumerate() {
                let highpassed = self.hp_states[ch].process(f64::from(*sample), &self.hp_coeffs);
                let bandpassed = self.lp_states[ch].process(highpassed, &self.lp_coeffs);
                *sample = bandpassed as f32;
            }
        }
        Ok(())
    }

    fn reset(&mut self) {
        for state in &mut self.hp_states {
            state.reset();
        }
        for state in &mut self.lp_states {
            state.reset();
        }
    }
}
