//! Compressor stage
//!
//! Feed-forward peak compressor driven by the era's derived settings.
//! Detection is linked across channels (the loudest channel drives a
//! single gain applied to all), and the smoothed value is the linear
//! gain itself, with fixed program-material time constants.

use crate::audio::AudioBuffer;
use crate::dsp::Effect;
use crate::error::Result;
use crate::params::CompressorSettings;

/// Attack time constant in seconds
const ATTACK_SECS: f32 = 0.003;

/// Release time constant in seconds
const RELEASE_SECS: f32 = 0.25;

/// Level floor in dB for silent input
const SILENCE_DB: f32 = -96.0;

/// Dynamics stage with a soft-knee gain computer
pub struct Compressor {
    settings: CompressorSettings,
    sample_rate: u32,
    attack_coeff: f32,
    release_coeff: f32,
    gain_reduction: f32,
}

impl Compressor {
    /// Create from derived settings, clamped to their legal ranges
    pub fn new(settings: CompressorSettings) -> Self {
        let mut settings = settings;
        settings.clamp();

        let mut compressor = Self {
            settings,
            sample_rate: 44100,
            attack_coeff: 0.0,
            release_coeff: 0.0,
            gain_reduction: 1.0,
        };
        compressor.update_coefficients();
        compressor
    }

    /// Get the settings this stage was built from
    pub fn settings(&self) -> CompressorSettings {
        self.settings
    }

    /// Get the current gain reduction in dB (negative when reducing)
    pub fn gain_reduction_db(&self) -> f32 {
        Self::linear_to_db(self.gain_reduction)
    }

    fn update_coefficients(&mut self) {
        let sample_rate = self.sample_rate as f32;
        let attack_samples = (ATTACK_SECS * sample_rate).max(1.0);
        let release_samples = (RELEASE_SECS * sample_rate).max(1.0);
        self.attack_coeff = (-1.0 / attack_samples).exp();
        self.release_coeff = (-1.0 / release_samples).exp();
    }

    /// Compute gain reduction in dB for a given input level
    fn compute_gain_reduction_db(&self, input_db: f32) -> f32 {
        let CompressorSettings {
            threshold_db,
            knee_db,
            ratio,
        } = self.settings;

        if knee_db > 0.0 {
            let knee_start = threshold_db - knee_db / 2.0;
            let knee_end = threshold_db + knee_db / 2.0;

            if input_db <= knee_start {
                0.0
            } else if input_db >= knee_end {
                let compressed = threshold_db + (input_db - threshold_db) / ratio;
                compressed - input_db
            } else {
                // quadratic knee, tangent to the unity and ratio lines at its edges
                let over = input_db - knee_start;
                -((ratio - 1.0) / ratio) * over * over / (2.0 * knee_db)
            }
        } else if input_db <= threshold_db {
            0.0
        } else {
            let compressed = threshold_db + (input_db - threshold_db) / ratio;
            compressed - input_db
        }
    }

    fn linear_to_db(linear: f32) -> f32 {
        if linear <= 0.0 {
            SILENCE_DB
        } else {
            20.0 * linear.log10()
        }
    }

    fn db_to_linear(db: f32) -> f32 {
        10.0_f32.powf(db / 20.0)
    }
}

impl Effect for Compressor {
    fn effect_type(&self) -> &'static str {
        "compressor"
    }

    fn prepare(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
        self.update_coefficients();
    }

    fn process(&mut self, buffer: &mut AudioBuffer) -> Result<()> {
        let channels = buffer.channels() as usize;

        for frame in buffer.samples_mut().chunks_exact_mut(channels) {
            let mut level: f32 = 0.0;
            for sample in frame.iter() {
                level = level.max(sample.abs());
            }

            let input_db = Self::linear_to_db(level);
            let target = Self::db_to_linear(self.compute_gain_reduction_db(input_db));

            let coeff = if target < self.gain_reduction {
                self.attack_coeff
            } else {
                self.release_coeff
            };
            self.gain_reduction = coeff * self.gain_reduction + (1.0 - coeff) * target;

            for sample in frame {
                *sample *= self.gain_reduction;
            }
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.gain_reduction = 1.0;
    }
}
