//! Surface noise stage
//!
//! Additive hiss plus sparse crackle impulses, the audible floor of the
//! era's medium. The noise source is a seeded ChaCha stream so renders
//! are reproducible; `reset` rewinds the stream to its seed.

use crate::audio::AudioBuffer;
use crate::dsp::Effect;
use crate::error::Result;
use crate::params::NoiseSettings;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Output gain applied to full-level hiss
const HISS_GAIN: f32 = 0.25;

/// Peak amplitude of a crackle impulse
const CRACKLE_AMPLITUDE: f32 = 0.6;

/// Additive hiss and crackle
pub struct SurfaceNoise {
    settings: NoiseSettings,
    seed: u64,
    rng: ChaCha8Rng,
}

impl SurfaceNoise {
    /// Create with a random seed
    pub fn new(settings: NoiseSettings) -> Self {
        Self::with_seed(settings, rand::random())
    }

    /// Create with an explicit seed for reproducible renders
    pub fn with_seed(settings: NoiseSettings, seed: u64) -> Self {
        let settings = NoiseSettings {
            level: settings.level.clamp(0.0, 1.0),
            crackle_probability: settings.crackle_probability.clamp(0.0, 1.0),
        };
        Self {
            settings,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Get the noise settings
    pub fn settings(&self) -> NoiseSettings {
        self.settings
    }

    /// Get the seed the noise stream started from
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Effect for SurfaceNoise {
    fn effect_type(&self) -> &'static str {
        "surface-noise"
    }

    fn prepare(&mut self, _sample_rate: u32) {}

    fn process(&mut self, buffer: &mut AudioBuffer) -> Result<()> {
        let NoiseSettings {
            level,
            crackle_probability,
        } = self.settings;
        if level <= 0.0 && crackle_probability <= 0.0 {
            return Ok(());
        }

        let hiss = level * HISS_GAIN;
        let crackle = f64::from(crackle_probability);
        for sample in buffer.samples_mut() {
            if hiss > 0.0 {
                *sample += hiss * (self.rng.random::<f32>() * 2.0 - 1.0);
            }
            if crackle > 0.0 && self.rng.random_bool(crackle) {
                *sample += CRACKLE_AMPLITUDE * (self.rng.random::<f32>() * 2.0 - 1.0);
            }
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hiss_only(level: f32) -> NoiseSettings {
        NoiseSettings {
            level,
            crackle_probability: 0.0,
        }
    }

    #[test]
    fn test_zero_settings_is_transparent() {
        let mut noise = SurfaceNoise::with_seed(hiss_only(0.0), 7);
        let mut buffer = AudioBuffer::sine_wave(440.0, 0.05, 44100);
        let reference = buffer.clone();

        noise.process(&mut buffer).unwrap();
        assert!(buffer.is_identical_to(&reference));
    }

    #[test]
    fn test_hiss_raises_the_floor() {
        let mut noise = SurfaceNoise::with_seed(hiss_only(1.0), 7);
        let mut buffer = AudioBuffer::silence(0.5, 1, 44100);

        noise.process(&mut buffer).unwrap();

        let rms = crate::audio::verification::calculate_rms(buffer.samples());
        // uniform noise at +/-0.25 peak has rms near 0.25 / sqrt(3)
        assert!(rms > 0.1 && rms < 0.2, "hiss rms {rms} out of range");

        let peak = crate::audio::verification::calculate_peak(buffer.samples());
        assert!(peak <= HISS_GAIN + 1e-6);
    }

    #[test]
    fn test_same_seed_same_render() {
        let settings = hiss_only(0.6);
        let mut a = SurfaceNoise::with_seed(settings, 42);
        let mut b = SurfaceNoise::with_seed(settings, 42);

        let mut buffer_a = AudioBuffer::silence(0.1, 2, 44100);
        let mut buffer_b = AudioBuffer::silence(0.1, 2, 44100);
        a.process(&mut buffer_a).unwrap();
        b.process(&mut buffer_b).unwrap();

        assert!(buffer_a.is_identical_to(&buffer_b));
    }

    #[test]
    fn test_different_seeds_differ() {
        let settings = hiss_only(0.6);
        let mut a = SurfaceNoise::with_seed(settings, 1);
        let mut b = SurfaceNoise::with_seed(settings, 2);

        let mut buffer_a = AudioBuffer::silence(0.1, 1, 44100);
        let mut buffer_b = AudioBuffer::silence(0.1, 1, 44100);
        a.process(&mut buffer_a).unwrap();
        b.process(&mut buffer_b).unwrap();

        assert!(!buffer_a.is_identical_to(&buffer_b));
    }

    #[test]
    fn test_reset_rewinds_the_stream() {
        let mut noise = SurfaceNoise::with_seed(hiss_only(0.8), 99);

        let mut first = AudioBuffer::silence(0.1, 1, 44100);
        noise.process(&mut first).unwrap();

        noise.reset();
        let mut second = AudioBuffer::silence(0.1, 1, 44100);
        noise.process(&mut second).unwrap();

        assert!(first.is_identical_to(&second));
    }

    #[test]
    fn test_crackle_rate_tracks_probability() {
        let settings = NoiseSettings {
            level: 0.0,
            crackle_probability: 0.01,
        };
        let mut noise = SurfaceNoise::with_seed(settings, 3);
        let mut buffer = AudioBuffer::silence(1.0, 1, 44100);

        noise.process(&mut buffer).unwrap();

        let hits = buffer.samples().iter().filter(|s| s.abs() > 0.0).count();
        // expectation is 441 impulses; allow a wide band around it
        assert!(hits > 250 && hits < 700, "crackle count {hits} out of range");
    }

    #[test]
    fn test_settings_are_clamped() {
        let noise = SurfaceNoise::with_seed(
            NoiseSettings {
                level: 1.8,
                crackle_probability: -0.5,
            },
            0,
        );
        assert_eq!(noise.settings().level, 1.0);
        assert_eq!(noise.settings().crackle_probability, 0.0);
    }
}
