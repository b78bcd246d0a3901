//! Mono blend stage

use crate::audio::AudioBuffer;
use crate::dsp::Effect;
use crate::error::Result;

/// Blend toward a single-channel image
///
/// Each frame is pulled toward the channel mean: `out = in * (1 - mix) +
/// mid * mix`. Early-era presets drive the mix to 1 for a full collapse;
/// mono buffers pass through unchanged.
#[derive(Debug, Clone)]
pub struct MonoBlend {
    mix: f32,
}

impl MonoBlend {
    /// Create with the given blend, clamped to [0, 1]
    pub fn new(mix: f32) -> Self {
        Self {
            mix: mix.clamp(0.0, 1.0),
        }
    }

    /// Get the blend amount
    pub fn mix(&self) -> f32 {
        self.mix
    }
}

impl Effect for MonoBlend {
    fn effect_type(&self) -> &'static str {
        "mono-blend"
    }

    fn prepare(&mut self, _sample_rate: u32) {}

    fn process(&mut self, buffer: &mut AudioBuffer) -> Result<()> {
        let channels = buffer.channels() as usize;
        if channels < 2 || self.mix <= 0.0 {
            return Ok(());
        }

        let mix = self.mix;
        for frame in buffer.samples_mut().chunks_exact_mut(channels) {
            let mid = frame.iter().sum::<f32>() / channels as f32;
            for sample in frame {
                *sample = *sample * (1.0 - mix) + mid * mix;
            }
        }
        Ok(())
    }

    fn reset(&mut self) {}
}
