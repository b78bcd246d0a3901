//! Waveshaping distortion stage

use crate::audio::AudioBuffer;
use crate::dsp::Effect;
use crate::error::Result;
use crate::params::distortion_curve;

/// Applies a precomputed transfer curve by table lookup
///
/// The curve spans the input domain [-1, 1]; input is clamped to that
/// domain and mapped with linear interpolation between adjacent entries.
/// A zero drive bypasses the stage entirely, since the curve is not the
/// identity even at zero drive.
pub struct WaveShaper {
    drive: f32,
    curve: Vec<f32>,
}

impl WaveShaper {
    /// Create with the given drive, precomputing the transfer curve
    pub fn new(drive: f32) -> Self {
        Self {
            drive,
            curve: distortion_curve(drive),
        }
    }

    /// Get the drive the curve was computed for
    pub fn drive(&self) -> f32 {
        self.drive
    }

    fn shape(&self, input: f32) -> f32 {
        let last = self.curve.len() - 1;
        let position = (input.clamp(-1.0, 1.0) + 1.0) / 2.0 * last as f32;
        let index = position.floor() as usize;
        if index >= last {
            return self.curve[last];
        }

        let frac = position - index as f32;
        self.curve[index] + (self.curve[index + 1] - self.curve[index]) * frac
    }
}

impl Effect for WaveShaper {
    fn effect_type(&self) -> &'static str {
        "waveshaper"
    }

    fn prepare(&mut self, _sample_rate: u32) {}

    fn process(&mut self, buffer: &mut AudioBuffer) -> Result<()> {
        if self.drive == 0.0 {
            return Ok(());
        }

        for sample in buffer.samples_mut() {
            *sample = self.shape(*sample);
        }
        Ok(())
    }

    fn reset(&mut self) {}
}
