//! Effect trait definition
//!
//! Base trait for all degradation stages. Stages process buffers in place
//! and own whatever per-render state they need (filter history, envelope,
//! noise stream); `reset` returns that state to its initial value.

use crate::audio::AudioBuffer;
use crate::error::Result;

/// Base trait for all degradation stages
pub trait Effect: Send {
    /// Get the stage type identifier
    fn effect_type(&self) -> &'static str;

    /// Prepare for processing at the given sample rate
    ///
    /// Called before the first `process` and again whenever the sample
    /// rate changes; stages recompute rate-dependent coefficients here.
    fn prepare(&mut self, sample_rate: u32);

    /// Process an audio buffer in place
    fn process(&mut self, buffer: &mut AudioBuffer) -> Result<()>;

    /// Reset per-render state
    fn reset(&mut self);
}
