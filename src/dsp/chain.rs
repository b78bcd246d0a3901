//! Effect chain management
//!
//! Stages run in push order (index 0 first). The era pipeline assembles
//! its chain in a fixed order:
//! 1. Mono blend (the medium collapses the image before anything else)
//! 2. Surface noise (hiss and crackle sit on the recording itself)
//! 3. Bandpass (the medium's passband limits program and noise alike)
//! 4. Waveshaper (circuit nonlinearity colors the band-limited signal)
//! 5. Compressor (broadcast-style gain riding comes last)

use super::Effect;
use crate::audio::AudioBuffer;
use crate::error::Result;
use tracing::trace;

/// Ordered chain of degradation stages
pub struct EffectChain {
    effects: Vec<Box<dyn Effect>>,
    sample_rate: u32,
}

impl EffectChain {
    /// Create a new empty chain at the default 44.1 kHz rate
    pub fn new() -> Self {
        Self {
            effects: Vec::new(),
            sample_rate: 44100,
        }
    }

    /// Prepare all stages for processing at the given sample rate
    pub fn prepare(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
        for effect in &mut self.effects {
            effect.prepare(sample_rate);
        }
    }

    /// Append a stage to the end of the chain
    ///
    /// The stage is prepared at the chain's current sample rate.
    pub fn push(&mut self, mut effect: Box<dyn Effect>) {
        effect.prepare(self.sample_rate);
        self.effects.push(effect);
    }

    /// Run the buffer through every stage in order
    pub fn process(&mut self, buffer: &mut AudioBuffer) -> Result<()> {
        trace!(stages = self.effects.len(), "processing chain");
        for effect in &mut self.effects {
            effect.process(buffer)?;
        }
        Ok(())
    }

    /// Reset all stages
    pub fn reset(&mut self) {
        for effect in &mut self.effects {
            effect.reset();
        }
    }

    /// Get the number of stages in the chain
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Check if the chain is empty
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Get the stage type identifiers in processing order
    pub fn effect_types(&self) -> Vec<&'static str> {
        self.effects.iter().map(|e| e.effect_type()).collect()
    }
}

impl Default for EffectChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::MonoBlend;

    #[test]
    fn test_chain_new() {
        let chain = EffectChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn test_empty_chain_is_transparent() {
        let mut chain = EffectChain::new();
        let mut buffer = AudioBuffer::sine_wave(440.0, 0.05, 44100);
        let reference = buffer.clone();

        chain.process(&mut buffer).unwrap();
        assert!(buffer.is_identical_to(&reference));
    }

    #[test]
    fn test_push_preserves_order() {
        let mut chain = EffectChain::new();
        chain.push(Box::new(MonoBlend::new(1.0)));
        chain.push(Box::new(MonoBlend::new(0.5)));

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.effect_types(), vec!["mono-blend", "mono-blend"]);
    }

    #[test]
    fn test_chain_processes_stages_in_order() {
        let mut chain = EffectChain::new();
        chain.prepare(44100);
        chain.push(Box::new(MonoBlend::new(1.0)));

        let mut buffer = AudioBuffer::stereo_sine_wave(220.0, 440.0, 0.05, 44100);
        chain.process(&mut buffer).unwrap();

        let left = buffer.channel_samples(0);
        let right = buffer.channel_samples(1);
        for (l, r) in left.iter().zip(right.iter()) {
            assert!((l - r).abs() < 1e-6);
        }
    }
}
