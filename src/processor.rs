//! Era processor
//!
//! Assembles the degradation chain for an (era, amount) pair and renders
//! buffers offline. Changing the era or the amount re-derives the stage
//! settings and rebuilds the chain; per-render state (noise stream,
//! filter history, compressor envelope) starts fresh after a rebuild.

use crate::audio::AudioBuffer;
use crate::dsp::{Bandpass, Compressor, EffectChain, MonoBlend, SurfaceNoise, WaveShaper};
use crate::era::Era;
use crate::error::Result;
use crate::params::DerivedParams;
use tracing::debug;

/// Offline renderer for a single era treatment
pub struct EraProcessor {
    era: Era,
    amount: f32,
    sample_rate: u32,
    seed: Option<u64>,
    params: DerivedParams,
    chain: EffectChain,
}

impl EraProcessor {
    /// Create a processor at full effect amount
    pub fn new(era: Era, sample_rate: u32) -> Result<Self> {
        Self::build(era, 1.0, sample_rate, None)
    }

    /// Create a processor with a fixed noise seed for reproducible renders
    pub fn with_seed(era: Era, sample_rate: u32, seed: u64) -> Result<Self> {
        Self::build(era, 1.0, sample_rate, Some(seed))
    }

    fn build(era: Era, amount: f32, sample_rate: u32, seed: Option<u64>) -> Result<Self> {
        let amount = amount.clamp(0.0, 1.0);
        let mut processor = Self {
            era,
            amount,
            sample_rate,
            seed,
            params: DerivedParams::derive(era, amount),
            chain: EffectChain::new(),
        };
        processor.rebuild()?;
        Ok(processor)
    }

    fn rebuild(&mut self) -> Result<()> {
        let params = DerivedParams::derive(self.era, self.amount);

        let mut chain = EffectChain::new();
        chain.prepare(self.sample_rate);
        chain.push(Box::new(MonoBlend::new(params.mono_mix)));
        chain.push(Box::new(match self.seed {
            Some(seed) => SurfaceNoise::with_seed(params.noise, seed),
            None => SurfaceNoise::new(params.noise),
        }));
        chain.push(Box::new(Bandpass::new(params.filter)?));
        chain.push(Box::new(WaveShaper::new(params.distortion_drive)));
        chain.push(Box::new(Compressor::new(params.compressor)));

        debug!(
            era = %self.era,
            amount = self.amount,
            low_hz = params.filter.low_hz,
            high_hz = params.filter.high_hz,
            "rebuilt degradation chain"
        );

        self.params = params;
        self.chain = chain;
        Ok(())
    }

    /// Get the active era
    pub fn era(&self) -> Era {
        self.era
    }

    /// Get the effect amount
    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// Get the sample rate the chain is prepared for
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the derived parameters the chain was built from
    pub fn params(&self) -> &DerivedParams {
        &self.params
    }

    /// Switch to a different era, rebuilding the chain
    pub fn set_era(&mut self, era: Era) -> Result<()> {
        if era == self.era {
            return Ok(());
        }
        self.era = era;
        self.rebuild()
    }

    /// Change the effect amount, clamped to [0, 1], rebuilding the chain
    pub fn set_amount(&mut self, amount: f32) -> Result<()> {
        let amount = amount.clamp(0.0, 1.0);
        if amount == self.amount {
            return Ok(());
        }
        self.amount = amount;
        self.rebuild()
    }

    /// Render the era treatment over the buffer in place
    ///
    /// Re-prepares the chain if the buffer's sample rate differs from the
    /// one the chain was built for.
    pub fn process(&mut self, buffer: &mut AudioBuffer) -> Result<()> {
        if buffer.sample_rate() != self.sample_rate {
            self.sample_rate = buffer.sample_rate();
            self.chain.prepare(self.sample_rate);
        }
        self.chain.process(buffer)
    }

    /// Reset per-render state without rebuilding the chain
    ///
    /// A seeded processor produces the same render again after a reset.
    pub fn reset(&mut self) {
        self.chain.reset();
    }
}
