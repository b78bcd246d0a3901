//! Parameter mapping
//!
//! Pure derivation functions translating an era preset plus the user-facing
//! amount knob (0–1) into concrete DSP parameters. Everything here is
//! stateless and total over real inputs; out-of-range amounts extrapolate
//! linearly rather than erroring, so range policy lives with the caller
//! (see [`crate::processor::EraProcessor`]).

use crate::era::{Era, EraPreset};
use crate::error::{PatinaError, Result};
use serde::Serialize;
use std::f32::consts::PI;

/// Number of entries in a waveshaping transfer table
pub const DISTORTION_CURVE_LEN: usize = 44_100;

/// Waveshaper drive at full knob
pub const MAX_DISTORTION_DRIVE: f32 = 50.0;

/// Per-sample crackle base rate for eras before 1940
const CRACKLE_RATE_EARLY: f32 = 0.0005;

/// Per-sample crackle base rate for 1940 onward
const CRACKLE_RATE_LATE: f32 = 0.0001;

/// Bandpass cutoff pair in Hz
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterFrequencies {
    pub low_hz: f32,
    pub high_hz: f32,
}

/// Dynamics compressor parameter triple
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompressorSettings {
    /// Level above which compression engages, dBFS
    pub threshold_db: f32,
    /// Width of the soft-knee transition region, dB
    pub knee_db: f32,
    /// Compression ratio, 1:1 to 20:1
    pub ratio: f32,
}

impl CompressorSettings {
    /// Validate against conventional compressor bounds
    pub fn validate(&self) -> Result<()> {
        if self.threshold_db < -100.0 || self.threshold_db > 0.0 {
            return Err(PatinaError::InvalidParameter {
                param: "threshold_db".to_string(),
                value: self.threshold_db,
                min: -100.0,
                max: 0.0,
            });
        }
        if self.knee_db < 0.0 || self.knee_db > 40.0 {
            return Err(PatinaError::InvalidParameter {
                param: "knee_db".to_string(),
                value: self.knee_db,
                min: 0.0,
                max: 40.0,
            });
        }
        if self.ratio < 1.0 || self.ratio > 20.0 {
            return Err(PatinaError::InvalidParameter {
                param: "ratio".to_string(),
                value: self.ratio,
                min: 1.0,
                max: 20.0,
            });
        }
        Ok(())
    }

    /// Clamp to conventional compressor bounds
    pub fn clamp(&mut self) {
        self.threshold_db = self.threshold_db.clamp(-100.0, 0.0);
        self.knee_db = self.knee_db.clamp(0.0, 40.0);
        self.ratio = self.ratio.clamp(1.0, 20.0);
    }
}

/// Surface-noise parameter pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NoiseSettings {
    /// Hiss level, 0–1
    pub level: f32,
    /// Per-sample probability of a crackle impulse
    pub crackle_probability: f32,
}

/// Build the waveshaping transfer table for the given drive amount.
///
/// Index `i` samples the transfer function at `x = 2i/N − 1`, covering the
/// input domain [−1, 1]:
///
/// ```text
/// curve[i] = ((3 + amount) · x · 20 · (π/180)) / (π + amount·|x|)
/// ```
///
/// The curve is odd (antisymmetric about the midpoint) and strictly
/// increasing in `x` for non-negative drive. No range validation is
/// performed; negative or very large drives are accepted input.
pub fn distortion_curve(amount: f32) -> Vec<f32> {
    let n = DISTORTION_CURVE_LEN;
    let deg = PI / 180.0;
    let mut curve = Vec::with_capacity(n);

    for i in 0..n {
        let x = (2.0 * i as f32) / n as f32 - 1.0;
        curve.push(((3.0 + amount) * x * 20.0 * deg) / (PI + amount * x.abs()));
    }

    curve
}

/// Interpolate bandpass cutoffs between the full audible range and the
/// era's characteristic band.
///
/// At `filter_amount` 0 the pair is [20, 20000] Hz; at 1 it is the
/// preset's own [low_freq, high_freq]. low < high holds for every preset
/// and every amount in [0, 1]. Amounts outside [0, 1] extrapolate
/// linearly, unvalidated.
pub fn filter_frequencies(preset: &EraPreset, filter_amount: f32) -> FilterFrequencies {
    FilterFrequencies {
        low_hz: 20.0 + (preset.low_freq - 20.0) * filter_amount,
        high_hz: 20_000.0 - (20_000.0 - preset.high_freq) * filter_amount,
    }
}

/// Map a 0–1 compression knob to threshold/knee/ratio.
///
/// threshold ranges −10 dB (knob 0) down to −50 dB (knob 1), knee 0–40 dB,
/// ratio 1:1–20:1. The caller supplies [0, 1]; out-of-range knobs
/// extrapolate, unvalidated.
pub fn compressor_settings(comp_amount: f32) -> CompressorSettings {
    CompressorSettings {
        threshold_db: -50.0 + (1.0 - comp_amount) * 40.0,
        knee_db: 40.0 * comp_amount,
        ratio: 1.0 + comp_amount * 19.0,
    }
}

/// Per-sample probability of a crackle impulse for the given era.
///
/// Eras before 1940 crackle at five times the base rate of later ones,
/// scaled linearly by `amount`.
pub fn crackle_probability(era: Era, amount: f32) -> f32 {
    let base = if era.year() < 1940 {
        CRACKLE_RATE_EARLY
    } else {
        CRACKLE_RATE_LATE
    };
    base * amount
}

/// The full parameter bundle for one (era, amount) pair
///
/// Computed on demand and never persisted; the processor re-derives it
/// whenever the knob or era changes. Each mapper input is first scaled by
/// the matching preset intensity (`field / 100 · amount`), so a preset
/// with `compression: 50` at full knob compresses like a `compression:
/// 100` preset at half knob.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DerivedParams {
    pub era: Era,
    pub amount: f32,
    pub compressor: CompressorSettings,
    pub filter: FilterFrequencies,
    pub noise: NoiseSettings,
    /// Blend toward mono, 0–1
    pub mono_mix: f32,
    /// Waveshaper drive, 0 at knob 0 up to [`MAX_DISTORTION_DRIVE`]
    pub distortion_drive: f32,
}

impl DerivedParams {
    /// Derive the parameter bundle for an era at the given knob position
    pub fn derive(era: Era, amount: f32) -> Self {
        let preset = era.preset();
        Self {
            era,
            amount,
            compressor: compressor_settings(preset.compression / 100.0 * amount),
            filter: filter_frequencies(preset, preset.filtering / 100.0 * amount),
            noise: NoiseSettings {
                level: preset.hiss / 100.0 * amount,
                crackle_probability: crackle_probability(era, amount),
            },
            mono_mix: preset.mono / 100.0 * amount,
            distortion_drive: MAX_DISTORTION_DRIVE * amount,
        }
    }
}
