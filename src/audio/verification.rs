//! Objective signal measurements
//!
//! Degradation cannot be judged by listening in CI, so tests verify it
//! through measurements: band-limiting shows up in the spectrum and the
//! spectral centroid, compression in the crest factor, mono collapse in the
//! stereo correlation. All functions are read-only over sample slices.

use crate::audio::AudioBuffer;
use rustfft::{num_complex::Complex, FftPlanner};

/// Convert linear amplitude to decibels
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        f32::NEG_INFINITY
    } else {
        20.0 * linear.log10()
    }
}

/// Convert decibels to linear amplitude
pub fn db_to_linear(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Calculate RMS (Root Mean Square) of samples
pub fn calculate_rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

/// Calculate RMS in decibels
pub fn calculate_rms_db(samples: &[f32]) -> f32 {
    linear_to_db(calculate_rms(samples))
}

/// Calculate peak (maximum absolute value) of samples
pub fn calculate_peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0_f32, f32::max)
}

/// Calculate peak in decibels
pub fn calculate_peak_db(samples: &[f32]) -> f32 {
    linear_to_db(calculate_peak(samples))
}

/// Calculate crest factor (peak/RMS ratio) in dB
///
/// Compression narrows the gap between peak and RMS, so a falling crest
/// factor is the measurable signature of the compressor stage.
pub fn calculate_crest_factor(samples: &[f32]) -> f32 {
    let rms = calculate_rms(samples);
    let peak = calculate_peak(samples);
    if rms > 0.0 {
        linear_to_db(peak / rms)
    } else {
        0.0
    }
}

/// Calculate DC offset (mean of samples)
pub fn calculate_dc_offset(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().sum();
    sum / samples.len() as f32
}

/// Calculate stereo correlation
///
/// 1.0 means both channels carry the same signal (fully mono), 0.0
/// uncorrelated, -1.0 opposite phase. Mono collapse drives this toward 1.
pub fn calculate_stereo_correlation(buffer: &AudioBuffer) -> f32 {
    if buffer.channels() != 2 {
        return 1.0; // A single channel is trivially correlated with itself
    }

    let left = buffer.channel_samples(0);
    let right = buffer.channel_samples(1);

    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let n = left.len() as f32;
    let sum_l: f32 = left.iter().sum();
    let sum_r: f32 = right.iter().sum();
    let sum_ll: f32 = left.iter().map(|x| x * x).sum();
    let sum_rr: f32 = right.iter().map(|x| x * x).sum();
    let sum_lr: f32 = left.iter().zip(right.iter()).map(|(l, r)| l * r).sum();

    let numerator = n * sum_lr - sum_l * sum_r;
    let denominator = ((n * sum_ll - sum_l * sum_l) * (n * sum_rr - sum_r * sum_r)).sqrt();

    if denominator.abs() < 1e-10 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Magnitude at one frequency bin
#[derive(Debug, Clone)]
pub struct SpectralPeak {
    pub frequency: f32,
    pub magnitude_db: f32,
}

/// Perform FFT analysis over the first `fft_size` samples
///
/// Stereo buffers are mixed to mono first. A Hann window is applied before
/// the transform; only the positive-frequency half is returned.
pub fn analyze_spectrum(buffer: &AudioBuffer, fft_size: usize) -> Vec<SpectralPeak> {
    let samples = if buffer.channels() == 2 {
        buffer
            .channel_samples(0)
            .iter()
            .zip(buffer.channel_samples(1).iter())
            .map(|(l, r)| (l + r) / 2.0)
            .collect::<Vec<_>>()
    } else {
        buffer.samples().to_vec()
    };

    if samples.len() < fft_size {
        return Vec::new();
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);

    let mut complex_samples: Vec<Complex<f32>> = samples
        .iter()
        .take(fft_size)
        .enumerate()
        .map(|(i, &s)| {
            let window =
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / fft_size as f32).cos());
            Complex::new(s * window, 0.0)
        })
        .collect();

    fft.process(&mut complex_samples);

    let bin_hz = buffer.sample_rate() as f32 / fft_size as f32;

    complex_samples
        .iter()
        .take(fft_size / 2)
        .enumerate()
        .map(|(i, c)| {
            let magnitude = c.norm() / (fft_size as f32 / 2.0);
            SpectralPeak {
                frequency: i as f32 * bin_hz,
                magnitude_db: linear_to_db(magnitude),
            }
        })
        .collect()
}

/// Get magnitude in dB at a specific frequency (nearest bin)
pub fn magnitude_at_frequency(buffer: &AudioBuffer, frequency: f32, fft_size: usize) -> f32 {
    let spectrum = analyze_spectrum(buffer, fft_size);
    let bin_hz = buffer.sample_rate() as f32 / fft_size as f32;
    let target_bin = (frequency / bin_hz).round() as usize;

    spectrum
        .get(target_bin)
        .map(|p| p.magnitude_db)
        .unwrap_or(f32::NEG_INFINITY)
}

/// Calculate spectral centroid in Hz
///
/// The magnitude-weighted mean frequency. Narrow early-era bands pull the
/// centroid down toward the passband; it rises again as the band opens up
/// through the decades.
pub fn calculate_spectral_centroid(buffer: &AudioBuffer, fft_size: usize) -> f32 {
    let spectrum = analyze_spectrum(buffer, fft_size);

    if spectrum.is_empty() {
        return 0.0;
    }

    let mut weighted_sum = 0.0;
    let mut magnitude_sum = 0.0;

    for peak in &spectrum {
        let linear_mag = db_to_linear(peak.magnitude_db);
        weighted_sum += peak.frequency * linear_mag;
        magnitude_sum += linear_mag;
    }

    if magnitude_sum > 0.0 {
        weighted_sum / magnitude_sum
    } else {
        0.0
    }
}
