//! Patina - Era-styled audio degradation engine
//!
//! Patina maps a decade (1910s through 1980s) to the sonic character of
//! its playback medium and renders that character onto audio offline.
//!
//! # Architecture
//!
//! The crate splits into two layers:
//! - Parameter mapping: fixed era presets plus pure derivation functions
//!   (distortion curve, filter cutoffs, compressor settings) that turn an
//!   era and an effect amount into concrete stage settings
//! - Degradation pipeline: five stages (mono blend, surface noise,
//!   bandpass, waveshaper, compressor) assembled in a fixed order by
//!   [`EraProcessor`]

pub mod audio;
pub mod dsp;
pub mod era;
pub mod error;
pub mod params;
pub mod processor;

pub use audio::AudioBuffer;
pub use era::{Era, EraPreset, ERA_PRESETS};
pub use error::{PatinaError, Result};
pub use params::{
    compressor_settings, crackle_probability, distortion_curve, filter_frequencies,
    CompressorSettings, DerivedParams, FilterFrequencies, NoiseSettings,
};
pub use processor::EraProcessor;
