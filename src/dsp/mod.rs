//! Degradation stage library
//!
//! The five stages of the era pipeline. All stages implement the
//! `Effect` trait for uniform processing and are assembled in a fixed
//! order by the processor.

mod bandpass;
mod chain;
mod compressor;
mod effect;
mod mono;
mod noise;
mod waveshaper;

pub use bandpass::Bandpass;
pub use chain::EffectChain;
pub use compressor::Compressor;
pub use effect::Effect;
pub use mono::MonoBlend;
pub use noise::SurfaceNoise;
pub use waveshaper::WaveShaper;
