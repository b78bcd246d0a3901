//! Audio data structures and measurement utilities
//!
//! The buffer is the unit of processing; the verification module measures
//! what the degradation pipeline did to it.

mod buffer;
pub mod verification;

pub use buffer::AudioBuffer;
