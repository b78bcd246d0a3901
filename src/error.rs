//! Error types for Patina
//!
//! All fallible operations return [`PatinaError`] through the crate-wide
//! [`Result`] alias. The pure parameter mappers are total and never fail.

use thiserror::Error;

/// Result type alias using PatinaError
pub type Result<T> = std::result::Result<T, PatinaError>;

/// All possible errors in Patina
#[derive(Error, Debug)]
pub enum PatinaError {
    // Era lookup errors
    #[error("Unknown era: {label:?} (expected one of \"1910s\"..\"1980s\")")]
    UnknownEra { label: String },

    // Buffer errors
    #[error("Audio buffer is empty")]
    EmptyBuffer,

    #[error("Unsupported buffer layout: {details}")]
    UnsupportedLayout { details: String },

    // DSP errors
    #[error("Invalid effect parameter: {param} = {value} (valid range: {min}..{max})")]
    InvalidParameter {
        param: String,
        value: f32,
        min: f32,
        max: f32,
    },
}

impl PatinaError {
    /// Returns a suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::UnknownEra { .. } => "Use one of the eight decade labels, \"1910s\" through \"1980s\"",
            Self::EmptyBuffer => "Fill the buffer with samples before processing",
            Self::UnsupportedLayout { .. } => {
                "Interleave the samples so the count divides evenly by the channel count"
            }
            Self::InvalidParameter { .. } => "Adjust the parameter to be within valid range",
        }
    }
}
