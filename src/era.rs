//! Decade presets
//!
//! Each supported decade carries a fixed degradation profile: how hard the
//! era's medium compressed, how much it hissed, how narrow its passband was,
//! and how mono it sounded. The table is a process-wide constant; the
//! [`Era`] enum replaces runtime label lookups with compile-time
//! exhaustiveness, so the only fallible operation left is parsing a label.

use crate::error::{PatinaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight supported decades, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Era {
    #[serde(rename = "1910s")]
    Era1910s,
    #[serde(rename = "1920s")]
    Era1920s,
    #[serde(rename = "1930s")]
    Era1930s,
    #[serde(rename = "1940s")]
    Era1940s,
    #[serde(rename = "1950s")]
    Era1950s,
    #[serde(rename = "1960s")]
    Era1960s,
    #[serde(rename = "1970s")]
    Era1970s,
    #[serde(rename = "1980s")]
    Era1980s,
}

impl Era {
    /// All eras in chronological order
    pub const ALL: [Era; 8] = [
        Era::Era1910s,
        Era::Era1920s,
        Era::Era1930s,
        Era::Era1940s,
        Era::Era1950s,
        Era::Era1960s,
        Era::Era1970s,
        Era::Era1980s,
    ];

    /// Get the decade label, e.g. `"1910s"`
    pub fn label(self) -> &'static str {
        match self {
            Era::Era1910s => "1910s",
            Era::Era1920s => "1920s",
            Era::Era1930s => "1930s",
            Era::Era1940s => "1940s",
            Era::Era1950s => "1950s",
            Era::Era1960s => "1960s",
            Era::Era1970s => "1970s",
            Era::Era1980s => "1980s",
        }
    }

    /// Get the first year of the decade
    pub fn year(self) -> u16 {
        match self {
            Era::Era1910s => 1910,
            Era::Era1920s => 1920,
            Era::Era1930s => 1930,
            Era::Era1940s => 1940,
            Era::Era1950s => 1950,
            Era::Era1960s => 1960,
            Era::Era1970s => 1970,
            Era::Era1980s => 1980,
        }
    }

    /// Parse a decade label
    ///
    /// Returns [`PatinaError::UnknownEra`] for any label outside the fixed
    /// set of eight.
    pub fn from_label(label: &str) -> Result<Era> {
        match label {
            "1910s" => Ok(Era::Era1910s),
            "1920s" => Ok(Era::Era1920s),
            "1930s" => Ok(Era::Era1930s),
            "1940s" => Ok(Era::Era1940s),
            "1950s" => Ok(Era::Era1950s),
            "1960s" => Ok(Era::Era1960s),
            "1970s" => Ok(Era::Era1970s),
            "1980s" => Ok(Era::Era1980s),
            other => Err(PatinaError::UnknownEra {
                label: other.to_string(),
            }),
        }
    }

    /// Get the degradation profile for this era
    pub fn preset(self) -> &'static EraPreset {
        &ERA_PRESETS[self as usize]
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Era {
    type Err = PatinaError;

    fn from_str(s: &str) -> Result<Self> {
        Era::from_label(s)
    }
}

/// One decade's degradation profile
///
/// The four intensity fields are percentages (0–100) that scale the
/// user-facing amount knob per effect; the frequency pair is the era's
/// characteristic passband in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EraPreset {
    /// The decade this profile belongs to
    pub era: Era,
    /// Intensity of dynamics compression (0–100)
    pub compression: f32,
    /// Background noise level (0–100)
    pub hiss: f32,
    /// How aggressively the bandpass narrows toward the era's band (0–100)
    pub filtering: f32,
    /// Percentage blend toward single-channel output (0–100)
    pub mono: f32,
    /// Lower passband edge in Hz
    pub low_freq: f32,
    /// Upper passband edge in Hz
    pub high_freq: f32,
    /// Human-readable character of the era
    pub description: &'static str,
}

impl EraPreset {
    /// Passband width in Hz
    pub fn bandwidth(&self) -> f32 {
        self.high_freq - self.low_freq
    }
}

/// Degradation profiles for every supported decade, chronological order.
///
/// Indexed by `Era as usize`; use [`Era::preset`] rather than indexing
/// directly.
pub const ERA_PRESETS: [EraPreset; 8] = [
    EraPreset {
        era: Era::Era1910s,
        compression: 100.0,
        hiss: 90.0,
        filtering: 100.0,
        mono: 100.0,
        low_freq: 500.0,
        high_freq: 2500.0,
        description: "Spark gap era, extremely primitive, barely intelligible",
    },
    EraPreset {
        era: Era::Era1920s,
        compression: 95.0,
        hiss: 80.0,
        filtering: 95.0,
        mono: 100.0,
        low_freq: 400.0,
        high_freq: 2800.0,
        description: "Crystal radio era, AM broadcast beginnings",
    },
    EraPreset {
        era: Era::Era1930s,
        compression: 90.0,
        hiss: 70.0,
        filtering: 90.0,
        mono: 100.0,
        low_freq: 300.0,
        high_freq: 3000.0,
        description: "AM radio, lo-fi, scratchy",
    },
    EraPreset {
        era: Era::Era1940s,
        compression: 80.0,
        hiss: 50.0,
        filtering: 85.0,
        mono: 100.0,
        low_freq: 250.0,
        high_freq: 3500.0,
        description: "War-era radio, slightly clearer",
    },
    EraPreset {
        era: Era::Era1950s,
        compression: 70.0,
        hiss: 35.0,
        filtering: 65.0,
        mono: 75.0,
        low_freq: 200.0,
        high_freq: 5000.0,
        description: "Early rock & roll, jukeboxes",
    },
    EraPreset {
        era: Era::Era1960s,
        compression: 50.0,
        hiss: 20.0,
        filtering: 45.0,
        mono: 50.0,
        low_freq: 150.0,
        high_freq: 8000.0,
        description: "FM emergence, cleaner but warm",
    },
    EraPreset {
        era: Era::Era1970s,
        compression: 30.0,
        hiss: 10.0,
        filtering: 25.0,
        mono: 0.0,
        low_freq: 100.0,
        high_freq: 10000.0,
        description: "Near hi-fi, slight warmth/saturation",
    },
    EraPreset {
        era: Era::Era1980s,
        compression: 20.0,
        hiss: 5.0,
        filtering: 15.0,
        mono: 0.0,
        low_freq: 80.0,
        high_freq: 12000.0,
        description: "FM dominance, clean, modern warmth",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_enum() {
        for (i, era) in Era::ALL.iter().enumerate() {
            assert_eq!(ERA_PRESETS[i].era, *era);
            assert_eq!(era.preset().era, *era);
        }
    }

    #[test]
    fn test_label_round_trip() {
        for era in Era::ALL {
            assert_eq!(Era::from_label(era.label()).unwrap(), era);
            assert_eq!(era.label().parse::<Era>().unwrap(), era);
            assert_eq!(era.to_string(), era.label());
        }
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        for label in ["1890s", "1990s", "1910", "", "spark gap"] {
            let err = Era::from_label(label).unwrap_err();
            assert!(
                matches!(err, PatinaError::UnknownEra { .. }),
                "{:?} should be an unknown era",
                label
            );
        }
    }

    #[test]
    fn test_years_advance_by_decade() {
        for pair in Era::ALL.windows(2) {
            assert_eq!(pair[1].year(), pair[0].year() + 10);
        }
        assert_eq!(Era::Era1910s.year(), 1910);
        assert_eq!(Era::Era1980s.year(), 1980);
    }

    #[test]
    fn test_descriptions_non_empty() {
        for era in Era::ALL {
            assert!(!era.preset().description.is_empty());
        }
    }

    #[test]
    fn test_bandwidth() {
        let preset = Era::Era1930s.preset();
        assert_eq!(preset.bandwidth(), 2700.0);
    }
}
