// The phorms mod tables: eight named versions, four formulas each.
//
// A version maps each trend-code selector (fall/rise/hold/end) to an
// elementwise integer formula. The mapping is total over `Trend`, so every
// selector a record can carry resolves to a formula in every version —
// there is no missing-key path. Versions differ only in the four formula
// bodies; the engine's control flow (transform.rs) is shared.
//
// Formula bodies follow the original table definitions, including the
// musical families: chromatic (12-tone pitch classes), rhythmic (note-value
// subdivisions), harmonic (chord intervals), modal (scale-degree lookups),
// and octave (register shifts). Where a formula takes a remainder the
// Euclidean form is used, so a negative input still lands in the expected
// non-negative range.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PhormsError;
use enki_triangle::trend::Trend;

/// Scale-degree semitone tables for the modal version.
const MAJOR_DEGREES: [i64; 7] = [0, 2, 4, 5, 7, 9, 11];
const MINOR_DEGREES: [i64; 7] = [0, 2, 3, 5, 7, 8, 10];
const PHRYGIAN_DEGREES: [i64; 7] = [0, 1, 3, 5, 7, 8, 10];

/// A named phorms mod table version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhormsVersion {
    Default,
    Increment,
    Custom,
    Chromatic,
    Rhythmic,
    Harmonic,
    Modal,
    Octave,
}

impl PhormsVersion {
    /// Every version, in declared order.
    pub const ALL: [PhormsVersion; 8] = [
        PhormsVersion::Default,
        PhormsVersion::Increment,
        PhormsVersion::Custom,
        PhormsVersion::Chromatic,
        PhormsVersion::Rhythmic,
        PhormsVersion::Harmonic,
        PhormsVersion::Modal,
        PhormsVersion::Octave,
    ];

    /// The version names accepted by `FromStr`, in declared order.
    pub const NAMES: [&'static str; 8] = [
        "default",
        "increment",
        "custom",
        "chromatic",
        "rhythmic",
        "harmonic",
        "modal",
        "octave",
    ];

    /// The version's configuration name.
    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// Apply the formula this version binds to `selector`.
    pub fn apply(self, selector: Trend, v: i64) -> i64 {
        match self {
            PhormsVersion::Default => match selector {
                Trend::Fall => v - 1,
                Trend::Rise => v + 1,
                Trend::Hold => v + 2,
                Trend::End => v + 3,
            },
            PhormsVersion::Increment => match selector {
                Trend::Fall => v,
                Trend::Rise => v + 2,
                Trend::Hold => v + 4,
                Trend::End => v + 6,
            },
            PhormsVersion::Custom => match selector {
                Trend::Fall => v * 2,
                Trend::Rise => v * v,
                Trend::Hold => v - 3,
                Trend::End => v + 5,
            },
            PhormsVersion::Chromatic => match selector {
                // 12-tone pitch classes; rise/hold/end step by a fifth,
                // major third, and minor third.
                Trend::Fall => v.rem_euclid(12),
                Trend::Rise => (v + 7).rem_euclid(12),
                Trend::Hold => (v + 4).rem_euclid(12),
                Trend::End => (v + 3).rem_euclid(12),
            },
            PhormsVersion::Rhythmic => match selector {
                // Note-value subdivisions on an eight-step wheel.
                Trend::Fall => v.rem_euclid(8),
                Trend::Rise => (v * 2).rem_euclid(8),
                Trend::Hold => 1.max(v.div_euclid(2)),
                Trend::End => (v + 1).rem_euclid(8) + 1,
            },
            PhormsVersion::Harmonic => match selector {
                // Root, major third, perfect fifth, minor seventh.
                Trend::Fall => v.rem_euclid(12),
                Trend::Rise => (v + 4).rem_euclid(12),
                Trend::Hold => (v + 7).rem_euclid(12),
                Trend::End => (v + 10).rem_euclid(12),
            },
            PhormsVersion::Modal => match selector {
                Trend::Fall => v.rem_euclid(7),
                Trend::Rise => MAJOR_DEGREES[v.rem_euclid(7) as usize],
                Trend::Hold => MINOR_DEGREES[v.rem_euclid(7) as usize],
                Trend::End => PHRYGIAN_DEGREES[v.rem_euclid(7) as usize],
            },
            PhormsVersion::Octave => match selector {
                // Register shifts constrained to eight octaves.
                Trend::Fall => v.rem_euclid(8),
                Trend::Rise => 7.min(v + 1),
                Trend::Hold => 0.max(v - 1),
                Trend::End => 7 - v.rem_euclid(8),
            },
        }
    }
}

impl fmt::Display for PhormsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PhormsVersion {
    type Err = PhormsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|v| v.name() == lower)
            .ok_or_else(|| PhormsError::UnknownVersion(s.to_string()))
    }
}
