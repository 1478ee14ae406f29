// The trend code (PVA): a per-step monotonicity encoding of the flat stream.
//
// One code per adjacent pair of the flattened triangle — did the stream
// rise, fall, or hold — plus a single fixed terminator appended at the end.
// The resulting sequence has exactly the length of the flat stream and its
// last element is always the terminator.
//
// The four codes double as the selector alphabet for the phorms mod tables:
// every selector a record can carry is one of these variants, so a mod-table
// lookup can never miss. That coverage is a property of the type, not a
// runtime check.

use serde::{Deserialize, Serialize};

use crate::error::TriangleError;

/// One trend code. The wire values 0-3 match the original encoding:
/// fall = 0, rise = 1, hold = 2, terminator = 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Fall,
    Rise,
    Hold,
    End,
}

impl Trend {
    /// The numeric code used in exports and displays.
    pub fn code(self) -> u8 {
        match self {
            Trend::Fall => 0,
            Trend::Rise => 1,
            Trend::Hold => 2,
            Trend::End => 3,
        }
    }
}

/// Encode the flat stream into its trend code.
///
/// Errors on an empty stream — no pairs, no terminator position, nothing
/// downstream could consume it. Unreachable for any valid seed (N >= 6
/// gives a flat stream of at least 21 values).
pub fn trend_code(flat: &[i64]) -> Result<Vec<Trend>, TriangleError> {
    if flat.is_empty() {
        return Err(TriangleError::EmptyTrendCode);
    }
    let mut code = Vec::with_capacity(flat.len());
    for pair in flat.windows(2) {
        code.push(if pair[1] > pair[0] {
            Trend::Rise
        } else if pair[1] < pair[0] {
            Trend::Fall
        } else {
            Trend::Hold
        });
    }
    code.push(Trend::End);
    Ok(code)
}

/// The numeric view of a trend sequence, for exports and displays.
pub fn codes(trends: &[Trend]) -> Vec<u8> {
    trends.iter().map(|t| t.code()).collect()
}
