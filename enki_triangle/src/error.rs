// Construction-error taxonomy for the triangle core.
//
// Every error here is fatal: no partial triangle is usable downstream, so
// callers abort the run and report which invariant failed. There are no
// retryable conditions — the pipeline is pure computation. Degenerate-data
// fallbacks (a zero repeater sum, a record index past the modulation
// matrix) are documented behaviors handled locally in `record.rs`, not
// errors.

use crate::cascade::RootName;
use std::fmt;

/// Fatal construction errors raised while building the triangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriangleError {
    /// The caller-supplied seed violates the length or digit contract.
    InvalidSeed { reason: String },
    /// A named sequence required by a later stage is missing from the
    /// cascade. Cannot happen for a cascade built by `Cascade::from_seed`,
    /// but lookups stay fallible so the invariant is checked, not assumed.
    MissingSequence(RootName),
    /// The flattened triangle produced no values, so no trend code can be
    /// derived. Unreachable for any valid seed length (N >= 6 gives at
    /// least 21 flat values).
    EmptyTrendCode,
    /// An alpha root table row holds fewer than the four leading values an
    /// alpha record requires.
    ShortRoot { index: usize, len: usize },
}

impl fmt::Display for TriangleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriangleError::InvalidSeed { reason } => {
                write!(f, "invalid seed: {reason}")
            }
            TriangleError::MissingSequence(name) => {
                write!(f, "named sequence {name} missing from cascade")
            }
            TriangleError::EmptyTrendCode => {
                write!(f, "flattened triangle is empty, cannot derive a trend code")
            }
            TriangleError::ShortRoot { index, len } => {
                write!(
                    f,
                    "alpha root {index} has only {len} leading values, need 4"
                )
            }
        }
    }
}

impl std::error::Error for TriangleError {}
