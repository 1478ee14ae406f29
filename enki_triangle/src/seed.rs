// The base seed: an ordered run of decimal digits.
//
// Everything downstream is a deterministic function of these digits, so the
// contract is enforced once, here: length N in [6, 15] and every digit in
// [0, 9]. A `Seed` is immutable after construction — the cascade and every
// later stage borrow it, nothing mutates it.

use enki_prng::EnkiRng;
use serde::{Deserialize, Serialize};

use crate::error::TriangleError;

/// Smallest accepted seed length. Below six digits the triangle has too few
/// rows to yield any alpha roots (the count 2N-6 reaches zero).
pub const MIN_SEED_LEN: usize = 6;

/// Largest accepted seed length.
pub const MAX_SEED_LEN: usize = 15;

/// A validated decimal seed of length N in [6, 15].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    digits: Vec<i64>,
}

impl Seed {
    /// Validate and wrap a digit sequence.
    ///
    /// Rejects lengths outside [6, 15] and any value outside [0, 9].
    pub fn new(digits: Vec<i64>) -> Result<Self, TriangleError> {
        let n = digits.len();
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&n) {
            return Err(TriangleError::InvalidSeed {
                reason: format!("length {n} outside [{MIN_SEED_LEN}, {MAX_SEED_LEN}]"),
            });
        }
        if let Some(&bad) = digits.iter().find(|&&d| !(0..=9).contains(&d)) {
            return Err(TriangleError::InvalidSeed {
                reason: format!("digit {bad} outside [0, 9]"),
            });
        }
        Ok(Seed { digits })
    }

    /// Draw a fresh random seed of length `n` from the supplied generator.
    pub fn random(n: usize, rng: &mut EnkiRng) -> Result<Self, TriangleError> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&n) {
            return Err(TriangleError::InvalidSeed {
                reason: format!("length {n} outside [{MIN_SEED_LEN}, {MAX_SEED_LEN}]"),
            });
        }
        let digits = (0..n).map(|_| rng.digit()).collect();
        Ok(Seed { digits })
    }

    /// The seed length N.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// True when the seed holds no digits. Never true for a constructed
    /// `Seed`; present for the conventional `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// The digit sequence.
    pub fn digits(&self) -> &[i64] {
        &self.digits
    }
}
