// The difference cascade: N named sequences of shrinking length.
//
// The first sequence (chi) is the seed itself. Each successor is the
// elementwise absolute value of its predecessor's first difference, so the
// lengths run N, N-1, ..., 1. The first four sequences carry fixed names
// (chi, theta, lambda, epsilon); the remaining N-4 are numbered kappa
// sequences. `kappa_total = N - 4` is sized exactly so the cascade stops at
// length 1 — differencing a length-1 sequence would yield length 0, and the
// construction never goes there.
//
// Sequences are looked up by typed key (`RootName`), not by scanning name
// strings: each name maps to a fixed depth, so `Cascade::sequence` is an
// indexed access that still verifies the slot holds what the key claims.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TriangleError;
use crate::seed::Seed;

/// Typed key for a cascade sequence.
///
/// Declared order is chi, theta, lambda, epsilon, kappa_0 .. kappa_{N-5}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RootName {
    Chi,
    Theta,
    Lambda,
    Epsilon,
    Kappa(usize),
}

impl RootName {
    /// The 0-indexed cascade depth this name occupies.
    pub fn depth(self) -> usize {
        match self {
            RootName::Chi => 0,
            RootName::Theta => 1,
            RootName::Lambda => 2,
            RootName::Epsilon => 3,
            RootName::Kappa(i) => 4 + i,
        }
    }

    /// The name occupying a given cascade depth.
    pub fn at_depth(depth: usize) -> Self {
        match depth {
            0 => RootName::Chi,
            1 => RootName::Theta,
            2 => RootName::Lambda,
            3 => RootName::Epsilon,
            d => RootName::Kappa(d - 4),
        }
    }
}

impl fmt::Display for RootName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootName::Chi => write!(f, "chi_root"),
            RootName::Theta => write!(f, "theta_root"),
            RootName::Lambda => write!(f, "lambda_root"),
            RootName::Epsilon => write!(f, "epsilon_root"),
            RootName::Kappa(i) => write!(f, "kappa_root_{i}"),
        }
    }
}

/// One sequence of the cascade: its key, depth, and values.
///
/// Invariant: `values.len() == n - depth` for a cascade over a length-N seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSequence {
    pub name: RootName,
    pub depth: usize,
    pub values: Vec<i64>,
}

/// The full cascade: exactly N named sequences in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cascade {
    n: usize,
    sequences: Vec<NamedSequence>,
}

impl Cascade {
    /// Build the cascade from a seed by repeated absolute first-differencing.
    pub fn from_seed(seed: &Seed) -> Self {
        let n = seed.len();
        let mut sequences = Vec::with_capacity(n);
        sequences.push(NamedSequence {
            name: RootName::Chi,
            depth: 0,
            values: seed.digits().to_vec(),
        });
        for depth in 1..n {
            let values = abs_diff(&sequences[depth - 1].values);
            sequences.push(NamedSequence {
                name: RootName::at_depth(depth),
                depth,
                values,
            });
        }
        Cascade { n, sequences }
    }

    /// The seed length N (also the number of sequences).
    pub fn n(&self) -> usize {
        self.n
    }

    /// How many numbered kappa sequences the cascade carries (N - 4).
    pub fn kappa_total(&self) -> usize {
        self.n - 4
    }

    /// All sequences in declared order.
    pub fn sequences(&self) -> &[NamedSequence] {
        &self.sequences
    }

    /// Keyed lookup. A miss is a fatal construction error: every later
    /// stage depends on the cascade being complete.
    pub fn sequence(&self, name: RootName) -> Result<&NamedSequence, TriangleError> {
        self.sequences
            .get(name.depth())
            .filter(|s| s.name == name)
            .ok_or(TriangleError::MissingSequence(name))
    }
}

/// Elementwise absolute value of the first difference.
/// A length-1 input yields a length-0 output.
fn abs_diff(values: &[i64]) -> Vec<i64> {
    values.windows(2).map(|w| (w[1] - w[0]).abs()).collect()
}
