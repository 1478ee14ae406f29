// The padded triangle table: the cascade as an N×N grid of cells.
//
// Columns are the named sequences in declared order (chi, theta, lambda,
// epsilon, kappa_0, ...); rows are positions within a sequence. Sequence k
// has length N-k, so column k holds values in rows 0..N-k and explicit
// `Cell::Empty` markers below that — row r therefore carries N-r values
// followed by empties. The empty marker is a real variant, not a magic
// integer, so no data value can ever collide with "past end of sequence".
//
// The table is the shared source for both the flat trend stream
// (`flatten` → trend.rs) and alpha root extraction (roots.rs).

use serde::{Deserialize, Serialize};

use crate::cascade::{Cascade, RootName};
use crate::error::TriangleError;

/// Column index of the epsilon sequence — the first anti-diagonal pivot
/// used by root extraction (roots.rs).
pub const EPSILON_COLUMN: usize = 3;

/// One table cell: a value, or an explicit past-end-of-sequence marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Value(i64),
}

impl Cell {
    /// The held value, or `None` for an empty cell.
    pub fn value(self) -> Option<i64> {
        match self {
            Cell::Empty => None,
            Cell::Value(v) => Some(v),
        }
    }

    /// True when the cell marks "past end of this sequence".
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// The N×N padded triangle, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddedTable {
    n: usize,
    rows: Vec<Vec<Cell>>,
}

impl PaddedTable {
    /// Lay the cascade out as an N×N cell grid.
    ///
    /// Fetches every sequence through the keyed cascade lookup, so an
    /// incomplete cascade surfaces as `MissingSequence` here rather than
    /// as a silent hole in the table.
    pub fn from_cascade(cascade: &Cascade) -> Result<Self, TriangleError> {
        let n = cascade.n();
        let mut rows = vec![vec![Cell::Empty; n]; n];
        for col in 0..n {
            let seq = cascade.sequence(RootName::at_depth(col))?;
            for (row, &v) in seq.values.iter().enumerate() {
                rows[row][col] = Cell::Value(v);
            }
        }
        Ok(PaddedTable { n, rows })
    }

    /// The table dimension N.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Borrow row `r` (all N columns, empties included).
    pub fn row(&self, r: usize) -> &[Cell] {
        &self.rows[r]
    }

    /// The value at (row, col), or `None` for an empty cell.
    pub fn value(&self, row: usize, col: usize) -> Option<i64> {
        self.rows[row][col].value()
    }

    /// All non-empty cells in row-major order: for each row, every column
    /// in declared sequence order. Length is always N(N+1)/2 — the triangle
    /// numbers.
    pub fn flatten(&self) -> Vec<i64> {
        self.rows
            .iter()
            .flat_map(|row| row.iter().filter_map(|c| c.value()))
            .collect()
    }

    /// The table as rows of `Option<i64>` — the plain tabular view handed
    /// to display collaborators.
    pub fn to_rows(&self) -> Vec<Vec<Option<i64>>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.value()).collect())
            .collect()
    }
}
