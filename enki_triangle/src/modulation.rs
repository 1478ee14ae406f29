// The modulation matrix: N×N selector codes tiled from the trend code.
//
// A single cursor walks the trend code cyclically while the matrix fills in
// row-major order, so the trend stream wraps as many times as N² requires.
// Row i is later attached to alpha record i as its selector vector
// (record.rs); records whose index falls past the last row fall back to a
// random row, drawn by the caller.

use serde::{Deserialize, Serialize};

use crate::error::TriangleError;
use crate::trend::Trend;

/// N×N matrix of trend-code selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulationMatrix {
    n: usize,
    rows: Vec<Vec<Trend>>,
}

impl ModulationMatrix {
    /// Fill an N×N matrix cyclically from the trend code.
    ///
    /// An empty trend code cannot be tiled (the cursor would divide by
    /// zero); that is a fatal precondition violation, though trend.rs
    /// guarantees it never happens for a valid seed.
    pub fn from_trend_code(code: &[Trend], n: usize) -> Result<Self, TriangleError> {
        if code.is_empty() {
            return Err(TriangleError::EmptyTrendCode);
        }
        let mut cursor = 0usize;
        let mut rows = Vec::with_capacity(n);
        for _ in 0..n {
            let mut row = Vec::with_capacity(n);
            for _ in 0..n {
                row.push(code[cursor % code.len()]);
                cursor += 1;
            }
            rows.push(row);
        }
        Ok(ModulationMatrix { n, rows })
    }

    /// The matrix dimension N.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Borrow selector row `i`.
    pub fn row(&self, i: usize) -> &[Trend] {
        &self.rows[i]
    }

    /// The label under which row `i` is exported ("alpha_{i}_PV_mod").
    pub fn row_label(i: usize) -> String {
        format!("alpha_{i}_PV_mod")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend::codes;

    #[test]
    fn tiles_cyclically_in_row_major_order() {
        // A 3-long code into a 4x4 matrix wraps mid-row.
        let code = [Trend::Rise, Trend::Fall, Trend::Hold];
        let matrix = ModulationMatrix::from_trend_code(&code, 4).unwrap();
        assert_eq!(codes(matrix.row(0)), vec![1, 0, 2, 1]);
        assert_eq!(codes(matrix.row(1)), vec![0, 2, 1, 0]);
        assert_eq!(codes(matrix.row(2)), vec![2, 1, 0, 2]);
        assert_eq!(codes(matrix.row(3)), vec![1, 0, 2, 1]);
    }

    #[test]
    fn code_longer_than_matrix_never_wraps() {
        let code: Vec<Trend> = std::iter::repeat_n([Trend::Rise, Trend::Fall], 20)
            .flatten()
            .collect();
        let matrix = ModulationMatrix::from_trend_code(&code, 6).unwrap();
        for i in 0..6 {
            assert_eq!(matrix.row(i).len(), 6);
            let expected: Vec<Trend> = code[i * 6..(i + 1) * 6].to_vec();
            assert_eq!(matrix.row(i), &expected[..]);
        }
    }

    #[test]
    fn empty_code_is_fatal() {
        assert_eq!(
            ModulationMatrix::from_trend_code(&[], 6).unwrap_err(),
            TriangleError::EmptyTrendCode
        );
    }

    #[test]
    fn row_labels_follow_export_naming() {
        assert_eq!(ModulationMatrix::row_label(0), "alpha_0_PV_mod");
        assert_eq!(ModulationMatrix::row_label(11), "alpha_11_PV_mod");
    }
}
