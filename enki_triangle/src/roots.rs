// Alpha root extraction: structured vectors pulled from the padded triangle.
//
// Two traversal orders over the N×N table:
// - Row-kind: rows 0..=N-4 (the first N-3 rows), trailing empty cells
//   trimmed. Row r carries N-r values, so the shortest row-kind root (row
//   N-4) still has exactly 4.
// - Diagonal-kind: for each column c from the epsilon column (3) to N-1,
//   the anti-diagonal table[i][c-i] for i in 0..min(N, c+1), reversed.
//   Every such cell lies inside the triangle (cell (i, c-i) holds a value
//   whenever c < N), so diagonal roots carry c+1 values — again at least 4.
//
// Roots are numbered sequentially, row-kind first, diagonal-kind continuing
// the count: 2N-6 in total. Individual roots are never padded; padding
// happens only when the roots are assembled into the rectangular alpha root
// table below.

use serde::{Deserialize, Serialize};

use crate::table::{Cell, EPSILON_COLUMN, PaddedTable};

/// Which traversal produced a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RootKind {
    Row,
    Diagonal,
}

/// A variable-length vector extracted from the triangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphaRoot {
    /// Sequential number, row-kind first: 0..2N-7.
    pub index: usize,
    pub kind: RootKind,
    pub values: Vec<i64>,
}

impl AlphaRoot {
    /// The export key for this root ("alpha_root_{i}").
    pub fn label(&self) -> String {
        format!("alpha_root_{}", self.index)
    }
}

/// Extract all 2N-6 alpha roots from the padded table.
pub fn extract_alpha_roots(table: &PaddedTable) -> Vec<AlphaRoot> {
    let n = table.n();
    let mut roots = Vec::with_capacity(2 * n - 6);

    // Row-kind: first N-3 rows with trailing empties trimmed. Values sit
    // contiguously at the front of each row, so filtering equals trimming.
    for r in 0..n - 3 {
        let values: Vec<i64> = table.row(r).iter().filter_map(|c| c.value()).collect();
        roots.push(AlphaRoot {
            index: roots.len(),
            kind: RootKind::Row,
            values,
        });
    }

    // Diagonal-kind: reversed anti-diagonals pivoting on the epsilon column.
    for c in EPSILON_COLUMN..n {
        let mut values: Vec<i64> = (0..n.min(c + 1))
            .filter_map(|i| table.value(i, c - i))
            .collect();
        values.reverse();
        roots.push(AlphaRoot {
            index: roots.len(),
            kind: RootKind::Diagonal,
            values,
        });
    }

    roots
}

/// The alpha roots as a rectangular (2N-6)×N table, ragged rows padded
/// with empty cells. Record assembly (record.rs) reads roots through this
/// table, matching the padded form the repeater rules are defined over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphaRootTable {
    width: usize,
    rows: Vec<Vec<Cell>>,
}

impl AlphaRootTable {
    /// Assemble roots into a padded table of width N.
    pub fn from_roots(roots: &[AlphaRoot], n: usize) -> Self {
        let rows = roots
            .iter()
            .map(|root| {
                let mut row: Vec<Cell> = root.values.iter().map(|&v| Cell::Value(v)).collect();
                row.resize(n, Cell::Empty);
                row
            })
            .collect();
        AlphaRootTable { width: n, rows }
    }

    /// Build a table directly from cell rows, padding or truncating each
    /// row to `width`. Used when a stored table is re-ingested instead of
    /// extracted from a live triangle.
    pub fn from_cells(rows: Vec<Vec<Cell>>, width: usize) -> Self {
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        AlphaRootTable { width, rows }
    }

    /// Row width (always N).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows (always 2N-6).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows. Never true for a valid N.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow row `i`.
    pub fn row(&self, i: usize) -> &[Cell] {
        &self.rows[i]
    }

    /// Iterate over all rows in index order.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// The table as rows of `Option<i64>` — the display/export view.
    pub fn to_rows(&self) -> Vec<Vec<Option<i64>>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.value()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::Cascade;
    use crate::seed::Seed;

    fn worked_table() -> PaddedTable {
        let seed = Seed::new(vec![3, 5, 2, 8, 1, 4]).unwrap();
        PaddedTable::from_cascade(&Cascade::from_seed(&seed)).unwrap()
    }

    #[test]
    fn worked_scenario_roots() {
        let table = worked_table();
        let roots = extract_alpha_roots(&table);
        assert_eq!(roots.len(), 2 * 6 - 6);

        // Row-kind: rows 0..=2 of the padded table, empties trimmed.
        assert_eq!(roots[0].kind, RootKind::Row);
        assert_eq!(roots[0].values, vec![3, 2, 1, 2, 0, 1]);
        assert_eq!(roots[1].values, vec![5, 3, 3, 2, 1]);
        assert_eq!(roots[2].values, vec![2, 6, 1, 3]);

        // Diagonal-kind: reversed anti-diagonals for columns 3..=5.
        assert_eq!(roots[3].kind, RootKind::Diagonal);
        assert_eq!(roots[3].index, 3);
        assert_eq!(roots[3].values, vec![8, 6, 3, 2]);
        assert_eq!(roots[4].values, vec![1, 7, 1, 2, 0]);
        assert_eq!(roots[5].values, vec![4, 3, 4, 3, 1, 1]);
    }

    #[test]
    fn count_invariant_for_all_valid_n() {
        let mut rng = enki_prng::EnkiRng::new(11);
        for n in 6..=15 {
            let seed = Seed::random(n, &mut rng).unwrap();
            let table = PaddedTable::from_cascade(&Cascade::from_seed(&seed)).unwrap();
            let roots = extract_alpha_roots(&table);
            assert_eq!(roots.len(), 2 * n - 6, "n={n}");
            let row_kind = roots.iter().filter(|r| r.kind == RootKind::Row).count();
            assert_eq!(row_kind, n - 3);
            // Every root has at least 4 values; none is padded.
            for root in &roots {
                assert!(root.values.len() >= 4, "root {} too short", root.index);
                assert!(root.values.len() <= n);
            }
        }
    }

    #[test]
    fn root_table_pads_ragged_rows() {
        let table = worked_table();
        let roots = extract_alpha_roots(&table);
        let root_table = AlphaRootTable::from_roots(&roots, table.n());
        assert_eq!(root_table.len(), 6);
        assert_eq!(root_table.width(), 6);

        // Row 2 had 4 values; columns 4 and 5 are padding.
        let row = root_table.row(2);
        assert_eq!(row[3], Cell::Value(3));
        assert!(row[4].is_empty());
        assert!(row[5].is_empty());

        // Row 5 is full width.
        assert!(root_table.row(5).iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn labels_follow_export_naming() {
        let table = worked_table();
        let roots = extract_alpha_roots(&table);
        assert_eq!(roots[0].label(), "alpha_root_0");
        assert_eq!(roots[5].label(), "alpha_root_5");
    }
}
