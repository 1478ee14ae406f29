// The transformation engine.
//
// Per record: the untouched `a_root` row first, then one transformed row
// per selector in `pv_mod` — the version's formula applied elementwise to
// `a_root_copy`, each raw result clamped by the law
//
//     raw % (max_value + 1)   when raw >= 0
//     max_value               when raw < 0
//
// The selector vector has length N and every selector resolves in every
// version, so the set always holds N+1 rows before replication. The whole
// row-set is then replicated `repeater` times: a repeater of 0 keeps the
// single copy, and a negative repeater (the empty-pool fallback) yields an
// empty output — list replication, never re-transformation.
//
// Structural validation runs on the row-set before replication and aborts
// the record on any width or count mismatch rather than silently coercing:
// downstream consumers rely on the deterministic-encoding contract.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::PhormsError;
use crate::table::PhormsVersion;
use enki_triangle::record::{A_ROOT_WIDTH, AlphaRecord};

/// Default clamp ceiling: transformed values land in [0, 9].
pub const DEFAULT_MAX_VALUE: i64 = 9;

/// One record's transformed output: the original root row plus N
/// transformed rows, replicated per the record's repeater.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformedAlpha {
    /// The record index this output was transformed from.
    pub index: usize,
    pub rows: Vec<Vec<i64>>,
}

impl TransformedAlpha {
    /// The export key for this output ("alpha_phormed_{i}").
    pub fn label(&self) -> String {
        format!("alpha_phormed_{}", self.index)
    }
}

/// Clamp a raw formula result into [0, max_value].
fn clamp(raw: i64, max_value: i64) -> i64 {
    if raw >= 0 { raw % (max_value + 1) } else { max_value }
}

/// Transform one record under a version.
pub fn transform_record(
    record: &AlphaRecord,
    version: PhormsVersion,
    max_value: i64,
) -> Result<TransformedAlpha, PhormsError> {
    let mut rows = Vec::with_capacity(record.pv_mod.len() + 1);
    rows.push(record.a_root.to_vec());
    for &selector in &record.pv_mod {
        let row: Vec<i64> = record
            .a_root_copy
            .iter()
            .map(|&v| clamp(version.apply(selector, v), max_value))
            .collect();
        rows.push(row);
    }

    validate_structure(&rows, record)?;

    let rows = match record.repeater {
        0 => rows,
        r if r < 0 => Vec::new(),
        r => {
            let mut out = Vec::with_capacity(rows.len() * r as usize);
            for _ in 0..r {
                out.extend(rows.iter().cloned());
            }
            out
        }
    };

    Ok(TransformedAlpha {
        index: record.index,
        rows,
    })
}

/// Transform every record, keyed by export label in index order.
pub fn transform_records(
    records: &[AlphaRecord],
    version: PhormsVersion,
    max_value: i64,
) -> Result<BTreeMap<String, TransformedAlpha>, PhormsError> {
    let mut out = BTreeMap::new();
    for record in records {
        let transformed = transform_record(record, version, max_value)?;
        out.insert(transformed.label(), transformed);
    }
    Ok(out)
}

/// Check the pre-replication row-set: one row per selector plus the root
/// row, every row exactly `A_ROOT_WIDTH` wide.
fn validate_structure(rows: &[Vec<i64>], record: &AlphaRecord) -> Result<(), PhormsError> {
    let expected = record.pv_mod.len() + 1;
    if rows.len() != expected {
        return Err(PhormsError::BadStructure {
            record: record.index,
            reason: format!("{} rows, expected {expected}", rows.len()),
        });
    }
    for (i, row) in rows.iter().enumerate() {
        if row.len() != A_ROOT_WIDTH {
            return Err(PhormsError::BadStructure {
                record: record.index,
                reason: format!("row {i} is {} wide, expected {A_ROOT_WIDTH}", row.len()),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use enki_triangle::trend::Trend;

    fn record(repeater: i64, pv_mod: Vec<Trend>) -> AlphaRecord {
        AlphaRecord {
            index: 0,
            a_root: [3, 2, 1, 2],
            a_root_copy: [3, 2, 1, 2],
            pv_mod,
            repeater,
        }
    }

    #[test]
    fn first_row_is_the_untransformed_root() {
        let rec = record(0, vec![Trend::Rise, Trend::Fall]);
        let out = transform_record(&rec, PhormsVersion::Default, DEFAULT_MAX_VALUE).unwrap();
        assert_eq!(out.rows[0], vec![3, 2, 1, 2]);
        assert_eq!(out.rows[1], vec![4, 3, 2, 3]); // rise: +1
        assert_eq!(out.rows[2], vec![2, 1, 0, 1]); // fall: -1
    }

    #[test]
    fn selector_coverage_gives_one_row_per_selector() {
        for version in PhormsVersion::ALL {
            let pv_mod = vec![Trend::Fall, Trend::Rise, Trend::Hold, Trend::End, Trend::Hold];
            let rec = record(0, pv_mod.clone());
            let out = transform_record(&rec, version, DEFAULT_MAX_VALUE).unwrap();
            assert_eq!(out.rows.len(), pv_mod.len() + 1, "version {version}");
        }
    }

    #[test]
    fn negative_raw_values_clamp_to_max_value() {
        // custom/hold is v - 3: roots 1 and 2 go negative.
        let rec = record(0, vec![Trend::Hold]);
        let out = transform_record(&rec, PhormsVersion::Custom, DEFAULT_MAX_VALUE).unwrap();
        assert_eq!(out.rows[1], vec![0, 9, 9, 9]); // 3-3=0, 2-3<0, 1-3<0, 2-3<0
    }

    #[test]
    fn non_negative_raw_values_wrap_modulo() {
        // increment/end is v + 6 with max_value 9: 3+6=9, 2+6=8, 1+6=7.
        let rec = record(0, vec![Trend::End]);
        let out = transform_record(&rec, PhormsVersion::Increment, DEFAULT_MAX_VALUE).unwrap();
        assert_eq!(out.rows[1], vec![9, 8, 7, 8]);

        // A smaller ceiling wraps instead.
        let out = transform_record(&rec, PhormsVersion::Increment, 4).unwrap();
        assert_eq!(out.rows[1], vec![4, 3, 2, 3]); // (v+6) % 5
    }

    #[test]
    fn replication_law() {
        let pv_mod = vec![Trend::Rise, Trend::Fall, Trend::Hold];
        let base = pv_mod.len() + 1;

        let single = transform_record(&record(0, pv_mod.clone()), PhormsVersion::Default, 9)
            .unwrap();
        assert_eq!(single.rows.len(), base);

        let tripled = transform_record(&record(3, pv_mod.clone()), PhormsVersion::Default, 9)
            .unwrap();
        assert_eq!(tripled.rows.len(), base * 3);
        assert_eq!(&tripled.rows[..base], &single.rows[..]);
        assert_eq!(&tripled.rows[base..2 * base], &single.rows[..]);

        // Empty-pool fallback: replication by -1 empties the output.
        let emptied = transform_record(&record(-1, pv_mod), PhormsVersion::Default, 9).unwrap();
        assert!(emptied.rows.is_empty());
    }

    #[test]
    fn labels_follow_export_naming() {
        let rec = record(0, vec![Trend::Rise]);
        let out = transform_record(&rec, PhormsVersion::Default, 9).unwrap();
        assert_eq!(out.label(), "alpha_phormed_0");
    }
}
