// The full run and its exportable output.
//
// `run` chains seed → triangle → transformation and gathers everything a
// collaborator needs as one plain serializable value:
// - persistence: the transformed row-sets keyed "alpha_phormed_{i}", plus
//   the version name and the original N/seed, and a filename stem matching
//   the original export convention
//   ("alpha_transphormed_N{n}_phi_{digits}_{version}")
// - display: the alpha root table, the modulation matrix rows keyed
//   "alpha_{i}_PV_mod", the combined flat sequence, and the trend code as
//   numeric values
//
// No on-disk format is mandated here; the CLI (main.rs) happens to write
// JSON, but any consumer of `RunOutput` may do otherwise.

use enki_prng::EnkiRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::PhormsError;
use crate::table::PhormsVersion;
use crate::transform::transform_records;
use enki_triangle::modulation::ModulationMatrix;
use enki_triangle::pipeline::TriangleData;
use enki_triangle::seed::Seed;
use enki_triangle::trend;

/// One record as exported: the assembled fields plus numeric selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordExport {
    pub a_root: Vec<i64>,
    pub alpha_pv_mod: Vec<u8>,
    pub repeater: i64,
}

/// The complete output of one seed→transform run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutput {
    pub n: usize,
    pub seed: Vec<i64>,
    pub version: String,
    pub max_value: i64,
    /// Combined flat sequence, length N(N+1)/2.
    pub flat_sequence: Vec<i64>,
    /// Trend code as numeric values, terminator (3) last.
    pub trend_code: Vec<u8>,
    /// The padded triangle, rows of `Option<i64>`.
    pub triangle: Vec<Vec<Option<i64>>>,
    /// The alpha root table, rows of `Option<i64>`.
    pub root_table: Vec<Vec<Option<i64>>>,
    /// Modulation matrix rows keyed "alpha_{i}_PV_mod".
    pub modulation: BTreeMap<String, Vec<u8>>,
    /// Assembled records keyed "alpha_root_{i}".
    pub records: BTreeMap<String, RecordExport>,
    /// Transformed row-sets keyed "alpha_phormed_{i}".
    pub transformed: BTreeMap<String, Vec<Vec<i64>>>,
}

impl RunOutput {
    /// Package a generated triangle and a transformation pass.
    pub fn from_triangle(
        data: &TriangleData,
        version: PhormsVersion,
        max_value: i64,
    ) -> Result<Self, PhormsError> {
        let transformed = transform_records(&data.records, version, max_value)?
            .into_iter()
            .map(|(label, t)| (label, t.rows))
            .collect();

        let modulation = (0..data.matrix.n())
            .map(|i| {
                (
                    ModulationMatrix::row_label(i),
                    trend::codes(data.matrix.row(i)),
                )
            })
            .collect();

        let records = data
            .records
            .iter()
            .map(|r| {
                (
                    r.label(),
                    RecordExport {
                        a_root: r.a_root.to_vec(),
                        alpha_pv_mod: trend::codes(&r.pv_mod),
                        repeater: r.repeater,
                    },
                )
            })
            .collect();

        Ok(RunOutput {
            n: data.n(),
            seed: data.seed.digits().to_vec(),
            version: version.name().to_string(),
            max_value,
            flat_sequence: data.flat.clone(),
            trend_code: trend::codes(&data.trend),
            triangle: data.table.to_rows(),
            root_table: data.root_table.to_rows(),
            modulation,
            records,
            transformed,
        })
    }

    /// Filename stem following the original export convention:
    /// `alpha_transphormed_N{n}_phi_{digit_digit_...}_{version}`.
    pub fn export_stem(&self) -> String {
        let digits: Vec<String> = self.seed.iter().map(|d| d.to_string()).collect();
        format!(
            "alpha_transphormed_N{}_phi_{}_{}",
            self.n,
            digits.join("_"),
            self.version
        )
    }
}

/// Run the entire pipeline: generate the triangle from `seed`, then
/// transform every record under `version`.
pub fn run(
    seed: Seed,
    version: PhormsVersion,
    max_value: i64,
    rng: &mut EnkiRng,
) -> Result<RunOutput, PhormsError> {
    let data = TriangleData::generate(seed, rng)?;
    RunOutput::from_triangle(&data, version, max_value)
}

/// Run one triangle and transform it under every listed version — the
/// batch form. The triangle (and its random fallbacks) is generated once,
/// so all outputs share identical records.
pub fn run_batch(
    seed: Seed,
    versions: &[PhormsVersion],
    max_value: i64,
    rng: &mut EnkiRng,
) -> Result<Vec<RunOutput>, PhormsError> {
    let data = TriangleData::generate(seed, rng)?;
    versions
        .iter()
        .map(|&version| RunOutput::from_triangle(&data, version, max_value))
        .collect()
}
