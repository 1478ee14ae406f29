// Enki data-triangle core.
//
// Generates a deterministic cascade of integer sequences from a short decimal
// seed, re-encodes the cascade into a flat trend-code stream, tiles that
// stream into a square modulation matrix, and extracts structured "alpha
// root" vectors from the padded triangle by row and anti-diagonal traversal.
// Each root is packaged into an alpha record carrying a repetition count and
// a modulation-selector vector — the input to the phorms transformation
// engine (`enki_phorms`).
//
// Architecture:
// - seed.rs: validated decimal seed (length 6-15, digits 0-9)
// - cascade.rs: named sequences (chi/theta/lambda/epsilon/kappa_i) built by
//   repeated absolute first-differencing
// - table.rs: the padded N×N triangle table and its row-major flattening
// - trend.rs: the trend-code alphabet (fall/rise/hold/end) and the pairwise
//   encoder over the flat sequence
// - modulation.rs: N×N selector matrix tiled cyclically from the trend code
// - roots.rs: alpha root extraction (row-kind + diagonal-kind) and the
//   padded alpha root table
// - record.rs: alpha record assembly with the repeater and modulation-row
//   fallback rules
// - pipeline.rs: the full chain as one pure function, gathering every
//   intermediate surface for inspection and export
// - error.rs: construction-error taxonomy
//
// The pipeline is pure and single-pass: no I/O, no shared state between
// runs, and every random fallback draws from a caller-supplied
// `enki_prng::EnkiRng`, so a fixed seed makes the whole run reproducible.

pub mod cascade;
pub mod error;
pub mod modulation;
pub mod pipeline;
pub mod record;
pub mod roots;
pub mod seed;
pub mod table;
pub mod trend;
