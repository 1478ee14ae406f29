// Phorms transformation surface for the Enki pipeline.
//
// Consumes the alpha records produced by `enki_triangle` and applies a
// named, versioned table of four elementwise integer formulas — one per
// trend-code selector — to each record, with the record's repeater
// controlling replication of the transformed row-set.
//
// Architecture:
// - table.rs: the eight phorms mod table versions and their formulas
// - transform.rs: the transformation engine (clamp law, structural
//   validation, replication)
// - export.rs: the full seed→transform run and its serializable output
// - error.rs: configuration and structural error taxonomy
// - main.rs: the `generate` CLI binary (I/O glue around the pure core)

pub mod error;
pub mod export;
pub mod table;
pub mod transform;
