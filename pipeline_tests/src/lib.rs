// Test helpers for end-to-end pipeline runs.
//
// Wraps the real `TriangleData::generate` and `export::run` entry points —
// the same code paths the `generate` binary uses — behind fixture
// constructors with fixed seeds, so the integration scenarios in
// `tests/full_pipeline.rs` stay short and every run is reproducible.

use enki_phorms::export::{RunOutput, run};
use enki_phorms::table::PhormsVersion;
use enki_phorms::transform::DEFAULT_MAX_VALUE;
use enki_prng::EnkiRng;
use enki_triangle::pipeline::TriangleData;
use enki_triangle::seed::Seed;

/// The worked scenario's seed digits: N=6, phi = [3,5,2,8,1,4].
pub const WORKED_DIGITS: [i64; 6] = [3, 5, 2, 8, 1, 4];

/// Fixed rng seed used by every fixture, so fallback draws are pinned.
pub const FIXTURE_RNG_SEED: u64 = 42;

/// Generate a triangle from explicit digits with the fixture rng.
pub fn triangle_from_digits(digits: &[i64]) -> TriangleData {
    let seed = Seed::new(digits.to_vec()).expect("fixture digits must be valid");
    let mut rng = EnkiRng::new(FIXTURE_RNG_SEED);
    TriangleData::generate(seed, &mut rng).expect("fixture triangle must build")
}

/// Generate a triangle from a random seed of length `n` with the fixture rng.
pub fn triangle_with_n(n: usize) -> TriangleData {
    let mut rng = EnkiRng::new(FIXTURE_RNG_SEED);
    let seed = Seed::random(n, &mut rng).expect("fixture length must be valid");
    TriangleData::generate(seed, &mut rng).expect("fixture triangle must build")
}

/// Run the full pipeline over explicit digits under one version.
pub fn run_from_digits(digits: &[i64], version: PhormsVersion) -> RunOutput {
    let seed = Seed::new(digits.to_vec()).expect("fixture digits must be valid");
    let mut rng = EnkiRng::new(FIXTURE_RNG_SEED);
    run(seed, version, DEFAULT_MAX_VALUE, &mut rng).expect("fixture run must succeed")
}
