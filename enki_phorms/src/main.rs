// Enki pipeline — CLI entry point.
//
// Generates a data triangle from a decimal seed, transforms every alpha
// record under a phorms mod table version, and writes the run output to
// JSON. The pipeline: seed → difference cascade → flatten/encode →
// extract → transform → export.
//
// Usage:
//   cargo run -p enki_phorms --bin generate -- [output] [--n N]
//     [--digits 3,5,2,8,1,4] [--seed N] [--version NAME|all]
//     [--max-value M]
//
// Versions: default, increment, custom, chromatic, rhythmic, harmonic,
// modal, octave. `--version all` transforms one triangle under every
// version and writes one file per version; `output` is then treated as a
// directory.

use enki_phorms::export::{RunOutput, run, run_batch};
use enki_phorms::table::PhormsVersion;
use enki_phorms::transform::DEFAULT_MAX_VALUE;
use enki_prng::EnkiRng;
use enki_triangle::seed::Seed;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let output_arg = args
        .get(1)
        .filter(|s| !s.starts_with("--"))
        .map(|s| s.as_str());
    let n: usize = parse_flag(&args, "--n").unwrap_or(6);
    let digits: Option<String> = parse_flag(&args, "--digits");
    let rng_seed: Option<u64> = parse_flag(&args, "--seed");
    let version_name: String =
        parse_flag(&args, "--version").unwrap_or_else(|| "default".to_string());
    let max_value: i64 = parse_flag(&args, "--max-value").unwrap_or(DEFAULT_MAX_VALUE);

    let rng_seed = rng_seed.unwrap_or_else(rand::random);
    let mut rng = EnkiRng::new(rng_seed);

    println!("=== Enki Triangle Generator ===");
    println!("RNG seed: {rng_seed}");

    // [1/3] Seed digits: explicit --digits wins over a random draw of --n.
    println!("[1/3] Preparing seed...");
    let seed = match digits {
        Some(csv) => parse_digits(&csv).and_then(|d| Seed::new(d).map_err(|e| e.to_string())),
        None => Seed::random(n, &mut rng).map_err(|e| e.to_string()),
    };
    let seed = match seed {
        Ok(s) => s,
        Err(e) => {
            eprintln!("  Error: {e}");
            process::exit(1);
        }
    };
    println!("  N = {}, phi = {:?}", seed.len(), seed.digits());

    // [2/3] Generate and transform.
    if version_name == "all" {
        println!("[2/3] Generating and transforming under all versions...");
        let outputs = match run_batch(seed, &PhormsVersion::ALL, max_value, &mut rng) {
            Ok(o) => o,
            Err(e) => {
                eprintln!("  Error: {e}");
                process::exit(1);
            }
        };
        println!("  {} records per version.", outputs[0].records.len());

        println!("[3/3] Writing outputs...");
        let dir = PathBuf::from(output_arg.unwrap_or("."));
        for out in &outputs {
            let path = dir.join(format!("{}.json", out.export_stem()));
            write_output(out, &path);
        }
    } else {
        let version: PhormsVersion = match version_name.parse() {
            Ok(v) => v,
            Err(e) => {
                eprintln!("  Error: {e}");
                process::exit(1);
            }
        };
        println!("[2/3] Generating and transforming ({version})...");
        let out = match run(seed, version, max_value, &mut rng) {
            Ok(o) => o,
            Err(e) => {
                eprintln!("  Error: {e}");
                process::exit(1);
            }
        };
        println!(
            "  {} flat values, {} alpha records.",
            out.flat_sequence.len(),
            out.records.len()
        );

        println!("[3/3] Writing output...");
        let path = output_arg
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(format!("{}.json", out.export_stem())));
        write_output(&out, &path);
    }

    println!("Done.");
}

fn write_output(out: &RunOutput, path: &Path) {
    let json = match serde_json::to_string_pretty(out) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("  Error serializing output: {e}");
            process::exit(1);
        }
    };
    if let Err(e) = std::fs::write(path, json) {
        eprintln!("  Error writing {}: {e}", path.display());
        process::exit(1);
    }
    println!("  Wrote {}", path.display());
}

fn parse_digits(csv: &str) -> Result<Vec<i64>, String> {
    csv.split(',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .map_err(|_| format!("bad digit '{part}' in --digits"))
        })
        .collect()
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
