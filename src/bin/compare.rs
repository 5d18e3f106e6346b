//! Benchmark comparison tool.
//!
//! Compares two JSON result files written by `syncput-engines --save` and
//! prints a table of throughput deltas.
//!
//! Usage: `cargo run --bin bench-compare -- <baseline.json> <candidate.json>`

use std::collections::HashMap;

use syncput_benchmarks::schema::{BenchmarkMetrics, BenchmarkReport, BenchmarkResult};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <baseline.json> <candidate.json>", args[0]);
        std::process::exit(1);
    }

    let baseline = load_report(&args[1]);
    let candidate = load_report(&args[2]);

    let base_map: HashMap<&str, &BenchmarkResult> = baseline
        .results
        .iter()
        .map(|r| (r.benchmark.as_str(), r))
        .collect();

    eprintln!("Baseline: {} ({})", args[1], baseline.metadata.timestamp);
    eprintln!("Candidate: {} ({})", args[2], candidate.metadata.timestamp);
    eprintln!();

    println!(
        "{:<32} | {:>12} | {:>12} | {:>16}",
        "Benchmark", "Base MB/s", "New MB/s", "Delta"
    );
    println!("{}", "-".repeat(80));

    let mut matched = 0u32;
    let mut only_cand = 0u32;

    for cand in &candidate.results {
        match base_map.get(cand.benchmark.as_str()) {
            Some(base) => {
                matched += 1;
                print_comparison(&cand.benchmark, &base.metrics, &cand.metrics);
            }
            None => only_cand += 1,
        }
    }

    let only_base = baseline
        .results
        .iter()
        .filter(|b| !candidate.results.iter().any(|c| c.benchmark == b.benchmark))
        .count();

    println!("{}", "-".repeat(80));
    println!(
        "Compared: {} | Baseline only: {} | Candidate only: {}",
        matched, only_base, only_cand
    );
}

fn load_report(path: &str) -> BenchmarkReport {
    let contents = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    });
    serde_json::from_str(&contents).unwrap_or_else(|e| {
        eprintln!("Error parsing {}: {}", path, e);
        std::process::exit(1);
    })
}

fn print_comparison(name: &str, base: &BenchmarkMetrics, cand: &BenchmarkMetrics) {
    let (Some(base_mib), Some(cand_mib)) = (base.mib_per_sec, cand.mib_per_sec) else {
        println!("{:<32} | {:>12} | {:>12} | {:>16}", name, "-", "-", "n/a");
        return;
    };

    let delta_pct = if base_mib > 0.0 {
        (cand_mib - base_mib) / base_mib * 100.0
    } else {
        0.0
    };
    // Higher throughput is better.
    let hint = if delta_pct > 1.0 {
        "faster"
    } else if delta_pct < -1.0 {
        "slower"
    } else {
        "~same"
    };

    println!(
        "{:<32} | {:>12.3} | {:>12.3} | {:>+8.1}% ({})",
        name, base_mib, cand_mib, delta_pct, hint
    );
}
