//! Sync-put comparison across storage backends.
//!
//! Usage: `syncput-engines [--count n] [--unit 1MB] [--target raw|fdatasync|fjall|redb] [--save]`
//!
//! Each run happens in `$TMPDIR/syncput-<target>`, which is removed before
//! and after. With `--save` the result is written to `results/`.

use std::collections::HashMap;
use std::process::ExitCode;

use syncput_benchmarks::cli::{init_logging, program_name};
use syncput_benchmarks::driver::run_target;
use syncput_benchmarks::recorder::ResultRecorder;
use syncput_benchmarks::{BenchError, EngineBenchConfig, PutReport, UsageError};

fn main() -> ExitCode {
    init_logging();

    let mut args = std::env::args();
    let program = program_name(args.next(), "syncput-engines");
    let config = match EngineBenchConfig::from_args(args) {
        Ok(config) => config,
        Err(e @ (UsageError::SizeSyntax(_) | UsageError::InvalidTarget(_))) => {
            println!("{e}");
            return ExitCode::from(BenchError::from(e).exit_code());
        }
        Err(e) => {
            println!("{e}");
            println!(
                "usage: {program} [--count n] [--unit size] [--target raw|fdatasync|fjall|redb] [--save]"
            );
            return ExitCode::from(BenchError::from(e).exit_code());
        }
    };

    println!("loop count: {}, chunk size: {}", config.count, config.unit_label);
    println!();
    println!("{}", config.target.banner());

    let run = match run_target(&config) {
        Ok(run) => run,
        Err(e) => {
            println!("{e}");
            return ExitCode::from(e.exit_code());
        }
    };
    if let Some(preallocation) = run.preallocation {
        println!("{preallocation}");
    }
    let report = run.report;
    print_stats(&report, &config.unit_label);

    if config.save {
        let mut recorder = ResultRecorder::new("sync-put");
        let mut params = HashMap::new();
        params.insert("target".into(), serde_json::json!(config.target.label()));
        params.insert("count".into(), serde_json::json!(config.count));
        params.insert("unit".into(), serde_json::json!(config.unit));
        let name = format!("sync-put/{}/{}", config.target, config.unit_label);
        recorder.record_put(&name, params, &report);
        match recorder.save() {
            Ok(path) => eprintln!("Results saved to {}", path.display()),
            Err(e) => {
                eprintln!("Error saving results: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_stats(report: &PutReport, unit_label: &str) {
    println!(
        "\ttotal time spend to append+sync all data: {:?}",
        report.elapsed
    );
    println!(
        "\taverage time spend to write {}: {:.3}us",
        unit_label,
        report.avg_secs() * 1e6
    );
    println!(
        "\trough throughput: {:.3}MB per second",
        report.mib_per_sec()
    );
}
