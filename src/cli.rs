//! Entry points shared by the binaries.

use std::path::Path;
use std::process::ExitCode;

use log::{debug, warn};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use crate::config::{log_level_from_env, usage, BenchConfig, RunProfile};
use crate::driver;
use crate::error::BenchError;

/// Installs a stderr logger at the level named by `SYNCPUT_LOG`.
pub fn init_logging() {
    let _ = TermLogger::init(
        log_level_from_env(),
        ConfigBuilder::new()
            .add_filter_allow_str("syncput_benchmarks")
            .build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

/// File name of `argv[0]`, or `fallback` when it is missing.
pub fn program_name(arg0: Option<String>, fallback: &str) -> String {
    arg0.as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| fallback.to_string())
}

/// `main` of `syncput` and `syncput-keep`; they differ only in `profile`.
pub fn main(profile: RunProfile) -> ExitCode {
    init_logging();

    let mut args = std::env::args();
    let program = program_name(args.next(), "syncput");
    let config = match BenchConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            debug!("{e}");
            println!("{}", usage(&program));
            return ExitCode::from(BenchError::from(e).exit_code());
        }
    };

    println!(
        "loop count: {}, chunk size: {}(in bytes)",
        config.count, config.unit
    );

    match driver::run(&profile, &config) {
        Ok(outcome) => {
            print!("{}", outcome.report);
            if let Some(Err(e)) = outcome.cleanup {
                warn!("{e}");
                println!(
                    "temporary database files '{}' cannot remove",
                    profile.db_path.display()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
