//! Sync-put benchmark against `/tmp/syncput.db`, removed after the run.
//!
//! Usage: `syncput [-c count] [-u unit]`

use std::process::ExitCode;

use syncput_benchmarks::RunProfile;

fn main() -> ExitCode {
    syncput_benchmarks::cli::main(RunProfile::scratch())
}
