//! Sync-put benchmark against `./syncput.db`, left on disk after the run.
//!
//! Usage: `syncput-keep [-c count] [-u unit]`

use std::process::ExitCode;

use syncput_benchmarks::RunProfile;

fn main() -> ExitCode {
    syncput_benchmarks::cli::main(RunProfile::persistent())
}
