//! Synchronous-write benchmarks for embedded key-value engines.
//!
//! Every benchmark here follows the same shape: open an engine rooted at a
//! directory, put `count` values of `unit` bytes under the keys `"0"`,
//! `"1"`, ... with each put flushed to stable storage before it returns, and
//! report wall-clock throughput.
//!
//! The binaries are thin wrappers:
//!
//! - `syncput`: runs against `/tmp/syncput.db` and removes it afterwards.
//! - `syncput-keep`: runs against `./syncput.db` and leaves it on disk.
//! - `syncput-engines`: runs the same loop against a chosen engine or raw file.
//! - `bench-compare`: diffs two saved JSON reports.

pub mod cleanup;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod recorder;
pub mod schema;
pub mod store;

pub use cleanup::{remove_tree, RemoveTreeError};
pub use config::{BenchConfig, EngineBenchConfig, RunProfile};
pub use driver::{put_sequential, Payload, PutReport, RunOutcome};
pub use error::{BenchError, StoreError, UsageError};
pub use store::{ReadBack, SyncStore, Target};
