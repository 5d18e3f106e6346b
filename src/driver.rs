//! The timed put loop and the runs built on it.

use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::cleanup::{remove_tree, RemoveTreeError};
use crate::config::{BenchConfig, EngineBenchConfig, RunProfile, FILLER_BYTE};
use crate::error::{BenchError, StoreError};
use crate::store::{FjallStore, Preallocation, Sizing, SyncStore};

const MIB: f64 = 1024.0 * 1024.0;

/// The value written by every put of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(Box<[u8]>);

impl Payload {
    /// `len` copies of [`FILLER_BYTE`].
    pub fn filled(len: usize) -> Self {
        Self(vec![FILLER_BYTE; len].into_boxed_slice())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Puts `payload` under the keys `"0"` .. `"count - 1"`, in order, and
/// returns the wall-clock time of the whole loop.
///
/// Stops at the first failed put. Whatever was written before it stays in
/// the store.
pub fn put_sequential<S>(store: &mut S, count: u64, payload: &Payload) -> Result<Duration, BenchError>
where
    S: SyncStore + ?Sized,
{
    let start = Instant::now();
    for i in 0..count {
        let key = i.to_string();
        store
            .put_durable(key.as_bytes(), payload.as_bytes())
            .map_err(|source| BenchError::Put { key, source })?;
    }
    Ok(start.elapsed())
}

/// Timing of one completed put loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PutReport {
    pub count: u64,
    pub unit: usize,
    pub elapsed: Duration,
}

impl PutReport {
    pub fn total_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn avg_secs(&self) -> f64 {
        self.total_secs() / self.count as f64
    }

    pub fn ops_per_sec(&self) -> f64 {
        self.count as f64 / self.total_secs()
    }

    /// Aggregate payload throughput in MiB per second.
    pub fn mib_per_sec(&self) -> f64 {
        (self.unit as f64 * self.count as f64 / MIB) / self.total_secs()
    }
}

impl Display for PutReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "total time spend to append+sync all data: {:.6}s", self.total_secs())?;
        writeln!(
            f,
            "average time spend to write {:.3}KB: {:.6}s",
            self.unit as f64 / 1024.0,
            self.avg_secs()
        )?;
        writeln!(f, "rough throughput: {:.3} MB per second", self.mib_per_sec())
    }
}

/// Result of a profile run: the timing, and the cleanup result if the
/// profile asked for one.
#[derive(Debug)]
pub struct RunOutcome {
    pub report: PutReport,
    pub cleanup: Option<Result<usize, RemoveTreeError>>,
}

/// Runs the put loop against an fjall keyspace at the profile's path.
pub fn run(profile: &RunProfile, config: &BenchConfig) -> Result<RunOutcome, BenchError> {
    run_with(profile, config, FjallStore::open)
}

/// Runs the put loop against the store returned by `open`.
///
/// The store is closed before cleanup. On failure nothing is cleaned up.
pub fn run_with<S, F>(profile: &RunProfile, config: &BenchConfig, open: F) -> Result<RunOutcome, BenchError>
where
    S: SyncStore,
    F: FnOnce(&Path) -> Result<S, StoreError>,
{
    let payload = Payload::filled(config.unit);

    let report = {
        let mut store = open(profile.db_path.as_path()).map_err(|source| BenchError::Open {
            path: profile.db_path.clone(),
            source,
        })?;
        let elapsed = put_sequential(&mut store, config.count, &payload)?;
        PutReport {
            count: config.count,
            unit: config.unit,
            elapsed,
        }
    };
    debug!("{} puts done in {:?}", report.count, report.elapsed);

    let cleanup = profile.cleanup_after.then(|| {
        let result = remove_tree(&profile.db_path);
        if let Ok(removed) = &result {
            info!("removed {} ({removed} entries)", profile.db_path.display());
        }
        result
    });

    Ok(RunOutcome { report, cleanup })
}

/// Result of one engine comparison run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRun {
    pub report: PutReport,
    /// Present for targets that size their file at open.
    pub preallocation: Option<Preallocation>,
}

/// Runs the put loop against the configured target in its scratch directory.
///
/// The directory is removed before and after the run; a failed removal is
/// only logged.
pub fn run_target(config: &EngineBenchConfig) -> Result<TargetRun, BenchError> {
    let root = config.target.scratch_dir();
    if root.exists() {
        if let Err(e) = remove_tree(&root) {
            warn!("{e}");
        }
    }

    let payload = Payload::filled(config.unit);
    let sizing = Sizing {
        count: config.count,
        unit: config.unit,
    };

    let (elapsed, preallocation) = {
        let mut store = config
            .target
            .open(&root, sizing)
            .map_err(|source| BenchError::Open { path: root.clone(), source })?;
        let preallocation = store.preallocation();
        (put_sequential(store.as_mut(), config.count, &payload)?, preallocation)
    };

    if let Err(e) = remove_tree(&root) {
        warn!("{e}");
    }

    Ok(TargetRun {
        report: PutReport {
            count: config.count,
            unit: config.unit,
            elapsed,
        },
        preallocation,
    })
}
