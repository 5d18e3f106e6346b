//! Saves put-loop results as JSON reports under `results/`.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::info;

use crate::driver::PutReport;
use crate::schema::*;

pub const RESULTS_DIR: &str = "results";

/// Accumulates results and writes them to one JSON file.
pub struct ResultRecorder {
    category: String,
    metadata: RunMetadata,
    results: Vec<BenchmarkResult>,
}

impl ResultRecorder {
    /// Captures timestamp, git state and hardware at construction time.
    pub fn new(category: &str) -> Self {
        Self {
            category: category.to_string(),
            metadata: RunMetadata {
                timestamp: iso8601_now(),
                git_commit: git(&["rev-parse", "--short", "HEAD"]),
                git_branch: git(&["rev-parse", "--abbrev-ref", "HEAD"]),
                git_dirty: git(&["status", "--porcelain"]).map(|s| !s.is_empty()),
                crate_version: env!("CARGO_PKG_VERSION").to_string(),
                hardware: capture_hardware(),
            },
            results: Vec::new(),
        }
    }

    pub fn results(&self) -> &[BenchmarkResult] {
        &self.results
    }

    pub fn record(&mut self, result: BenchmarkResult) {
        self.results.push(result);
    }

    /// Records a completed put loop.
    pub fn record_put(&mut self, name: &str, parameters: HashMap<String, serde_json::Value>, report: &PutReport) {
        let total_ns = report.elapsed.as_nanos() as u64;
        self.results.push(BenchmarkResult {
            benchmark: name.to_string(),
            category: self.category.clone(),
            parameters,
            metrics: BenchmarkMetrics {
                ops_per_sec: Some(report.ops_per_sec()),
                mib_per_sec: Some(report.mib_per_sec()),
                avg_ns: Some(total_ns / report.count.max(1)),
                total_ns: Some(total_ns),
                samples: Some(report.count),
                payload_bytes: Some(report.unit as u64),
            },
        });
    }

    pub fn save(self) -> io::Result<PathBuf> {
        self.save_in(RESULTS_DIR)
    }

    /// Writes `<category>-<timestamp>-<commit>.json` into `dir`.
    pub fn save_in(self, dir: impl AsRef<Path>) -> io::Result<PathBuf> {
        let commit = self.metadata.git_commit.as_deref().unwrap_or("unknown");
        let ts = self.metadata.timestamp.replace(':', "-");
        let filename = format!("{}-{}-{}.json", self.category, ts, commit);

        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(filename);

        let report = BenchmarkReport {
            schema_version: SCHEMA_VERSION,
            metadata: self.metadata,
            results: self.results,
        };
        let json = serde_json::to_string_pretty(&report).map_err(io::Error::other)?;
        std::fs::write(&path, json)?;

        info!("results saved to {}", path.display());
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Metadata capture
// ---------------------------------------------------------------------------

fn iso8601_now() -> String {
    let secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let (year, month, day) = civil_from_days(secs / 86400);
    let time_of_day = secs % 86400;

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year,
        month,
        day,
        time_of_day / 3600,
        (time_of_day % 3600) / 60,
        time_of_day % 60
    )
}

/// Days since 1970-01-01 to a proleptic Gregorian (year, month, day).
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year, month, day)
}

fn git(args: &[&str]) -> Option<String> {
    std::process::Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}

fn capture_hardware() -> HardwareInfo {
    HardwareInfo {
        cpu: read_cpu_model(),
        cores: std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(0),
        ram_gb: read_total_ram_gb(),
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
    }
}

fn read_cpu_model() -> String {
    std::fs::read_to_string("/proc/cpuinfo")
        .ok()
        .and_then(|info| {
            info.lines()
                .find(|l| l.starts_with("model name"))
                .and_then(|l| l.split_once(':'))
                .map(|(_, model)| model.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn read_total_ram_gb() -> u64 {
    std::fs::read_to_string("/proc/meminfo")
        .ok()
        .and_then(|info| {
            info.lines()
                .find(|l| l.starts_with("MemTotal:"))
                .and_then(|l| l.split_whitespace().nth(1))
                .and_then(|kb| kb.parse::<u64>().ok())
        })
        .map(|kb| kb / (1024 * 1024))
        .unwrap_or(0)
}
