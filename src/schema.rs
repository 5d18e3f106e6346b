//! JSON result files written by `syncput-engines --save`.
//!
//! `bench-compare` reads two of these back, so any field added here must be
//! optional or defaulted to keep older files readable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SCHEMA_VERSION: u32 = 1;

/// Top-level report written to a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Bumped when a field changes meaning.
    pub schema_version: u32,
    /// Where and when the run happened.
    pub metadata: RunMetadata,
    /// One entry per measured put loop.
    pub results: Vec<BenchmarkResult>,
}

/// Captured once when the recorder is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// ISO 8601 UTC timestamp of the run start.
    pub timestamp: String,
    /// Short commit hash, absent outside a git checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_commit: Option<String>,
    /// Current branch name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    /// Whether the working tree had uncommitted changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_dirty: Option<bool>,
    /// Version of this crate.
    pub crate_version: String,
    /// Machine the run happened on.
    pub hardware: HardwareInfo,
}

/// Hardware information, so runs on different machines are not compared
/// blindly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareInfo {
    /// CPU model string from `/proc/cpuinfo`.
    pub cpu: String,
    /// Number of logical cores.
    pub cores: usize,
    /// Total RAM in GB.
    pub ram_gb: u64,
    /// Operating system.
    pub os: String,
    /// CPU architecture.
    pub arch: String,
}

/// One measured put loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// e.g. `"sync-put/fjall/1MB"`.
    pub benchmark: String,
    /// Recorder category, e.g. `"sync-put"`.
    pub category: String,
    /// Run parameters such as target, count and unit.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    #[serde(default)]
    pub parameters: HashMap<String, serde_json::Value>,
    /// Measured metrics.
    pub metrics: BenchmarkMetrics,
}

/// Metrics derived from one put loop.
///
/// All fields are optional; fields that don't apply are omitted from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ops_per_sec: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mib_per_sec: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_ns: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_ns: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_bytes: Option<u64>,
}
