//! Benchmark parameters, run profiles and argument parsing.

use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;

use crate::error::UsageError;
use crate::store::Target;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_COUNT: u64 = 100;
pub const DEFAULT_UNIT: usize = 1024 * 1024;

/// Every payload byte. Values are byte-identical across a run.
pub const FILLER_BYTE: u8 = b'0';

pub const SCRATCH_DB_PATH: &str = "/tmp/syncput.db";
pub const LOCAL_DB_PATH: &str = "syncput.db";

pub const DEFAULT_ENGINE_COUNT: u64 = 500;
pub const DEFAULT_ENGINE_UNIT: &str = "1MB";

/// Environment variable holding the log level (`error` .. `trace`, `off`).
pub const LOG_ENV: &str = "SYNCPUT_LOG";

// ---------------------------------------------------------------------------
// Run profiles
// ---------------------------------------------------------------------------

/// Where a run keeps its database and whether it is removed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunProfile {
    pub db_path: PathBuf,
    pub cleanup_after: bool,
}

impl RunProfile {
    /// Absolute path under `/tmp`, removed after a successful run.
    pub fn scratch() -> Self {
        Self {
            db_path: PathBuf::from(SCRATCH_DB_PATH),
            cleanup_after: true,
        }
    }

    /// Relative to the working directory, left on disk for inspection.
    pub fn persistent() -> Self {
        Self {
            db_path: PathBuf::from(LOCAL_DB_PATH),
            cleanup_after: false,
        }
    }
}

// ---------------------------------------------------------------------------
// syncput / syncput-keep
// ---------------------------------------------------------------------------

/// Parameters of the put loop: `count` writes of `unit` bytes each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    pub count: u64,
    pub unit: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            unit: DEFAULT_UNIT,
        }
    }
}

impl BenchConfig {
    /// Parses `-c <count>` and `-u <unit>`, getopt style.
    ///
    /// Values may be attached (`-c5`) or separate (`-c 5`); a repeated flag
    /// keeps its last value. `args` excludes the program name.
    pub fn from_args<I, S>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            if arg == "--" {
                // End of options; operands are still rejected.
                return match args.next() {
                    Some(operand) => Err(UsageError::UnexpectedArgument(operand)),
                    None => Ok(config),
                };
            }
            let mut chars = arg.chars();
            if chars.next() != Some('-') {
                return Err(UsageError::UnexpectedArgument(arg));
            }
            let flag = match chars.next() {
                Some(f @ ('c' | 'u')) => f,
                _ => return Err(UsageError::UnknownOption(arg.clone())),
            };
            let name = format!("-{flag}");
            let value = match chars.as_str() {
                "" => args.next().ok_or_else(|| UsageError::MissingValue(name.clone()))?,
                attached => attached.to_string(),
            };

            match flag {
                'c' => config.count = parse_positive(&name, &value)?,
                _ => config.unit = parse_positive(&name, &value)?,
            }
        }

        Ok(config)
    }
}

fn parse_positive<T>(flag: &str, value: &str) -> Result<T, UsageError>
where
    T: FromStr + Default + PartialEq,
{
    match value.parse::<T>() {
        Ok(n) if n != T::default() => Ok(n),
        _ => Err(UsageError::InvalidValue {
            flag: flag.to_string(),
            value: value.to_string(),
        }),
    }
}

/// The one-line usage message, named after the invoked program.
pub fn usage(program: &str) -> String {
    format!("usage: {program} [-c count] [-u unit]")
}

// ---------------------------------------------------------------------------
// syncput-engines
// ---------------------------------------------------------------------------

/// Parameters of the engine comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineBenchConfig {
    pub count: u64,
    pub unit: usize,
    /// The chunk size as given on the command line, e.g. `4KB`.
    pub unit_label: String,
    pub target: Target,
    pub save: bool,
}

impl Default for EngineBenchConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_ENGINE_COUNT,
            unit: DEFAULT_UNIT,
            unit_label: DEFAULT_ENGINE_UNIT.to_string(),
            target: Target::Raw,
            save: false,
        }
    }
}

impl EngineBenchConfig {
    /// Parses `--count`, `--unit`, `--target` and `--save`.
    ///
    /// Both `-name` and `--name` are accepted, with the value either after
    /// `=` or as the next argument.
    pub fn from_args<I, S>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            if arg == "--" {
                return match args.next() {
                    Some(operand) => Err(UsageError::UnexpectedArgument(operand)),
                    None => Ok(config),
                };
            }
            let Some(body) = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-')) else {
                return Err(UsageError::UnexpectedArgument(arg.clone()));
            };
            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name.to_string(), Some(value.to_string())),
                None => (body.to_string(), None),
            };

            if name == "save" {
                config.save = true;
                continue;
            }
            if !matches!(name.as_str(), "count" | "unit" | "target") {
                return Err(UsageError::UnknownOption(arg));
            }

            let value = match inline {
                Some(v) => v,
                None => args
                    .next()
                    .ok_or_else(|| UsageError::MissingValue(format!("--{name}")))?,
            };
            match name.as_str() {
                "count" => config.count = parse_positive("--count", &value)?,
                "unit" => {
                    config.unit = parse_size(&value)?;
                    config.unit_label = value;
                }
                _ => config.target = value.parse()?,
            }
        }

        Ok(config)
    }
}

/// Parses a chunk size such as `4kb`, `2MB` or `512B` into bytes.
///
/// The number has no leading zero and the suffix is one of `GB`, `MB`, `KB`,
/// `B` (all upper or all lower case). Multiples are powers of 1024.
pub fn parse_size(text: &str) -> Result<usize, UsageError> {
    let syntax = || UsageError::SizeSyntax(text.to_string());

    let split = text.find(|c: char| !c.is_ascii_digit()).ok_or_else(syntax)?;
    let (digits, suffix) = text.split_at(split);
    if digits.is_empty() || digits.starts_with('0') {
        return Err(syntax());
    }

    let multiplier: usize = match suffix {
        "GB" | "gb" => 1 << 30,
        "MB" | "mb" => 1 << 20,
        "KB" | "kb" => 1 << 10,
        "B" | "b" => 1,
        _ => return Err(syntax()),
    };

    digits
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(syntax)
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Log level from `SYNCPUT_LOG`, `warn` when unset or unparseable.
pub fn log_level_from_env() -> LevelFilter {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Warn)
}
