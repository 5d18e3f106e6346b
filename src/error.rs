//! Error kinds shared by the driver, the stores and the command-line parsers.

use std::path::PathBuf;

use thiserror::Error;

/// A failure reported by one of the storage backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Fjall(#[from] fjall::Error),
    #[error(transparent)]
    Redb(#[from] redb::Error),
}

/// Command-line arguments that could not be turned into a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("option `{0}` requires a value")]
    MissingValue(String),
    #[error("invalid value `{value}` for option `{flag}`")]
    InvalidValue { flag: String, value: String },
    /// A chunk size that is not `<digits><GB|MB|KB|B>`.
    #[error("syntax error")]
    SizeSyntax(String),
    #[error("invalid target!")]
    InvalidTarget(String),
}

/// A fatal benchmark failure. The first one aborts the run.
///
/// The `Display` text of `Open` and `Put` is the line printed to stdout
/// before exiting.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error("Open: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: StoreError,
    },
    #[error("Put: {source}")]
    Put {
        key: String,
        #[source]
        source: StoreError,
    },
}

impl BenchError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) | Self::Open { .. } | Self::Put { .. } => 1,
        }
    }
}
