use std::io;

use thiserror::Error;

use crate::snapshot::SnapshotId;

/// Error types that can occur while reading or writing deck history.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Filesystem errors from a persistent log
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Snapshot (de)serialization errors
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Config file could not be parsed
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
    /// Invalid configuration values
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// A snapshot id that the log does not hold
    #[error("unknown snapshot: {0}")]
    UnknownSnapshot(SnapshotId),
    /// The in-memory cursor points past what the log holds
    #[error("history out of sync with log: cursor {cursor}, {length} records")]
    Desync { cursor: usize, length: usize },
    /// Errors reported by a custom log backend
    #[error("log error: {0}")]
    Log(String),
}
