//! Error types for every fatal failure of a race report run.

use std::path::PathBuf;

use biathlon_types::TimeParseError;
use thiserror::Error;

/// The race configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The event input could not be read or contains a malformed line.
#[derive(Debug, Error)]
pub enum EventParseError {
    #[error("line {line}: expected `[HH:MM:SS.mmm] <kind> <competitor> [extra]`, got {text:?}")]
    MalformedLine { line: u64, text: String },

    #[error("line {line}: {source}")]
    InvalidTimestamp { line: u64, source: TimeParseError },

    #[error("line {line}: unknown event kind {value:?}")]
    UnknownKind { line: u64, value: String },

    #[error("line {line}: draw start needs a start time, got {value:?}")]
    InvalidDrawTime { line: u64, value: String },

    #[error("failed to read events from {origin}: {source}")]
    Read {
        origin: String,
        source: std::io::Error,
    },

    #[error("event input is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),
}

impl EventParseError {
    /// Line the error was found on, if it came from a specific line.
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::MalformedLine { line, .. }
            | Self::InvalidTimestamp { line, .. }
            | Self::UnknownKind { line, .. }
            | Self::InvalidDrawTime { line, .. } => Some(*line),
            Self::Read { .. } | Self::NotUtf8(_) => None,
        }
    }
}

/// An output artifact could not be written.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to commit {path:?}: {source}")]
    Commit {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Any error that aborts a run.
#[derive(Debug, Error)]
pub enum RaceError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("events error: {0}")]
    Events(#[from] EventParseError),
    #[error("output error: {0}")]
    Output(#[from] OutputError),
}
