//! Ingest error types
//!
//! Every failure the loader can hit while turning export files into events.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering or loading export files
#[derive(Error, Debug)]
pub enum IngestError {
    /// File could not be opened or read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// First line missing, not JSON, or missing required fields
    #[error("Malformed export file {path:?}: {reason}")]
    MalformedInput { path: PathBuf, reason: String },

    /// `timestamp_usec` prefix is not a usable epoch second count
    #[error("Invalid timestamp {value:?} in {path:?}")]
    TimestampParse { path: PathBuf, value: String },

    /// Glob pattern could not be compiled
    #[error("Invalid file pattern {pattern:?}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Pattern matched no files at all
    #[error("No export files match {pattern:?}")]
    NoInputFiles { pattern: String },
}

impl IngestError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        IngestError::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for ingest operations
pub type IngestResult<T> = Result<T, IngestError>;
