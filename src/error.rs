//! Error types for the redaction pipeline
//!
//! Every fatal error is scoped to a single input file. Messages carry file
//! names, line numbers and byte offsets only, never log content.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::pattern::PiiKind;

/// Result type for redaction operations
pub type Result<T> = std::result::Result<T, RedactError>;

/// Fatal errors for one file's pipeline execution
#[derive(Error, Debug)]
pub enum RedactError {
    /// Corrupt or truncated gzip input
    #[error("failed to decompress {path:?}: {source}")]
    Decompression {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The working copy could not be memory-mapped
    #[error("failed to map working copy {path:?}: {source}")]
    Mapping {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A match span and its mask differ in length
    #[error(
        "redaction invariant violated on line {line}: {kind} match spans {found} bytes, mask is {expected} bytes"
    )]
    RedactionInvariant {
        line: u64,
        kind: PiiKind,
        expected: usize,
        found: usize,
    },

    /// Failed to write the redacted gzip output
    #[error("failed to recompress into {path:?}: {source}")]
    Recompression {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to persist the audit sidecar
    #[error("failed to write audit sidecar {path:?}: {source}")]
    AuditWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input path is unusable (missing, not a regular file, ...)
    #[error("invalid input {path:?}: {reason}")]
    InvalidInput { path: PathBuf, reason: String },

    /// A built-in recognizer failed to compile
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The worker pool could not be started
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl RedactError {
    /// Stable name of the error class, used in logs and reports
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Decompression { .. } => "DecompressionError",
            Self::Mapping { .. } => "MappingError",
            Self::RedactionInvariant { .. } => "RedactionInvariantError",
            Self::Recompression { .. } => "RecompressionError",
            Self::AuditWrite { .. } => "AuditWriteError",
            Self::InvalidInput { .. } => "InvalidInputError",
            Self::Pattern(_) => "PatternError",
            Self::WorkerPool(_) => "WorkerPoolError",
            Self::Io(_) => "IoError",
        }
    }
}

/// Non-fatal failure while copying file metadata onto the output
#[derive(Error, Debug)]
#[error("could not copy {what} onto {path:?}: {source}")]
pub struct MetadataWarning {
    pub what: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}
