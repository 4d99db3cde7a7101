//! Error types for archive operations.

use thiserror::Error;

/// Errors that can occur when loading or exporting an archive.
///
/// These are the fatal-to-operation tier: a failed file read, a failed JSON
/// parse, or a top-level shape that is not an array. Per-record problems are
/// never errors; normalization skips those records instead.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level value is not a JSON array
    #[error("expected array of conversations")]
    ExpectedArray,
}

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;
