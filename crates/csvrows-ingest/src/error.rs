//! Error types for delimited text ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a delimited text source.
///
/// Malformed content (ragged rows, empty header cells, unterminated quotes)
/// is never an error; it is absorbed by the row assembly policy.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Source file could not be opened for reading.
    #[error("cannot open file '{}': {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from an already opened source failed.
    #[error("failed to read input: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
