//! Reference data load errors.

use std::path::PathBuf;

/// Errors that abort loading the reference data.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON of the expected shape
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A recorded distance is negative, NaN or infinite
    #[error("line {line}: distance record {index} is invalid: {value}")]
    InvalidDistance { line: String, index: usize, value: f64 },
}
