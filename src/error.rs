//! Error types shared by the preparation tools.
//!
//! Missing data is usually not fatal: the combiner, verifier and connection
//! aggregator collect these values, log them and keep going. Only the
//! platform generator treats `InvalidArgument` as a hard stop.

use std::path::PathBuf;

/// Errors produced while building documents or joining lookups
#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{field} unknown for {key}")]
    MissingData { key: String, field: String },

    #[error("I/O failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PrepError {
    pub fn missing(key: impl Into<String>, field: impl Into<String>) -> Self {
        PrepError::MissingData {
            key: key.into(),
            field: field.into(),
        }
    }

    /// Returns true for the non-fatal missing-data case
    pub fn is_missing_data(&self) -> bool {
        matches!(self, PrepError::MissingData { .. })
    }
}
