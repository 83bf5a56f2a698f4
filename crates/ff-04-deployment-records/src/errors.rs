//! # Error Types
//!
//! All error types for deployment record persistence.

use thiserror::Error;

/// Errors from the deployment record store.
#[derive(Debug, Error)]
pub enum RecordStoreError {
    /// No record exists for the requested `(network, workflow, timestamp)`.
    #[error("deployment not found: {network}/{workflow}-{timestamp}.json")]
    NotFound {
        /// Network directory searched.
        network: String,
        /// Workflow name.
        workflow: String,
        /// Requested timestamp (epoch milliseconds).
        timestamp: u64,
    },

    /// A record file exists but could not be parsed.
    #[error("malformed deployment record {path}: {message}")]
    Malformed {
        /// Path of the unparseable file.
        path: String,
        /// Original parser message, kept for diagnosis.
        message: String,
    },

    /// Filesystem failure while reading or writing.
    #[error("record store I/O error: {message}")]
    Io {
        /// Original I/O message.
        message: String,
    },
}

impl From<std::io::Error> for RecordStoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}
