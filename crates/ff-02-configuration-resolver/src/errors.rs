//! # Error Types
//!
//! All error types for configuration version assembly and lookup.

use shared_types::Bytes32;
use thiserror::Error;

/// Errors from the configuration resolver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// The configuration id was never registered.
    #[error("unregistered configuration: {0:?}")]
    UnregisteredConfiguration(Bytes32),

    /// The requested version does not exist for the configuration.
    #[error("unknown version {version} for configuration {configuration_id:?}")]
    UnknownVersion {
        /// Configuration being queried.
        configuration_id: Bytes32,
        /// Version that was requested.
        version: u32,
    },

    /// A final batch would commit a version with no bindings at all.
    #[error("cannot finalize empty version for configuration {0:?}")]
    EmptyVersion(Bytes32),
}
