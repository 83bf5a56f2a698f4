//! # Error Types
//!
//! Thrown errors for the orchestrator. Expected runtime failures (missing
//! artifacts, access denial, provider reverts) never appear here; they are
//! reported inside result structs. These types cover the two remaining
//! classes: programmer-error input shapes and provider-boundary failures
//! that the service folds into result error strings.

use thiserror::Error;

/// Stable marker substring present in every access-denial error string, so
/// callers can pattern-match without parsing prose.
pub const ACCESS_DENIED_MARKER: &str = "AccountHasNoRole";

/// Programmer-error input shapes. Thrown synchronously, fatal to the call,
/// never retried automatically.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    /// `register_facets` received an empty registry list.
    #[error("No registries provided")]
    NoRegistries,
}

/// Failures at the deployment-provider boundary.
///
/// The service catches these mid-pipeline and reports them structurally;
/// they are `Err` values only between the provider and the service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// No deployable artifact matches the requested name.
    #[error("no deployable artifact matches: {name}")]
    UnknownArtifact {
        /// The artifact name that was requested.
        name: String,
    },

    /// The deployment transaction reverted on chain.
    #[error("deployment reverted: {0}")]
    Reverted(String),

    /// Transport-layer failure talking to the provider.
    #[error("provider transport error: {0}")]
    Transport(String),
}
