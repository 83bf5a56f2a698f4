//! # Error Types
//!
//! All error types for catalog construction and registry combination.

use thiserror::Error;

/// Errors from registry construction and combination.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// `combine` was called with an empty registry list.
    #[error("no registries provided")]
    NoRegistries,

    /// Two definitions for the same name inside a single catalog.
    #[error("duplicate facet definition: {name}")]
    DuplicateDefinition {
        /// The name defined more than once.
        name: String,
    },

    /// Name collision under the `Error` conflict policy.
    #[error("registry conflict on facet: {name}")]
    Conflict {
        /// The first conflicting facet name, in left-to-right walk order.
        name: String,
    },
}
