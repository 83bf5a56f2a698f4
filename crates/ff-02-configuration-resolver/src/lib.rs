//! # FF-02 Configuration Resolver - Versioned Binding Store Subsystem
//!
//! **Subsystem ID:** 02
//!
//! ## Purpose
//!
//! Stores, per configuration id, an append-only sequence of versions, each
//! holding an ordered list of facet bindings (resolver key -> address).
//! Supports incremental, batched version assembly for binding lists too
//! large to submit in one call, and latest-version lookup.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Versions are contiguous from 1 and strictly increasing | `resolver.rs` - commit path |
//! | INVARIANT-2 | A committed version's binding list is immutable | `resolver.rs` - no mutating accessors |
//! | INVARIANT-3 | Binding order equals submission order | `resolver.rs` - append-only buffer |
//! | INVARIANT-4 | An in-progress version is invisible to latest-version lookup | `resolver.rs` - `latest_version()` |
//! | INVARIANT-5 | Writes to the same configuration id serialize | `resolver.rs` - per-configuration lock |
//!
//! ## State Machine
//!
//! Per configuration id: `Unregistered -> Registered -> (version 1) -> (version 2) -> ...`
//! No terminal state; versions only accumulate.

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod errors;
pub mod resolver;
pub mod types;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::errors::ResolverError;
    pub use crate::resolver::ConfigurationResolver;
    pub use crate::types::{ConfigurationVersion, FacetBinding};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 2;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Configuration Resolver";
