//! # FF-01 Facet Registry - Catalog and Combinator Subsystem
//!
//! **Subsystem ID:** 01
//!
//! ## Purpose
//!
//! Provides the static, queryable catalog of deployable facet definitions
//! (name, description, resolver key, optional alternate variant) and the
//! combinator that merges several independent catalogs into one logical view
//! under a conflict-resolution policy.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Definitions are immutable after catalog construction | `registry.rs` - no mutating accessors |
//! | INVARIANT-2 | Names are unique within a single registry | `registry.rs` - `FacetRegistry::new()` |
//! | INVARIANT-3 | A combined view exposes exactly one definition per name | `combine.rs` - `combine()` |
//! | INVARIANT-4 | Combining a single registry is an identity passthrough | `combine.rs` - `combine()` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use ff_01_facet_registry::prelude::*;
//! use std::sync::Arc;
//!
//! let base = Arc::new(FacetRegistry::standard());
//! let custom = Arc::new(FacetRegistry::custom(vec![my_definition])?);
//!
//! let view = combine(&[base, custom], ConflictPolicy::Last)?;
//! let def = view.get_definition("KycFacet");
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod combine;
pub mod definition;
pub mod errors;
pub mod registry;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::combine::{combine, conflicts, CombinedRegistry, ConflictPolicy};
    pub use crate::definition::{FacetDefinition, ResolverKey};
    pub use crate::errors::RegistryError;
    pub use crate::registry::FacetRegistry;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 1;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Facet Registry";

// =============================================================================
// TESTS
// =============================================================================
