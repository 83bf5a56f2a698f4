//! # Facet Definitions
//!
//! The immutable metadata describing one deployable facet: its unique name,
//! a human-readable description, the resolver key the proxy uses to look up
//! the facet's current address, and an optional alternate variant name
//! (e.g. a time-travel build used on test networks).

use serde::{Deserialize, Serialize};
use shared_types::{resolver_key_for, Bytes32};

// =============================================================================
// RESOLVER KEY
// =============================================================================

/// The named 32-byte key a resolver uses to locate a facet's address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverKey {
    /// Key name, conventionally the facet's contract name.
    pub name: String,
    /// 32-byte key value (Keccak-256 of the key name by convention).
    pub value: Bytes32,
}

impl ResolverKey {
    /// Derives the canonical resolver key for a facet name.
    #[must_use]
    pub fn derived(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: resolver_key_for(name),
        }
    }
}

// =============================================================================
// FACET DEFINITION
// =============================================================================

/// One deployable facet, as cataloged by a registry.
///
/// Definitions are created at registry-load time and never mutated; they are
/// identified by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetDefinition {
    /// Unique, immutable facet name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Resolver key the proxy resolves this facet through.
    pub resolver_key: ResolverKey,
    /// Alternate variant name, if an alternate build exists.
    pub alternate_variant: Option<String>,
}

impl FacetDefinition {
    /// Builds a definition with the canonical derived resolver key.
    #[must_use]
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            resolver_key: ResolverKey::derived(name),
            alternate_variant: None,
        }
    }

    /// Builds a definition that also carries an alternate variant name.
    #[must_use]
    pub fn with_variant(name: &str, description: &str, variant: &str) -> Self {
        Self {
            alternate_variant: Some(variant.to_string()),
            ..Self::new(name, description)
        }
    }

    /// Name to deploy when the caller asks for the alternate variant.
    ///
    /// Falls back to the base name when no variant is cataloged. This is a
    /// resolve, not a failure.
    #[must_use]
    pub fn variant_or_base(&self) -> &str {
        self.alternate_variant.as_deref().unwrap_or(&self.name)
    }
}

// =============================================================================
// TESTS
// =============================================================================
