//! # Registry Combinator
//!
//! Merges N independent catalogs into one logical, read-only view. The merge
//! walks the registries left to right; what happens on a name collision is
//! decided by the configured [`ConflictPolicy`]. Deterministic for a fixed
//! registry order; nothing here depends on wall-clock or execution order.

use crate::definition::FacetDefinition;
use crate::errors::RegistryError;
use crate::registry::FacetRegistry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

// =============================================================================
// CONFLICT POLICY
// =============================================================================

/// What to do when two source registries define the same facet name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Fail immediately, naming the conflicting facet.
    Error,
    /// Keep the earliest definition seen.
    First,
    /// Overwrite with the most recent definition.
    #[default]
    Last,
}

// =============================================================================
// COMBINED REGISTRY
// =============================================================================

/// A read-only merged view over an ordered list of source registries.
///
/// For any name present in two or more sources, exactly one definition is
/// visible, chosen by the conflict policy at combine time.
#[derive(Debug, Clone)]
pub enum CombinedRegistry {
    /// Identity passthrough for a single source registry (no copy).
    Single(Arc<FacetRegistry>),
    /// Materialized merge of two or more source registries.
    Merged {
        /// Merged definitions, in first-seen order.
        definitions: Vec<FacetDefinition>,
        /// Name index into `definitions`.
        index: HashMap<String, usize>,
    },
}

impl CombinedRegistry {
    /// Pure lookup by name. No side effects.
    #[must_use]
    pub fn get_definition(&self, name: &str) -> Option<&FacetDefinition> {
        match self {
            Self::Single(registry) => registry.get_definition(name),
            Self::Merged { definitions, index } => index.get(name).map(|&i| &definitions[i]),
        }
    }

    /// All visible definitions, in stable first-seen order.
    #[must_use]
    pub fn get_all(&self) -> &[FacetDefinition] {
        match self {
            Self::Single(registry) => registry.get_all(),
            Self::Merged { definitions, .. } => definitions,
        }
    }

    /// Number of visible facets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.get_all().len()
    }

    /// True when no facets are visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.get_all().is_empty()
    }
}

// =============================================================================
// COMBINE
// =============================================================================

/// Merges an ordered list of registries into one view.
///
/// A single-element list is an identity passthrough that shares the source
/// `Arc`; callers must not assume a new object identity.
///
/// # Errors
///
/// - [`RegistryError::NoRegistries`] for an empty list.
/// - [`RegistryError::Conflict`] under [`ConflictPolicy::Error`] for the
///   first colliding name in walk order.
pub fn combine(
    registries: &[Arc<FacetRegistry>],
    policy: ConflictPolicy,
) -> Result<CombinedRegistry, RegistryError> {
    let Some((first, rest)) = registries.split_first() else {
        return Err(RegistryError::NoRegistries);
    };

    if rest.is_empty() {
        debug!("[ff-01] combine: single registry, identity passthrough");
        return Ok(CombinedRegistry::Single(Arc::clone(first)));
    }

    let mut definitions: Vec<FacetDefinition> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for registry in registries {
        for def in registry.get_all() {
            match index.get(&def.name) {
                None => {
                    index.insert(def.name.clone(), definitions.len());
                    definitions.push(def.clone());
                }
                Some(&existing) => match policy {
                    ConflictPolicy::Error => {
                        return Err(RegistryError::Conflict {
                            name: def.name.clone(),
                        });
                    }
                    ConflictPolicy::First => {
                        warn!("[ff-01] combine: keeping first definition of {}", def.name);
                    }
                    ConflictPolicy::Last => {
                        definitions[existing] = def.clone();
                    }
                },
            }
        }
    }

    debug!(
        "[ff-01] combine: merged {} registries into {} facets",
        registries.len(),
        definitions.len()
    );
    Ok(CombinedRegistry::Merged { definitions, index })
}

/// Names present in both `a` and `b`, in `a`'s declaration order.
///
/// Counts a name as a conflict regardless of whether the two definitions are
/// equal. Pure; used to pre-flight before combining.
#[must_use]
pub fn conflicts(a: &FacetRegistry, b: &FacetRegistry) -> Vec<String> {
    a.get_all()
        .iter()
        .filter(|def| b.get_definition(&def.name).is_some())
        .map(|def| def.name.clone())
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
