//! # Facet Registry
//!
//! The immutable, declaration-ordered catalog of facet definitions. Multiple
//! registries may exist concurrently (the standard catalog plus any number of
//! custom extension catalogs); they are only ever read after construction.

use crate::definition::FacetDefinition;
use crate::errors::RegistryError;
use std::collections::HashMap;
use tracing::debug;

/// An immutable name-to-definition catalog.
///
/// Lookup is O(1) via a name index; enumeration preserves declaration order.
#[derive(Debug, Clone)]
pub struct FacetRegistry {
    definitions: Vec<FacetDefinition>,
    index: HashMap<String, usize>,
}

impl FacetRegistry {
    /// Builds a registry from a list of definitions.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateDefinition`] if the same name
    /// appears twice.
    pub fn new(definitions: Vec<FacetDefinition>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(definitions.len());
        for (position, def) in definitions.iter().enumerate() {
            if index.insert(def.name.clone(), position).is_some() {
                return Err(RegistryError::DuplicateDefinition {
                    name: def.name.clone(),
                });
            }
        }
        debug!("[ff-01] Registry loaded with {} facets", definitions.len());
        Ok(Self { definitions, index })
    }

    /// Pure lookup by name. No side effects.
    #[must_use]
    pub fn get_definition(&self, name: &str) -> Option<&FacetDefinition> {
        self.index.get(name).map(|&i| &self.definitions[i])
    }

    /// All definitions in declaration order.
    #[must_use]
    pub fn get_all(&self) -> &[FacetDefinition] {
        &self.definitions
    }

    /// Number of cataloged facets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// True when the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// The standard token-engine catalog.
    ///
    /// Facets with a `*TimeTravel` variant carry an alternate build that
    /// allows block-timestamp manipulation on test networks.
    #[must_use]
    pub fn standard() -> Self {
        let definitions = vec![
            FacetDefinition::new("DiamondFacet", "Diamond loupe and cut entry points"),
            FacetDefinition::new("AccessControlFacet", "Role-based access control"),
            FacetDefinition::new("PauseFacet", "Global pause switch"),
            FacetDefinition::new("CapFacet", "Max supply and per-partition caps"),
            FacetDefinition::new("ControlListFacet", "Allow/block list compliance checks"),
            FacetDefinition::new("KycFacet", "Investor KYC status tracking"),
            FacetDefinition::with_variant(
                "SnapshotsFacet",
                "Balance snapshots for dividends and voting",
                "SnapshotsTimeTravelFacet",
            ),
            FacetDefinition::with_variant(
                "LockFacet",
                "Time-based token locks",
                "LockTimeTravelFacet",
            ),
            FacetDefinition::with_variant(
                "ScheduledSnapshotsFacet",
                "Snapshot scheduling",
                "ScheduledSnapshotsTimeTravelFacet",
            ),
            FacetDefinition::new("ERC1410Facet", "Partitioned token transfers"),
            FacetDefinition::new("ERC1594Facet", "Issuance and redemption"),
            FacetDefinition::new("ERC1643Facet", "Document management"),
            FacetDefinition::new("ERC1644Facet", "Controller operations"),
            FacetDefinition::new("EquityFacet", "Equity cap-table behaviors"),
            FacetDefinition::new("BondFacet", "Bond coupon and maturity behaviors"),
        ];
        // Standard catalog is statically unique by construction.
        Self::new(definitions).expect("standard catalog has unique names")
    }

    /// Builds a custom extension catalog from caller-supplied definitions.
    ///
    /// Identical to [`FacetRegistry::new`]; the separate constructor keeps
    /// call sites explicit about which catalogs are extensions.
    pub fn custom(definitions: Vec<FacetDefinition>) -> Result<Self, RegistryError> {
        Self::new(definitions)
    }
}

// =============================================================================
// TESTS
// =============================================================================
