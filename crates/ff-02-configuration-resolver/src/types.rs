//! # Resolver Types
//!
//! Value types for configuration versions and their facet bindings.

use serde::{Deserialize, Serialize};
use shared_types::{Bytes32, EvmAddress};

/// The concrete facet instance selected for one resolver key within a
/// configuration version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetBinding {
    /// 32-byte resolver key of the facet.
    pub key: Bytes32,
    /// Deployed address the key resolves to.
    pub address: EvmAddress,
}

impl FacetBinding {
    /// Pairs a resolver key with a deployed address.
    #[must_use]
    pub const fn new(key: Bytes32, address: EvmAddress) -> Self {
        Self { key, address }
    }
}

/// One committed, immutable version of a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationVersion {
    /// Configuration this version belongs to.
    pub configuration_id: Bytes32,
    /// Version number, contiguous from 1.
    pub version: u32,
    /// Bindings in submission order.
    pub bindings: Vec<FacetBinding>,
}
