//! # Structured Results
//!
//! The discriminated result objects the orchestrator returns for expected
//! failure classes. A `success = false` result means no partial mutation
//! happened beyond what the result explicitly reports.

use serde::{Deserialize, Serialize};
use shared_types::{Bytes32, EvmAddress};

use crate::ports::outbound::{DeployedContract, ResolverProxyConfig};

// =============================================================================
// FACET DEPLOYMENT
// =============================================================================

/// Result of deploying one facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetDeployResult {
    /// Whether the deployment landed.
    pub success: bool,
    /// Artifact name actually deployed (variant or base).
    pub deployed_name: String,
    /// Deployed address, on success.
    pub address: Option<EvmAddress>,
    /// Deployment transaction hash, on success.
    pub transaction_hash: Option<Bytes32>,
    /// Inclusion block, on success.
    pub block_number: Option<u64>,
    /// Gas consumed, on success.
    pub gas_used: Option<u64>,
    /// Error string, on failure.
    pub error: Option<String>,
}

impl FacetDeployResult {
    pub(crate) fn ok(deployed_name: String, receipt: DeployedContract) -> Self {
        Self {
            success: true,
            deployed_name,
            address: Some(receipt.address),
            transaction_hash: Some(receipt.transaction_hash),
            block_number: Some(receipt.block_number),
            gas_used: Some(receipt.gas_used),
            error: None,
        }
    }

    pub(crate) fn fail(deployed_name: String, error: String) -> Self {
        Self {
            success: false,
            deployed_name,
            address: None,
            transaction_hash: None,
            block_number: None,
            gas_used: None,
            error: Some(error),
        }
    }
}

// =============================================================================
// PROXY SET DEPLOYMENT
// =============================================================================

/// Result of deploying an implementation/proxy/admin triple.
///
/// On success the three addresses are pairwise distinct. When an existing
/// admin was reused, `admin_receipt` is `None` and `admin_address` equals
/// the supplied address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxySetDeployResult {
    /// Whether the whole set landed.
    pub success: bool,
    /// Implementation deployment receipt, on success.
    pub implementation: Option<DeployedContract>,
    /// Proxy deployment receipt, on success.
    pub proxy: Option<DeployedContract>,
    /// Admin deployment receipt; absent when an existing admin was reused.
    pub admin_receipt: Option<DeployedContract>,
    /// Admin address in force (fresh or reused).
    pub admin_address: Option<EvmAddress>,
    /// Error string, on failure.
    pub error: Option<String>,
}

impl ProxySetDeployResult {
    /// `(implementation, proxy, admin)` addresses, on success.
    #[must_use]
    pub fn addresses(&self) -> Option<(EvmAddress, EvmAddress, EvmAddress)> {
        Some((
            self.implementation?.address,
            self.proxy?.address,
            self.admin_address?,
        ))
    }

    pub(crate) fn fail(error: String) -> Self {
        Self {
            success: false,
            implementation: None,
            proxy: None,
            admin_receipt: None,
            admin_address: None,
            error: Some(error),
        }
    }
}

// =============================================================================
// FACET REGISTRATION
// =============================================================================

/// Result of registering a batch of facet bindings into a resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetRegisterResult {
    /// Whether the whole registration landed (all-or-nothing).
    pub success: bool,
    /// Names actually registered, in input order. Empty on failure.
    pub registered: Vec<String>,
    /// Digest of the submitted binding set, on success.
    pub transaction_hash: Option<Bytes32>,
    /// Error string, on failure.
    pub error: Option<String>,
}

impl FacetRegisterResult {
    pub(crate) fn fail(error: String) -> Self {
        Self {
            success: false,
            registered: Vec::new(),
            transaction_hash: None,
            error: Some(error),
        }
    }
}

// =============================================================================
// PROXY CONFIG UPDATE
// =============================================================================

/// Classification of a proxy pointer update, most invasive change wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateType {
    /// Only the version changed.
    Version,
    /// The configuration id changed (with or without the version).
    Config,
    /// The resolver address changed (highest privilege).
    Resolver,
}

impl UpdateType {
    /// Stable string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::Config => "config",
            Self::Resolver => "resolver",
        }
    }
}

/// Result of repointing a proxy's resolver/configuration/version.
///
/// `previous_config` is read and attached before attempting the change, even
/// on failure, so callers can diff state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigUpdateResult {
    /// Whether the update was applied.
    pub success: bool,
    /// Classification of the change, when one was applicable.
    pub update_type: Option<UpdateType>,
    /// Pointer state before the attempt.
    pub previous_config: Option<ResolverProxyConfig>,
    /// Pointer state after a successful apply.
    pub new_config: Option<ResolverProxyConfig>,
    /// Transaction hash of the applied update.
    pub transaction_hash: Option<Bytes32>,
    /// Gas consumed by the applied update.
    pub gas_used: Option<u64>,
    /// Error string, on failure.
    pub error: Option<String>,
}

impl ConfigUpdateResult {
    pub(crate) fn fail(
        update_type: Option<UpdateType>,
        previous_config: Option<ResolverProxyConfig>,
        error: String,
    ) -> Self {
        Self {
            success: false,
            update_type,
            previous_config,
            new_config: None,
            transaction_hash: None,
            gas_used: None,
            error: Some(error),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
