//! # Driven Ports (SPI - Outbound)
//!
//! The interfaces the orchestrator depends on. External adapters implement
//! these traits to provide:
//! - Artifact factories and contract deployment (the deployment provider)
//! - Administrative authority checks (access control)
//! - Live proxy pointer state (proxy registry)
//!
//! Dependencies point inward: adapters implement these traits and translate
//! to whatever wallet/signing/transport layer backs them. That layer is
//! outside this subsystem's scope.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{Bytes32, EvmAddress};
use std::sync::Arc;

use crate::errors::ProviderError;

// =============================================================================
// DEPLOYMENT PROVIDER
// =============================================================================

/// Receipt for one deployed contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedContract {
    /// Address the contract landed at.
    pub address: EvmAddress,
    /// Hash of the deployment transaction.
    pub transaction_hash: Bytes32,
    /// Block the transaction was included in.
    pub block_number: u64,
    /// Gas consumed by the deployment.
    pub gas_used: u64,
}

/// Outcome of a non-deployment state-mutating transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutcome {
    /// Transaction hash.
    pub transaction_hash: Bytes32,
    /// Gas consumed.
    pub gas_used: u64,
}

/// A factory bound to one deployable artifact.
#[async_trait]
pub trait ContractFactory: Send + Sync {
    /// Deploys one instance of the artifact.
    async fn deploy(&self) -> Result<DeployedContract, ProviderError>;
}

/// Interface to the deployment provider.
///
/// `get_factory` must fail descriptively, including the requested name, when
/// the artifact is unknown.
#[async_trait]
pub trait DeploymentProvider: Send + Sync {
    /// Resolves the factory for a named artifact.
    async fn get_factory(&self, name: &str) -> Result<Arc<dyn ContractFactory>, ProviderError>;
}

// =============================================================================
// ACCESS CONTROL
// =============================================================================

/// The default administrative role (the all-zero role id).
pub const DEFAULT_ADMIN_ROLE: Bytes32 = Bytes32::ZERO;

/// Interface to the access-control collaborator.
///
/// Every mutating orchestrator call consults this before touching state.
/// A denial surfaces in result error strings containing
/// [`ACCESS_DENIED_MARKER`](crate::errors::ACCESS_DENIED_MARKER).
#[async_trait]
pub trait AccessControl: Send + Sync {
    /// True when `account` holds `role`.
    async fn has_role(&self, account: EvmAddress, role: Bytes32) -> bool;
}

// =============================================================================
// PROXY STATE
// =============================================================================

/// The live pointer a client-facing proxy uses to resolve calls.
///
/// Mutated only through the orchestrator's update operation; the proxy
/// address itself never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverProxyConfig {
    /// Stable proxy address clients call.
    pub proxy_address: EvmAddress,
    /// Resolver the proxy delegates lookups to.
    pub resolver_address: EvmAddress,
    /// Configuration the proxy is bound to.
    pub configuration_id: Bytes32,
    /// Version of the configuration in use.
    pub version: u32,
}

/// Interface to live proxy pointer state.
#[async_trait]
pub trait ProxyStateAccess: Send + Sync {
    /// Current pointer for a proxy, or `None` when the address does not
    /// resolve to a live proxy.
    async fn get_proxy_config(&self, proxy: EvmAddress) -> Option<ResolverProxyConfig>;

    /// Applies a new pointer. Must be all-or-nothing: on `Err`, the previous
    /// pointer remains in force.
    async fn apply_proxy_config(
        &self,
        config: ResolverProxyConfig,
    ) -> Result<TxOutcome, ProviderError>;
}

// =============================================================================
// TESTS
// =============================================================================
