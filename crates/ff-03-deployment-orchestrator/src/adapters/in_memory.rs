//! # In-Memory Adapters
//!
//! Deterministic, thread-safe implementations of the outbound ports. The
//! provider mints addresses from a monotonic nonce; every receipt is
//! reproducible for a given deployment order.

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Bytes32, EvmAddress};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::errors::ProviderError;
use crate::ports::outbound::{
    AccessControl, ContractFactory, DeployedContract, DeploymentProvider, ProxyStateAccess,
    ResolverProxyConfig, TxOutcome,
};

// =============================================================================
// PROVIDER
// =============================================================================

/// In-memory deployment provider over a fixed artifact catalog.
pub struct InMemoryProvider {
    artifacts: RwLock<HashSet<String>>,
    failing: RwLock<HashSet<String>>,
    nonce: Arc<AtomicU64>,
}

impl InMemoryProvider {
    /// Provider knowing the given artifact names.
    #[must_use]
    pub fn with_artifacts<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            artifacts: RwLock::new(names.into_iter().map(Into::into).collect()),
            failing: RwLock::new(HashSet::new()),
            nonce: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Provider knowing the standard catalog (base names and variants) plus
    /// the shared infrastructure artifacts.
    #[must_use]
    pub fn with_standard_artifacts() -> Self {
        let registry = ff_01_facet_registry::registry::FacetRegistry::standard();
        let mut names: Vec<String> = Vec::new();
        for def in registry.get_all() {
            names.push(def.name.clone());
            if let Some(variant) = &def.alternate_variant {
                names.push(variant.clone());
            }
        }
        names.push("BusinessLogicResolver".to_string());
        names.push(crate::service::PROXY_ARTIFACT.to_string());
        names.push(crate::service::PROXY_ADMIN_ARTIFACT.to_string());
        Self::with_artifacts(names)
    }

    /// Adds one artifact to the catalog.
    pub fn add_artifact(&self, name: &str) {
        self.artifacts.write().insert(name.to_string());
    }

    /// Makes deployments of `name` revert, for failure-path tests.
    pub fn make_failing(&self, name: &str) {
        self.failing.write().insert(name.to_string());
    }
}

struct InMemoryFactory {
    name: String,
    failing: bool,
    nonce: Arc<AtomicU64>,
}

#[async_trait]
impl ContractFactory for InMemoryFactory {
    async fn deploy(&self) -> Result<DeployedContract, ProviderError> {
        if self.failing {
            return Err(ProviderError::Reverted(format!(
                "constructor of {} reverted",
                self.name
            )));
        }

        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
        let seed = format!("{}:{}", self.name, nonce);
        let digest = Bytes32::keccak256(seed.as_bytes());

        let mut tail = [0u8; 20];
        tail.copy_from_slice(&digest.as_bytes()[12..]);
        let address = EvmAddress::new(tail);
        let transaction_hash = Bytes32::keccak256(digest.as_bytes());

        debug!("[ff-03] In-memory deploy {} -> {:?}", self.name, address);
        Ok(DeployedContract {
            address,
            transaction_hash,
            block_number: nonce,
            gas_used: 100_000 + 1_000 * self.name.len() as u64,
        })
    }
}

#[async_trait]
impl DeploymentProvider for InMemoryProvider {
    async fn get_factory(&self, name: &str) -> Result<Arc<dyn ContractFactory>, ProviderError> {
        if !self.artifacts.read().contains(name) {
            return Err(ProviderError::UnknownArtifact {
                name: name.to_string(),
            });
        }
        Ok(Arc::new(InMemoryFactory {
            name: name.to_string(),
            failing: self.failing.read().contains(name),
            nonce: Arc::clone(&self.nonce),
        }))
    }
}

// =============================================================================
// ACCESS CONTROL
// =============================================================================

/// In-memory role store.
#[derive(Default)]
pub struct InMemoryAccessControl {
    grants: RwLock<HashSet<(EvmAddress, Bytes32)>>,
}

impl InMemoryAccessControl {
    /// Empty role store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `role` to `account`.
    pub fn grant(&self, account: EvmAddress, role: Bytes32) {
        self.grants.write().insert((account, role));
    }

    /// Revokes `role` from `account`.
    pub fn revoke(&self, account: EvmAddress, role: Bytes32) {
        self.grants.write().remove(&(account, role));
    }
}

#[async_trait]
impl AccessControl for InMemoryAccessControl {
    async fn has_role(&self, account: EvmAddress, role: Bytes32) -> bool {
        self.grants.read().contains(&(account, role))
    }
}

// =============================================================================
// PROXY STATE
// =============================================================================

/// In-memory live proxy pointer store.
#[derive(Default)]
pub struct InMemoryProxyState {
    proxies: RwLock<HashMap<EvmAddress, ResolverProxyConfig>>,
    fail_next_apply: RwLock<Option<String>>,
    tx_nonce: AtomicU64,
}

impl InMemoryProxyState {
    /// Empty proxy store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a live proxy pointer (the creation step, outside the update
    /// operation's scope).
    pub fn register_proxy(&self, config: ResolverProxyConfig) {
        self.proxies.write().insert(config.proxy_address, config);
    }

    /// Makes the next apply fail with a transport error, without mutating.
    pub fn fail_next_apply(&self, message: &str) {
        *self.fail_next_apply.write() = Some(message.to_string());
    }
}

#[async_trait]
impl ProxyStateAccess for InMemoryProxyState {
    async fn get_proxy_config(&self, proxy: EvmAddress) -> Option<ResolverProxyConfig> {
        self.proxies.read().get(&proxy).copied()
    }

    async fn apply_proxy_config(
        &self,
        config: ResolverProxyConfig,
    ) -> Result<TxOutcome, ProviderError> {
        if let Some(message) = self.fail_next_apply.write().take() {
            return Err(ProviderError::Transport(message));
        }

        let mut proxies = self.proxies.write();
        if !proxies.contains_key(&config.proxy_address) {
            return Err(ProviderError::Transport(format!(
                "no proxy at {:?}",
                config.proxy_address
            )));
        }
        proxies.insert(config.proxy_address, config);

        let nonce = self.tx_nonce.fetch_add(1, Ordering::SeqCst);
        Ok(TxOutcome {
            transaction_hash: Bytes32::keccak256(&nonce.to_be_bytes()),
            gas_used: 45_000,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
