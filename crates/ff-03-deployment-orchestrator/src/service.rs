//! # Deployment Orchestrator Service
//!
//! The single logical pipeline per orchestrator invocation: steps inside
//! each operation run sequentially because each step's output (an address)
//! feeds the next, while independent read-only lookups are dispatched
//! concurrently and awaited jointly.
//!
//! Expected failures (missing artifact, access denial, provider revert)
//! come back inside the result structs; the only thrown error is the
//! programmer-error input shape (empty registry list). On timeout, wrapped
//! by the caller, the orchestrator performs no retries of its own: a
//! state-mutating submission may already have landed.

use ff_01_facet_registry::definition::FacetDefinition;
use ff_01_facet_registry::registry::FacetRegistry;
use ff_02_configuration_resolver::resolver::ConfigurationResolver;
use shared_types::{Bytes32, EvmAddress};

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::batch::{split_into_batches, BatchPolicy};
use crate::errors::{OrchestratorError, ProviderError, ACCESS_DENIED_MARKER};
use crate::ports::outbound::{
    AccessControl, DeployedContract, DeploymentProvider, ProxyStateAccess, ResolverProxyConfig,
    DEFAULT_ADMIN_ROLE,
};
use crate::results::{
    ConfigUpdateResult, FacetDeployResult, FacetRegisterResult, ProxySetDeployResult, UpdateType,
};

/// Artifact name of the client-facing proxy contract.
pub const PROXY_ARTIFACT: &str = "TransparentUpgradeableProxy";

/// Artifact name of the shared proxy admin contract.
pub const PROXY_ADMIN_ARTIFACT: &str = "ProxyAdmin";

// =============================================================================
// CONFIG & STATS
// =============================================================================

/// Orchestrator configuration.
#[derive(Clone)]
pub struct OrchestratorConfig {
    /// Batch splitting policy for binding registration.
    pub batch_policy: BatchPolicy,
    /// Registries consulted when a call supplies none.
    pub default_registries: Vec<Arc<FacetRegistry>>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            batch_policy: BatchPolicy::default(),
            default_registries: vec![Arc::new(FacetRegistry::standard())],
        }
    }
}

/// Statistics for the orchestrator service.
#[derive(Debug, Default, Clone)]
pub struct OrchestratorStats {
    /// Facets deployed successfully.
    pub facets_deployed: u64,
    /// Proxy sets deployed successfully.
    pub proxy_sets_deployed: u64,
    /// Facet bindings registered successfully.
    pub facets_registered: u64,
    /// Proxy pointer updates applied.
    pub config_updates: u64,
    /// Operations that returned `success = false`.
    pub failed_operations: u64,
    /// Updates rejected for missing authority.
    pub rejected_unauthorized: u64,
    /// Total gas across all successful operations.
    pub total_gas_used: u64,
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Request to register a set of facet bindings into a resolver.
#[derive(Clone)]
pub struct RegisterFacetsRequest {
    /// Resolver the bindings belong to.
    pub resolver_address: EvmAddress,
    /// Configuration the version is assembled for.
    pub configuration_id: Bytes32,
    /// `(facet name, deployed address)` pairs, in input order.
    pub bindings: Vec<(String, EvmAddress)>,
    /// Registries to resolve names through, tried in order (first match
    /// wins). `None` means the orchestrator's default registries.
    pub registries: Option<Vec<Arc<FacetRegistry>>>,
    /// When true, no batch is marked final; an explicit
    /// [`DeploymentOrchestrator::finalize_configuration`] call commits later.
    pub partial: bool,
}

/// Request to repoint a proxy's resolver/configuration/version.
#[derive(Debug, Clone, Copy)]
pub struct ProxyConfigUpdateRequest {
    /// The proxy whose pointer changes.
    pub proxy_address: EvmAddress,
    /// New resolver address, when it changes.
    pub new_resolver_address: Option<EvmAddress>,
    /// New configuration id, when it changes.
    pub new_configuration_id: Option<Bytes32>,
    /// New version, when it changes.
    pub new_version: Option<u32>,
}

// =============================================================================
// SERVICE
// =============================================================================

/// The deployment orchestrator.
///
/// Owns no global state: the configuration resolver is an explicit handle
/// threaded through construction, and proxy handles come back from
/// [`deploy_proxy_set`](Self::deploy_proxy_set) for the caller to thread
/// into subsequent calls.
pub struct DeploymentOrchestrator<P: DeploymentProvider, A: AccessControl, X: ProxyStateAccess> {
    config: OrchestratorConfig,
    provider: Arc<P>,
    access: Arc<A>,
    proxy_state: Arc<X>,
    resolver: Arc<ConfigurationResolver>,
    stats: Arc<RwLock<OrchestratorStats>>,
}

impl<P, A, X> DeploymentOrchestrator<P, A, X>
where
    P: DeploymentProvider + 'static,
    A: AccessControl + 'static,
    X: ProxyStateAccess + 'static,
{
    /// Creates an orchestrator over the given collaborators.
    pub fn new(
        provider: Arc<P>,
        access: Arc<A>,
        proxy_state: Arc<X>,
        resolver: Arc<ConfigurationResolver>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            config,
            provider,
            access,
            proxy_state,
            resolver,
            stats: Arc::new(RwLock::new(OrchestratorStats::default())),
        }
    }

    /// Current service statistics.
    pub async fn stats(&self) -> OrchestratorStats {
        self.stats.read().await.clone()
    }

    /// The resolver handle this orchestrator writes through.
    #[must_use]
    pub fn resolver(&self) -> &Arc<ConfigurationResolver> {
        &self.resolver
    }

    async fn record_failure(&self) {
        self.stats.write().await.failed_operations += 1;
    }

    async fn deploy_artifact(&self, name: &str) -> Result<DeployedContract, ProviderError> {
        let factory = self.provider.get_factory(name).await?;
        factory.deploy().await
    }

    // -------------------------------------------------------------------------
    // DEPLOY FACET
    // -------------------------------------------------------------------------

    /// Deploys one facet.
    ///
    /// When `prefer_variant` is set and the definition catalogs an alternate
    /// variant, the variant artifact is deployed; otherwise the base name is
    /// used. Falling back to the base name is a resolve, not a failure.
    /// Never partially deploys: a missing artifact or a revert comes back as
    /// `success = false` with the artifact named in the error.
    #[instrument(skip(self, definition), fields(facet = %definition.name, run_id = %Uuid::new_v4()))]
    pub async fn deploy_facet(
        &self,
        definition: &FacetDefinition,
        prefer_variant: bool,
    ) -> FacetDeployResult {
        let artifact = if prefer_variant {
            definition.variant_or_base()
        } else {
            definition.name.as_str()
        };

        match self.deploy_artifact(artifact).await {
            Ok(receipt) => {
                info!(
                    "[ff-03] Deployed {} at {:?} (gas {})",
                    artifact, receipt.address, receipt.gas_used
                );
                let mut stats = self.stats.write().await;
                stats.facets_deployed += 1;
                stats.total_gas_used += receipt.gas_used;
                FacetDeployResult::ok(artifact.to_string(), receipt)
            }
            Err(e) => {
                warn!("[ff-03] Facet deployment failed: {e}");
                self.record_failure().await;
                FacetDeployResult::fail(artifact.to_string(), e.to_string())
            }
        }
    }

    /// Deploys one facet by catalog name, resolved through the default
    /// registries.
    ///
    /// An uncataloged name comes back as `success = false` naming the facet.
    pub async fn deploy_facet_by_name(
        &self,
        name: &str,
        prefer_variant: bool,
    ) -> FacetDeployResult {
        let definition = self
            .config
            .default_registries
            .iter()
            .find_map(|registry| registry.get_definition(name))
            .cloned();
        match definition {
            Some(definition) => self.deploy_facet(&definition, prefer_variant).await,
            None => {
                self.record_failure().await;
                FacetDeployResult::fail(name.to_string(), format!("{name} not found in registry"))
            }
        }
    }

    // -------------------------------------------------------------------------
    // DEPLOY PROXY SET
    // -------------------------------------------------------------------------

    /// Deploys an implementation/proxy/admin triple.
    ///
    /// Always deploys a fresh implementation and a fresh proxy bound to it.
    /// The admin is deployed fresh unless `existing_admin` is supplied, in
    /// which case it is reused and no admin receipt is produced. This is the
    /// mechanism for sharing one administrative owner across many proxies.
    /// On success the three addresses are pairwise distinct.
    #[instrument(skip(self), fields(implementation = %implementation_name, run_id = %Uuid::new_v4()))]
    pub async fn deploy_proxy_set(
        &self,
        implementation_name: &str,
        existing_admin: Option<EvmAddress>,
    ) -> ProxySetDeployResult {
        if existing_admin.is_some_and(|admin| admin.is_zero()) {
            self.record_failure().await;
            return ProxySetDeployResult::fail(
                "existing admin must not be the zero address".to_string(),
            );
        }

        let implementation = match self.deploy_artifact(implementation_name).await {
            Ok(receipt) => receipt,
            Err(e) => {
                self.record_failure().await;
                return ProxySetDeployResult::fail(format!("implementation: {e}"));
            }
        };

        let proxy = match self.deploy_artifact(PROXY_ARTIFACT).await {
            Ok(receipt) => receipt,
            Err(e) => {
                self.record_failure().await;
                return ProxySetDeployResult::fail(format!("proxy: {e}"));
            }
        };

        let (admin_receipt, admin_address) = match existing_admin {
            Some(address) => {
                debug!("[ff-03] Reusing existing proxy admin {:?}", address);
                (None, address)
            }
            None => match self.deploy_artifact(PROXY_ADMIN_ARTIFACT).await {
                Ok(receipt) => (Some(receipt), receipt.address),
                Err(e) => {
                    self.record_failure().await;
                    return ProxySetDeployResult::fail(format!("admin: {e}"));
                }
            },
        };

        if implementation.address == proxy.address
            || implementation.address == admin_address
            || proxy.address == admin_address
        {
            self.record_failure().await;
            return ProxySetDeployResult::fail(
                "proxy set addresses are not pairwise distinct".to_string(),
            );
        }

        let gas = implementation.gas_used
            + proxy.gas_used
            + admin_receipt.map_or(0, |r| r.gas_used);
        {
            let mut stats = self.stats.write().await;
            stats.proxy_sets_deployed += 1;
            stats.total_gas_used += gas;
        }
        info!(
            "[ff-03] Proxy set deployed: impl {:?}, proxy {:?}, admin {:?}",
            implementation.address, proxy.address, admin_address
        );

        ProxySetDeployResult {
            success: true,
            implementation: Some(implementation),
            proxy: Some(proxy),
            admin_receipt,
            admin_address: Some(admin_address),
            error: None,
        }
    }

    // -------------------------------------------------------------------------
    // REGISTER FACETS
    // -------------------------------------------------------------------------

    /// Registers facet bindings into the resolver for one configuration.
    ///
    /// Each name resolves to its resolver key through the supplied registry
    /// list, tried in order (first match wins); lookup order is independent
    /// of any combine policy. Distinct names are resolved concurrently and
    /// awaited jointly; duplicate entries reuse the first lookup.
    ///
    /// A zero resolver address is rejected up front as a structured failure,
    /// before any name resolution or submission.
    ///
    /// All-or-nothing: if any name is absent from every registry, the call
    /// fails before anything is submitted and `registered` stays empty. An
    /// empty binding set is vacuous success. Submission follows the batch
    /// splitting policy; only the last batch is marked final unless the
    /// request asks for a partial (resumable) deploy.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::NoRegistries`] when the effective registry list
    /// is empty: the one failure class that throws, since the call cannot
    /// have had any effect.
    #[instrument(skip(self, request), fields(configuration_id = ?request.configuration_id, run_id = %Uuid::new_v4()))]
    pub async fn register_facets(
        &self,
        request: RegisterFacetsRequest,
    ) -> Result<FacetRegisterResult, OrchestratorError> {
        let registries: &[Arc<FacetRegistry>] = request
            .registries
            .as_deref()
            .unwrap_or(&self.config.default_registries);
        if registries.is_empty() {
            return Err(OrchestratorError::NoRegistries);
        }

        if request.resolver_address.is_zero() {
            self.record_failure().await;
            return Ok(FacetRegisterResult::fail(
                "resolver address is the zero address".to_string(),
            ));
        }

        if request.bindings.is_empty() {
            // Vacuous success, not an error
            return Ok(FacetRegisterResult {
                success: true,
                registered: Vec::new(),
                transaction_hash: None,
                error: None,
            });
        }

        let keys = match self.resolve_keys(&request.bindings, registries).await {
            Ok(keys) => keys,
            Err(missing) => {
                warn!("[ff-03] Registration aborted: {missing} unresolvable");
                self.record_failure().await;
                return Ok(FacetRegisterResult::fail(format!(
                    "{missing} not found in registry"
                )));
            }
        };

        let bindings: Vec<ff_02_configuration_resolver::types::FacetBinding> = request
            .bindings
            .iter()
            .map(|(name, address)| {
                ff_02_configuration_resolver::types::FacetBinding::new(keys[name], *address)
            })
            .collect();

        if let Err(e) = self
            .submit_batches(request.configuration_id, &bindings, request.partial)
            .await
        {
            self.record_failure().await;
            return Ok(FacetRegisterResult::fail(e.to_string()));
        }

        let registered: Vec<String> =
            request.bindings.iter().map(|(name, _)| name.clone()).collect();
        self.stats.write().await.facets_registered += registered.len() as u64;
        info!(
            "[ff-03] Registered {} facets for {:?} (partial: {})",
            registered.len(),
            request.configuration_id,
            request.partial
        );

        Ok(FacetRegisterResult {
            success: true,
            registered,
            transaction_hash: Some(Self::submission_digest(
                request.resolver_address,
                request.configuration_id,
                &bindings,
            )),
            error: None,
        })
    }

    /// Commits the in-progress version of a partially registered
    /// configuration. The finalize step of a resumable deploy.
    pub async fn finalize_configuration(&self, configuration_id: Bytes32) -> FacetRegisterResult {
        match self
            .resolver
            .create_batch_configuration(configuration_id, &[], true)
        {
            Ok(()) => FacetRegisterResult {
                success: true,
                registered: Vec::new(),
                transaction_hash: None,
                error: None,
            },
            Err(e) => {
                self.record_failure().await;
                FacetRegisterResult::fail(e.to_string())
            }
        }
    }

    /// Resolves each distinct name to its resolver key; `Err` carries the
    /// first unresolvable name in input order.
    async fn resolve_keys(
        &self,
        bindings: &[(String, EvmAddress)],
        registries: &[Arc<FacetRegistry>],
    ) -> Result<HashMap<String, Bytes32>, String> {
        // Per-run memoization: each distinct name is looked up exactly once,
        // regardless of how often it (or its address) repeats in the input.
        let mut distinct: Vec<String> = Vec::new();
        for (name, _) in bindings {
            if !distinct.contains(name) {
                distinct.push(name.clone());
            }
        }

        let mut lookups: JoinSet<(String, Option<Bytes32>)> = JoinSet::new();
        for name in &distinct {
            let name = name.clone();
            let registries = registries.to_vec();
            lookups.spawn(async move {
                let key = registries
                    .iter()
                    .find_map(|r| r.get_definition(&name))
                    .map(|def| def.resolver_key.value);
                (name, key)
            });
        }

        let mut resolved: HashMap<String, Bytes32> = HashMap::with_capacity(distinct.len());
        while let Some(joined) = lookups.join_next().await {
            if let Ok((name, Some(key))) = joined {
                resolved.insert(name, key);
            }
        }

        match bindings
            .iter()
            .find(|(name, _)| !resolved.contains_key(name))
        {
            Some((missing, _)) => Err(missing.clone()),
            None => Ok(resolved),
        }
    }

    /// Serialized batch submission with the inter-batch backpressure delay.
    /// Batches for the same in-progress version never run concurrently.
    async fn submit_batches(
        &self,
        configuration_id: Bytes32,
        bindings: &[ff_02_configuration_resolver::types::FacetBinding],
        partial: bool,
    ) -> Result<(), ff_02_configuration_resolver::errors::ResolverError> {
        let policy = self.config.batch_policy;
        let batches = split_into_batches(bindings, policy.batch_count);
        let last = batches.len().saturating_sub(1);

        for (i, batch) in batches.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(policy.inter_batch_delay).await;
            }
            let is_final = !partial && i == last;
            debug!(
                "[ff-03] Submitting batch {}/{} ({} bindings, final: {})",
                i + 1,
                last + 1,
                batch.len(),
                is_final
            );
            self.resolver
                .create_batch_configuration(configuration_id, batch, is_final)?;
        }
        Ok(())
    }

    fn submission_digest(
        resolver_address: EvmAddress,
        configuration_id: Bytes32,
        bindings: &[ff_02_configuration_resolver::types::FacetBinding],
    ) -> Bytes32 {
        let mut buffer = Vec::with_capacity(52 + bindings.len() * 52);
        buffer.extend_from_slice(resolver_address.as_bytes());
        buffer.extend_from_slice(configuration_id.as_bytes());
        for binding in bindings {
            buffer.extend_from_slice(binding.key.as_bytes());
            buffer.extend_from_slice(binding.address.as_bytes());
        }
        Bytes32::keccak256(&buffer)
    }

    // -------------------------------------------------------------------------
    // UPDATE RESOLVER PROXY CONFIG
    // -------------------------------------------------------------------------

    /// Repoints a proxy's resolver/configuration/version.
    ///
    /// Classification, most invasive change first: a resolver-address change
    /// is `resolver`, a configuration-id change (with or without a version)
    /// is `config`, a bare version change is `version`.
    ///
    /// The previous pointer is read and attached before the change is
    /// attempted, even on failure. The call fails without mutating when the
    /// caller lacks administrative authority, the target
    /// `(configuration, version)` has no registered bindings, or the address
    /// does not resolve to a live proxy.
    #[instrument(skip(self, request), fields(proxy = ?request.proxy_address, run_id = %Uuid::new_v4()))]
    pub async fn update_resolver_proxy_config(
        &self,
        caller: EvmAddress,
        request: ProxyConfigUpdateRequest,
    ) -> ConfigUpdateResult {
        let Some(previous) = self.proxy_state.get_proxy_config(request.proxy_address).await
        else {
            self.record_failure().await;
            return ConfigUpdateResult::fail(
                None,
                None,
                format!("no live proxy at {:?}", request.proxy_address),
            );
        };

        let target = ResolverProxyConfig {
            proxy_address: previous.proxy_address,
            resolver_address: request
                .new_resolver_address
                .unwrap_or(previous.resolver_address),
            configuration_id: request
                .new_configuration_id
                .unwrap_or(previous.configuration_id),
            version: request.new_version.unwrap_or(previous.version),
        };

        let update_type = if target.resolver_address != previous.resolver_address {
            UpdateType::Resolver
        } else if target.configuration_id != previous.configuration_id {
            UpdateType::Config
        } else if target.version != previous.version {
            UpdateType::Version
        } else {
            self.record_failure().await;
            return ConfigUpdateResult::fail(
                None,
                Some(previous),
                "no changes requested".to_string(),
            );
        };

        if !self.access.has_role(caller, DEFAULT_ADMIN_ROLE).await {
            warn!("[ff-03] Unauthorized proxy update attempt by {:?}", caller);
            let mut stats = self.stats.write().await;
            stats.rejected_unauthorized += 1;
            stats.failed_operations += 1;
            return ConfigUpdateResult::fail(
                Some(update_type),
                Some(previous),
                format!("{ACCESS_DENIED_MARKER}: account {caller} lacks the admin role"),
            );
        }

        let has_bindings = self
            .resolver
            .binding_count(&target.configuration_id, target.version)
            .map_or(false, |count| count > 0);
        if !has_bindings {
            self.record_failure().await;
            return ConfigUpdateResult::fail(
                Some(update_type),
                Some(previous),
                format!(
                    "no registered bindings for configuration {:?} version {}",
                    target.configuration_id, target.version
                ),
            );
        }

        match self.proxy_state.apply_proxy_config(target).await {
            Ok(outcome) => {
                let mut stats = self.stats.write().await;
                stats.config_updates += 1;
                stats.total_gas_used += outcome.gas_used;
                drop(stats);
                info!(
                    "[ff-03] Proxy {:?} repointed ({})",
                    request.proxy_address,
                    update_type.as_str()
                );
                ConfigUpdateResult {
                    success: true,
                    update_type: Some(update_type),
                    previous_config: Some(previous),
                    new_config: Some(target),
                    transaction_hash: Some(outcome.transaction_hash),
                    gas_used: Some(outcome.gas_used),
                    error: None,
                }
            }
            Err(e) => {
                self.record_failure().await;
                ConfigUpdateResult::fail(Some(update_type), Some(previous), e.to_string())
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryAccessControl, InMemoryProvider, InMemoryProxyState};
    use std::time::Duration;

    fn orchestrator() -> (
        DeploymentOrchestrator<InMemoryProvider, InMemoryAccessControl, InMemoryProxyState>,
        Arc<InMemoryProvider>,
        Arc<InMemoryAccessControl>,
        Arc<InMemoryProxyState>,
        Arc<ConfigurationResolver>,
    ) {
        let provider = Arc::new(InMemoryProvider::with_standard_artifacts());
        let access = Arc::new(InMemoryAccessControl::new());
        let proxy_state = Arc::new(InMemoryProxyState::new());
        let resolver = Arc::new(ConfigurationResolver::new());

        let config = OrchestratorConfig {
            batch_policy: BatchPolicy {
                batch_count: 2,
                inter_batch_delay: Duration::from_millis(1),
            },
            ..OrchestratorConfig::default()
        };
        let service = DeploymentOrchestrator::new(
            Arc::clone(&provider),
            Arc::clone(&access),
            Arc::clone(&proxy_state),
            Arc::clone(&resolver),
            config,
        );
        (service, provider, access, proxy_state, resolver)
    }

    fn admin() -> EvmAddress {
        EvmAddress::new([0xad; 20])
    }

    fn config_id() -> Bytes32 {
        Bytes32::keccak256(b"equity-config")
    }

    fn standard_bindings(count: usize) -> Vec<(String, EvmAddress)> {
        let registry = FacetRegistry::standard();
        registry
            .get_all()
            .iter()
            .cycle()
            .take(count)
            .enumerate()
            .map(|(i, def)| (def.name.clone(), EvmAddress::new([i as u8 + 1; 20])))
            .collect()
    }

    #[tokio::test]
    async fn test_deploy_facet_variant_resolution() {
        let (service, _, _, _, _) = orchestrator();
        let registry = FacetRegistry::standard();

        // Variant requested and cataloged: the variant artifact deploys
        let snapshots = registry.get_definition("SnapshotsFacet").unwrap();
        let result = service.deploy_facet(snapshots, true).await;
        assert!(result.success);
        assert_eq!(result.deployed_name, "SnapshotsTimeTravelFacet");

        // Variant requested but not cataloged: falls back to the base name
        let kyc = registry.get_definition("KycFacet").unwrap();
        let result = service.deploy_facet(kyc, true).await;
        assert!(result.success);
        assert_eq!(result.deployed_name, "KycFacet");
    }

    #[tokio::test]
    async fn test_deploy_facet_by_name() {
        let (service, _, _, _, _) = orchestrator();

        let result = service.deploy_facet_by_name("CapFacet", false).await;
        assert!(result.success);
        assert_eq!(result.deployed_name, "CapFacet");

        let result = service.deploy_facet_by_name("GhostFacet", false).await;
        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("GhostFacet not found in registry")
        );
    }

    #[tokio::test]
    async fn test_deploy_facet_unknown_artifact() {
        let (service, _, _, _, _) = orchestrator();
        let ghost = FacetDefinition::new("GhostFacet", "not in the provider catalog");

        let result = service.deploy_facet(&ghost, false).await;
        assert!(!result.success);
        assert!(result.address.is_none());
        assert!(result.error.as_deref().unwrap().contains("GhostFacet"));
    }

    #[tokio::test]
    async fn test_proxy_set_pairwise_distinct() {
        let (service, _, _, _, _) = orchestrator();

        let result = service.deploy_proxy_set("BusinessLogicResolver", None).await;
        assert!(result.success);
        let (implementation, proxy, admin) = result.addresses().unwrap();
        assert_ne!(implementation, proxy);
        assert_ne!(implementation, admin);
        assert_ne!(proxy, admin);
        assert!(result.admin_receipt.is_some());
    }

    #[tokio::test]
    async fn test_proxy_set_admin_reuse() {
        let (service, _, _, _, _) = orchestrator();

        let first = service.deploy_proxy_set("BusinessLogicResolver", None).await;
        let shared_admin = first.admin_address.unwrap();

        let second = service
            .deploy_proxy_set("BusinessLogicResolver", Some(shared_admin))
            .await;
        assert!(second.success);
        assert!(second.admin_receipt.is_none());
        assert_eq!(second.admin_address, Some(shared_admin));
    }

    #[tokio::test]
    async fn test_proxy_set_rejects_zero_admin() {
        let (service, _, _, _, _) = orchestrator();
        let result = service
            .deploy_proxy_set("BusinessLogicResolver", Some(EvmAddress::ZERO))
            .await;
        assert!(!result.success);
        assert!(result.error.as_deref().unwrap().contains("zero address"));
    }

    #[tokio::test]
    async fn test_register_facets_atomicity() {
        let (service, _, _, _, resolver) = orchestrator();
        resolver.register_configuration(config_id());

        let mut bindings = standard_bindings(3);
        bindings.insert(1, ("GhostFacet".to_string(), EvmAddress::new([0x99; 20])));

        let result = service
            .register_facets(RegisterFacetsRequest {
                resolver_address: EvmAddress::new([0x01; 20]),
                configuration_id: config_id(),
                bindings,
                registries: None,
                partial: false,
            })
            .await
            .unwrap();

        assert!(!result.success);
        assert!(result.registered.is_empty());
        assert_eq!(
            result.error.as_deref().unwrap(),
            "GhostFacet not found in registry"
        );
        assert_eq!(resolver.latest_version(&config_id()), 0);
    }

    #[tokio::test]
    async fn test_register_facets_zero_resolver_rejected() {
        let (service, _, _, _, resolver) = orchestrator();
        resolver.register_configuration(config_id());

        let result = service
            .register_facets(RegisterFacetsRequest {
                resolver_address: EvmAddress::ZERO,
                configuration_id: config_id(),
                bindings: standard_bindings(2),
                registries: None,
                partial: false,
            })
            .await
            .unwrap();

        assert!(!result.success);
        assert!(result.error.as_deref().unwrap().contains("zero address"));
        assert_eq!(resolver.latest_version(&config_id()), 0);
    }

    #[tokio::test]
    async fn test_register_facets_digest_binds_resolver() {
        let (service, _, _, _, resolver) = orchestrator();
        resolver.register_configuration(config_id());

        let mut hashes = Vec::new();
        for tag in [0x01u8, 0x02] {
            let result = service
                .register_facets(RegisterFacetsRequest {
                    resolver_address: EvmAddress::new([tag; 20]),
                    configuration_id: config_id(),
                    bindings: standard_bindings(2),
                    registries: None,
                    partial: false,
                })
                .await
                .unwrap();
            assert!(result.success);
            hashes.push(result.transaction_hash.unwrap());
        }

        // Same bindings against a different resolver produce a different receipt
        assert_ne!(hashes[0], hashes[1]);
    }

    #[tokio::test]
    async fn test_register_facets_empty_is_vacuous_success() {
        let (service, _, _, _, resolver) = orchestrator();
        resolver.register_configuration(config_id());

        let result = service
            .register_facets(RegisterFacetsRequest {
                resolver_address: EvmAddress::new([0x01; 20]),
                configuration_id: config_id(),
                bindings: Vec::new(),
                registries: None,
                partial: false,
            })
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.registered.is_empty());
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_register_facets_empty_registry_list_throws() {
        let (service, _, _, _, _) = orchestrator();

        let err = service
            .register_facets(RegisterFacetsRequest {
                resolver_address: EvmAddress::new([0x01; 20]),
                configuration_id: config_id(),
                bindings: standard_bindings(1),
                registries: Some(Vec::new()),
                partial: false,
            })
            .await
            .unwrap_err();
        assert_eq!(err, OrchestratorError::NoRegistries);
    }

    #[tokio::test]
    async fn test_register_facets_batch_split_and_order() {
        let (service, _, _, _, resolver) = orchestrator();
        resolver.register_configuration(config_id());

        let bindings = standard_bindings(45);
        let result = service
            .register_facets(RegisterFacetsRequest {
                resolver_address: EvmAddress::new([0x01; 20]),
                configuration_id: config_id(),
                bindings: bindings.clone(),
                registries: None,
                partial: false,
            })
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.registered.len(), 45);
        assert_eq!(resolver.latest_version(&config_id()), 1);

        // Submission order preserved across the 23/22 split
        let stored = resolver
            .facets_by_configuration_and_version(&config_id(), 1, 0, 100)
            .unwrap();
        assert_eq!(stored.len(), 45);
        let expected_addresses: Vec<EvmAddress> =
            bindings.iter().map(|(_, address)| *address).collect();
        let stored_addresses: Vec<EvmAddress> = stored.iter().map(|b| b.address).collect();
        assert_eq!(stored_addresses, expected_addresses);
    }

    #[tokio::test]
    async fn test_register_facets_partial_then_finalize() {
        let (service, _, _, _, resolver) = orchestrator();
        resolver.register_configuration(config_id());

        let result = service
            .register_facets(RegisterFacetsRequest {
                resolver_address: EvmAddress::new([0x01; 20]),
                configuration_id: config_id(),
                bindings: standard_bindings(5),
                registries: None,
                partial: true,
            })
            .await
            .unwrap();
        assert!(result.success);

        // Nothing committed until the explicit finalize step
        assert_eq!(resolver.latest_version(&config_id()), 0);

        let finalize = service.finalize_configuration(config_id()).await;
        assert!(finalize.success);
        assert_eq!(resolver.latest_version(&config_id()), 1);
    }

    #[tokio::test]
    async fn test_register_facets_unregistered_configuration_is_structured() {
        let (service, _, _, _, _) = orchestrator();

        let result = service
            .register_facets(RegisterFacetsRequest {
                resolver_address: EvmAddress::new([0x01; 20]),
                configuration_id: config_id(),
                bindings: standard_bindings(2),
                registries: None,
                partial: false,
            })
            .await
            .unwrap();

        assert!(!result.success);
        assert!(result.error.as_deref().unwrap().contains("unregistered"));
    }

    async fn seed_proxy_with_versions(
        service: &DeploymentOrchestrator<
            InMemoryProvider,
            InMemoryAccessControl,
            InMemoryProxyState,
        >,
        proxy_state: &InMemoryProxyState,
        resolver: &ConfigurationResolver,
    ) -> EvmAddress {
        resolver.register_configuration(config_id());
        for _ in 0..2 {
            service
                .register_facets(RegisterFacetsRequest {
                    resolver_address: EvmAddress::new([0x01; 20]),
                    configuration_id: config_id(),
                    bindings: standard_bindings(3),
                    registries: None,
                    partial: false,
                })
                .await
                .unwrap();
        }

        let proxy = EvmAddress::new([0x77; 20]);
        proxy_state.register_proxy(ResolverProxyConfig {
            proxy_address: proxy,
            resolver_address: EvmAddress::new([0x01; 20]),
            configuration_id: config_id(),
            version: 1,
        });
        proxy
    }

    #[tokio::test]
    async fn test_update_version_scenario() {
        let (service, _, access, proxy_state, resolver) = orchestrator();
        access.grant(admin(), DEFAULT_ADMIN_ROLE);
        let proxy = seed_proxy_with_versions(&service, &proxy_state, &resolver).await;

        let result = service
            .update_resolver_proxy_config(
                admin(),
                ProxyConfigUpdateRequest {
                    proxy_address: proxy,
                    new_resolver_address: None,
                    new_configuration_id: None,
                    new_version: Some(2),
                },
            )
            .await;

        assert!(result.success);
        assert_eq!(result.update_type, Some(UpdateType::Version));
        assert_eq!(result.previous_config.unwrap().version, 1);
        assert_eq!(result.new_config.unwrap().version, 2);
        assert!(result.transaction_hash.is_some());
    }

    #[tokio::test]
    async fn test_update_unauthorized_leaves_state_unchanged() {
        let (service, _, _access, proxy_state, resolver) = orchestrator();
        let proxy = seed_proxy_with_versions(&service, &proxy_state, &resolver).await;

        let intruder = EvmAddress::new([0xbb; 20]);
        let result = service
            .update_resolver_proxy_config(
                intruder,
                ProxyConfigUpdateRequest {
                    proxy_address: proxy,
                    new_resolver_address: None,
                    new_configuration_id: None,
                    new_version: Some(2),
                },
            )
            .await;

        assert!(!result.success);
        assert!(result
            .error
            .as_deref()
            .unwrap()
            .contains(ACCESS_DENIED_MARKER));
        // Previous state still attached for diffing, and unchanged on chain
        assert_eq!(result.previous_config.unwrap().version, 1);
        assert_eq!(
            proxy_state.get_proxy_config(proxy).await.unwrap().version,
            1
        );
    }

    #[tokio::test]
    async fn test_update_classification_precedence() {
        let (service, _, access, proxy_state, resolver) = orchestrator();
        access.grant(admin(), DEFAULT_ADMIN_ROLE);
        let proxy = seed_proxy_with_versions(&service, &proxy_state, &resolver).await;

        // Resolver change wins over a simultaneous version change
        let result = service
            .update_resolver_proxy_config(
                admin(),
                ProxyConfigUpdateRequest {
                    proxy_address: proxy,
                    new_resolver_address: Some(EvmAddress::new([0x02; 20])),
                    new_configuration_id: None,
                    new_version: Some(2),
                },
            )
            .await;
        assert!(result.success);
        assert_eq!(result.update_type, Some(UpdateType::Resolver));
    }

    #[tokio::test]
    async fn test_update_rejects_version_without_bindings() {
        let (service, _, access, proxy_state, resolver) = orchestrator();
        access.grant(admin(), DEFAULT_ADMIN_ROLE);
        let proxy = seed_proxy_with_versions(&service, &proxy_state, &resolver).await;

        let result = service
            .update_resolver_proxy_config(
                admin(),
                ProxyConfigUpdateRequest {
                    proxy_address: proxy,
                    new_resolver_address: None,
                    new_configuration_id: None,
                    new_version: Some(9),
                },
            )
            .await;

        assert!(!result.success);
        assert_eq!(result.update_type, Some(UpdateType::Version));
        assert!(result.error.as_deref().unwrap().contains("no registered bindings"));
        assert_eq!(
            proxy_state.get_proxy_config(proxy).await.unwrap().version,
            1
        );
    }

    #[tokio::test]
    async fn test_update_dead_proxy() {
        let (service, _, access, _, _) = orchestrator();
        access.grant(admin(), DEFAULT_ADMIN_ROLE);

        let result = service
            .update_resolver_proxy_config(
                admin(),
                ProxyConfigUpdateRequest {
                    proxy_address: EvmAddress::new([0xde; 20]),
                    new_resolver_address: None,
                    new_configuration_id: None,
                    new_version: Some(2),
                },
            )
            .await;

        assert!(!result.success);
        assert!(result.previous_config.is_none());
        assert!(result.error.as_deref().unwrap().contains("no live proxy"));
    }

    #[tokio::test]
    async fn test_update_transport_failure_is_structured() {
        let (service, _, access, proxy_state, resolver) = orchestrator();
        access.grant(admin(), DEFAULT_ADMIN_ROLE);
        let proxy = seed_proxy_with_versions(&service, &proxy_state, &resolver).await;
        proxy_state.fail_next_apply("nonce too low");

        let result = service
            .update_resolver_proxy_config(
                admin(),
                ProxyConfigUpdateRequest {
                    proxy_address: proxy,
                    new_resolver_address: None,
                    new_configuration_id: None,
                    new_version: Some(2),
                },
            )
            .await;

        assert!(!result.success);
        assert!(result.error.as_deref().unwrap().contains("nonce too low"));
        assert_eq!(
            proxy_state.get_proxy_config(proxy).await.unwrap().version,
            1
        );
    }

    #[tokio::test]
    async fn test_stats_track_outcomes() {
        let (service, _, _, _, resolver) = orchestrator();
        resolver.register_configuration(config_id());

        let registry = FacetRegistry::standard();
        let kyc = registry.get_definition("KycFacet").unwrap();
        assert!(service.deploy_facet(kyc, false).await.success);

        let ghost = FacetDefinition::new("GhostFacet", "missing");
        assert!(!service.deploy_facet(&ghost, false).await.success);

        let stats = service.stats().await;
        assert_eq!(stats.facets_deployed, 1);
        assert_eq!(stats.failed_operations, 1);
        assert!(stats.total_gas_used > 0);
    }
}
