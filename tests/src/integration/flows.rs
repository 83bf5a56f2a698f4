//! # Deployment Choreography
//!
//! End-to-end flows across all subsystems: catalog lookup, contract
//! deployment, binding registration, proxy repointing, and durable records.

use ff_01_facet_registry::prelude::*;
use ff_02_configuration_resolver::prelude::*;
use ff_03_deployment_orchestrator::prelude::*;
use ff_04_deployment_records::prelude::*;
use shared_types::{Bytes32, EvmAddress};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Everything a deployment run needs, wired over in-memory adapters.
pub struct TestHarness {
    pub orchestrator:
        DeploymentOrchestrator<InMemoryProvider, InMemoryAccessControl, InMemoryProxyState>,
    pub provider: Arc<InMemoryProvider>,
    pub access: Arc<InMemoryAccessControl>,
    pub proxy_state: Arc<InMemoryProxyState>,
    pub resolver: Arc<ConfigurationResolver>,
}

/// Installs the test subscriber once; `RUST_LOG` controls verbosity.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

impl TestHarness {
    pub fn new() -> Self {
        init_tracing();
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
        let orchestrator = DeploymentOrchestrator::new(
            Arc::clone(&provider),
            Arc::clone(&access),
            Arc::clone(&proxy_state),
            Arc::clone(&resolver),
            config,
        );
        Self {
            orchestrator,
            provider,
            access,
            proxy_state,
            resolver,
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

pub fn admin() -> EvmAddress {
    EvmAddress::new([0xad; 20])
}

pub fn equity_config() -> Bytes32 {
    Bytes32::keccak256(b"equity-config")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Full pipeline: deploy infrastructure and facets, register bindings,
    /// point a proxy at the committed version, persist the run, reload it.
    #[tokio::test]
    async fn full_deploy_pipeline_round_trips_through_records() {
        let harness = TestHarness::new();
        harness.access.grant(admin(), DEFAULT_ADMIN_ROLE);
        let registry = FacetRegistry::standard();
        let started = std::time::Instant::now();

        // Infrastructure: resolver implementation behind a proxy
        let proxy_set = harness
            .orchestrator
            .deploy_proxy_set("BusinessLogicResolver", None)
            .await;
        assert!(proxy_set.success);
        let (_, resolver_proxy, proxy_admin) = proxy_set.addresses().unwrap();

        // Facets
        let facet_names = ["AccessControlFacet", "KycFacet", "CapFacet", "PauseFacet"];
        let mut deployed: Vec<DeployedFacetRecord> = Vec::new();
        let mut gas_used = proxy_set.implementation.unwrap().gas_used
            + proxy_set.proxy.unwrap().gas_used
            + proxy_set.admin_receipt.unwrap().gas_used;
        for name in facet_names {
            let definition = registry.get_definition(name).unwrap();
            let result = harness.orchestrator.deploy_facet(definition, false).await;
            assert!(result.success, "facet {name} failed: {:?}", result.error);
            gas_used += result.gas_used.unwrap();
            deployed.push(DeployedFacetRecord {
                name: name.to_string(),
                address: result.address.unwrap(),
                key: definition.resolver_key.value,
            });
        }

        // Bindings into version 1 of the equity configuration
        harness.resolver.register_configuration(equity_config());
        let register = harness
            .orchestrator
            .register_facets(RegisterFacetsRequest {
                resolver_address: resolver_proxy,
                configuration_id: equity_config(),
                bindings: deployed
                    .iter()
                    .map(|f| (f.name.clone(), f.address))
                    .collect(),
                registries: None,
                partial: false,
            })
            .await
            .unwrap();
        assert!(register.success);
        assert_eq!(harness.resolver.latest_version(&equity_config()), 1);

        // Point a fresh proxy at the committed configuration
        harness.proxy_state.register_proxy(ResolverProxyConfig {
            proxy_address: EvmAddress::new([0x70; 20]),
            resolver_address: resolver_proxy,
            configuration_id: equity_config(),
            version: 1,
        });

        // Durable record of the run
        let mut configurations = BTreeMap::new();
        configurations.insert(
            "equity".to_string(),
            ConfigurationRecord {
                config_id: equity_config(),
                version: 1,
                facet_count: deployed.len(),
                facets: deployed.iter().map(|f| f.name.clone()).collect(),
            },
        );
        let output = DeploymentOutput {
            network: "previewnet".to_string(),
            timestamp: 1_700_000_111_222,
            deployer: admin(),
            infrastructure: InfrastructureAddresses {
                resolver: Some(resolver_proxy),
                factory: None,
                proxy_admin: Some(proxy_admin),
            },
            facets: deployed.clone(),
            configurations,
            summary: DeploymentSummary {
                total_contracts: deployed.len() + 3,
                total_facets: deployed.len(),
                total_configurations: 1,
                deployment_time_ms: started.elapsed().as_millis() as u64,
                gas_used,
                success: true,
            },
        };

        let dir = tempfile::tempdir().unwrap();
        let store = DeploymentRecordStore::new(dir.path());
        let saved = store
            .save_deployment_output(&SaveParams {
                network: "previewnet".to_string(),
                workflow: "full-deploy".to_string(),
                data: output.clone(),
                custom_path: None,
            })
            .unwrap();
        assert_eq!(saved.filename, "full-deploy-1700000111222.json");

        let reloaded = store
            .load_deployment("previewnet", "full-deploy", output.timestamp)
            .unwrap();
        assert_eq!(reloaded, output);

        let latest = store
            .find_latest_deployment("previewnet", "full-deploy")
            .unwrap()
            .unwrap();
        assert_eq!(latest.timestamp, output.timestamp);
    }

    /// A second version committed after the first; the proxy repoints to it,
    /// and an unauthorized caller cannot.
    #[tokio::test]
    async fn version_upgrade_and_unauthorized_repoint() {
        let harness = TestHarness::new();
        harness.access.grant(admin(), DEFAULT_ADMIN_ROLE);
        harness.resolver.register_configuration(equity_config());

        for round in 0..2u8 {
            let register = harness
                .orchestrator
                .register_facets(RegisterFacetsRequest {
                    resolver_address: EvmAddress::new([0x01; 20]),
                    configuration_id: equity_config(),
                    bindings: vec![
                        ("KycFacet".to_string(), EvmAddress::new([round + 1; 20])),
                        ("CapFacet".to_string(), EvmAddress::new([round + 10; 20])),
                    ],
                    registries: None,
                    partial: false,
                })
                .await
                .unwrap();
            assert!(register.success);
        }
        assert_eq!(harness.resolver.latest_version(&equity_config()), 2);

        let proxy = EvmAddress::new([0x70; 20]);
        harness.proxy_state.register_proxy(ResolverProxyConfig {
            proxy_address: proxy,
            resolver_address: EvmAddress::new([0x01; 20]),
            configuration_id: equity_config(),
            version: 1,
        });

        // Unauthorized first: state must stay at version 1
        let rejected = harness
            .orchestrator
            .update_resolver_proxy_config(
                EvmAddress::new([0x66; 20]),
                ProxyConfigUpdateRequest {
                    proxy_address: proxy,
                    new_resolver_address: None,
                    new_configuration_id: None,
                    new_version: Some(2),
                },
            )
            .await;
        assert!(!rejected.success);
        assert!(rejected.error.as_deref().unwrap().contains(ACCESS_DENIED_MARKER));
        assert_eq!(
            harness.proxy_state.get_proxy_config(proxy).await.unwrap().version,
            1
        );

        // Authorized repoint succeeds and reports the diff
        let update = harness
            .orchestrator
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
        assert!(update.success);
        assert_eq!(update.update_type, Some(UpdateType::Version));
        assert_eq!(update.previous_config.unwrap().version, 1);
        assert_eq!(update.new_config.unwrap().version, 2);
        assert_eq!(
            harness.proxy_state.get_proxy_config(proxy).await.unwrap().version,
            2
        );
    }

    /// Custom extension catalogs override the standard one under the `Last`
    /// policy for enumeration, while lookup during registration walks the
    /// supplied registry list in order.
    #[tokio::test]
    async fn extension_catalog_overrides_and_first_match_lookup() {
        let harness = TestHarness::new();
        let standard = Arc::new(FacetRegistry::standard());
        let custom = Arc::new(
            FacetRegistry::custom(vec![FacetDefinition::new(
                "KycFacet",
                "jurisdiction-specific KYC",
            )])
            .unwrap(),
        );

        // Pre-flight shows the overlap
        assert_eq!(conflicts(&standard, &custom), vec!["KycFacet"]);

        // Combine for enumeration: Last wins
        let view = combine(&[Arc::clone(&standard), Arc::clone(&custom)], ConflictPolicy::Last)
            .unwrap();
        assert_eq!(
            view.get_definition("KycFacet").unwrap().description,
            "jurisdiction-specific KYC"
        );

        // Lookup during registration: first match across the list wins,
        // independent of the combine policy
        harness.resolver.register_configuration(equity_config());
        let register = harness
            .orchestrator
            .register_facets(RegisterFacetsRequest {
                resolver_address: EvmAddress::new([0x01; 20]),
                configuration_id: equity_config(),
                bindings: vec![("KycFacet".to_string(), EvmAddress::new([0x09; 20]))],
                registries: Some(vec![custom, standard]),
                partial: false,
            })
            .await
            .unwrap();
        assert!(register.success);
        assert_eq!(register.registered, vec!["KycFacet"]);
    }

    /// A partial (resumable) deploy leaves nothing visible until the
    /// explicit finalize step, which can run in a later session.
    #[tokio::test]
    async fn resumable_deploy_finalizes_later() {
        let harness = TestHarness::new();
        harness.resolver.register_configuration(equity_config());

        let register = harness
            .orchestrator
            .register_facets(RegisterFacetsRequest {
                resolver_address: EvmAddress::new([0x01; 20]),
                configuration_id: equity_config(),
                bindings: vec![
                    ("KycFacet".to_string(), EvmAddress::new([0x01; 20])),
                    ("CapFacet".to_string(), EvmAddress::new([0x02; 20])),
                    ("PauseFacet".to_string(), EvmAddress::new([0x03; 20])),
                ],
                registries: None,
                partial: true,
            })
            .await
            .unwrap();
        assert!(register.success);
        assert_eq!(harness.resolver.latest_version(&equity_config()), 0);

        let finalize = harness.orchestrator.finalize_configuration(equity_config()).await;
        assert!(finalize.success);
        assert_eq!(harness.resolver.latest_version(&equity_config()), 1);

        let bindings = harness
            .resolver
            .facets_by_configuration_and_version(&equity_config(), 1, 0, 10)
            .unwrap();
        assert_eq!(bindings.len(), 3);
    }
}
