//! # Deployment Output
//!
//! The serializable record of one deployment run. Created once per run,
//! written to a content-addressed file, never mutated after a successful
//! write.

use serde::{Deserialize, Serialize};
use shared_types::{Bytes32, EvmAddress};
use std::collections::BTreeMap;

/// Addresses of the shared infrastructure contracts of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfrastructureAddresses {
    /// Business-logic resolver the proxies point at.
    pub resolver: Option<EvmAddress>,
    /// Token factory, when one was deployed.
    pub factory: Option<EvmAddress>,
    /// Shared proxy admin.
    pub proxy_admin: Option<EvmAddress>,
}

/// One deployed facet as recorded in the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedFacetRecord {
    /// Facet name.
    pub name: String,
    /// Deployed address.
    pub address: EvmAddress,
    /// Resolver key the facet registers under.
    pub key: Bytes32,
}

/// One configuration assembled during the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationRecord {
    /// 32-byte configuration id.
    pub config_id: Bytes32,
    /// Version committed by this run.
    pub version: u32,
    /// Number of facets bound in the version.
    pub facet_count: usize,
    /// Names of the facets bound, in binding order.
    pub facets: Vec<String>,
}

/// Aggregate counters for the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentSummary {
    /// Total contracts deployed (facets + infrastructure).
    pub total_contracts: usize,
    /// Total facets deployed.
    pub total_facets: usize,
    /// Total configurations committed.
    pub total_configurations: usize,
    /// Wall-clock duration of the run in milliseconds.
    pub deployment_time_ms: u64,
    /// Total gas consumed across all transactions.
    pub gas_used: u64,
    /// Whether the run completed without failures.
    pub success: bool,
}

/// The full output of one deployment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentOutput {
    /// Target network name.
    pub network: String,
    /// Run timestamp, epoch milliseconds. Part of the record's identity.
    pub timestamp: u64,
    /// Deployer address.
    pub deployer: EvmAddress,
    /// Shared infrastructure addresses.
    #[serde(default)]
    pub infrastructure: InfrastructureAddresses,
    /// Facets deployed by the run.
    pub facets: Vec<DeployedFacetRecord>,
    /// Configurations committed by the run, keyed by label.
    pub configurations: BTreeMap<String, ConfigurationRecord>,
    /// Aggregate counters.
    pub summary: DeploymentSummary,
}
