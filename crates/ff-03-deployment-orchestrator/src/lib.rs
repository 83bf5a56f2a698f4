//! # FF-03 Deployment Orchestrator - Workflow Subsystem
//!
//! **Subsystem ID:** 03
//!
//! ## Purpose
//!
//! Performs the atomic higher-level deployment operations: deploy a facet,
//! deploy an implementation/proxy/admin triple, register facet bindings into
//! a configuration resolver, and repoint a proxy's resolver/configuration/
//! version. Operations return structured results instead of raising for
//! expected failure classes.
//!
//! ## Failure Model
//!
//! | Failure class | Surface |
//! |---------------|---------|
//! | Dependency not found, access denied, provider revert | `success = false` + error string in the result |
//! | Malformed input shape (empty registry list) | `Err(OrchestratorError)` from the call |
//! | Malformed identifiers | rejected upstream by `shared-types` validation |
//!
//! A `success = false` result guarantees no partial mutation beyond what the
//! result explicitly reports (e.g. `registered` lists exactly the names that
//! landed before the failing item, if any).
//!
//! ## Outbound Dependencies
//!
//! | Collaborator | Trait | Purpose |
//! |--------------|-------|---------|
//! | Deployment provider | `DeploymentProvider` | Artifact factories and contract deployment |
//! | Access control | `AccessControl` | Administrative authority checks |
//! | Proxy state | `ProxyStateAccess` | Read/write live proxy pointers |
//!
//! ## Usage Example
//!
//! ```ignore
//! use ff_03_deployment_orchestrator::prelude::*;
//!
//! let orchestrator = DeploymentOrchestrator::new(provider, access, proxy_state, resolver, config);
//! let result = orchestrator.deploy_proxy_set("BusinessLogicResolver", None).await;
//! if result.success {
//!     let (implementation, proxy, admin) = result.addresses().unwrap();
//! }
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod batch;
pub mod errors;
pub mod ports;
pub mod results;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{InMemoryAccessControl, InMemoryProvider, InMemoryProxyState};
    pub use crate::batch::{split_into_batches, BatchPolicy};
    pub use crate::errors::{OrchestratorError, ProviderError, ACCESS_DENIED_MARKER};
    pub use crate::ports::outbound::{
        AccessControl, ContractFactory, DeployedContract, DeploymentProvider, ProxyStateAccess,
        ResolverProxyConfig, TxOutcome, DEFAULT_ADMIN_ROLE,
    };
    pub use crate::results::{
        ConfigUpdateResult, FacetDeployResult, FacetRegisterResult, ProxySetDeployResult,
        UpdateType,
    };
    pub use crate::service::{
        DeploymentOrchestrator, OrchestratorConfig, OrchestratorStats, ProxyConfigUpdateRequest,
        RegisterFacetsRequest,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 3;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Deployment Orchestrator";
