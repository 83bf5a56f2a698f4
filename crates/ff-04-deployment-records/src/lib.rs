//! # FF-04 Deployment Records - Persisted Output Subsystem
//!
//! **Subsystem ID:** 04
//!
//! ## Purpose
//!
//! Persists and retrieves the output of a deployment run (addresses, gas,
//! facet list, per-network history) as JSON documents on a filesystem store,
//! so later steps or re-runs can resume idempotently.
//!
//! ## Storage Layout
//!
//! ```text
//! deployments/
//! └── <network>/
//!     ├── <workflow>-<timestamp>.json
//!     └── ...
//! ```
//!
//! Records are append-only by filename: one document per
//! `(network, workflow, timestamp)`, never mutated after a successful write,
//! superseded (not overwritten) by later runs. An explicit custom path
//! bypasses the naming convention entirely.

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod errors;
pub mod output;
pub mod store;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::errors::RecordStoreError;
    pub use crate::output::{
        ConfigurationRecord, DeployedFacetRecord, DeploymentOutput, DeploymentSummary,
        InfrastructureAddresses,
    };
    pub use crate::store::{DeploymentRecordStore, SaveParams, SavedRecord};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 4;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Deployment Records";
