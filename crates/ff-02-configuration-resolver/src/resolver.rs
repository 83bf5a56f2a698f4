//! # Configuration Resolver
//!
//! The single source of truth for "latest version" per configuration id.
//! Writes to the same configuration serialize on a per-configuration lock;
//! writers targeting different configuration ids are independent and may
//! proceed in parallel.

use crate::errors::ResolverError;
use crate::types::{ConfigurationVersion, FacetBinding};
use parking_lot::{Mutex, RwLock};
use shared_types::Bytes32;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Per-configuration state: committed versions plus at most one in-progress
/// batch accumulation buffer.
#[derive(Debug, Default)]
struct ConfigurationState {
    /// Committed versions, index i holds version i + 1.
    committed: Vec<ConfigurationVersion>,
    /// Bindings accumulated for the version currently being assembled.
    in_progress: Vec<FacetBinding>,
}

/// Versioned facet binding store.
///
/// Thread-safe; cheap to share behind an `Arc`.
#[derive(Debug, Default)]
pub struct ConfigurationResolver {
    configurations: RwLock<HashMap<Bytes32, Arc<Mutex<ConfigurationState>>>>,
}

impl ConfigurationResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a configuration id so batches may be submitted against it.
    ///
    /// Idempotent: registering an already-known id is a no-op.
    pub fn register_configuration(&self, configuration_id: Bytes32) {
        let mut configurations = self.configurations.write();
        configurations.entry(configuration_id).or_insert_with(|| {
            info!(
                "[ff-02] Registered configuration {:?}",
                configuration_id
            );
            Arc::new(Mutex::new(ConfigurationState::default()))
        });
    }

    /// True when the configuration id has been registered.
    #[must_use]
    pub fn is_registered(&self, configuration_id: &Bytes32) -> bool {
        self.configurations.read().contains_key(configuration_id)
    }

    fn state_for(
        &self,
        configuration_id: &Bytes32,
    ) -> Result<Arc<Mutex<ConfigurationState>>, ResolverError> {
        self.configurations
            .read()
            .get(configuration_id)
            .cloned()
            .ok_or(ResolverError::UnregisteredConfiguration(*configuration_id))
    }

    /// Appends a batch of bindings to the in-progress version for a
    /// configuration.
    ///
    /// Intermediate batches accumulate partial state without advancing the
    /// visible latest version. A call with `is_final_batch = true` commits
    /// the accumulated bindings as the next version; only then does the
    /// version become queryable.
    ///
    /// # Errors
    ///
    /// - [`ResolverError::UnregisteredConfiguration`] when the id was never
    ///   registered.
    /// - [`ResolverError::EmptyVersion`] when a final batch would commit a
    ///   version with no bindings at all.
    pub fn create_batch_configuration(
        &self,
        configuration_id: Bytes32,
        bindings: &[FacetBinding],
        is_final_batch: bool,
    ) -> Result<(), ResolverError> {
        let state = self.state_for(&configuration_id)?;
        let mut state = state.lock();

        state.in_progress.extend_from_slice(bindings);
        debug!(
            "[ff-02] Batch of {} bindings for {:?} (buffered: {}, final: {})",
            bindings.len(),
            configuration_id,
            state.in_progress.len(),
            is_final_batch
        );

        if !is_final_batch {
            return Ok(());
        }

        if state.in_progress.is_empty() {
            return Err(ResolverError::EmptyVersion(configuration_id));
        }

        let version = u32::try_from(state.committed.len())
            .unwrap_or(u32::MAX - 1)
            .saturating_add(1);
        let bindings = std::mem::take(&mut state.in_progress);
        let binding_count = bindings.len();
        state.committed.push(ConfigurationVersion {
            configuration_id,
            version,
            bindings,
        });

        info!(
            "[ff-02] Committed version {} of {:?} with {} bindings",
            version, configuration_id, binding_count
        );
        Ok(())
    }

    /// Latest committed version number for a configuration.
    ///
    /// Returns 0 when the configuration is unknown or has no committed
    /// versions; an in-progress (non-final) batch buffer is invisible here.
    #[must_use]
    pub fn latest_version(&self, configuration_id: &Bytes32) -> u32 {
        let configurations = self.configurations.read();
        let Some(state) = configurations.get(configuration_id) else {
            return 0;
        };
        let state = state.lock();
        u32::try_from(state.committed.len()).unwrap_or(u32::MAX)
    }

    /// A page of bindings from one committed version, in insertion order.
    ///
    /// Returns an empty page when `offset` is at or past the end of the
    /// binding list.
    ///
    /// # Errors
    ///
    /// - [`ResolverError::UnregisteredConfiguration`] for an unknown id.
    /// - [`ResolverError::UnknownVersion`] for version 0 or a version that
    ///   has not been committed.
    pub fn facets_by_configuration_and_version(
        &self,
        configuration_id: &Bytes32,
        version: u32,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<FacetBinding>, ResolverError> {
        let state = self.state_for(configuration_id)?;
        let state = state.lock();

        let index = version
            .checked_sub(1)
            .map(|v| v as usize)
            .filter(|&v| v < state.committed.len())
            .ok_or(ResolverError::UnknownVersion {
                configuration_id: *configuration_id,
                version,
            })?;

        let bindings = &state.committed[index].bindings;
        if offset >= bindings.len() {
            return Ok(Vec::new());
        }
        let end = offset.saturating_add(limit).min(bindings.len());
        Ok(bindings[offset..end].to_vec())
    }

    /// Number of bindings in one committed version.
    ///
    /// # Errors
    ///
    /// Same taxonomy as
    /// [`facets_by_configuration_and_version`](Self::facets_by_configuration_and_version).
    pub fn binding_count(
        &self,
        configuration_id: &Bytes32,
        version: u32,
    ) -> Result<usize, ResolverError> {
        let state = self.state_for(configuration_id)?;
        let state = state.lock();
        version
            .checked_sub(1)
            .map(|v| v as usize)
            .filter(|&v| v < state.committed.len())
            .map(|v| state.committed[v].bindings.len())
            .ok_or(ResolverError::UnknownVersion {
                configuration_id: *configuration_id,
                version,
            })
    }
}

// =============================================================================
// TESTS
// =============================================================================
