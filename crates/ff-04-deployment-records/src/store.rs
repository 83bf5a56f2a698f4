//! # Deployment Record Store
//!
//! Filesystem-backed persistence for [`DeploymentOutput`] documents. Writes
//! are atomic (temp file + rename) and append-only by filename; concurrent
//! writers targeting distinct `(network, workflow, timestamp)` keys never
//! conflict.

use crate::errors::RecordStoreError;
use crate::output::DeploymentOutput;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Parameters for saving one deployment output.
#[derive(Debug, Clone)]
pub struct SaveParams {
    /// Target network (becomes the directory name).
    pub network: String,
    /// Workflow name (becomes the filename prefix).
    pub workflow: String,
    /// The output document to persist.
    pub data: DeploymentOutput,
    /// Explicit path override. When set, its basename becomes the filename
    /// and the default naming convention is bypassed entirely.
    pub custom_path: Option<String>,
}

/// Where a record was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedRecord {
    /// Final filename of the record.
    pub filename: String,
    /// Full path the record was written to.
    pub filepath: PathBuf,
}

/// Filesystem store for deployment records.
#[derive(Debug, Clone)]
pub struct DeploymentRecordStore {
    root: PathBuf,
}

impl DeploymentRecordStore {
    /// Creates a store rooted at `root` (records live under
    /// `<root>/deployments/<network>/`).
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn network_dir(&self, network: &str) -> PathBuf {
        self.root.join("deployments").join(network)
    }

    fn record_filename(workflow: &str, timestamp: u64) -> String {
        format!("{workflow}-{timestamp}.json")
    }

    /// Saves one deployment output.
    ///
    /// Default path is derived deterministically from
    /// `(network, workflow, data.timestamp)`. A `custom_path` overrides
    /// naming entirely; path separators are normalized across conventions
    /// and the basename becomes the filename.
    ///
    /// # Errors
    ///
    /// [`RecordStoreError::Io`] on filesystem failure.
    pub fn save_deployment_output(
        &self,
        params: &SaveParams,
    ) -> Result<SavedRecord, RecordStoreError> {
        let filepath = match &params.custom_path {
            Some(custom) => {
                // Backslash-separated paths from other platforms normalize
                // to the local separator convention.
                PathBuf::from(custom.replace('\\', "/"))
            }
            None => self
                .network_dir(&params.network)
                .join(Self::record_filename(&params.workflow, params.data.timestamp)),
        };

        let filename = filepath
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if let Some(parent) = filepath.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(&params.data).map_err(|e| {
            RecordStoreError::Malformed {
                path: filepath.display().to_string(),
                message: e.to_string(),
            }
        })?;

        // Write atomically via temp file
        let temp_path = filepath.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(&json)?;
        file.sync_all()?;
        fs::rename(&temp_path, &filepath)?;

        info!(
            "[ff-04] Saved deployment record {} ({} bytes)",
            filepath.display(),
            json.len()
        );
        Ok(SavedRecord { filename, filepath })
    }

    /// Loads the record for an exact `(network, workflow, timestamp)` key.
    ///
    /// # Errors
    ///
    /// - [`RecordStoreError::NotFound`] when the file does not exist.
    /// - [`RecordStoreError::Malformed`] when present but not parseable.
    pub fn load_deployment(
        &self,
        network: &str,
        workflow: &str,
        timestamp: u64,
    ) -> Result<DeploymentOutput, RecordStoreError> {
        let filepath = self
            .network_dir(network)
            .join(Self::record_filename(workflow, timestamp));

        let bytes = match fs::read(&filepath) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RecordStoreError::NotFound {
                    network: network.to_string(),
                    workflow: workflow.to_string(),
                    timestamp,
                });
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|e| RecordStoreError::Malformed {
            path: filepath.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Most recent record for a `(network, workflow)` pair.
    ///
    /// Returns `None` (not an error) when no records exist for the network.
    ///
    /// # Errors
    ///
    /// [`RecordStoreError::Malformed`] when the newest matching record file
    /// exists but cannot be parsed.
    pub fn find_latest_deployment(
        &self,
        network: &str,
        workflow: &str,
    ) -> Result<Option<DeploymentOutput>, RecordStoreError> {
        // A file belongs to the workflow only when the part after the
        // `{workflow}-` prefix is exactly a timestamp. A bare prefix check
        // would also claim sibling workflows like `{workflow}-extra`.
        let prefix = format!("{workflow}-");
        let latest = self
            .list_deployment_files(network)
            .into_iter()
            .find_map(|name| {
                name.strip_prefix(&prefix)
                    .and_then(|rest| rest.strip_suffix(".json"))
                    .and_then(|rest| rest.parse::<u64>().ok())
            });

        match latest {
            None => Ok(None),
            Some(timestamp) => self.load_deployment(network, workflow, timestamp).map(Some),
        }
    }

    /// All record filenames for a network, newest timestamp first.
    ///
    /// Empty list (not an error) for an unknown network directory.
    #[must_use]
    pub fn list_deployment_files(&self, network: &str) -> Vec<String> {
        let dir = self.network_dir(network);
        let Ok(entries) = fs::read_dir(&dir) else {
            debug!("[ff-04] No record directory for network {network}");
            return Vec::new();
        };

        let mut files: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".json"))
            .collect();

        files.sort_by_key(|name| std::cmp::Reverse(Self::timestamp_of(name).unwrap_or(0)));
        files
    }

    /// Parses the trailing `-<timestamp>.json` component of a record name.
    fn timestamp_of(filename: &str) -> Option<u64> {
        filename
            .strip_suffix(".json")?
            .rsplit('-')
            .next()?
            .parse()
            .ok()
    }
}

// =============================================================================
// TESTS
// =============================================================================
