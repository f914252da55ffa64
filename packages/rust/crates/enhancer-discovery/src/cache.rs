//! Fingerprint-validated discovery cache.
//!
//! Holds at most one snapshot per project, stored as
//! `{"version": 1, "fingerprint": "...", "data": {...}}`. A stored snapshot
//! is only served when its format version matches and its fingerprint equals
//! the fingerprint of the current watch set. Every other outcome is a miss.
//!
//! The cache is an optimization: read failures become misses and write
//! failures are logged and ignored. Neither ever reaches the caller.

use std::path::{Path, PathBuf};

use enhancer_types::DiscoveredContext;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tracing::{debug, warn};

use crate::discover::discover;
use crate::error::{CacheError, DiscoveryError};
use crate::fingerprint::{Fingerprint, compute_fingerprint};

/// Current on-disk format. Any other version is discarded unread.
pub const CACHE_FORMAT_VERSION: u32 = 1;
/// Default cache directory, relative to the project root.
pub const DEFAULT_CACHE_DIR: &str = ".claude/.cache";
/// Default cache file name.
pub const DEFAULT_CACHE_FILE: &str = "discovery-cache.json";

/// Where and how a [`DiscoveryCache`] persists its entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Cache directory, relative to the project root unless absolute.
    pub cache_dir: PathBuf,
    /// File name inside `cache_dir`.
    pub cache_file: String,
    /// Format version written and accepted.
    pub format_version: u32,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            cache_file: DEFAULT_CACHE_FILE.to_string(),
            format_version: CACHE_FORMAT_VERSION,
        }
    }
}

/// Persisted cache document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Format version the entry was written with.
    pub version: u32,
    /// Fingerprint of the watch set when the entry was written.
    pub fingerprint: Fingerprint,
    /// Discovery snapshot.
    pub data: DiscoveredContext,
}

#[derive(Serialize)]
struct CacheEntryRef<'a> {
    version: u32,
    fingerprint: &'a Fingerprint,
    data: &'a DiscoveredContext,
}

/// Single-entry discovery cache for one project root.
#[derive(Debug, Clone)]
pub struct DiscoveryCache {
    project_root: PathBuf,
    settings: CacheSettings,
}

impl DiscoveryCache {
    /// Cache for `project_root` with default settings.
    pub fn new<P: AsRef<Path>>(project_root: P) -> Self {
        Self::with_settings(project_root, CacheSettings::default())
    }

    /// Cache for `project_root` with explicit settings.
    pub fn with_settings<P: AsRef<Path>>(project_root: P, settings: CacheSettings) -> Self {
        Self {
            project_root: project_root.as_ref().to_path_buf(),
            settings,
        }
    }

    /// Project root this cache validates against.
    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Settings in effect.
    #[must_use]
    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    /// Full path of the cache file.
    #[must_use]
    pub fn cache_path(&self) -> PathBuf {
        self.project_root
            .join(&self.settings.cache_dir)
            .join(&self.settings.cache_file)
    }

    /// Return the stored snapshot if it is still valid.
    ///
    /// The format version is checked before the fingerprint is computed.
    pub async fn read(&self) -> Option<DiscoveredContext> {
        let result = async {
            let entry = self.load_entry().await?;
            let current = compute_fingerprint(&self.project_root).await?;
            Self::validate(entry, &current)
        }
        .await;
        self.hit_or_miss(result)
    }

    /// Persist `context` under the current fingerprint. Failures are logged.
    pub async fn write(&self, context: &DiscoveredContext) {
        match compute_fingerprint(&self.project_root).await {
            Ok(fingerprint) => self.write_with_fingerprint(&fingerprint, context).await,
            Err(err) => warn!(
                root = %self.project_root.display(),
                error = %err,
                "skipping discovery cache write: fingerprint unavailable"
            ),
        }
    }

    /// Serve from cache when valid, otherwise discover and persist.
    ///
    /// The fingerprint is taken before discovery runs. If the tree changes
    /// while discovery is in flight, the stored entry will not match on the
    /// next read, so a snapshot is never paired with a newer fingerprint.
    ///
    /// # Errors
    ///
    /// Propagates [`DiscoveryError`] from the discovery run. Cache failures
    /// are never returned.
    pub async fn load_or_discover(&self) -> Result<DiscoveredContext, DiscoveryError> {
        let fingerprint = match compute_fingerprint(&self.project_root).await {
            Ok(fingerprint) => Some(fingerprint),
            Err(err) => {
                warn!(
                    root = %self.project_root.display(),
                    error = %err,
                    "fingerprint unavailable, discovering without cache"
                );
                None
            }
        };

        if let Some(current) = &fingerprint {
            let result = async { Self::validate(self.load_entry().await?, current) }.await;
            if let Some(context) = self.hit_or_miss(result) {
                return Ok(context);
            }
        }

        let context = discover(&self.project_root).await?;
        if let Some(fingerprint) = &fingerprint {
            self.write_with_fingerprint(fingerprint, &context).await;
        }
        Ok(context)
    }

    async fn write_with_fingerprint(&self, fingerprint: &Fingerprint, context: &DiscoveredContext) {
        let entry = CacheEntryRef {
            version: self.settings.format_version,
            fingerprint,
            data: context,
        };
        match self.persist(&entry).await {
            Ok(()) => debug!(
                path = %self.cache_path().display(),
                fingerprint = %fingerprint,
                "wrote discovery cache"
            ),
            Err(err) => warn!(
                path = %self.cache_path().display(),
                error = %err,
                "failed to write discovery cache"
            ),
        }
    }

    /// Load and decode the stored entry, rejecting foreign format versions
    /// before the rest of the document is interpreted.
    async fn load_entry(&self) -> Result<CacheEntry, CacheError> {
        let raw = fs::read(self.cache_path()).await?;
        let document: Value = serde_json::from_slice(&raw)?;

        let found = document
            .get("version")
            .and_then(Value::as_u64)
            .ok_or(CacheError::MissingVersion)?;
        if found != u64::from(self.settings.format_version) {
            return Err(CacheError::VersionMismatch {
                found,
                expected: self.settings.format_version,
            });
        }

        Ok(serde_json::from_value(document)?)
    }

    fn validate(entry: CacheEntry, current: &Fingerprint) -> Result<DiscoveredContext, CacheError> {
        if entry.fingerprint == *current {
            Ok(entry.data)
        } else {
            Err(CacheError::Stale)
        }
    }

    fn hit_or_miss(&self, result: Result<DiscoveredContext, CacheError>) -> Option<DiscoveredContext> {
        match result {
            Ok(context) => {
                debug!(root = %self.project_root.display(), "discovery cache hit");
                Some(context)
            }
            Err(reason) => {
                debug!(
                    root = %self.project_root.display(),
                    reason = %reason,
                    "discovery cache miss"
                );
                None
            }
        }
    }

    /// Write-to-temp-then-rename so readers never see a partial document.
    async fn persist(&self, entry: &CacheEntryRef<'_>) -> Result<(), CacheError> {
        if !fs::metadata(&self.project_root).await?.is_dir() {
            return Err(CacheError::Io(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                "project root is not a directory",
            )));
        }

        let path = self.cache_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec(entry)?;
        let tmp_path = path.with_file_name(format!(
            ".{}.{}.tmp",
            self.settings.cache_file,
            std::process::id()
        ));
        fs::write(&tmp_path, &json).await?;
        if let Err(err) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(err.into());
        }
        Ok(())
    }
}
