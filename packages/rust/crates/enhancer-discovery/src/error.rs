//! Error types for discovery, fingerprinting and the discovery cache.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to compute a trustworthy fingerprint.
///
/// Absence of watched files is never an error; these variants only cover
/// failures that would make an "unchanged" verdict unsafe.
#[derive(Debug, Error)]
pub enum FingerprintError {
    /// The project root could not be made absolute.
    #[error("Failed to resolve project root {path}: {source}")]
    Resolve {
        /// Root as given.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Walking a watched directory failed below its root.
    #[error("Failed to walk watched directory {path}: {source}")]
    Walk {
        /// Root of the branch being walked.
        path: PathBuf,
        /// Underlying walk error.
        source: walkdir::Error,
    },

    /// Reading the metadata of a watched file failed.
    #[error("Failed to stat watched file {path}: {source}")]
    Stat {
        /// File being inspected.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A watch pattern failed to compile.
    #[error("Invalid watch pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// The blocking scan task panicked or was cancelled.
    #[error("Fingerprint scan task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Failure of the discovery pipeline itself.
///
/// Only traversal of the agents and skills trees can fail; missing trees and
/// malformed files are part of a normal, possibly empty, result.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Listing a directory inside a watched tree failed.
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        /// Directory (or entry) being listed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Reasons a cache read or write did not succeed.
///
/// Never returned to callers of [`crate::DiscoveryCache`]; every variant is
/// logged and turned into a miss or an ignored write.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Cache file missing or unreadable, or cache directory not writable.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache document is not valid JSON or does not match the entry schema.
    #[error("Invalid cache document: {0}")]
    Json(#[from] serde_json::Error),

    /// Cache document has no numeric `version` field.
    #[error("Cache document has no version")]
    MissingVersion,

    /// Cache document was written by a different format version.
    #[error("Cache format version {found} (expected {expected})")]
    VersionMismatch {
        /// Version found on disk.
        found: u64,
        /// Version this store reads and writes.
        expected: u32,
    },

    /// Watched files changed since the entry was written.
    #[error("Fingerprint changed since the cache was written")]
    Stale,

    /// The current fingerprint could not be computed.
    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),
}

/// Whether an I/O error means "this path does not exist".
///
/// A path whose parent is a regular file reports `NotADirectory`, which is
/// still absence from the watch set's point of view.
pub(crate) fn is_absent(err: &std::io::Error) -> bool {
    matches!(
        err.kind(),
        std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
    )
}
