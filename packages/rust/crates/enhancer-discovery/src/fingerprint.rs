//! Watch-set fingerprinting.
//!
//! A fingerprint summarizes the on-disk identity of every file that discovery
//! reads. It is what decides whether a cached snapshot may be served.
//!
//! # Algorithm
//!
//! ```text
//! .claude/agents/**/*.md ──────┐
//! .claude/skills/<dir>/SKILL.md ┼─ stat ─→ FileIdentity ─→ "<path>:<mtime_ms>:<size>"
//! package.json ────────────────┤                           or "<path>:missing"
//! .claude/enhancer-config.json ┘
//!          ↓
//! sort (lexicographic) → join("\n") → xxh3_64 → 16 hex digits
//! ```
//!
//! The two singleton files always contribute an entry. When they are absent
//! the entry is the `missing` sentinel, so creating or deleting them changes
//! the fingerprint even though no globbed file changed.
//!
//! Skill manifests are stat'ed under the exact name discovery opens rather
//! than matched against directory listings, so both sides resolve the name
//! through the filesystem in the same way (case-insensitive volumes included).
//! Paths are made absolute first: `.` and its absolute spelling fingerprint
//! identically.

use std::fmt;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};
use xxhash_rust::xxh3;

use crate::error::{FingerprintError, is_absent};
use crate::layout::{AGENT_GLOB, ProjectLayout, SKILL_FILE};

/// Sentinel recorded for a watched file that does not exist.
pub const MISSING: &str = "missing";

/// On-disk identity of one watched path at scan time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileIdentity {
    /// The file exists.
    Present {
        /// Path as resolved from the project root.
        path: PathBuf,
        /// Modification time.
        modified: SystemTime,
        /// Size in bytes.
        size: u64,
    },
    /// The file does not exist.
    Missing {
        /// Path as resolved from the project root.
        path: PathBuf,
    },
}

impl FileIdentity {
    fn from_metadata(path: &Path, metadata: &Metadata) -> std::io::Result<Self> {
        Ok(Self::Present {
            path: path.to_path_buf(),
            modified: metadata.modified()?,
            size: metadata.len(),
        })
    }

    /// The path this identity describes.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Present { path, .. } | Self::Missing { path } => path,
        }
    }
}

/// Canonical form hashed into the fingerprint.
///
/// The modification time is printed as a signed offset from the Unix epoch
/// in milliseconds, with a six digit sub-millisecond fraction.
impl fmt::Display for FileIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present {
                path,
                modified,
                size,
            } => {
                let (sign, offset) = match modified.duration_since(UNIX_EPOCH) {
                    Ok(offset) => ("", offset),
                    Err(before) => ("-", before.duration()),
                };
                write!(
                    f,
                    "{}:{sign}{}.{:06}:{}",
                    path.display(),
                    offset.as_millis(),
                    offset.subsec_nanos() % 1_000_000,
                    size
                )
            }
            Self::Missing { path } => write!(f, "{}:{MISSING}", path.display()),
        }
    }
}

/// Deterministic summary of a watch set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Reduce a set of identities to a fingerprint.
    ///
    /// Input order does not matter: the canonical strings are sorted first.
    #[must_use]
    pub fn from_identities(identities: &[FileIdentity]) -> Self {
        let mut lines: Vec<String> = identities.iter().map(ToString::to_string).collect();
        lines.sort();
        let joined = lines.join("\n");
        Self(format!("{:016x}", xxh3::xxh3_64(joined.as_bytes())))
    }

    /// Hex representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the fingerprint of a project's watch set.
///
/// # Errors
///
/// Returns [`FingerprintError`] when a watched path exists but cannot be
/// inspected. Callers must then treat any cached snapshot as unverifiable.
pub async fn compute_fingerprint(project_root: &Path) -> Result<Fingerprint, FingerprintError> {
    let identities = collect_identities(project_root).await?;
    let fingerprint = Fingerprint::from_identities(&identities);
    tracing::debug!(
        root = %project_root.display(),
        entries = identities.len(),
        fingerprint = %fingerprint,
        "computed watch-set fingerprint"
    );
    Ok(fingerprint)
}

/// Collect the identity of every watched path, in scan order.
///
/// The stat walk runs on tokio's blocking pool.
///
/// # Errors
///
/// See [`compute_fingerprint`].
pub async fn collect_identities(
    project_root: &Path,
) -> Result<Vec<FileIdentity>, FingerprintError> {
    let root = std::path::absolute(project_root).map_err(|source| FingerprintError::Resolve {
        path: project_root.to_path_buf(),
        source,
    })?;
    let layout = ProjectLayout::new(root);
    tokio::task::spawn_blocking(move || scan_watch_set(&layout)).await?
}

fn scan_watch_set(layout: &ProjectLayout) -> Result<Vec<FileIdentity>, FingerprintError> {
    let mut identities = Vec::new();

    scan_agents(layout, &agent_pattern()?, &mut identities)?;
    scan_skills(&layout.skills_dir(), &mut identities)?;

    for singleton in [layout.manifest_path(), layout.config_path()] {
        identities.push(stat_identity(&singleton)?);
    }

    Ok(identities)
}

/// Compile the agent glob. `**` spans any depth, `*` stays within one name.
fn agent_pattern() -> Result<GlobSet, globset::Error> {
    let mut builder = GlobSetBuilder::new();
    builder.add(GlobBuilder::new(AGENT_GLOB).literal_separator(true).build()?);
    builder.build()
}

/// Record every file under the agents tree that matches the agent glob.
///
/// Symlinked directories are not descended, mirroring how discovery lists
/// directories.
fn scan_agents(
    layout: &ProjectLayout,
    pattern: &GlobSet,
    identities: &mut Vec<FileIdentity>,
) -> Result<(), FingerprintError> {
    let claude_dir = layout.claude_dir();
    let agents_dir = layout.agents_dir();
    for entry in WalkDir::new(&agents_dir).follow_links(false) {
        let Some(entry) = walk_entry(&agents_dir, entry)? else {
            continue;
        };
        if entry.file_type().is_dir() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(&claude_dir) else {
            continue;
        };
        if pattern.is_match(relative) {
            identities.push(stat_identity(entry.path())?);
        }
    }
    Ok(())
}

/// Stat `<dir>/SKILL.md` for every immediate subdirectory of the skills tree.
///
/// These are the paths discovery opens. Directories without a manifest
/// contribute nothing.
fn scan_skills(
    skills_dir: &Path,
    identities: &mut Vec<FileIdentity>,
) -> Result<(), FingerprintError> {
    let walk = WalkDir::new(skills_dir)
        .follow_links(false)
        .min_depth(1)
        .max_depth(1);
    for entry in walk {
        let Some(entry) = walk_entry(skills_dir, entry)? else {
            continue;
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        match stat_identity(&entry.path().join(SKILL_FILE))? {
            FileIdentity::Missing { .. } => {}
            present => identities.push(present),
        }
    }
    Ok(())
}

/// Unwrap one walk result. A missing branch root yields nothing.
fn walk_entry(
    branch: &Path,
    entry: walkdir::Result<DirEntry>,
) -> Result<Option<DirEntry>, FingerprintError> {
    match entry {
        Ok(entry) => Ok(Some(entry)),
        Err(err) if err.depth() == 0 && err.io_error().is_some_and(is_absent) => Ok(None),
        Err(source) => Err(FingerprintError::Walk {
            path: branch.to_path_buf(),
            source,
        }),
    }
}

/// Stat one path, following symlinks.
///
/// Absence becomes the [`FileIdentity::Missing`] sentinel. Any other failure
/// propagates instead of being mistaken for absence.
fn stat_identity(path: &Path) -> Result<FileIdentity, FingerprintError> {
    let stat_error = |source| FingerprintError::Stat {
        path: path.to_path_buf(),
        source,
    };
    match std::fs::metadata(path) {
        Ok(metadata) => FileIdentity::from_metadata(path, &metadata).map_err(stat_error),
        Err(err) if is_absent(&err) => Ok(FileIdentity::Missing {
            path: path.to_path_buf(),
        }),
        Err(err) => Err(stat_error(err)),
    }
}
