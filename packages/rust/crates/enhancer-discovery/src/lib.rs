//! enhancer-discovery - Cached project context discovery
//!
//! Finds the agents, skills, project facts and override config a prompt
//! enhancer needs, and serves them from a single-entry cache that is only
//! trusted while the fingerprint of the watched files is unchanged.
//!
//! # Architecture
//!
//! ```text
//! enhancer-discovery/src/
//! ├── lib.rs          # Re-exports (this file)
//! ├── error.rs        # FingerprintError, DiscoveryError, CacheError
//! ├── layout.rs       # Watched paths shared by discovery and fingerprinting
//! ├── fingerprint.rs  # stat walk -> sorted identities -> xxh3 hex
//! ├── discover.rs     # Orchestrator over the enhancer-scanner extractors
//! ├── cache.rs        # Versioned, fingerprinted snapshot on disk
//! ├── format.rs       # Prompt-ready text rendering
//! ├── cli.rs          # clap arguments (binary only)
//! └── main.rs         # enhancer-discover binary
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use enhancer_discovery::DiscoveryCache;
//!
//! let context = DiscoveryCache::new(".").load_or_discover().await?;
//! println!("{} agents", context.agents.len());
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod cache;
mod discover;
mod error;
mod fingerprint;
mod format;
mod layout;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use cache::{
    CACHE_FORMAT_VERSION, CacheEntry, CacheSettings, DEFAULT_CACHE_DIR, DEFAULT_CACHE_FILE,
    DiscoveryCache,
};
pub use discover::{apply_exclusions, discover};
pub use error::{CacheError, DiscoveryError, FingerprintError};
pub use fingerprint::{FileIdentity, Fingerprint, MISSING, collect_identities, compute_fingerprint};
pub use format::format_context;
pub use layout::{AGENT_GLOB, CLAUDE_DIR, CONFIG_FILE, MANIFEST_FILE, ProjectLayout, SKILL_FILE};

pub use enhancer_types::{AgentInfo, DiscoveredContext, EnhancerConfig, ProjectInfo, SkillInfo};
