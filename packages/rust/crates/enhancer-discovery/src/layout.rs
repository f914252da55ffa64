//! Watched project layout.
//!
//! The fingerprint engine and the discovery orchestrator both resolve paths
//! through [`ProjectLayout`] so the set of files that is read can never drift
//! from the set of files that is fingerprinted.

use std::path::{Path, PathBuf};

/// Project control directory.
pub const CLAUDE_DIR: &str = ".claude";
/// Agents tree, relative to [`CLAUDE_DIR`].
pub const AGENTS_DIR: &str = "agents";
/// Skills tree, relative to [`CLAUDE_DIR`].
pub const SKILLS_DIR: &str = "skills";
/// Manifest file inside each skill directory.
pub const SKILL_FILE: &str = "SKILL.md";
/// Extension of agent definition files.
pub const AGENT_EXTENSION: &str = ".md";
/// Project manifest, relative to the project root.
pub const MANIFEST_FILE: &str = "package.json";
/// Override config, relative to [`CLAUDE_DIR`].
pub const CONFIG_FILE: &str = "enhancer-config.json";

/// Agent files, relative to [`CLAUDE_DIR`] (any depth).
pub const AGENT_GLOB: &str = "agents/**/*.md";

/// Resolves watched paths for one project root.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Create a layout anchored at `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Project root as given.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/.claude`
    #[must_use]
    pub fn claude_dir(&self) -> PathBuf {
        self.root.join(CLAUDE_DIR)
    }

    /// `<root>/.claude/agents`
    #[must_use]
    pub fn agents_dir(&self) -> PathBuf {
        self.claude_dir().join(AGENTS_DIR)
    }

    /// `<root>/.claude/skills`
    #[must_use]
    pub fn skills_dir(&self) -> PathBuf {
        self.claude_dir().join(SKILLS_DIR)
    }

    /// `<root>/package.json`
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// `<root>/.claude/enhancer-config.json`
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.claude_dir().join(CONFIG_FILE)
    }
}

/// Whether a file name denotes an agent definition.
#[must_use]
pub fn is_agent_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(AGENT_EXTENSION))
}
