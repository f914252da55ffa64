//! enhancer-scanner - Leaf extractors for project context discovery
//!
//! Pure, stateless parsers that turn file contents into discovery records.
//! None of them perform I/O or return errors for routine "this file is not
//! an agent" cases: they return `Option` and the caller drops the unit.
//!
//! # Architecture
//!
//! ```text
//! enhancer-scanner/src/
//! ├── lib.rs          # Re-exports (this file)
//! ├── frontmatter.rs  # `---` header extraction and field lookup
//! ├── agent.rs        # .claude/agents/**/*.md -> AgentInfo
//! ├── skill.rs        # .claude/skills/*/SKILL.md -> SkillInfo
//! ├── project.rs      # package.json -> ProjectInfo
//! ├── config.rs       # enhancer-config.json -> EnhancerConfig
//! └── summary.rs      # First-sentence description trimming
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod agent;
mod config;
mod frontmatter;
mod project;
mod skill;
mod summary;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use agent::parse_agent_file;
pub use config::{parse_enhancer_config, parse_enhancer_config_str};
pub use frontmatter::{DescriptorFields, descriptor_fields, extract_frontmatter, frontmatter_field};
pub use project::{FRAMEWORKS, parse_package_json, parse_package_json_str};
pub use skill::parse_skill_file;
pub use summary::{MAX_SUMMARY_CHARS, first_sentence};
