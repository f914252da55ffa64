//! enhancer-types - Shared data model for project context discovery
//!
//! This crate holds the records produced by discovery and persisted by the
//! discovery cache. Field names serialize in camelCase so the JSON written to
//! stdout and to `.claude/.cache/discovery-cache.json` matches the files the
//! scanner reads (`package.json`, `enhancer-config.json`).
//!
//! # Schema Registry
//! Types derive `schemars::JsonSchema`, and [`get_schema_json`] exposes the
//! schema of every registered type for hook scripts that consume the CLI
//! output.

#![allow(clippy::doc_markdown)]

use std::collections::BTreeSet;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An agent definition discovered under `.claude/agents/<category>/*.md`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AgentInfo {
    /// Agent name from the `name` frontmatter field.
    pub name: String,
    /// Agent description (first sentence only after discovery).
    pub description: String,
    /// Name of the directory that directly contains the agent file.
    pub category: String,
}

/// A skill discovered at `.claude/skills/<dir>/SKILL.md`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SkillInfo {
    /// Skill name from the `name` frontmatter field.
    pub name: String,
    /// Skill description (first sentence only after discovery).
    pub description: String,
}

/// Project facts derived from `package.json`.
///
/// Every field serializes as `null` when unknown; the record itself is
/// always present in a [`DiscoveredContext`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    /// `scripts.test`
    #[serde(default)]
    pub test_command: Option<String>,
    /// `scripts.lint`
    #[serde(default)]
    pub lint_command: Option<String>,
    /// First known framework found among the dependencies.
    #[serde(default)]
    pub framework: Option<String>,
    /// `"typescript"` when a `typescript` dependency is declared.
    #[serde(default)]
    pub language: Option<String>,
}

impl ProjectInfo {
    /// Returns `true` when no project fact was detected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.test_command.is_none()
            && self.lint_command.is_none()
            && self.framework.is_none()
            && self.language.is_none()
    }
}

/// User overrides loaded from `.claude/enhancer-config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct EnhancerConfig {
    /// Alias name to target name (e.g. `@FE` -> `@react-specialist`), in
    /// file order.
    pub aliases: IndexMap<String, String>,
    /// Guards appended to every enhanced prompt.
    pub default_guards: Vec<String>,
    /// Free-form project conventions.
    pub conventions: Vec<String>,
    /// Agent names removed from discovery results.
    pub exclude_agents: BTreeSet<String>,
}

impl EnhancerConfig {
    /// Whether `agent_name` is listed in `excludeAgents` (exact, case-sensitive).
    #[must_use]
    pub fn excludes(&self, agent_name: &str) -> bool {
        self.exclude_agents.contains(agent_name)
    }
}

/// The full discovery snapshot for one project root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiscoveredContext {
    /// Agents in directory traversal order.
    pub agents: Vec<AgentInfo>,
    /// Skills in directory traversal order.
    pub skills: Vec<SkillInfo>,
    /// Project facts; all-null when there is no manifest.
    pub project: ProjectInfo,
    /// Override config; omitted from JSON when the file is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<EnhancerConfig>,
}

// =============================================================================
// Schema Registry
// =============================================================================

/// Schema generation error
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The requested type is not registered.
    #[error("Unknown type: {0}")]
    UnknownType(String),
    /// The schema could not be rendered as JSON.
    #[error("Schema serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Get JSON Schema for a registered type.
///
/// # Errors
/// Returns `SchemaError::UnknownType` if the type name is not registered.
pub fn get_schema_json(type_name: &str) -> Result<String, SchemaError> {
    let schema = match type_name {
        "DiscoveredContext" => schemars::schema_for!(DiscoveredContext),
        "AgentInfo" => schemars::schema_for!(AgentInfo),
        "SkillInfo" => schemars::schema_for!(SkillInfo),
        "ProjectInfo" => schemars::schema_for!(ProjectInfo),
        "EnhancerConfig" => schemars::schema_for!(EnhancerConfig),
        _ => return Err(SchemaError::UnknownType(type_name.to_string())),
    };
    Ok(serde_json::to_string_pretty(&schema)?)
}

/// Get list of all registered type names.
#[must_use]
pub fn get_registered_types() -> Vec<&'static str> {
    vec![
        "DiscoveredContext",
        "AgentInfo",
        "SkillInfo",
        "ProjectInfo",
        "EnhancerConfig",
    ]
}
