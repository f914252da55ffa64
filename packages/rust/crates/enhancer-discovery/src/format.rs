//! Plain-text rendering of a discovery snapshot for prompt injection.

use enhancer_types::{AgentInfo, DiscoveredContext, EnhancerConfig, ProjectInfo, SkillInfo};

/// Render `context` as a prompt block.
///
/// Sections are separated by a blank line. The custom configuration section
/// only appears when a config file was loaded.
#[must_use]
pub fn format_context(context: &DiscoveredContext) -> String {
    let mut sections = vec![
        agents_section(&context.agents),
        skills_section(&context.skills),
        project_section(&context.project),
    ];
    if let Some(config) = &context.config {
        sections.push(config_section(config));
    }
    sections.join("\n\n")
}

fn agents_section(agents: &[AgentInfo]) -> String {
    if agents.is_empty() {
        return "AVAILABLE AGENTS: No agents discovered.".to_string();
    }

    // Categories in first-seen order.
    let mut groups: Vec<(&str, Vec<&AgentInfo>)> = Vec::new();
    for agent in agents {
        match groups.iter_mut().find(|(category, _)| *category == agent.category) {
            Some((_, members)) => members.push(agent),
            None => groups.push((agent.category.as_str(), vec![agent])),
        }
    }

    let mut lines = vec!["AVAILABLE AGENTS:".to_string()];
    for (category, members) in groups {
        lines.push(format!("  [{category}]"));
        lines.extend(
            members
                .iter()
                .map(|agent| format!("    @{} — {}", agent.name, agent.description)),
        );
    }
    lines.join("\n")
}

fn skills_section(skills: &[SkillInfo]) -> String {
    if skills.is_empty() {
        return "AVAILABLE SKILLS: No skills discovered.".to_string();
    }
    let mut lines = vec!["AVAILABLE SKILLS:".to_string()];
    lines.extend(
        skills
            .iter()
            .map(|skill| format!("  /{} — {}", skill.name, skill.description)),
    );
    lines.join("\n")
}

fn project_section(project: &ProjectInfo) -> String {
    let facts = [
        ("Framework", &project.framework),
        ("Language", &project.language),
        ("Test command", &project.test_command),
        ("Lint command", &project.lint_command),
    ];

    let mut lines = vec!["PROJECT CONTEXT:".to_string()];
    for (label, value) in facts {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            lines.push(format!("  {label}: {value}"));
        }
    }
    if lines.len() == 1 {
        lines.push("  No project info detected.".to_string());
    }
    lines.join("\n")
}

fn config_section(config: &EnhancerConfig) -> String {
    let mut lines = vec!["CUSTOM CONFIGURATION:".to_string()];
    if !config.aliases.is_empty() {
        lines.push("  Aliases:".to_string());
        for (alias, target) in &config.aliases {
            lines.push(format!("    {alias} → {target}"));
        }
    }
    for (heading, items) in [
        ("Default guards", &config.default_guards),
        ("Conventions", &config.conventions),
    ] {
        if items.is_empty() {
            continue;
        }
        lines.push(format!("  {heading}:"));
        lines.extend(items.iter().map(|item| format!("    - {item}")));
    }
    lines.join("\n")
}
