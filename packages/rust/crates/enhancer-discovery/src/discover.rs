//! Discovery orchestrator.
//!
//! Walks the watched layout, feeds each file to its extractor and merges the
//! results into one [`DiscoveredContext`]. Every data source may fail on its
//! own: unparseable files are dropped and missing files contribute nothing.
//! Only a failure to list the agents or skills trees aborts the run.

use std::path::{Path, PathBuf};

use enhancer_scanner::{
    first_sentence, parse_agent_file, parse_enhancer_config_str, parse_package_json_str,
    parse_skill_file,
};
use enhancer_types::{AgentInfo, DiscoveredContext, EnhancerConfig, ProjectInfo, SkillInfo};
use tokio::fs;
use tracing::{debug, info};

use crate::error::{DiscoveryError, is_absent};
use crate::layout::{ProjectLayout, SKILL_FILE, is_agent_file};

/// Discover agents, skills, project facts and config under `project_root`.
///
/// Agents and skills keep directory traversal order. When a config file is
/// present its `excludeAgents` entries are removed from the agent list.
///
/// # Errors
///
/// Returns [`DiscoveryError::ReadDir`] when a directory inside the agents or
/// skills tree exists but cannot be listed.
pub async fn discover(project_root: &Path) -> Result<DiscoveredContext, DiscoveryError> {
    let layout = ProjectLayout::new(project_root);

    let agents = discover_agents(&layout.agents_dir()).await?;
    let skills = discover_skills(&layout.skills_dir()).await?;
    let project = load_project(&layout.manifest_path()).await;
    let config = load_config(&layout.config_path()).await;

    let discovered = agents.len();
    let agents = apply_exclusions(agents, config.as_ref());

    info!(
        root = %project_root.display(),
        agents = agents.len(),
        excluded = discovered - agents.len(),
        skills = skills.len(),
        config = config.is_some(),
        "discovery complete"
    );

    Ok(DiscoveredContext {
        agents,
        skills,
        project,
        config,
    })
}

/// Drop every agent named in the config's exclusion set.
///
/// Without a config the list is returned untouched. Applying the filter more
/// than once has no further effect.
#[must_use]
pub fn apply_exclusions(agents: Vec<AgentInfo>, config: Option<&EnhancerConfig>) -> Vec<AgentInfo> {
    match config {
        None => agents,
        Some(config) => agents
            .into_iter()
            .filter(|agent| !config.excludes(&agent.name))
            .collect(),
    }
}

async fn discover_agents(agents_dir: &Path) -> Result<Vec<AgentInfo>, DiscoveryError> {
    let mut agents = Vec::new();
    for path in list_files(agents_dir).await? {
        if !is_agent_file(&path) {
            continue;
        }
        let Some(content) = read_unit(&path).await else {
            continue;
        };
        let category = path
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        match parse_agent_file(&content, &category) {
            Some(mut agent) => {
                agent.description = first_sentence(&agent.description);
                agents.push(agent);
            }
            None => debug!(path = %path.display(), "skipping file without agent frontmatter"),
        }
    }
    Ok(agents)
}

async fn discover_skills(skills_dir: &Path) -> Result<Vec<SkillInfo>, DiscoveryError> {
    let mut skills = Vec::new();
    let Some(mut entries) = open_dir(skills_dir).await? else {
        return Ok(skills);
    };

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|source| read_dir_error(skills_dir, source))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|source| read_dir_error(&entry.path(), source))?;
        if !file_type.is_dir() {
            continue;
        }

        let skill_md = entry.path().join(SKILL_FILE);
        let Some(content) = read_unit(&skill_md).await else {
            continue;
        };
        match parse_skill_file(&content) {
            Some(mut skill) => {
                skill.description = first_sentence(&skill.description);
                skills.push(skill);
            }
            None => debug!(path = %skill_md.display(), "skipping SKILL.md without frontmatter"),
        }
    }
    Ok(skills)
}

async fn load_project(manifest_path: &Path) -> ProjectInfo {
    let Some(content) = read_unit(manifest_path).await else {
        return ProjectInfo::default();
    };
    parse_package_json_str(&content).unwrap_or_else(|err| {
        debug!(path = %manifest_path.display(), error = %err, "ignoring unparseable manifest");
        ProjectInfo::default()
    })
}

async fn load_config(config_path: &Path) -> Option<EnhancerConfig> {
    let content = read_unit(config_path).await?;
    let config = parse_enhancer_config_str(&content);
    if config.is_none() {
        debug!(path = %config_path.display(), "ignoring malformed enhancer config");
    }
    config
}

/// List every non-directory entry below `root`, depth first.
///
/// Entries are reported in `read_dir` order with each subdirectory's files
/// spliced in where the subdirectory appears. Symlinks are not followed.
async fn list_files(root: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut files = Vec::new();
    let Some(top) = open_dir(root).await? else {
        return Ok(files);
    };

    let mut stack = vec![(root.to_path_buf(), top)];
    while let Some((dir_path, entries)) = stack.last_mut() {
        let next = entries
            .next_entry()
            .await
            .map_err(|source| read_dir_error(dir_path, source))?;
        let Some(entry) = next else {
            stack.pop();
            continue;
        };

        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .map_err(|source| read_dir_error(&path, source))?;
        if file_type.is_dir() {
            if let Some(sub) = open_dir(&path).await? {
                stack.push((path, sub));
            }
        } else {
            files.push(path);
        }
    }
    Ok(files)
}

/// Open a directory, treating absence as "nothing to list".
async fn open_dir(path: &Path) -> Result<Option<fs::ReadDir>, DiscoveryError> {
    match fs::read_dir(path).await {
        Ok(entries) => Ok(Some(entries)),
        Err(err) if is_absent(&err) => Ok(None),
        Err(source) => Err(read_dir_error(path, source)),
    }
}

/// Read one input file; any failure drops the unit.
async fn read_unit(path: &Path) -> Option<String> {
    match fs::read_to_string(path).await {
        Ok(content) => Some(content),
        Err(err) => {
            if !is_absent(&err) {
                debug!(path = %path.display(), error = %err, "skipping unreadable file");
            }
            None
        }
    }
}

fn read_dir_error(path: &Path, source: std::io::Error) -> DiscoveryError {
    DiscoveryError::ReadDir {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(name: &str) -> AgentInfo {
        AgentInfo {
            name: name.to_string(),
            description: "d".to_string(),
            category: "c".to_string(),
        }
    }

    #[test]
    fn test_exclusions_without_config_keep_everything() {
        let agents = vec![agent("a"), agent("b")];
        assert_eq!(apply_exclusions(agents.clone(), None), agents);
    }

    #[test]
    fn test_exclusions_are_exact_and_idempotent() {
        let mut config = EnhancerConfig::default();
        config.exclude_agents.insert("mobile-developer".to_string());

        let agents = vec![
            agent("mobile-developer"),
            agent("Mobile-Developer"),
            agent("react-specialist"),
        ];
        let once = apply_exclusions(agents, Some(&config));
        let twice = apply_exclusions(once.clone(), Some(&config));

        assert_eq!(
            once.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
            vec!["Mobile-Developer", "react-specialist"]
        );
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_config_keeps_duplicates() {
        let agents = vec![agent("dup"), agent("dup")];
        let kept = apply_exclusions(agents, Some(&EnhancerConfig::default()));
        assert_eq!(kept.len(), 2);
    }
}
