//! Tests for watch-set fingerprinting against real directory trees.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use enhancer_discovery::{
    DiscoveredContext, DiscoveryCache, FileIdentity, FingerprintError, collect_identities,
    compute_fingerprint, discover,
};
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn write_file(root: &Path, relative: &str, content: &str) -> std::io::Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

fn seed_project(root: &Path) -> std::io::Result<()> {
    write_file(
        root,
        ".claude/agents/core/react.md",
        "---\nname: react-specialist\ndescription: React work.\n---\n",
    )?;
    write_file(
        root,
        ".claude/skills/tdd/SKILL.md",
        "---\nname: tdd\ndescription: Tests first.\n---\n",
    )?;
    write_file(root, "package.json", r#"{"scripts":{"test":"bun test"}}"#)
}

#[tokio::test]
async fn test_fingerprint_is_deterministic() -> TestResult {
    let temp = TempDir::new()?;
    seed_project(temp.path())?;

    let first = compute_fingerprint(temp.path()).await?;
    let second = compute_fingerprint(temp.path()).await?;
    assert_eq!(first, second);
    assert_eq!(first.as_str().len(), 16);
    Ok(())
}

#[tokio::test]
async fn test_empty_project_has_only_missing_singletons() -> TestResult {
    let temp = TempDir::new()?;

    let identities = collect_identities(temp.path()).await?;
    assert_eq!(identities.len(), 2);
    assert!(
        identities
            .iter()
            .all(|identity| matches!(identity, FileIdentity::Missing { .. }))
    );
    assert!(identities[0].to_string().ends_with("package.json:missing"));
    assert!(
        identities[1]
            .to_string()
            .ends_with("enhancer-config.json:missing")
    );
    Ok(())
}

#[tokio::test]
async fn test_watch_set_membership() -> TestResult {
    let temp = TempDir::new()?;
    seed_project(temp.path())?;
    write_file(temp.path(), ".claude/agents/top.md", "top")?;
    write_file(temp.path(), ".claude/agents/a/b/deep.md", "deep")?;
    write_file(temp.path(), ".claude/agents/core/notes.txt", "not watched")?;
    write_file(temp.path(), ".claude/skills/SKILL.md", "too shallow")?;
    write_file(temp.path(), ".claude/skills/a/b/SKILL.md", "too deep")?;
    write_file(temp.path(), ".claude/skills/tdd/README.md", "not watched")?;

    let identities = collect_identities(temp.path()).await?;
    let claude = temp.path().join(".claude");
    let mut watched: Vec<String> = identities
        .iter()
        .filter_map(|identity| identity.path().strip_prefix(&claude).ok())
        .map(|path| path.to_string_lossy().replace('\\', "/"))
        .collect();
    watched.sort();

    assert_eq!(
        watched,
        vec![
            "agents/a/b/deep.md",
            "agents/core/react.md",
            "agents/top.md",
            "enhancer-config.json",
            "skills/tdd/SKILL.md",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_agent_add_and_delete_change_fingerprint() -> TestResult {
    let temp = TempDir::new()?;
    seed_project(temp.path())?;
    let before = compute_fingerprint(temp.path()).await?;

    write_file(temp.path(), ".claude/agents/core/vue.md", "---\nname: vue\n---\n")?;
    let added = compute_fingerprint(temp.path()).await?;
    assert_ne!(before, added);

    fs::remove_file(temp.path().join(".claude/agents/core/vue.md"))?;
    let removed = compute_fingerprint(temp.path()).await?;
    assert_ne!(added, removed);
    assert_eq!(before, removed);
    Ok(())
}

#[tokio::test]
async fn test_rename_changes_fingerprint() -> TestResult {
    let temp = TempDir::new()?;
    seed_project(temp.path())?;
    let before = compute_fingerprint(temp.path()).await?;

    fs::rename(
        temp.path().join(".claude/agents/core/react.md"),
        temp.path().join(".claude/agents/core/react-v2.md"),
    )?;
    assert_ne!(before, compute_fingerprint(temp.path()).await?);
    Ok(())
}

#[tokio::test]
async fn test_size_change_changes_fingerprint() -> TestResult {
    let temp = TempDir::new()?;
    seed_project(temp.path())?;
    let path = temp.path().join(".claude/skills/tdd/SKILL.md");
    let mtime = fs::metadata(&path)?.modified()?;
    let before = compute_fingerprint(temp.path()).await?;

    fs::write(&path, "---\nname: tdd\ndescription: Tests first, always.\n---\n")?;
    fs::File::options().write(true).open(&path)?.set_modified(mtime)?;

    assert_ne!(before, compute_fingerprint(temp.path()).await?);
    Ok(())
}

#[tokio::test]
async fn test_mtime_change_changes_fingerprint() -> TestResult {
    let temp = TempDir::new()?;
    seed_project(temp.path())?;
    let path = temp.path().join(".claude/agents/core/react.md");
    let before = compute_fingerprint(temp.path()).await?;

    let later = SystemTime::now() + Duration::from_secs(60);
    fs::File::options().write(true).open(&path)?.set_modified(later)?;

    assert_ne!(before, compute_fingerprint(temp.path()).await?);
    Ok(())
}

#[tokio::test]
async fn test_singleton_creation_and_deletion_change_fingerprint() -> TestResult {
    let temp = TempDir::new()?;
    let empty = compute_fingerprint(temp.path()).await?;

    write_file(temp.path(), "package.json", "{}")?;
    let with_manifest = compute_fingerprint(temp.path()).await?;
    assert_ne!(empty, with_manifest);

    write_file(temp.path(), ".claude/enhancer-config.json", "{}")?;
    let with_config = compute_fingerprint(temp.path()).await?;
    assert_ne!(with_manifest, with_config);

    fs::remove_file(temp.path().join("package.json"))?;
    fs::remove_file(temp.path().join(".claude/enhancer-config.json"))?;
    assert_eq!(empty, compute_fingerprint(temp.path()).await?);
    Ok(())
}

#[tokio::test]
async fn test_unwatched_changes_are_ignored() -> TestResult {
    let temp = TempDir::new()?;
    seed_project(temp.path())?;
    let before = compute_fingerprint(temp.path()).await?;

    write_file(temp.path(), "README.md", "hello")?;
    write_file(temp.path(), ".claude/settings.json", "{}")?;
    write_file(temp.path(), ".claude/agents/core/notes.txt", "scratch")?;
    write_file(temp.path(), ".claude/skills/tdd/examples.md", "more")?;

    assert_eq!(before, compute_fingerprint(temp.path()).await?);
    Ok(())
}

#[tokio::test]
async fn test_claude_path_as_file_is_absence() -> TestResult {
    let temp = TempDir::new()?;
    let empty = compute_fingerprint(temp.path()).await?;

    fs::write(temp.path().join(".claude"), "not a directory")?;
    assert_eq!(empty, compute_fingerprint(temp.path()).await?);
    Ok(())
}

#[tokio::test]
async fn test_cache_file_is_not_watched() -> TestResult {
    let temp = TempDir::new()?;
    seed_project(temp.path())?;
    let before = compute_fingerprint(temp.path()).await?;

    DiscoveryCache::new(temp.path())
        .write(&DiscoveredContext::default())
        .await;
    assert!(temp.path().join(".claude/.cache/discovery-cache.json").exists());

    assert_eq!(before, compute_fingerprint(temp.path()).await?);
    Ok(())
}

#[tokio::test]
async fn test_watched_files_are_the_files_discovery_reads() -> TestResult {
    let temp = TempDir::new()?;
    let descriptor = |name: &str| format!("---\nname: {name}\ndescription: {name}.\n---\n");
    write_file(temp.path(), ".claude/agents/top.md", &descriptor("top"))?;
    write_file(temp.path(), ".claude/agents/core/react.md", &descriptor("react"))?;
    write_file(temp.path(), ".claude/skills/tdd/SKILL.md", &descriptor("tdd"))?;
    write_file(temp.path(), ".claude/skills/review/SKILL.md", &descriptor("review"))?;
    write_file(temp.path(), ".claude/skills/no-manifest/README.md", "no skill")?;
    write_file(temp.path(), ".claude/skills/loose.md", "not a skill dir")?;
    write_file(temp.path(), ".claude/skills/group/nested/SKILL.md", &descriptor("nested"))?;

    let claude = std::path::absolute(temp.path().join(".claude"))?;
    let mut watched: Vec<String> = collect_identities(temp.path())
        .await?
        .iter()
        .filter(|identity| matches!(identity, FileIdentity::Present { .. }))
        .filter_map(|identity| identity.path().strip_prefix(&claude).ok())
        .map(|path| path.to_string_lossy().replace('\\', "/"))
        .collect();
    watched.sort();

    assert_eq!(
        watched,
        vec![
            "agents/core/react.md",
            "agents/top.md",
            "skills/review/SKILL.md",
            "skills/tdd/SKILL.md",
        ]
    );

    let context = discover(temp.path()).await?;
    assert_eq!(context.agents.len() + context.skills.len(), watched.len());
    Ok(())
}

#[tokio::test]
async fn test_relative_and_absolute_roots_agree() -> TestResult {
    let cwd = std::env::current_dir()?;

    let identities = collect_identities(Path::new(".")).await?;
    assert!(identities.iter().all(|identity| identity.path().is_absolute()));
    assert_eq!(
        compute_fingerprint(Path::new(".")).await?,
        compute_fingerprint(&cwd).await?
    );
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_manifest_is_an_error_not_absence() -> TestResult {
    let temp = TempDir::new()?;
    seed_project(temp.path())?;
    let manifest = temp.path().join("package.json");
    fs::remove_file(&manifest)?;
    std::os::unix::fs::symlink("package.json", &manifest)?;

    let result = compute_fingerprint(temp.path()).await;
    assert!(matches!(
        result,
        Err(FingerprintError::Stat { ref path, .. }) if path.ends_with("package.json")
    ));
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_agent_is_an_error_not_absence() -> TestResult {
    let temp = TempDir::new()?;
    seed_project(temp.path())?;
    std::os::unix::fs::symlink("loop.md", temp.path().join(".claude/agents/core/loop.md"))?;

    let result = compute_fingerprint(temp.path()).await;
    assert!(matches!(result, Err(FingerprintError::Stat { .. })));
    Ok(())
}
