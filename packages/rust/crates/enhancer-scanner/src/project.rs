//! `package.json` interpretation.
//!
//! Reduces a Node manifest to the handful of facts the prompt enhancer
//! needs: test/lint commands, the primary framework and the language.

use enhancer_types::ProjectInfo;
use serde_json::{Map, Value};

/// Known frameworks, checked in order; the first declared one wins.
pub const FRAMEWORKS: [&str; 11] = [
    "next", "react", "vue", "angular", "svelte", "express", "fastify", "nestjs", "nuxt", "remix",
    "astro",
];

/// Interpret a parsed manifest.
///
/// `dependencies` and `devDependencies` are merged (the latter wins on
/// collisions) before framework and language detection. A manifest that is
/// not an object yields all-null facts.
#[must_use]
pub fn parse_package_json(manifest: &Value) -> ProjectInfo {
    let script = |name: &str| {
        manifest
            .get("scripts")
            .and_then(|scripts| scripts.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let mut deps = Map::new();
    for section in ["dependencies", "devDependencies"] {
        if let Some(Value::Object(entries)) = manifest.get(section) {
            deps.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }
    let declared = |name: &str| deps.get(name).is_some_and(is_truthy);

    ProjectInfo {
        test_command: script("test"),
        lint_command: script("lint"),
        framework: FRAMEWORKS
            .iter()
            .find(|&&fw| declared(fw))
            .map(ToString::to_string),
        language: declared("typescript").then(|| "typescript".to_string()),
    }
}

/// Parse and interpret raw `package.json` text.
///
/// # Errors
///
/// Returns the JSON error when `content` is not valid JSON.
pub fn parse_package_json_str(content: &str) -> Result<ProjectInfo, serde_json::Error> {
    let manifest: Value = serde_json::from_str(content)?;
    Ok(parse_package_json(&manifest))
}

/// JavaScript truthiness, which is what a dependency map lookup tests.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
