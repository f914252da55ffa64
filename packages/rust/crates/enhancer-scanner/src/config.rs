//! `enhancer-config.json` interpretation.

use enhancer_types::EnhancerConfig;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Interpret a parsed override config.
///
/// Missing fields default to empty and unknown fields are ignored. A field of
/// the wrong shape also falls back to empty, so one bad entry does not
/// discard the rest of the file. Returns `None` when `raw` is not an object.
#[must_use]
pub fn parse_enhancer_config(raw: &Value) -> Option<EnhancerConfig> {
    let object = raw.as_object()?;
    Some(EnhancerConfig {
        aliases: field(object, "aliases"),
        default_guards: field(object, "defaultGuards"),
        conventions: field(object, "conventions"),
        exclude_agents: field(object, "excludeAgents"),
    })
}

/// Parse and interpret raw config text.
///
/// Returns `None` when the text is not JSON or not a JSON object.
#[must_use]
pub fn parse_enhancer_config_str(content: &str) -> Option<EnhancerConfig> {
    match serde_json::from_str::<Value>(content) {
        Ok(raw) => parse_enhancer_config(&raw),
        Err(err) => {
            tracing::debug!(error = %err, "enhancer config is not valid JSON");
            None
        }
    }
}

fn field<T: DeserializeOwned + Default>(object: &Map<String, Value>, key: &str) -> T {
    match object.get(key) {
        None | Some(Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|err| {
            tracing::debug!(field = key, error = %err, "ignoring malformed enhancer config field");
            T::default()
        }),
    }
}
