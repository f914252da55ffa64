//! Agent definition parsing.

use enhancer_types::AgentInfo;

use crate::frontmatter::descriptor_fields;

/// Parse an agent markdown file.
///
/// `category` is the name of the directory holding the file. Returns `None`
/// when the header is missing or lacks `name` or `description`; such files
/// are simply not agents.
#[must_use]
pub fn parse_agent_file(content: &str, category: &str) -> Option<AgentInfo> {
    let fields = descriptor_fields(content)?;
    Some(AgentInfo {
        name: fields.name,
        description: fields.description,
        category: category.to_string(),
    })
}
