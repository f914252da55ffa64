//! `SKILL.md` parsing.

use enhancer_types::SkillInfo;

use crate::frontmatter::descriptor_fields;

/// Parse the contents of a `SKILL.md` file.
///
/// Returns `None` when the header is missing or incomplete.
#[must_use]
pub fn parse_skill_file(content: &str) -> Option<SkillInfo> {
    let fields = descriptor_fields(content)?;
    Some(SkillInfo {
        name: fields.name,
        description: fields.description,
    })
}
