//! Frontmatter header extraction.
//!
//! Agent and skill documents start with a `---` delimited header. Only flat
//! `key: value` lines are read; real-world agent descriptions routinely hold
//! `: ` sequences and escaped newlines that a YAML parser rejects, so the
//! header is scanned line by line instead.

const DELIMITER: &str = "---";

/// Extract the raw header block from a markdown document.
///
/// The opening delimiter must be the first line (a UTF-8 BOM is skipped) and
/// the closing delimiter must sit on its own line. Returns `None` when either
/// is missing.
///
/// # Examples
///
/// ```
/// use enhancer_scanner::extract_frontmatter;
///
/// let header = extract_frontmatter("---\nname: debugger\n---\nBody");
/// assert_eq!(header, Some("name: debugger\n"));
/// ```
#[must_use]
pub fn extract_frontmatter(content: &str) -> Option<&str> {
    let content = content.trim_start_matches('\u{feff}');
    let mut lines = content.split_inclusive('\n');

    let opening = lines.next()?;
    if opening.trim_end() != DELIMITER {
        return None;
    }

    let start = opening.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Some(&content[start..offset]);
        }
        offset += line.len();
    }
    None
}

/// Look up a single-line `key: value` field in a header block.
///
/// The first line starting with `key:` wins. Matching single or double
/// quotes around the value are removed. Empty values count as missing.
#[must_use]
pub fn frontmatter_field(header: &str, key: &str) -> Option<String> {
    header.lines().find_map(|line| {
        let value = line.strip_prefix(key)?.strip_prefix(':')?;
        let value = unquote(value.trim()).trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Name and description shared by agent and skill headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorFields {
    /// `name` field.
    pub name: String,
    /// `description` field.
    pub description: String,
}

/// Extract the two required descriptor fields from a document.
///
/// Returns `None` when the document has no header or lacks either field.
#[must_use]
pub fn descriptor_fields(content: &str) -> Option<DescriptorFields> {
    let header = extract_frontmatter(content)?;
    Some(DescriptorFields {
        name: frontmatter_field(header, "name")?,
        description: frontmatter_field(header, "description")?,
    })
}

fn unquote(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if value.len() >= 2
            && let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
