//! `---` fenced YAML frontmatter.

/// Splits a Markdown document into its frontmatter and body.
///
/// Returns `None` when the opening fence is never closed. A document without
/// an opening fence has empty frontmatter.
pub(super) fn split(text: &str) -> Option<(&str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let Some(after_open) = strip_fence_line(text) else {
        return Some(("", text));
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = after_open.get(..offset)?;
            let body = after_open.get(offset + line.len()..)?;
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}

/// Strips a leading `---` line, returning the rest.
fn strip_fence_line(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("---")?;
    let rest = rest.trim_start_matches([' ', '\t']);
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}
