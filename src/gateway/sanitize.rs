//! Tolerates the markdown fences models like to wrap JSON in.

const FENCE: &str = "```";

/// Strips one leading and one trailing code fence, if present.
///
/// The opening fence may carry a language tag (`json`, `JSON`, ...), which
/// runs to the end of the first line. When the whole reply sits on one line,
/// only a leading alphabetic tag is removed. Text that does not start with a
/// fence comes back trimmed and otherwise unchanged.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };

    let body = match rest.find('\n') {
        Some(newline) if is_language_tag(&rest[..newline]) => &rest[newline + 1..],
        Some(_) => rest,
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    let body = body.trim_end();
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

fn is_language_tag(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '+')
}
