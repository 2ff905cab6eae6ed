//! Post-processing of raw model output
//!
//! Models routinely wrap file contents in Markdown code fences even when
//! asked not to. The generator stores and emits the stripped text, so the
//! stripping has to be conservative: only a fence that wraps the whole
//! response is removed, inner fences are left alone.

/// Strip a Markdown code fence wrapping the entire response, if present.
///
/// Handles an optional language tag on the opening fence and trailing
/// whitespace after the closing fence. Responses without a wrapping fence
/// are returned trimmed but otherwise untouched.
#[must_use]
pub fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };

    let Some(stripped) = rest.strip_suffix("```") else {
        return trimmed.to_string();
    };

    // Drop the language tag line (e.g., "tsx") if one follows the opening fence
    let body = match stripped.split_once('\n') {
        Some((first_line, remainder))
            if !first_line.trim().is_empty() && !first_line.trim().contains(' ') =>
        {
            remainder
        }
        _ => stripped,
    };

    body.trim_matches('\n').to_string()
}
