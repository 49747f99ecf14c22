// Shared prompt constants and prompt-building utilities.
// Each service that needs model calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment for plain-text fallback calls where JSON shape is
/// not required — one item per line, no numbering, no markdown.
pub const PLAIN_LIST_SYSTEM: &str = "You are a concise assistant. \
    Respond with plain text only. \
    When asked for a list, put exactly one item per line \
    with no numbering, bullets, or markdown.";

/// Truncates a string to at most `max_chars` characters on a char boundary.
/// Used to shrink long CV text for simplified retry prompts.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
