//! Text helpers for safe UTF-8 snippet derivation
//!
//! Naive byte slicing (`&s[..n]`) panics inside a multi-byte UTF-8 character,
//! so truncation here counts characters and cuts at a boundary.

/// Truncate a string to at most `max_chars` characters
///
/// Returns a borrowed prefix ending on a character boundary; no ellipsis is
/// appended.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Derive a short excerpt from note content
///
/// Takes the first `max_chars` characters, collapses embedded newlines to
/// spaces, and trims surrounding whitespace.
pub fn excerpt(content: &str, max_chars: usize) -> String {
    truncate_chars(content, max_chars)
        .replace(['\r', '\n'], " ")
        .trim()
        .to_string()
}
