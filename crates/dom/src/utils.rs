//! Small helpers shared across the crate

/// Cap text length, marking the cut with an ellipsis
///
/// A `max_len` of 0 disables capping. The cut respects character
/// boundaries, so multi-byte text never splits mid-character.
pub fn cap_text_length(text: &str, max_len: usize) -> String {
    if max_len == 0 || text.chars().count() <= max_len {
        return text.to_string();
    }
    let capped: String = text.chars().take(max_len).collect();
    format!("{}...", capped)
}

/// Case-insensitive string comparison, Unicode-aware
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
