//! Character-bounded text helpers shared by the user-state entities.

/// Return `value` limited to at most `max` Unicode scalar values.
///
/// Truncation never splits a code point, so the result is always valid UTF-8.
///
/// # Examples
/// ```
/// use marquee::domain::truncate_chars;
///
/// assert_eq!(truncate_chars("Inception", 4), "Ince");
/// assert_eq!(truncate_chars("été", 2), "ét");
/// ```
pub fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((end, _)) => value.get(..end).unwrap_or(value).to_owned(),
        None => value.to_owned(),
    }
}

/// Truncate an optional value, keeping `None` as-is.
pub fn truncate_optional(value: Option<&str>, max: usize) -> Option<String> {
    value.map(|raw| truncate_chars(raw, max))
}
