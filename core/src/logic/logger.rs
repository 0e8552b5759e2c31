// Logging helpers for parser tracing
//
// The crate only emits through the `log` facade; installing a logger is the
// embedding application's responsibility.

/// Take the first `max_chars` characters of a string for log output.
///
/// Debug logging slices arbitrary UTF-8 input, so truncation has to happen on
/// character boundaries, never on bytes.
///
/// # Examples
/// ```
/// use mmark_core::logic::logger::safe_preview;
///
/// let text = "some *emphasised* text";
/// let preview = safe_preview(text, 10);
/// assert_eq!(preview, "some *emph");
/// ```
#[inline]
pub fn safe_preview(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_safe_preview_short_input() {
        assert_eq!(safe_preview("abc", 10), "abc");
    }

    #[test]
    fn smoke_test_safe_preview_truncates_on_char_boundary() {
        assert_eq!(safe_preview("héllo wörld", 4), "héll");
    }
}
