/// Find the bracketed array literal that follows `key:` in free text.
///
/// Returns the text from the opening `[` to its matching `]` inclusive, or
/// `None` when the key is absent, no `[` follows it, or the literal never
/// closes. Callers treat `None` as "no data", not as an error.
pub fn find_array_literal<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let key_pos = text.find(&format!("{}:", key))?;
    let start = key_pos + text[key_pos..].find('[')?;
    let end = bracket_span_end(text, start)?;
    Some(&text[start..=end])
}

/// Scan from `start` (which should be a `[`) to the `]` that brings bracket
/// depth back to zero, skipping over single- or double-quoted strings.
///
/// Inside a string a backslash consumes the following character. Brackets
/// inside strings do not count. Returns the byte offset of the closing `]`.
pub fn bracket_span_end(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth: usize = 0;
    let mut quote: Option<u8> = None;
    let mut escape_next = false;

    for (idx, &ch) in bytes.iter().enumerate().skip(start) {
        if let Some(q) = quote {
            if escape_next {
                escape_next = false;
            } else if ch == b'\\' {
                escape_next = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }

        match ch {
            b'"' | b'\'' => quote = Some(ch),
            b'[' => depth += 1,
            b']' => {
                // A stray `]` before any `[` can't close anything
                if depth == 0 {
                    return None;
                }
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_array() {
        let text = "var x = { labels: ['01.01', '02.01'], other: 1 };";
        assert_eq!(find_array_literal(text, "labels"), Some("['01.01', '02.01']"));
    }

    #[test]
    fn test_nested_arrays() {
        let text = "datasets: [{data: [1, [2, 3]]}, {data: []}] tail]";
        assert_eq!(
            find_array_literal(text, "datasets"),
            Some("[{data: [1, [2, 3]]}, {data: []}]")
        );
    }

    #[test]
    fn test_brackets_inside_strings_ignored() {
        let text = r#"datasets: [{label: 'a ] b', x: "[[["}] rest"#;
        assert_eq!(
            find_array_literal(text, "datasets"),
            Some(r#"[{label: 'a ] b', x: "[[["}]"#)
        );
    }

    #[test]
    fn test_escaped_quote_stays_in_string() {
        let text = r"labels: ['it\'s ]', 'b'] after";
        assert_eq!(find_array_literal(text, "labels"), Some(r"['it\'s ]', 'b']"));
    }

    #[test]
    fn test_other_quote_kind_does_not_close_string() {
        let text = r#"labels: ['say "hi" ]', "don't ]"]"#;
        assert_eq!(find_array_literal(text, "labels"), Some(r#"['say "hi" ]', "don't ]"]"#));
    }

    #[test]
    fn test_first_key_occurrence_wins() {
        let text = "labels: [1] labels: [2]";
        assert_eq!(find_array_literal(text, "labels"), Some("[1]"));
    }

    #[test]
    fn test_missing_key() {
        assert_eq!(find_array_literal("nothing here", "datasets"), None);
    }

    #[test]
    fn test_key_without_bracket() {
        assert_eq!(find_array_literal("datasets: null", "datasets"), None);
    }

    #[test]
    fn test_unterminated_literal() {
        assert_eq!(find_array_literal("datasets: [{data: [1, 2]", "datasets"), None);
        assert_eq!(find_array_literal("datasets: ['open string]", "datasets"), None);
    }

    #[test]
    fn test_span_end_from_offset() {
        let text = "ab[c[d]e]f";
        assert_eq!(bracket_span_end(text, 2), Some(8));
        assert_eq!(bracket_span_end(text, 4), Some(6));
    }

    #[test]
    fn test_non_ascii_text_around_literal() {
        let text = "Lovljenje žoge → labels: ['Moč', 'ž]']; konec";
        assert_eq!(find_array_literal(text, "labels"), Some("['Moč', 'ž]']"));
    }
}
