//! Locating a JSON object inside free-form model output.

/// Returns the first balanced `{...}` span in `text`.
///
/// Brace depth is tracked outside of JSON string literals, so nested objects and
/// braces inside strings do not end the span early. A `{` that never closes is
/// skipped and scanning resumes at the next `{`.
pub fn find_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        if let Some(end) = balanced_end(bytes, start) {
            return Some(&text[start..=end]);
        }
        search_from = start + 1;
    }

    None
}

/// Index of the `}` closing the `{` at `start`, if any.
fn balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}
