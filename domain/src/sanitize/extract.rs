//! Balanced-object extraction

/// Extract the first balanced `{...}` substring.
///
/// Scans from the first `{`, tracking brace depth and double-quoted
/// string state (including escapes), and returns the substring up to the
/// matching close brace. Returns `None` when no `{` exists or the object
/// never closes.
pub fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + c.len_utf8()]);
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
    fn test_extracts_first_object() {
        assert_eq!(
            first_balanced_object("before {\"a\": 1} after {\"b\": 2}"),
            Some("{\"a\": 1}")
        );
    }

    #[test]
    fn test_nested_objects() {
        assert_eq!(
            first_balanced_object("x {\"a\": {\"b\": 2}} y"),
            Some("{\"a\": {\"b\": 2}}")
        );
    }

    #[test]
    fn test_brace_inside_string_is_ignored() {
        assert_eq!(
            first_balanced_object(r#"{"s": "a } b"}"#),
            Some(r#"{"s": "a } b"}"#)
        );
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        assert_eq!(
            first_balanced_object(r#"{"s": "say \"}\" loud"}"#),
            Some(r#"{"s": "say \"}\" loud"}"#)
        );
    }

    #[test]
    fn test_no_object_returns_none() {
        assert_eq!(first_balanced_object("no json here"), None);
        assert_eq!(first_balanced_object("{\"open\": 1"), None);
    }
}
