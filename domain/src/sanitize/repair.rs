//! Individual repair passes used by the sanitize pipeline
//!
//! Each pass is a pure string transformation. Passes that change
//! structure (comments, placeholders, trailing commas) track
//! double-quoted string state so content inside string literals is
//! never rewritten.

/// Remove markdown code fence markers, keeping the fenced content.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
}

/// Strip `//` line comments and `/* */` block comments.
pub fn strip_comments(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
                i += 1;
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                // Line comment: drop up to (not including) the newline
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i = (i + 2).min(chars.len());
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// Normalize typographic quotes to their ASCII equivalents.
pub fn normalize_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => '"',
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => '\'',
            _ => c,
        })
        .collect()
}

/// Remove control characters, keeping newlines and tabs for later
/// whitespace collapsing.
pub fn strip_unprintable(text: &str) -> String {
    text.chars()
        .filter(|&c| !c.is_control() || c == '\n' || c == '\t')
        .collect()
}

/// Rewrite schema placeholders the model echoed back instead of values.
///
/// `[...]` becomes `[]`, a bare `...` becomes `0`, and bare type-name
/// tokens (`number`, `string`, `boolean`) become their literal defaults.
/// `true`, `false` and `null` are left alone.
pub fn rewrite_placeholders(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
                i += 1;
            }
            '[' => {
                // `[ ... ]` collapses to an empty array
                let mut j = i + 1;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
                let dots_start = j;
                while j < chars.len() && chars[j] == '.' {
                    j += 1;
                }
                let had_dots = j - dots_start >= 2;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
                if had_dots && chars.get(j) == Some(&']') {
                    out.push_str("[]");
                    i = j + 1;
                } else {
                    out.push('[');
                    i += 1;
                }
            }
            '.' if chars.get(i + 1) == Some(&'.') => {
                // Bare ellipsis in value position
                while i < chars.len() && chars[i] == '.' {
                    i += 1;
                }
                out.push('0');
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                match word.as_str() {
                    "number" => out.push('0'),
                    "string" => out.push_str("\"\""),
                    "boolean" => out.push_str("false"),
                    _ => out.push_str(&word),
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// Collapse whitespace runs and drop trailing commas before `}` / `]`.
pub fn tidy(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
                i += 1;
            }
            c if c.is_whitespace() => {
                while i < chars.len() && chars[i].is_whitespace() {
                    i += 1;
                }
                out.push(' ');
            }
            ',' => {
                let mut j = i + 1;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
                if matches!(chars.get(j), Some('}') | Some(']')) {
                    // Trailing comma: drop it and the whitespace after it
                    i = j;
                } else {
                    out.push(',');
                    i += 1;
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out.trim().to_string()
}
