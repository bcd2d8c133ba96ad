//! Extracts the first balanced bracket/brace substring from free text.
//!
//! The model is asked for JSON-only output but routinely wraps it in prose
//! or code fences, so callers locate the JSON value with a small scanner
//! instead of trusting the whole blob. The scanner is string- and
//! escape-aware: brackets inside JSON string literals do not count toward
//! nesting depth.

/// First balanced `[...]` substring of `text`, or `None`.
pub fn extract_json_array(text: &str) -> Option<&str> {
    extract_balanced(text, '[', ']')
}

/// First balanced `{...}` substring of `text`, or `None`.
pub fn extract_json_object(text: &str) -> Option<&str> {
    extract_balanced(text, '{', '}')
}

fn extract_balanced(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
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

        if c == '"' {
            in_string = true;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(&text[start..start + offset + c.len_utf8()]);
            }
        }
    }

    // Opener never closed.
    None
}
