//! CQL escaping.
//!
//! Every string or char literal embedded in rendered CQL goes through one
//! escaping discipline, so fragments stay syntactically valid no matter
//! what the expected value contains:
//!
//! - `\` becomes `\\`, `"` becomes `\"`, `'` becomes `\'`
//! - `\n`, `\r`, `\t` render as those escapes
//! - every other control character renders as `\u{XXXX}`
//!
//! All other characters pass through unchanged.

/// Escape a string for embedding in a double-quoted CQL literal.
#[must_use]
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        push_escaped(c, &mut out);
    }
    out
}

/// Escape a single character for embedding in a single-quoted CQL literal.
///
/// Uses the same rules as [`escape`].
#[must_use]
pub fn escape_char(value: char) -> String {
    let mut out = String::new();
    push_escaped(value, &mut out);
    out
}

fn push_escaped(c: char, out: &mut String) {
    match c {
        '\\' => out.push_str("\\\\"),
        '"' => out.push_str("\\\""),
        '\'' => out.push_str("\\'"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if c.is_control() => {
            out.push_str(&format!("\\u{{{:04x}}}", u32::from(c)));
        }
        c => out.push(c),
    }
}
