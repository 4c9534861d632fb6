//! HTML escaping
//!
//! Escapes the five characters that matter in HTML text and quoted
//! attribute values. Single quotes become `&#039;`.

/// Escape `&`, `<`, `>`, `"` and `'` for safe inclusion in HTML
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
