//! Output sanitization for submitted text

/// Trim surrounding whitespace and escape HTML-significant characters.
///
/// Both quote styles are escaped so the result is safe inside single- or
/// double-quoted attributes.
pub fn sanitize(input: &str) -> String {
    escape_html(input.trim())
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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
