//! Markup escaping for untrusted text.

/// Escapes text for safe insertion into markup.
///
/// Every user- or backend-supplied string passes through here before it is
/// materialized: titles, urls, hosts, content snippets, score reasons, the
/// echoed query and error messages alike.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
