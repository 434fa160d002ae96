//! HTML escaping for table and chart export

/// Escape text for use inside HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Make JSON text safe to inline inside a `<script>` element
///
/// Only `</` can terminate the element early; `<\/` is the same string to a
/// JavaScript parser.
pub fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}
