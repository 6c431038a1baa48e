//! Markup helpers shared by renderers and widgets.

use serde_json::Value;

/// Escape text for insertion into element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for a single-quoted JS string inside an inline handler.
///
/// The result still needs `escape_html` when placed in an attribute.
pub fn escape_js_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// `onclick` argument: a JS string literal safe inside a double-quoted attribute.
pub fn handler_arg(text: &str) -> String {
    escape_html(&escape_js_string(text))
}

/// Decode the entities produced by `escape_html` (plus `&nbsp;`).
pub fn unescape_html(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

/// Display form of a JSON scalar: strings verbatim, numbers and bools via
/// their JSON text, null as empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escape_html_neutralises_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;y&#39;"
        );
    }

    #[test]
    fn test_handler_arg_survives_quotes() {
        // JS escape first, then attribute escape
        assert_eq!(handler_arg("it's"), "it\\&#39;s");
        assert_eq!(handler_arg("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_unescape_reverses_escape() {
        let original = r#"if (a < b && c > "d") { 'e' }"#;
        assert_eq!(unescape_html(&escape_html(original)), original);
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("90")), "90");
        assert_eq!(display_value(&json!(85)), "85");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&Value::Null), "");
    }
}
