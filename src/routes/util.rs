//! Shared request parsing and fragment helpers for route handlers.

use std::str::FromStr;

/// Parse URL-encoded form body into key-value pairs.
/// Handles `key=value&key2=value2` format (from HTMX POST bodies).
pub fn parse_form_body(body: &str) -> Vec<(String, String)> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, val) = pair.split_once('=').unwrap_or((pair, ""));
            (percent_decode(key), percent_decode(val))
        })
        .collect()
}

/// Parse a query string into key-value pairs.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    parse_form_body(query.strip_prefix('?').unwrap_or(query))
}

/// Percent-decode a URL-encoded value. Decoded bytes are reassembled as
/// UTF-8, so multi-byte characters survive.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hi = bytes.get(i + 1).copied().and_then(hex_val);
                let lo = bytes.get(i + 2).copied().and_then(hex_val);
                if let (Some(hi), Some(lo)) = (hi, lo) {
                    out.push(hi << 4 | lo);
                    i += 3;
                    continue;
                }
                out.push(b'%');
            }
            b'+' => out.push(b' '),
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Helper to get a value by key from a list of key-value pairs.
pub fn get_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Get and parse a value; missing or malformed values yield `None`.
pub fn parse_param<T: FromStr>(params: &[(String, String)], key: &str) -> Option<T> {
    get_param(params, key).and_then(|v| v.trim().parse().ok())
}

/// Escape text for interpolation into HTML.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// Quote a string as a JavaScript literal that is safe inside `<script>`.
pub fn js_string(input: &str) -> String {
    serde_json::to_string(input)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

/// Red inline message used for every rejected request.
pub fn error_fragment(message: impl std::fmt::Display) -> String {
    format!(
        r#"<span class="text-red-500">{}</span>"#,
        escape_html(&message.to_string())
    )
}

/// Empty element that fires `values` at `path` once `delay_ms` has passed.
/// Stands in for the page's suspense and payment timers.
pub fn delayed_post(path: &str, values: &str, target: &str, delay_ms: u32) -> String {
    format!(
        r##"<div hx-post="{path}" hx-vals='{values}' hx-trigger="load delay:{delay_ms}ms" hx-target="{target}" hx-swap="innerHTML"></div>"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_form_body_works() {
        let pairs = parse_form_body("action=select&key=2&flag");
        assert_eq!(pairs.len(), 3);
        assert_eq!(get_param(&pairs, "action"), Some("select"));
        assert_eq!(parse_param::<u8>(&pairs, "key"), Some(2));
        assert_eq!(get_param(&pairs, "flag"), Some(""));
    }

    #[test]
    fn parse_form_body_empty() {
        assert!(parse_form_body("").is_empty());
    }

    #[test]
    fn parse_query_strips_prefix() {
        let pairs = parse_query("?id=3");
        assert_eq!(get_param(&pairs, "id"), Some("3"));
    }

    #[test]
    fn percent_decode_handles_utf8_and_plus() {
        assert_eq!(percent_decode("from+2500%E2%82%BD"), "from 2500₽");
        assert_eq!(percent_decode("100%25"), "100%");
    }

    #[test]
    fn percent_decode_keeps_broken_escapes() {
        assert_eq!(percent_decode("50%"), "50%");
        assert_eq!(percent_decode("%zz"), "%zz");
    }

    #[test]
    fn malformed_param_is_none() {
        let pairs = parse_form_body("key=gold");
        assert_eq!(parse_param::<u8>(&pairs, "key"), None);
        assert_eq!(parse_param::<u8>(&pairs, "missing"), None);
    }

    #[test]
    fn escape_html_escapes_markup() {
        assert_eq!(escape_html(r#"<b>"Tom" & 'Jerry'</b>"#), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
    }

    #[test]
    fn js_string_cannot_close_script() {
        let lit = js_string(r#"{"a":"</script>"}"#);
        assert!(!lit.contains("</script>"));
        assert!(lit.starts_with('"'));
    }
}
