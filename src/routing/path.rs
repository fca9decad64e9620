use std::collections::BTreeMap;

/// Bytes that would change the meaning of a query string if left as-is.
fn needs_escape(byte: u8) -> bool {
    matches!(byte, b'%' | b'&' | b'=' | b'#' | b'+' | b'?') || !byte.is_ascii_graphic()
}

fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if needs_escape(byte) {
            out.push_str(&format!("%{:02X}", byte));
        } else {
            out.push(byte as char);
        }
    }
    out
}

fn hex_value(byte: u8) -> u8 {
    match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'f' => byte - b'a' + 10,
        _ => byte - b'A' + 10,
    }
}

/// Decode `%XX` escapes. Anything that is not `%` followed by two hex
/// digits is kept as written.
fn percent_decode(raw: &str, plus_as_space: bool) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' if plus_as_space => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit() =>
            {
                out.push(hex_value(bytes[i + 1]) << 4 | hex_value(bytes[i + 2]));
                i += 3;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn decode_component(raw: &str) -> String {
    percent_decode(raw, true)
}

/// Decode one path segment. Unlike query values, `+` stays a plus.
pub fn decode_segment(raw: &str) -> String {
    percent_decode(raw, false)
}

/// Parse `a=1&b=2` into a map. Later duplicates win; keys without `=` map to "".
pub fn parse_query(raw: &str) -> BTreeMap<String, String> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (decode_component(key), decode_component(value)),
            None => (decode_component(pair), String::new()),
        })
        .collect()
}

/// Join a path and its query parameters. Slashes stay readable, so a
/// login redirect renders as `/login?redirect=/admin`.
pub fn render_full_path(path: &str, query: &BTreeMap<String, String>) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    let rendered: Vec<String> = query
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect();
    format!("{}?{}", path, rendered.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_query_keeps_slashes() {
        let mut query = BTreeMap::new();
        query.insert("redirect".to_string(), "/admin".to_string());
        assert_eq!(render_full_path("/login", &query), "/login?redirect=/admin");
    }

    #[test]
    fn nested_query_is_escaped_and_recovered() {
        let mut query = BTreeMap::new();
        query.insert("redirect".to_string(), "/chat/7?tab=photos&x=1".to_string());
        let full = render_full_path("/login", &query);
        assert_eq!(full, "/login?redirect=/chat/7%3Ftab%3Dphotos%26x%3D1");

        let (_, raw_query) = full.split_once('?').unwrap();
        assert_eq!(parse_query(raw_query), query);
    }

    #[test]
    fn malformed_escapes_pass_through() {
        let parsed = parse_query("q=100%&name=a+b&flag");
        assert_eq!(parsed["q"], "100%");
        assert_eq!(parsed["name"], "a b");
        assert_eq!(parsed["flag"], "");
    }

    #[test]
    fn escapes_need_two_hex_digits() {
        let parsed = parse_query("q=%+5x&r=%4g&s=%41%62");
        assert_eq!(parsed["q"], "% 5x");
        assert_eq!(parsed["r"], "%4g");
        assert_eq!(parsed["s"], "Ab");
    }

    #[test]
    fn segments_decode_without_plus_rewriting() {
        assert_eq!(decode_segment("%61dmin"), "admin");
        assert_eq!(decode_segment("a%20b+c"), "a b+c");
        assert_eq!(decode_segment("100%"), "100%");
    }
}
