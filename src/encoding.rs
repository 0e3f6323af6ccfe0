//! Percent-encoding for Package URL components.

use std::fmt::Write;

/// Characters left unencoded in every component besides ASCII alphanumerics.
fn is_plain(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~' | b':')
}

/// Percent-encode a single path segment, name or version.
pub fn encode_segment(value: &str) -> String {
    encode_with(value, is_plain)
}

/// Percent-encode a qualifier value. `/` is kept as-is so that values such
/// as `repository_url=repo.spring.io/release` stay readable.
pub fn encode_qualifier_value(value: &str) -> String {
    encode_with(value, |b| is_plain(b) || b == b'/')
}

fn encode_with(value: &str, keep: impl Fn(u8) -> bool) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        if keep(b) {
            out.push(char::from(b));
        } else {
            let _ = write!(out, "%{:02X}", b);
        }
    }
    out
}

/// Decode `%XX` escapes.
///
/// Returns `None` when an escape is truncated, is not hexadecimal, or the
/// decoded bytes are not valid UTF-8.
pub fn decode(value: &str) -> Option<String> {
    if !value.contains('%') {
        return Some(value.to_string());
    }

    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = value.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("lodash"), "lodash");
        assert_eq!(encode_segment("@babel"), "%40babel");
        assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
        assert_eq!(encode_segment("1.0:rc~1"), "1.0:rc~1");
    }

    #[test]
    fn test_encode_qualifier_value_keeps_slash() {
        assert_eq!(
            encode_qualifier_value("repo.spring.io/release"),
            "repo.spring.io/release"
        );
        assert_eq!(encode_qualifier_value("a&b=c"), "a%26b%3Dc");
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode("%40babel").as_deref(), Some("@babel"));
        assert_eq!(decode("caf%C3%A9").as_deref(), Some("café"));
        assert_eq!(decode("plain").as_deref(), Some("plain"));
    }

    #[test]
    fn test_decode_rejects_malformed_escapes() {
        assert_eq!(decode("%4"), None);
        assert_eq!(decode("%zz"), None);
        assert_eq!(decode("%FF"), None);
    }

    #[test]
    fn test_encode_non_ascii() {
        assert_eq!(encode_segment("café"), "caf%C3%A9");
        assert_eq!(decode(&encode_segment("日本")).as_deref(), Some("日本"));
    }
}
