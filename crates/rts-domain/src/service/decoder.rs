//! Link payload decoding
//!
//! Order links have been produced by several generations of tooling, so the
//! `data` parameter may arrive percent-encoded (sometimes more than once),
//! base64-encoded, or as plain JSON. [`PayloadEncoding::Auto`] sniffs which
//! one it is; callers that know the encoding should say so explicitly.

use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use rts_types::{Error, Result};

/// Upper bound on repeated percent-decoding passes
pub const MAX_DECODE_ITERATIONS: usize = 10;

/// How the link payload is encoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayloadEncoding {
    /// Guess from the payload shape
    #[default]
    Auto,
    Percent,
    Base64,
    Plain,
}

impl FromStr for PayloadEncoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(PayloadEncoding::Auto),
            "percent" | "url" => Ok(PayloadEncoding::Percent),
            "base64" => Ok(PayloadEncoding::Base64),
            "plain" | "text" => Ok(PayloadEncoding::Plain),
            other => Err(format!("unknown payload encoding: {other}")),
        }
    }
}

/// Decode a link payload, guessing its encoding
///
/// Returns `None` for a missing or empty payload. Never fails: when a
/// decoding step goes wrong the best string obtained so far is returned.
pub fn decode_url_data(encoded: Option<&str>) -> Option<String> {
    let encoded = encoded.filter(|s| !s.is_empty())?;

    if contains_percent_escape(encoded) {
        debug!("payload looks percent-encoded");
        return Some(percent_decode_repeated(encoded));
    }

    if looks_like_base64(encoded) {
        match decode_base64_text(encoded) {
            Some(decoded) => {
                debug!("payload decoded as base64");
                return Some(decoded);
            }
            None => debug!("base64-shaped payload did not decode to text, keeping as is"),
        }
    }

    Some(encoded.to_string())
}

/// Decode a payload whose encoding is known
///
/// Unlike [`decode_url_data`], explicit encodings report failures.
pub fn decode_with(encoded: &str, encoding: PayloadEncoding) -> Result<String> {
    match encoding {
        PayloadEncoding::Auto => Ok(decode_url_data(Some(encoded)).unwrap_or_default()),
        PayloadEncoding::Percent => urlencoding::decode(encoded)
            .map(|s| s.into_owned())
            .map_err(|e| Error::Decode(format!("invalid percent-encoding: {e}"))),
        PayloadEncoding::Base64 => {
            let bytes = STANDARD
                .decode(encoded.trim())
                .map_err(|e| Error::Decode(format!("invalid base64: {e}")))?;
            String::from_utf8(bytes).map_err(|e| Error::Decode(format!("base64 payload is not UTF-8: {e}")))
        }
        PayloadEncoding::Plain => Ok(encoded.to_string()),
    }
}

fn contains_percent_escape(s: &str) -> bool {
    s.as_bytes()
        .windows(3)
        .any(|w| w[0] == b'%' && w[1].is_ascii_hexdigit() && w[2].is_ascii_hexdigit())
}

fn percent_decode_repeated(encoded: &str) -> String {
    let mut decoded = encoded.to_string();
    for _ in 0..MAX_DECODE_ITERATIONS {
        let next = match urlencoding::decode(&decoded) {
            Ok(next) => next.into_owned(),
            Err(e) => {
                debug!("percent-decoding stopped: {}", e);
                break;
            }
        };
        let changed = next != decoded;
        decoded = next;
        if !changed || !contains_percent_escape(&decoded) {
            break;
        }
    }
    decoded
}

fn looks_like_base64(s: &str) -> bool {
    if s.len() < 4 || s.len() % 4 != 0 {
        return false;
    }
    let body = s.trim_end_matches('=');
    if body.is_empty() || s.len() - body.len() > 2 {
        return false;
    }
    body.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}

fn decode_base64_text(s: &str) -> Option<String> {
    let bytes = STANDARD.decode(s).ok()?;
    let text = String::from_utf8_lossy(&bytes);
    if text.contains('\u{FFFD}') {
        return None;
    }
    Some(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_empty_is_none() {
        assert_eq!(decode_url_data(None), None);
        assert_eq!(decode_url_data(Some("")), None);
    }

    #[test]
    fn test_single_percent_encoding() {
        let decoded = decode_url_data(Some("%5B%7B%22OrderID%22%3A%22A1%22%7D%5D"));
        assert_eq!(decoded.as_deref(), Some(r#"[{"OrderID":"A1"}]"#));
    }

    #[test]
    fn test_double_percent_encoding() {
        // "%257B" -> "%7B" -> "{"
        let decoded = decode_url_data(Some("%257B%2522a%2522%253A1%257D"));
        assert_eq!(decoded.as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_percent_decoding_keeps_plus() {
        let decoded = decode_url_data(Some("a+b%20c"));
        assert_eq!(decoded.as_deref(), Some("a+b c"));
    }

    #[test]
    fn test_invalid_utf8_percent_returns_input() {
        let decoded = decode_url_data(Some("%FF%FE"));
        assert_eq!(decoded.as_deref(), Some("%FF%FE"));
    }

    #[test]
    fn test_iteration_cap() {
        let mut encoded = "{".to_string();
        for _ in 0..15 {
            encoded = urlencoding::encode(&encoded).into_owned();
        }
        let decoded = decode_url_data(Some(&encoded)).unwrap();
        // Ten passes leave five layers of encoding in place
        assert!(decoded.starts_with('%'));
        assert_ne!(decoded, encoded);
    }

    #[test]
    fn test_base64_payload() {
        let encoded = STANDARD.encode(r#"[{"orderId":"B7"}]"#);
        let decoded = decode_url_data(Some(&encoded));
        assert_eq!(decoded.as_deref(), Some(r#"[{"orderId":"B7"}]"#));
    }

    #[test]
    fn test_base64_binary_is_rejected() {
        let encoded = STANDARD.encode([0xffu8, 0xfe, 0xfd, 0x00, 0x81, 0x82]);
        let decoded = decode_url_data(Some(&encoded));
        assert_eq!(decoded.as_deref(), Some(encoded.as_str()));
    }

    #[test]
    fn test_plain_json_passes_through() {
        let plain = r#"{"OrderID":"A1","RequiredWagons":3}"#;
        assert_eq!(decode_url_data(Some(plain)).as_deref(), Some(plain));
    }

    #[test]
    fn test_wrong_length_is_not_base64() {
        assert_eq!(decode_url_data(Some("abcde")).as_deref(), Some("abcde"));
    }

    #[test]
    fn test_decode_is_idempotent_on_plain_text() {
        for input in ["hello world", r#"[{"a":"b"}]"#, "Linz nach Graz", "x=1&y"] {
            let once = decode_url_data(Some(input));
            let twice = decode_url_data(once.as_deref());
            assert_eq!(once, twice, "input: {input}");
        }
    }

    #[test]
    fn test_explicit_encodings() {
        assert_eq!(decode_with("%7B%7D", PayloadEncoding::Percent).unwrap(), "{}");
        assert_eq!(decode_with("e30=", PayloadEncoding::Base64).unwrap(), "{}");
        assert_eq!(decode_with("e30=", PayloadEncoding::Plain).unwrap(), "e30=");
        assert!(decode_with("not base64!", PayloadEncoding::Base64).is_err());
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("Base64".parse::<PayloadEncoding>(), Ok(PayloadEncoding::Base64));
        assert_eq!("url".parse::<PayloadEncoding>(), Ok(PayloadEncoding::Percent));
        assert!("rot13".parse::<PayloadEncoding>().is_err());
    }
}
