//! Percent (URI) encoding.

use crate::table::{HEX_TABLE_LOWER, HEX_TABLE_UPPER, PERCENT_TABLE, SafeSet};

/// Percent encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentConfig {
    /// Bytes copied through without escaping.
    pub safe: SafeSet,
    /// Whether escapes use upper-case hex digits.
    pub upper: bool,
}

impl Default for PercentConfig {
    fn default() -> Self {
        Self {
            safe: PERCENT_TABLE,
            upper: true,
        }
    }
}

/// Decode a percent-encoded string.
///
/// Each `%` consumes the next two bytes as hex digits, case-insensitively.
/// A digit that is missing (input ends early) or not hex counts as `0`.
/// Everything else is copied through unchanged; `+` is not treated as a
/// space.
pub fn decode(data: impl AsRef<[u8]>) -> Vec<u8> {
    let data = data.as_ref();
    let mut out = Vec::with_capacity(data.len());

    let digit = |byte: Option<&u8>| {
        byte.and_then(|b| HEX_TABLE_UPPER.index_of(b.to_ascii_uppercase()))
            .unwrap_or(0)
    };

    let mut bytes = data.iter();
    while let Some(&byte) = bytes.next() {
        if byte == b'%' {
            let hi = digit(bytes.next());
            let lo = digit(bytes.next());
            out.push((hi << 4) | lo);
        } else {
            out.push(byte);
        }
    }

    out
}

/// Percent-encode `data`, leaving unreserved URI characters as they are.
pub fn encode(data: impl AsRef<[u8]>) -> String {
    encode_with(data, &PercentConfig::default())
}

/// Percent-encode `data` with a custom safe set or digit case.
pub fn encode_with(data: impl AsRef<[u8]>, config: &PercentConfig) -> String {
    let data = data.as_ref();
    let hex = if config.upper {
        &HEX_TABLE_UPPER
    } else {
        &HEX_TABLE_LOWER
    };
    let mut out = String::with_capacity(data.len() * 3);

    for &byte in data {
        if config.safe.contains(byte) {
            // Safe set members are ASCII.
            out.push(byte as char);
        } else {
            out.push('%');
            out.push(hex.symbol(byte >> 4));
            out.push(hex.symbol(byte & 15));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_basic() {
        assert_eq!(decode(""), b"");
        assert_eq!(decode("foo"), b"foo");
        assert_eq!(decode("foo%20bar"), b"foo bar");
        assert_eq!(decode("foo%20bar%3F"), b"foo bar?");
    }

    #[test]
    fn decode_lower_case_digits() {
        assert_eq!(decode("foo%3f"), b"foo?");
        assert_eq!(decode("%c3%a9"), "é".as_bytes());
    }

    #[test]
    fn decode_truncated() {
        assert_eq!(decode(&"foo%20bar"[..6]), b"foo ");
        assert_eq!(decode("foo%2"), b"foo\x20");
        assert_eq!(decode("foo%"), b"foo\x00");
    }

    #[test]
    fn decode_invalid_digits_are_zero() {
        assert_eq!(decode("%zz"), [0x00]);
        assert_eq!(decode("%4g"), [0x40]);
        assert_eq!(decode("a+b"), b"a+b");
        assert_eq!(decode("%%41"), [0x04, b'1']);
    }

    #[test]
    fn encode_basic() {
        assert_eq!(encode(""), "");
        assert_eq!(encode("foo"), "foo");
        assert_eq!(encode("foo bar"), "foo%20bar");
        assert_eq!(encode("foo bar?"), "foo%20bar%3F");
        assert_eq!(encode("a-b_c.d~e"), "a-b_c.d~e");
        assert_eq!(encode([0x00, 0xFF]), "%00%FF");
    }

    #[test]
    fn encode_truncated() {
        assert_eq!(encode(&"foo bar"[..4]), "foo%20");
    }

    #[test]
    fn encode_alternate_table() {
        let config = PercentConfig {
            safe: SafeSet::new(b"bar"),
            ..Default::default()
        };
        assert_eq!(encode_with("foo", &config), "%66%6F%6F");
        assert_eq!(encode_with("foo bar", &config), "%66%6F%6F%20bar");
    }

    #[test]
    fn encode_lower_case() {
        let config = PercentConfig {
            upper: false,
            ..Default::default()
        };
        assert_eq!(encode_with("foo?", &config), "foo%3f");
    }
}
