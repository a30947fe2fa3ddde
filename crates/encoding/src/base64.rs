//! Base64 encoding and lenient decoding.
//!
//! The decoder accumulates 6-bit values and emits a byte whenever eight or
//! more bits are buffered. Any byte that is not in the table (padding,
//! whitespace, line breaks, garbage) is skipped, so padded, unpadded, and
//! noisy input all decode without error.

use crate::table::{BASE64_TABLE, BASE64_URL_TABLE, Base64Table};

/// Number of padding characters needed for an input of `len % 3` bytes.
const PADDING_COUNT: [usize; 3] = [0, 2, 1];

/// Base64 encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Base64Config {
    /// Alphabet used to encode 6-bit groups.
    pub table: Base64Table,
    /// Padding character written over the synthetic trailing symbols, or
    /// `None` to drop them entirely.
    pub padding: Option<char>,
}

impl Default for Base64Config {
    fn default() -> Self {
        Self {
            table: BASE64_TABLE,
            padding: Some('='),
        }
    }
}

impl Base64Config {
    /// The URL-safe alphabet without padding.
    pub fn url() -> Self {
        Self {
            table: BASE64_URL_TABLE,
            padding: None,
        }
    }
}

/// Length of the Base64 encoding of `len` bytes.
///
/// Padded output is always a multiple of four; unpadded output drops the
/// one or two symbols that would have been padding.
pub const fn encoded_len(len: usize, padded: bool) -> usize {
    let full = 4 * len.div_ceil(3);
    if padded { full } else { full - PADDING_COUNT[len % 3] }
}

/// Decode `data` with the standard alphabet.
pub fn decode(data: impl AsRef<[u8]>) -> Vec<u8> {
    decode_with(data, &BASE64_TABLE)
}

/// Decode `data` with a custom alphabet.
///
/// Bytes outside `table` are ignored. A trailing group that does not fill a
/// whole byte is discarded.
pub fn decode_with(data: impl AsRef<[u8]>, table: &Base64Table) -> Vec<u8> {
    let data = data.as_ref();
    let mut out = Vec::with_capacity(data.len() / 4 * 3 + 2);

    let mut bits: u32 = 0;
    let mut seen: u32 = 0;
    for &byte in data {
        let Some(value) = table.index_of(byte) else {
            continue;
        };

        bits = (bits << 6) | u32::from(value);
        seen += 6;

        if seen >= 8 {
            seen -= 8;
            out.push((bits >> seen) as u8);
            // Only the unconsumed low bits need to survive.
            bits &= (1 << seen) - 1;
        }
    }

    out
}

/// Encode `data` with the standard alphabet and `=` padding.
pub fn encode(data: impl AsRef<[u8]>) -> String {
    encode_with(data, &Base64Config::default())
}

/// Encode `data` with custom settings.
pub fn encode_with(data: impl AsRef<[u8]>, config: &Base64Config) -> String {
    let data = data.as_ref();
    let table = &config.table;
    let padding = config.padding.map_or(0, char::len_utf8);
    let mut out = String::with_capacity(encoded_len(data.len(), false) + 2 * padding);

    for chunk in data.chunks(3) {
        // Missing bytes in the final group count as zero.
        let b0 = u32::from(chunk[0]);
        let b1 = chunk.get(1).copied().map_or(0, u32::from);
        let b2 = chunk.get(2).copied().map_or(0, u32::from);
        let triple = (b0 << 16) | (b1 << 8) | b2;

        out.push(table.symbol((triple >> 18) as u8 & 63));
        out.push(table.symbol((triple >> 12) as u8 & 63));
        out.push(table.symbol((triple >> 6) as u8 & 63));
        out.push(table.symbol(triple as u8 & 63));
    }

    // Table symbols are ASCII, so byte and char positions agree here.
    let synthetic = PADDING_COUNT[data.len() % 3];
    out.truncate(out.len() - synthetic);
    if let Some(pad) = config.padding {
        out.extend(std::iter::repeat_n(pad, synthetic));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_regular() {
        assert_eq!(decode(""), b"");
        assert_eq!(decode("Zg=="), b"f");
        assert_eq!(decode("Zm8="), b"fo");
        assert_eq!(decode("Zm9v"), b"foo");
    }

    #[test]
    fn decode_unpadded() {
        assert_eq!(decode("Zg"), b"f");
        assert_eq!(decode("Zm8"), b"fo");
    }

    #[test]
    fn decode_truncated() {
        assert_eq!(decode(&"Zm9vYmFy"[..4]), b"foo");
        assert_eq!(decode(&"Zm9vYmFy"[..6]), b"foob");
        assert_eq!(decode("Z"), b"");
    }

    #[test]
    fn decode_skips_noise() {
        assert_eq!(decode("Zm9v\r\nYmFy"), b"foobar");
        assert_eq!(decode(" Z m 9 v "), b"foo");
        assert_eq!(decode("Zm9v!!YmFy\x00"), b"foobar");
        assert_eq!(decode("===="), b"");
    }

    #[test]
    fn decode_alternate_table() {
        assert_eq!(decode_with("fn5-", &BASE64_URL_TABLE), b"~~~");
        // `-` is noise to the standard table.
        assert_eq!(decode("fn5-"), b"~~");
    }

    #[test]
    fn decode_non_utf8_output() {
        assert_eq!(decode("/w=="), [0xFF]);
        assert_eq!(decode("AP8A"), [0x00, 0xFF, 0x00]);
    }

    #[test]
    fn encode_regular() {
        assert_eq!(encode(""), "");
        assert_eq!(encode("f"), "Zg==");
        assert_eq!(encode("fo"), "Zm8=");
        assert_eq!(encode("foo"), "Zm9v");
        assert_eq!(encode("foobar"), "Zm9vYmFy");
    }

    #[test]
    fn encode_unpadded() {
        let config = Base64Config {
            padding: None,
            ..Default::default()
        };
        assert_eq!(encode_with("f", &config), "Zg");
        assert_eq!(encode_with("fo", &config), "Zm8");
        assert_eq!(encode_with("foo", &config), "Zm9v");
    }

    #[test]
    fn encode_truncated() {
        assert_eq!(encode(&b"foobar"[..3]), "Zm9v");
    }

    #[test]
    fn encode_alternate_table() {
        let config = Base64Config {
            table: BASE64_URL_TABLE,
            ..Default::default()
        };
        assert_eq!(encode_with("~~~", &config), "fn5-");
        assert_eq!(encode_with([0xFB, 0xFF], &Base64Config::url()), "-_8");
    }

    #[test]
    fn encode_custom_padding_character() {
        let config = Base64Config {
            padding: Some('.'),
            ..Default::default()
        };
        assert_eq!(encode_with("f", &config), "Zg..");
        assert_eq!(encode_with("fo", &config), "Zm8.");
    }

    #[test]
    fn encoded_len_matches_padding_contract() {
        assert_eq!(encoded_len(0, true), 0);
        assert_eq!(encoded_len(1, true), 4);
        assert_eq!(encoded_len(2, true), 4);
        assert_eq!(encoded_len(3, true), 4);
        assert_eq!(encoded_len(4, true), 8);
        assert_eq!(encoded_len(1, false), 2);
        assert_eq!(encoded_len(2, false), 3);
        assert_eq!(encoded_len(3, false), 4);
    }
}
