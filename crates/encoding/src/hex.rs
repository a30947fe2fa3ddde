//! Hexadecimal encoding and lenient decoding.
//!
//! Unlike the Base64 decoder, an unknown digit is not skipped: it decodes
//! as nibble `0` so the output keeps one byte per input pair.

use crate::table::{HEX_TABLE_LOWER, HEX_TABLE_UPPER, HexTable};

/// Hex encoder/decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexConfig {
    /// Alphabet used for nibbles. Lookups are case-sensitive.
    pub table: HexTable,
    /// Character placed between byte pairs (e.g. `:` for `66:6f`).
    pub separator: Option<char>,
}

impl Default for HexConfig {
    fn default() -> Self {
        Self {
            table: HEX_TABLE_LOWER,
            separator: None,
        }
    }
}

impl HexConfig {
    /// Upper-case digits, no separator.
    pub fn upper() -> Self {
        Self {
            table: HEX_TABLE_UPPER,
            separator: None,
        }
    }

    /// The same table with `separator` between pairs.
    pub fn with_separator(self, separator: char) -> Self {
        Self {
            separator: Some(separator),
            ..self
        }
    }
}

/// Decode lower-case hex without separators.
pub fn decode(data: impl AsRef<[u8]>) -> Vec<u8> {
    decode_with(data, &HexConfig::default())
}

/// Decode hex with custom settings.
///
/// Input is consumed in fixed steps of two digits plus the separator width.
/// The separator position is skipped without being checked. Processing
/// stops once fewer than two bytes remain.
pub fn decode_with(data: impl AsRef<[u8]>, config: &HexConfig) -> Vec<u8> {
    let data = data.as_ref();
    let step = 2 + config.separator.map_or(0, char::len_utf8);
    let mut out = Vec::with_capacity(data.len() / step + 1);

    let nibble = |byte: u8| config.table.index_of(byte).unwrap_or(0);
    let mut idx = 0;
    while idx + 1 < data.len() {
        out.push((nibble(data[idx]) << 4) | nibble(data[idx + 1]));
        idx += step;
    }

    out
}

/// Encode `data` as lower-case hex without separators.
pub fn encode(data: impl AsRef<[u8]>) -> String {
    encode_with(data, &HexConfig::default())
}

/// Encode `data` with custom settings.
pub fn encode_with(data: impl AsRef<[u8]>, config: &HexConfig) -> String {
    let data = data.as_ref();
    let sep_len = config.separator.map_or(0, char::len_utf8);
    let mut out = String::with_capacity(data.len() * (2 + sep_len));

    for (idx, &byte) in data.iter().enumerate() {
        if idx > 0
            && let Some(sep) = config.separator
        {
            out.push(sep);
        }
        out.push(config.table.symbol(byte >> 4));
        out.push(config.table.symbol(byte & 15));
    }

    out
}
