//! Lenient byte/text codecs for IRC wire data.
//!
//! Provides Base64, hexadecimal, and percent encoding. Every function is
//! total: malformed or truncated input never produces an error, it produces
//! a well-defined (if degenerate) result. Decoders skip, zero-fill, or stop
//! early depending on the codec; see each module for the exact rule.
//!
//! Tables are plain values. The default functions (`encode`, `decode`) use
//! the standard tables; the `*_with` variants accept a custom table or
//! config.

#![warn(missing_docs)]

/// Base64 encoding and lenient decoding.
pub mod base64;
/// Hexadecimal encoding and lenient decoding.
pub mod hex;
/// Percent (URI) encoding and decoding.
pub mod percent;
/// Symbol tables shared by the codecs.
pub mod table;

pub use base64::Base64Config;
pub use hex::HexConfig;
pub use percent::PercentConfig;
pub use table::{
    BASE64_TABLE, BASE64_URL_TABLE, Base64Table, HEX_TABLE_LOWER, HEX_TABLE_UPPER, HexTable,
    PERCENT_TABLE, SafeSet, TableError,
};
