//! Symbol tables shared by the codecs.
//!
//! A table maps a symbol index (a 6-bit Base64 value or a 4-bit hex nibble)
//! to a printable ASCII character and back. The reverse direction is
//! precomputed into a 256-entry index when the table is built; if a table
//! contains the same character twice, the first occurrence wins.

use thiserror::Error;

/// Reverse-index marker for bytes that are not part of a table.
const ABSENT: u8 = 0xFF;

/// The table used when handling regular Base64-encoded strings.
pub const BASE64_TABLE: Base64Table =
    Base64Table::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/");

/// The table used when handling Base64URL-encoded strings.
pub const BASE64_URL_TABLE: Base64Table =
    Base64Table::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_");

/// The table used for lower-case hexadecimal strings.
pub const HEX_TABLE_LOWER: HexTable = HexTable::new(b"0123456789abcdef");

/// The table used for upper-case hexadecimal strings.
pub const HEX_TABLE_UPPER: HexTable = HexTable::new(b"0123456789ABCDEF");

/// Characters that do not need escaping in a percent-encoded string
/// (the unreserved URI characters).
pub const PERCENT_TABLE: SafeSet =
    SafeSet::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_.~");

/// Errors raised when building a table from untrusted input.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The table does not have the number of symbols its codec needs.
    #[error("table must have {expected} symbols, got {actual}")]
    WrongLength {
        /// Number of symbols the codec requires.
        expected: usize,
        /// Number of bytes supplied.
        actual: usize,
    },

    /// A symbol is not a printable ASCII character.
    #[error("symbol at index {index} is not printable ASCII (0x{byte:02X})")]
    NonPrintable {
        /// Position of the offending byte.
        index: usize,
        /// The offending byte.
        byte: u8,
    },

    /// A symbol appears more than once.
    #[error("symbol {symbol:?} at index {index} is already in the table")]
    Duplicate {
        /// Position of the repeated symbol.
        index: usize,
        /// The repeated symbol.
        symbol: char,
    },
}

const fn is_printable(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7E)
}

/// Build the reverse index for `symbols`, keeping the first occurrence of
/// any repeated byte.
const fn reverse_index(symbols: &[u8]) -> [u8; 256] {
    let mut reverse = [ABSENT; 256];
    let mut i = symbols.len();
    // Walk backwards so earlier positions overwrite later ones.
    while i > 0 {
        i -= 1;
        assert!(is_printable(symbols[i]), "table symbols must be printable ASCII");
        reverse[symbols[i] as usize] = i as u8;
    }
    reverse
}

/// Check cardinality, printability and uniqueness of a runtime table.
fn validate(symbols: &[u8], expected: usize) -> Result<(), TableError> {
    if symbols.len() != expected {
        return Err(TableError::WrongLength {
            expected,
            actual: symbols.len(),
        });
    }
    check_symbols(symbols)
}

fn check_symbols(symbols: &[u8]) -> Result<(), TableError> {
    let mut seen = [false; 256];
    for (index, &byte) in symbols.iter().enumerate() {
        if !is_printable(byte) {
            return Err(TableError::NonPrintable { index, byte });
        }
        if seen[byte as usize] {
            return Err(TableError::Duplicate {
                index,
                symbol: byte as char,
            });
        }
        seen[byte as usize] = true;
    }
    Ok(())
}

macro_rules! symbol_table {
    ($(#[$meta:meta])* $name:ident, $len:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            symbols: [u8; $len],
            reverse: [u8; 256],
        }

        impl $name {
            /// Number of symbols in the table.
            pub const LEN: usize = $len;

            /// Build a table from its symbols.
            ///
            /// Intended for constants. Repeated symbols are accepted and
            /// decode to their first position.
            ///
            /// # Panics
            ///
            /// Panics if a symbol is not printable ASCII. In a `const`
            /// context this is a compile error.
            pub const fn new(symbols: &[u8; $len]) -> Self {
                Self {
                    symbols: *symbols,
                    reverse: reverse_index(symbols),
                }
            }

            /// Build a table from a runtime string, rejecting tables that
            /// have the wrong length, non-printable symbols, or duplicates.
            ///
            /// # Errors
            ///
            /// Returns a [`TableError`] describing the first problem found.
            pub fn try_from_str(symbols: &str) -> Result<Self, TableError> {
                validate(symbols.as_bytes(), $len)?;
                let mut buf = [0u8; $len];
                buf.copy_from_slice(symbols.as_bytes());
                Ok(Self::new(&buf))
            }

            /// The character for a symbol index. Only the low bits that fit
            /// the table are used.
            #[inline]
            pub fn symbol(&self, index: u8) -> char {
                self.symbols[index as usize % $len] as char
            }

            /// The index of `byte` in the table, if present.
            #[inline]
            pub fn index_of(&self, byte: u8) -> Option<u8> {
                match self.reverse[byte as usize] {
                    ABSENT => None,
                    index => Some(index),
                }
            }

            /// The symbols in index order.
            pub fn as_str(&self) -> &str {
                // Every symbol was checked to be printable ASCII.
                std::str::from_utf8(&self.symbols).unwrap_or_default()
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.as_str()).finish()
            }
        }

        impl std::str::FromStr for $name {
            type Err = TableError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::try_from_str(s)
            }
        }
    };
}

symbol_table!(
    /// A 64-symbol Base64 alphabet.
    Base64Table,
    64
);

symbol_table!(
    /// A 16-symbol hexadecimal alphabet.
    HexTable,
    16
);

/// The set of bytes a percent encoder passes through unescaped.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SafeSet {
    bits: [u64; 4],
}

impl SafeSet {
    /// Build a safe set from its members.
    ///
    /// # Panics
    ///
    /// Panics if a member is not printable ASCII. In a `const` context
    /// this is a compile error.
    pub const fn new(members: &[u8]) -> Self {
        let mut bits = [0u64; 4];
        let mut i = 0;
        while i < members.len() {
            let byte = members[i];
            assert!(is_printable(byte), "safe set members must be printable ASCII");
            bits[(byte >> 6) as usize] |= 1 << (byte & 63);
            i += 1;
        }
        Self { bits }
    }

    /// Build a safe set from a runtime string.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if a member is not printable ASCII or is
    /// repeated. Any number of members is allowed.
    pub fn try_from_str(members: &str) -> Result<Self, TableError> {
        check_symbols(members.as_bytes())?;
        Ok(Self::new(members.as_bytes()))
    }

    /// Whether `byte` passes through the encoder unchanged.
    #[inline]
    pub const fn contains(&self, byte: u8) -> bool {
        self.bits[(byte >> 6) as usize] & (1 << (byte & 63)) != 0
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Whether the set is empty, in which case every byte is escaped.
    pub fn is_empty(&self) -> bool {
        self.bits == [0; 4]
    }
}

impl std::fmt::Debug for SafeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let members: String = (0u8..=0x7F)
            .filter(|&b| self.contains(b))
            .map(char::from)
            .collect();
        f.debug_tuple("SafeSet").field(&members).finish()
    }
}

impl std::str::FromStr for SafeSet {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_str(s)
    }
}
