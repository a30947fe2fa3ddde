//! IRC wire-format primitives.
//!
//! Small building blocks for reading IRC messages: IRCv3 tag value
//! escaping, CTCP frame detection and extraction, and a cursor that pulls
//! `<middle>` and `<trailing>` parameters off a message line. None of these
//! allocate except the tag escape functions, and none of them fail: absence
//! of a result is reported as `None` or `false`.
//!
//! Full message parsing (tags, prefix, command) is left to callers.

#![warn(missing_docs)]

/// CTCP frame detection and extraction.
pub mod ctcp;
/// IRCv3 message-tag value escaping.
pub mod tag;
/// Space-delimited parameter extraction.
pub mod tokenizer;

pub use ctcp::{CTCP_DELIMITER, Ctcp, is_ctcp, parse_ctcp, parse_ctcp_name};
pub use tag::{escape_tag, unescape_tag};
pub use tokenizer::MessageTokenizer;
