//! CTCP (Client-To-Client Protocol) framing.
//!
//! A CTCP message is `\x01NAME[ BODY][\x01]`. Detection is tolerant of what
//! clients send in the wild: only the first two bytes are checked and a
//! missing closing delimiter is accepted.

/// The byte that opens and closes a CTCP frame.
pub const CTCP_DELIMITER: u8 = 0x01;

/// A CTCP frame borrowed from the message it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ctcp<'a> {
    /// The CTCP command (e.g. `ACTION`, `VERSION`).
    pub name: &'a str,
    /// Everything after the name and its separating spaces, without the
    /// closing delimiter. Empty when there is no body.
    pub body: &'a str,
}

/// Whether `message` is a CTCP message.
///
/// True when it starts with [`CTCP_DELIMITER`] followed by a byte that is
/// neither another delimiter nor a space.
pub fn is_ctcp(message: &str) -> bool {
    match message.as_bytes() {
        [CTCP_DELIMITER, second, ..] => *second != CTCP_DELIMITER && *second != b' ',
        _ => false,
    }
}

/// Extract only the CTCP name from `message`.
pub fn parse_ctcp_name(message: &str) -> Option<&str> {
    if !is_ctcp(message) {
        return None;
    }
    Some(split_name(message).0)
}

/// Extract the CTCP name and body from `message`.
pub fn parse_ctcp(message: &str) -> Option<Ctcp<'_>> {
    if !is_ctcp(message) {
        return None;
    }
    let (name, rest) = split_name(message);
    let body = rest.map_or("", |rest| strip_delimiter(rest.trim_start_matches(' ')));
    Some(Ctcp { name, body })
}

/// Split a detected CTCP message into its name and the text after the
/// first space, if any.
fn split_name(message: &str) -> (&str, Option<&str>) {
    // The opening delimiter is one byte and the next byte is not a space.
    let inner = &message[1..];
    match inner.find(' ') {
        Some(space) => (&inner[..space], Some(&inner[space + 1..])),
        None => (strip_delimiter(inner), None),
    }
}

fn strip_delimiter(s: &str) -> &str {
    s.strip_suffix(CTCP_DELIMITER as char).unwrap_or(s)
}
