//! IRCv3 message-tag value escaping.
//!
//! | raw    | escaped |
//! |--------|---------|
//! | space  | `\s`    |
//! | `;`    | `\:`    |
//! | `\`    | `\\`    |
//! | CR     | `\r`    |
//! | LF     | `\n`    |

/// Escape a tag value for the wire.
pub fn escape_tag(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + value.len() / 4);
    for c in value.chars() {
        let escaped = match c {
            ' ' => "\\s",
            ';' => "\\:",
            '\\' => "\\\\",
            '\r' => "\\r",
            '\n' => "\\n",
            _ => {
                out.push(c);
                continue;
            }
        };
        out.push_str(escaped);
    }
    out
}

/// Unescape a tag value read from the wire.
///
/// An unknown escape keeps the escaped character and drops the backslash
/// (`\b` becomes `b`). A lone trailing backslash is dropped.
pub fn unescape_tag(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some(':') => out.push(';'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => break,
        }
    }
    out
}
