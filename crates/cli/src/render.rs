//! Output selection and JSON reports.
//!
//! Data goes to stdout. Status notes and warnings go to stderr in pretty
//! mode. JSON mode prints exactly one object per invocation.

use std::borrow::Cow;
use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use oulu_message::Ctcp;
use serde::Serialize;

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Plain text for terminals and shell pipelines.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice if given, otherwise pretty for interactive
    /// terminals and JSON for pipes.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Reports ─────────────────────────────────────────────────────────────

/// Result of an `encode` or `decode` command.
#[derive(Debug, Serialize)]
pub(crate) struct CodecReport<'a> {
    pub(crate) mode: &'static str,
    pub(crate) codec: &'static str,
    /// Output bytes, lossily converted to text.
    pub(crate) output: Cow<'a, str>,
    pub(crate) length: usize,
    /// Lower-case hex of the decoded bytes, for output that is not text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) hex: Option<String>,
}

/// Result of `escape-tag` / `unescape-tag`.
#[derive(Debug, Serialize)]
pub(crate) struct TextReport<'a> {
    pub(crate) mode: &'static str,
    pub(crate) output: &'a str,
}

/// Result of the `ctcp` command. `ctcp` is `null` when the input is not a
/// CTCP message.
#[derive(Debug, Serialize)]
pub(crate) struct CtcpReport<'a> {
    pub(crate) ctcp: Option<Ctcp<'a>>,
}

/// Result of the `tokenize` command.
#[derive(Debug, Serialize)]
pub(crate) struct TokenReport<'a> {
    pub(crate) trailing: bool,
    pub(crate) tokens: Vec<&'a str>,
}

// ── Printing ────────────────────────────────────────────────────────────

/// Print `report` as one pretty JSON object on stdout.
pub(crate) fn print_json<T: Serialize>(report: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Write raw bytes to stdout without a trailing newline.
pub(crate) fn print_raw(bytes: &[u8]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()?;
    Ok(())
}

/// Print a warning on stderr.
pub(crate) fn warn(message: &str) {
    eprintln!("warn: {message}");
}
