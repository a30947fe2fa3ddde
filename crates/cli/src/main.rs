mod render;

use std::borrow::Cow;
use std::fs;
use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use oulu_encoding::{
    BASE64_TABLE, BASE64_URL_TABLE, Base64Config, Base64Table, HEX_TABLE_LOWER, HEX_TABLE_UPPER,
    HexConfig, HexTable, PERCENT_TABLE, PercentConfig, SafeSet, base64, hex, percent,
};
use oulu_message::{MessageTokenizer, escape_tag, parse_ctcp, unescape_tag};

use crate::render::{
    CodecReport, CtcpReport, Format, TextReport, TokenReport, print_json, print_raw, warn,
};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "oulu",
    version,
    about = "Encode, decode, and inspect IRC wire data"
)]
struct Cli {
    /// Output mode: "pretty" for plain text, "json" for machine-readable
    /// JSON. Defaults to "pretty" when stdout is a TTY, "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    // ── Codecs ──────────────────────────────────────────────────────
    /// Encode the input bytes.
    Encode {
        #[arg(value_enum)]
        codec: Codec,
        /// Input file; reads stdin when omitted or `-`.
        file: Option<String>,
        #[command(flatten)]
        opts: CodecOpts,
    },

    /// Decode the input. Malformed input never fails; see the codec docs
    /// for how bad characters are treated.
    Decode {
        #[arg(value_enum)]
        codec: Codec,
        /// Input file; reads stdin when omitted or `-`.
        file: Option<String>,
        #[command(flatten)]
        opts: CodecOpts,
    },

    // ── Message utilities ───────────────────────────────────────────
    /// Escape a message-tag value.
    EscapeTag {
        /// Input file; reads stdin when omitted or `-`.
        file: Option<String>,
    },

    /// Unescape a message-tag value.
    UnescapeTag {
        /// Input file; reads stdin when omitted or `-`.
        file: Option<String>,
    },

    /// Show the name and body of a CTCP message (exit 1 if not CTCP).
    Ctcp {
        /// Input file; reads stdin when omitted or `-`.
        file: Option<String>,
    },

    /// Split a message into space-separated parameters.
    Tokenize {
        /// Input file; reads stdin when omitted or `-`.
        file: Option<String>,
        /// Treat a parameter starting with `:` as the trailing parameter.
        #[arg(long)]
        trailing: bool,
    },
}

/// Codec selection for `encode` / `decode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Codec {
    /// Standard Base64 (`+/`), padded.
    Base64,
    /// URL-safe Base64 (`-_`), unpadded.
    Base64Url,
    /// Hexadecimal.
    Hex,
    /// Percent (URI) encoding.
    Percent,
}

impl Codec {
    fn name(self) -> &'static str {
        match self {
            Codec::Base64 => "base64",
            Codec::Base64Url => "base64-url",
            Codec::Hex => "hex",
            Codec::Percent => "percent",
        }
    }
}

/// Digit case for hex and percent output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Case {
    Lower,
    Upper,
}

#[derive(Args, Debug, Default)]
struct CodecOpts {
    /// Custom table: 64 symbols for Base64, 16 for hex, or the safe
    /// characters for percent encoding.
    #[arg(long)]
    table: Option<String>,
    /// Base64: padding character.
    #[arg(long, conflicts_with = "no_padding")]
    padding: Option<char>,
    /// Base64: omit padding.
    #[arg(long)]
    no_padding: bool,
    /// Hex: character between byte pairs.
    #[arg(long)]
    separator: Option<char>,
    /// Hex and percent: digit case (hex defaults to lower, percent to upper).
    #[arg(long, value_enum)]
    case: Option<Case>,
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Encode { codec, file, opts } => cmd_encode(codec, file.as_deref(), &opts, format)?,
        Cmd::Decode { codec, file, opts } => cmd_decode(codec, file.as_deref(), &opts, format)?,
        Cmd::EscapeTag { file } => cmd_tag(file.as_deref(), TagMode::Escape, format)?,
        Cmd::UnescapeTag { file } => cmd_tag(file.as_deref(), TagMode::Unescape, format)?,
        Cmd::Ctcp { file } => cmd_ctcp(file.as_deref(), format)?,
        Cmd::Tokenize { file, trailing } => cmd_tokenize(file.as_deref(), trailing, format)?,
    }

    Ok(())
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_encode(codec: Codec, file: Option<&str>, opts: &CodecOpts, format: Format) -> Result<()> {
    let input = read_input(file)?;
    warn_unused_opts(codec, opts);

    let encoded = match codec {
        Codec::Base64 | Codec::Base64Url => {
            base64::encode_with(&input, &base64_config(codec, opts)?)
        }
        Codec::Hex => hex::encode_with(&input, &hex_config(opts)?),
        Codec::Percent => percent::encode_with(&input, &percent_config(opts)?),
    };

    match format {
        Format::Json => print_json(&CodecReport {
            mode: "encode",
            codec: codec.name(),
            length: encoded.len(),
            output: Cow::Borrowed(&encoded),
            hex: None,
        })?,
        Format::Pretty => println!("{encoded}"),
    }
    Ok(())
}

fn cmd_decode(codec: Codec, file: Option<&str>, opts: &CodecOpts, format: Format) -> Result<()> {
    let input = read_input(file)?;
    warn_unused_opts(codec, opts);

    let decoded = match codec {
        Codec::Base64 | Codec::Base64Url => {
            base64::decode_with(&input, &base64_config(codec, opts)?.table)
        }
        Codec::Hex => hex::decode_with(&input, &hex_config(opts)?),
        Codec::Percent => {
            if opts.table.is_some() || opts.case.is_some() {
                warn("percent decoding ignores --table and --case");
            }
            percent::decode(&input)
        }
    };

    match format {
        Format::Json => print_json(&CodecReport {
            mode: "decode",
            codec: codec.name(),
            length: decoded.len(),
            output: String::from_utf8_lossy(&decoded),
            hex: Some(hex::encode(&decoded)),
        })?,
        Format::Pretty => print_raw(&decoded)?,
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum TagMode {
    Escape,
    Unescape,
}

fn cmd_tag(file: Option<&str>, mode: TagMode, format: Format) -> Result<()> {
    let line = read_line(file)?;
    let (name, output) = match mode {
        TagMode::Escape => ("escape", escape_tag(&line)),
        TagMode::Unescape => ("unescape", unescape_tag(&line)),
    };

    match format {
        Format::Json => print_json(&TextReport {
            mode: name,
            output: &output,
        })?,
        Format::Pretty => println!("{output}"),
    }
    Ok(())
}

fn cmd_ctcp(file: Option<&str>, format: Format) -> Result<()> {
    let line = read_line(file)?;
    let ctcp = parse_ctcp(&line);

    match format {
        Format::Json => print_json(&CtcpReport { ctcp })?,
        Format::Pretty => match ctcp {
            Some(ctcp) => {
                println!("name: {}", ctcp.name);
                println!("body: {}", ctcp.body);
            }
            None => eprintln!("not a CTCP message"),
        },
    }

    if ctcp.is_none() {
        process::exit(1);
    }
    Ok(())
}

fn cmd_tokenize(file: Option<&str>, trailing: bool, format: Format) -> Result<()> {
    let line = read_line(file)?;
    let mut tokenizer = MessageTokenizer::new(&line);
    let tokens: Vec<&str> = if trailing {
        std::iter::from_fn(|| tokenizer.trailing()).collect()
    } else {
        tokenizer.collect()
    };

    match format {
        Format::Json => print_json(&TokenReport { trailing, tokens })?,
        Format::Pretty => {
            for token in &tokens {
                println!("{token}");
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Read all input bytes from `file`, or stdin for `None` / `-`.
fn read_input(file: Option<&str>) -> Result<Vec<u8>> {
    match file {
        None | Some("-") => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
        Some(path) => fs::read(path).with_context(|| format!("failed to read '{path}'")),
    }
}

/// Read one IRC line: lossily decoded, with a single trailing CRLF or LF
/// removed.
fn read_line(file: Option<&str>) -> Result<String> {
    let bytes = read_input(file)?;
    let mut line = String::from_utf8_lossy(&bytes).into_owned();
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

fn warn_unused_opts(codec: Codec, opts: &CodecOpts) {
    let base64 = matches!(codec, Codec::Base64 | Codec::Base64Url);
    if !base64 && (opts.padding.is_some() || opts.no_padding) {
        warn("--padding and --no-padding only apply to Base64");
    }
    if codec != Codec::Hex && opts.separator.is_some() {
        warn("--separator only applies to hex");
    }
    if base64 && opts.case.is_some() {
        warn("--case does not apply to Base64");
    }
}

fn base64_config(codec: Codec, opts: &CodecOpts) -> Result<Base64Config> {
    let defaults = match codec {
        Codec::Base64Url => Base64Config::url(),
        _ => Base64Config::default(),
    };
    let table = match opts.table.as_deref() {
        Some(symbols) => Base64Table::try_from_str(symbols).context("invalid --table")?,
        None if codec == Codec::Base64Url => BASE64_URL_TABLE,
        None => BASE64_TABLE,
    };
    let padding = if opts.no_padding {
        None
    } else {
        opts.padding.or(defaults.padding)
    };
    Ok(Base64Config { table, padding })
}

fn hex_config(opts: &CodecOpts) -> Result<HexConfig> {
    let table = match (opts.table.as_deref(), opts.case) {
        (Some(symbols), _) => HexTable::try_from_str(symbols).context("invalid --table")?,
        (None, Some(Case::Upper)) => HEX_TABLE_UPPER,
        (None, _) => HEX_TABLE_LOWER,
    };
    Ok(HexConfig {
        table,
        separator: opts.separator,
    })
}

fn percent_config(opts: &CodecOpts) -> Result<PercentConfig> {
    let safe = match opts.table.as_deref() {
        Some(members) => SafeSet::try_from_str(members).context("invalid --table")?,
        None => PERCENT_TABLE,
    };
    Ok(PercentConfig {
        safe,
        upper: opts.case != Some(Case::Lower),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn base64_url_defaults_unpadded() {
        let config = base64_config(Codec::Base64Url, &CodecOpts::default()).unwrap();
        assert_eq!(config, Base64Config::url());

        let opts = CodecOpts {
            padding: Some('='),
            ..Default::default()
        };
        let config = base64_config(Codec::Base64Url, &opts).unwrap();
        assert_eq!(config.padding, Some('='));
        assert_eq!(config.table, BASE64_URL_TABLE);
    }

    #[test]
    fn no_padding_overrides_default() {
        let opts = CodecOpts {
            no_padding: true,
            ..Default::default()
        };
        assert_eq!(base64_config(Codec::Base64, &opts).unwrap().padding, None);
    }

    #[test]
    fn hex_table_from_case() {
        let opts = CodecOpts {
            case: Some(Case::Upper),
            separator: Some(':'),
            ..Default::default()
        };
        assert_eq!(
            hex_config(&opts).unwrap(),
            HexConfig::upper().with_separator(':')
        );
    }

    #[test]
    fn bad_table_is_an_error() {
        let opts = CodecOpts {
            table: Some("abc".into()),
            ..Default::default()
        };
        let err = hex_config(&opts).unwrap_err();
        assert!(format!("{err:#}").contains("16 symbols"), "{err:#}");
        assert!(base64_config(Codec::Base64, &opts).is_err());
        assert!(percent_config(&opts).is_ok());
    }
}
