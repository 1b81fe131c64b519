use std::io::{IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};

use frameline::{FrameReader, FrameReport, IoSource, format_debug, format_json};

/// frameline CLI — HTTP wire framing decoder.
///
/// Reads raw bytes from a file, --raw string, or stdin and applies one
/// framing operation: a CRLF-terminated line, an exact-length byte run, or
/// a chunked transfer-encoded body.
///
/// Escape sequences (\r, \n, \t, \\) in the --raw value are interpreted so
/// you can pass a framed stream as a single shell argument.
#[derive(Parser)]
#[command(name = "frameline-cli", version, about, long_about = None)]
struct Cli {
    /// Path to a file containing the raw byte stream.
    /// Reads from stdin when neither FILE nor --raw is given.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Raw stream string (escape sequences \r \n \t \\ are expanded).
    #[arg(long)]
    raw: Option<String>,

    /// Framing operation to apply.
    #[arg(short, long, default_value = "chunked", value_enum)]
    op: Operation,

    /// Number of bytes to read (only meaningful with --op bytes).
    #[arg(short = 'n', long, default_value = "0")]
    count: usize,

    /// Scratch buffer capacity in bytes (minimum 2).
    #[arg(long, default_value = "8192")]
    capacity: usize,

    /// Output format.
    #[arg(short, long, default_value = "json", value_enum)]
    format: OutputFormat,

    /// Pretty-print JSON output (ignored for other formats).
    #[arg(short, long)]
    pretty: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum Operation {
    /// One CRLF-terminated line
    Line,
    /// An exact-length byte run (--count)
    Bytes,
    /// A chunked transfer-encoded body
    Chunked,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable debug output
    Debug,
    /// Payload bytes verbatim
    Raw,
}

fn main() {
    let cli = Cli::parse();

    // When no input source is provided and stdin is a terminal (not piped),
    // show help instead of blocking.
    if cli.file.is_none() && cli.raw.is_none() && std::io::stdin().is_terminal() {
        Cli::command().print_help().ok();
        println!();
        process::exit(0);
    }

    if cli.capacity < 2 {
        eprintln!("Error: --capacity must be at least 2");
        process::exit(1);
    }

    let data = match read_input(&cli) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading input: {e}");
            process::exit(1);
        }
    };

    if data.is_empty() {
        eprintln!("Error: empty input");
        process::exit(1);
    }

    let mut reader = FrameReader::new(IoSource::new(data.as_slice()), cli.capacity);

    let result = match cli.op {
        Operation::Line => reader.read_line().map(|l| FrameReport::new("line", l.into_bytes())),
        Operation::Bytes => reader
            .read_exact(cli.count)
            .map(|b| FrameReport::new("bytes", b)),
        Operation::Chunked => reader
            .read_chunked_body()
            .map(|b| FrameReport::new("chunked", b)),
    };

    let report = match result {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Framing error: {e}");
            process::exit(2);
        }
    };

    match cli.format {
        OutputFormat::Json => print!("{}", format_json(&report, cli.pretty)),
        OutputFormat::Debug => print!("{}", format_debug(&report)),
        OutputFormat::Raw => {
            if std::io::stdout().write_all(&report.payload).is_err() {
                process::exit(1);
            }
        }
    }
}

/// Read the raw byte stream from --raw, a file, or stdin.
fn read_input(cli: &Cli) -> Result<Vec<u8>, std::io::Error> {
    if let Some(raw) = &cli.raw {
        return Ok(unescape(raw).into_bytes());
    }
    match &cli.file {
        Some(path) => std::fs::read(path),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Expand C-style escape sequences (`\r`, `\n`, `\t`, `\\`) in a string.
///
/// Any other `\X` sequence is kept as-is (both the backslash and `X`).
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('r') => out.push('\r'),
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('\\') => out.push('\\'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}
