use std::fmt;
use std::io;

/// Errors that can occur while reading framed data from a byte stream.
#[derive(Debug)]
pub enum ReadError {
    /// The stream ended while scanning for a `CRLF` line terminator.
    UnterminatedLine,
    /// The stream ended before a requested exact byte count, a chunk
    /// payload, or a chunk terminator line was fully available.
    TruncatedRead,
    /// A chunk-size line does not start with a valid hexadecimal integer.
    MalformedChunkSize(String),
    /// The underlying byte source reported a failure of its own
    /// (not a benign end-of-stream). Propagated verbatim.
    Source(io::Error),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedLine => {
                write!(f, "stream ended before a CRLF line terminator was found")
            }
            Self::TruncatedRead => {
                write!(f, "stream ended before the requested bytes were available")
            }
            Self::MalformedChunkSize(line) => write!(f, "invalid chunk size line: '{line}'"),
            Self::Source(e) => write!(f, "byte source error: {e}"),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Source(e) => Some(e),
            _ => None,
        }
    }
}
