//! # frameline
//!
//! A **buffered, incremental reader for HTTP wire framing**: CRLF-terminated
//! lines, exact-length byte runs, and chunked transfer-encoded bodies, read
//! from a byte source that delivers data in arbitrary fragments (partial
//! reads, terminators split across fragments, delayed arrival, early
//! connection closure).
//!
//! The reader owns a fixed-capacity scratch buffer that is reused across
//! calls; every operation returns a freshly allocated result independent of
//! the buffer's lifetime. The source is abstracted behind the narrow
//! [`ByteSource`] capability so tests can substitute a scripted, slow-peer
//! fake without any real networking.
//!
//! ## Quick start — reading framed data
//!
//! ```rust
//! use frameline::{FrameReader, IoSource};
//!
//! let wire: &[u8] = b"HTTP/1.1 200 OK\r\nWiki\r\npedia";
//! let mut reader = FrameReader::new(IoSource::new(wire), 64);
//!
//! assert_eq!(reader.read_line().unwrap(), "HTTP/1.1 200 OK");
//! // Bytes after the line stay pending and can be read by exact length.
//! assert_eq!(reader.read_exact(11).unwrap(), b"Wiki\r\npedia");
//! ```
//!
//! ## Quick start — one-shot chunked decoding
//!
//! ```rust
//! use frameline::decode_chunked;
//!
//! let body = decode_chunked(b"4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n").unwrap();
//! assert_eq!(body, b"Wikipedia");
//! ```

mod error;
mod output;
mod reader;
mod source;

// Re-export public API.
pub use error::ReadError;
pub use output::{FrameReport, format_debug, format_json};
pub use reader::{DEFAULT_SCRATCH_CAPACITY, FrameReader};
pub use source::{ByteSource, Detached, IoSource};

/// Decode a chunked transfer-encoded body from a byte slice in one call.
///
/// This is a convenience wrapper around [`FrameReader`]. For streaming
/// sources or custom scratch capacities, create a `FrameReader` directly.
///
/// # Errors
///
/// Returns [`ReadError`] if the data is malformed or truncated.
pub fn decode_chunked(data: &[u8]) -> Result<Vec<u8>, ReadError> {
    decode_chunked_with_capacity(data, DEFAULT_SCRATCH_CAPACITY)
}

/// Decode a chunked transfer-encoded body using a chosen scratch capacity.
///
/// # Errors
///
/// Returns [`ReadError`] if the data is malformed or truncated.
///
/// # Panics
///
/// Panics if `capacity < 2`.
pub fn decode_chunked_with_capacity(data: &[u8], capacity: usize) -> Result<Vec<u8>, ReadError> {
    FrameReader::new(IoSource::new(data), capacity).read_chunked_body()
}
