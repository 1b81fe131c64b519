use crate::error::ReadError;
use crate::source::{ByteSource, Detached};

/// Default scratch capacity used by the one-shot helpers and the CLI.
pub const DEFAULT_SCRATCH_CAPACITY: usize = 8 * 1024;

// ---------------------------------------------------------------------------
// Refill outcome
// ---------------------------------------------------------------------------

/// Outcome of a `refill` call. End-of-stream is surfaced, not failed
/// eagerly: each operation decides whether partial data is acceptable.
enum Refill {
    /// The requested number of pending bytes is available.
    Ready,
    /// The source ended before the request could be satisfied.
    EndOfStream,
}

// ---------------------------------------------------------------------------
// Chunked-body state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkState {
    /// Expecting a hexadecimal chunk-size line.
    Size,
    /// Expecting this many raw payload bytes.
    Payload(usize),
    /// Expecting the CRLF line that follows a payload.
    Terminator,
    /// A zero-size chunk was seen: one last terminator line, then done.
    FinalTerminator,
}

// ---------------------------------------------------------------------------
// FrameReader
// ---------------------------------------------------------------------------

/// A buffered, incremental reader for HTTP wire framing.
///
/// Owns a fixed-capacity scratch buffer plus a connected [`ByteSource`] and
/// exposes three framing operations: a CRLF-terminated line, an exact-length
/// byte run, and a chunked transfer-encoded body. The scratch buffer is
/// reused across calls; each operation returns a freshly allocated result
/// that outlives it.
///
/// Bytes sit in the scratch buffer between a read cursor and a write cursor
/// ("pending" bytes: received but not yet returned). Pending bytes are
/// always consumed before the source is pulled again.
///
/// # Usage
///
/// ```rust
/// use frameline::{FrameReader, IoSource};
///
/// let wire: &[u8] = b"HTTP/1.1 200 OK\r\n4\r\nWiki\r\n0\r\n\r\n";
/// let mut reader = FrameReader::new(IoSource::new(wire), 64);
///
/// assert_eq!(reader.read_line().unwrap(), "HTTP/1.1 200 OK");
/// assert_eq!(reader.read_chunked_body().unwrap(), b"Wiki");
/// ```
///
/// A `FrameReader` is not safe for concurrent use: it assumes sequential,
/// non-overlapping calls.
pub struct FrameReader<S> {
    source: S,
    buf: Box<[u8]>,
    /// First unread byte. Invariant: `read_pos <= write_pos <= buf.len()`.
    read_pos: usize,
    /// First free slot.
    write_pos: usize,
}

impl FrameReader<Detached> {
    /// Build a reader over preloaded bytes with no live source.
    ///
    /// Every operation must be satisfiable from `preload` alone; an
    /// operation that would need a source pull panics (see [`Detached`]).
    ///
    /// # Panics
    ///
    /// Panics if `capacity < 2` or `preload` does not fit in `capacity`.
    pub fn detached(capacity: usize, preload: &[u8]) -> Self {
        Self::with_preload(Detached, capacity, preload)
    }
}

impl<S: ByteSource> FrameReader<S> {
    /// Create a reader over `source` with a scratch buffer of `capacity`
    /// bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity < 2` (the CRLF scan needs a two-byte window).
    pub fn new(source: S, capacity: usize) -> Self {
        Self::with_preload(source, capacity, &[])
    }

    /// Create a reader whose scratch buffer starts out holding `preload`.
    ///
    /// The preload is treated as already pending: bytes a caller consumed
    /// from the source out-of-band (e.g. while sniffing a protocol) are
    /// returned before any source pull occurs.
    ///
    /// # Panics
    ///
    /// Panics if `capacity < 2` or `preload` does not fit in `capacity`.
    pub fn with_preload(source: S, capacity: usize, preload: &[u8]) -> Self {
        assert!(capacity >= 2, "scratch capacity must be at least 2 bytes");
        assert!(
            preload.len() <= capacity,
            "preload ({} bytes) exceeds scratch capacity ({capacity} bytes)",
            preload.len()
        );
        let mut buf = vec![0u8; capacity].into_boxed_slice();
        buf[..preload.len()].copy_from_slice(preload);
        Self {
            source,
            buf,
            read_pos: 0,
            write_pos: preload.len(),
        }
    }

    fn pending(&self) -> usize {
        self.write_pos - self.read_pos
    }

    fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Shift pending bytes to the start of the scratch buffer so the free
    /// region behind the write cursor is as large as possible.
    fn compact(&mut self) {
        if self.read_pos == 0 {
            return;
        }
        self.buf.copy_within(self.read_pos..self.write_pos, 0);
        self.write_pos -= self.read_pos;
        self.read_pos = 0;
    }

    /// Ensure at least `target` pending bytes, compacting and pulling from
    /// the source as needed. `target` must not exceed the scratch capacity.
    fn refill(&mut self, target: usize) -> Result<Refill, ReadError> {
        debug_assert!(target <= self.capacity());
        if self.pending() >= target {
            return Ok(Refill::Ready);
        }
        self.compact();
        while self.pending() < target {
            let pulled = self
                .source
                .pull(&mut self.buf[self.write_pos..])
                .map_err(ReadError::Source)?;
            if pulled == 0 {
                return Ok(Refill::EndOfStream);
            }
            self.write_pos += pulled;
        }
        Ok(Refill::Ready)
    }

    /// Read one line terminated by the exact two-byte sequence `CR LF`.
    ///
    /// A lone `CR` or a lone `LF` is ordinary content, never a terminator.
    /// The returned text excludes the terminator and is decoded one byte
    /// per character (ISO-8859-1); bytes after the terminator stay pending
    /// and undecoded, so binary or multi-byte content following a line is
    /// untouched.
    ///
    /// # Errors
    ///
    /// [`ReadError::UnterminatedLine`] if the stream ends before a `CRLF`
    /// is found; [`ReadError::Source`] on a source failure.
    pub fn read_line(&mut self) -> Result<String, ReadError> {
        let mut line: Vec<u8> = Vec::new();
        // Offset, relative to the read cursor, of the first pending byte not
        // yet ruled out as the start of a CRLF pair. Relative offsets survive
        // compaction, so no byte is ever re-scanned across refills.
        let mut scanned = 0usize;
        loop {
            let pending = self.pending();
            let window = &self.buf[self.read_pos..self.write_pos];
            let mut found = None;
            while scanned + 1 < pending {
                if window[scanned] == b'\r' && window[scanned + 1] == b'\n' {
                    found = Some(scanned);
                    break;
                }
                scanned += 1;
            }

            if let Some(at) = found {
                line.extend_from_slice(&self.buf[self.read_pos..self.read_pos + at]);
                self.read_pos += at + 2;
                return Ok(decode_single_byte(&line));
            }

            if pending == self.capacity() {
                // Scratch is full with no terminator in sight: spill all but
                // the final byte into the accumulator (the last byte may be
                // the CR of a CRLF split across fragments) so refill has
                // room to work with.
                let spill = pending - 1;
                line.extend_from_slice(&self.buf[self.read_pos..self.read_pos + spill]);
                self.read_pos += spill;
                scanned = 0;
            }

            match self.refill(self.pending() + 1)? {
                Refill::Ready => {}
                Refill::EndOfStream => return Err(ReadError::UnterminatedLine),
            }
        }
    }

    /// Read exactly `n` raw bytes.
    ///
    /// Pending bytes are drained first; any remainder is pulled straight
    /// into the output, so `n` may exceed the scratch capacity. `n = 0`
    /// returns an empty result without touching the source.
    ///
    /// # Errors
    ///
    /// [`ReadError::TruncatedRead`] if the stream ends before `n` bytes
    /// were accumulated; [`ReadError::Source`] on a source failure.
    pub fn read_exact(&mut self, n: usize) -> Result<Vec<u8>, ReadError> {
        let take = n.min(self.pending());
        let mut out = Vec::with_capacity(n);
        out.extend_from_slice(&self.buf[self.read_pos..self.read_pos + take]);
        self.read_pos += take;

        if take < n {
            out.resize(n, 0);
            let mut filled = take;
            while filled < n {
                let pulled = self
                    .source
                    .pull(&mut out[filled..])
                    .map_err(ReadError::Source)?;
                if pulled == 0 {
                    return Err(ReadError::TruncatedRead);
                }
                filled += pulled;
            }
        }
        Ok(out)
    }

    /// Decode a chunked transfer-encoded body, returning the concatenated
    /// payload bytes.
    ///
    /// Each chunk is a hexadecimal size line (case-insensitive; anything
    /// after the leading hex digits, such as a `;name=value` extension, is
    /// ignored), the payload read by exact length, and a discarded CRLF
    /// terminator line. A zero-size chunk ends the body after one final
    /// terminator line. Payload bytes are framed by length, never by line
    /// scanning, so a CRLF inside a chunk is preserved as content. Trailer
    /// fields are not supported.
    ///
    /// # Errors
    ///
    /// [`ReadError::MalformedChunkSize`] for a size line with no leading
    /// hex digits; [`ReadError::TruncatedRead`] if the stream ends inside a
    /// payload or terminator; [`ReadError::UnterminatedLine`] if it ends
    /// inside a size line; [`ReadError::Source`] on a source failure.
    pub fn read_chunked_body(&mut self) -> Result<Vec<u8>, ReadError> {
        let mut body = Vec::new();
        let mut state = ChunkState::Size;
        loop {
            state = match state {
                ChunkState::Size => {
                    let line = self.read_line()?;
                    let size = parse_chunk_size(&line)?;
                    if size == 0 {
                        ChunkState::FinalTerminator
                    } else {
                        ChunkState::Payload(size)
                    }
                }
                ChunkState::Payload(size) => {
                    let mut payload = self.read_exact(size)?;
                    body.append(&mut payload);
                    ChunkState::Terminator
                }
                ChunkState::Terminator => {
                    self.discard_terminator()?;
                    ChunkState::Size
                }
                ChunkState::FinalTerminator => {
                    self.discard_terminator()?;
                    return Ok(body);
                }
            };
        }
    }

    /// Consume the CRLF line that follows a chunk payload or the final
    /// zero-size chunk. Running out of stream here is a truncation, not an
    /// unterminated line: the chunk framing promised the terminator.
    fn discard_terminator(&mut self) -> Result<(), ReadError> {
        match self.read_line() {
            Ok(_) => Ok(()),
            Err(ReadError::UnterminatedLine) => Err(ReadError::TruncatedRead),
            Err(e) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Decode bytes one byte per character (ISO-8859-1). Only bytes preceding a
/// CRLF terminator ever reach this, so no multi-byte sequence is mangled.
fn decode_single_byte(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Parse the hexadecimal size at the start of a chunk-size line. Text after
/// the hex digits (a chunk extension) is ignored.
fn parse_chunk_size(line: &str) -> Result<usize, ReadError> {
    let end = line
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(line.len());
    let digits = &line[..end];
    if digits.is_empty() {
        return Err(ReadError::MalformedChunkSize(line.to_string()));
    }
    usize::from_str_radix(digits, 16).map_err(|_| ReadError::MalformedChunkSize(line.to_string()))
}

// ---------------------------------------------------------------------------
// Tests (unit)
// ---------------------------------------------------------------------------
