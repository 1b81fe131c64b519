use std::io;

/// A pull-style byte stream consumed by [`FrameReader`](crate::FrameReader).
///
/// This is a deliberately narrow capability: fill a caller-supplied region
/// and report how many bytes were written. It lets tests substitute a
/// scripted, fragment-pacing fake source without any real networking.
pub trait ByteSource {
    /// Pull available bytes into `dest`.
    ///
    /// Returns the number of bytes written, or `Ok(0)` once the stream has
    /// ended and no further bytes will ever arrive. Implementations must
    /// never report more bytes than `dest` can hold.
    ///
    /// # Errors
    ///
    /// Returns the source's own `io::Error` on failure.
    fn pull(&mut self, dest: &mut [u8]) -> io::Result<usize>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn pull(&mut self, dest: &mut [u8]) -> io::Result<usize> {
        (**self).pull(dest)
    }
}

// ---------------------------------------------------------------------------
// IoSource
// ---------------------------------------------------------------------------

/// Adapter exposing any [`std::io::Read`] value as a [`ByteSource`].
///
/// Covers the common cases: TCP streams, byte slices, files, pipes.
///
/// ```rust
/// use frameline::{ByteSource, IoSource};
///
/// let mut source = IoSource::new(&b"abc"[..]);
/// let mut region = [0u8; 8];
/// assert_eq!(source.pull(&mut region).unwrap(), 3);
/// ```
#[derive(Debug)]
pub struct IoSource<R>(R);

impl<R: io::Read> IoSource<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self(reader)
    }

    /// Unwrap, returning the inner reader.
    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<R: io::Read> ByteSource for IoSource<R> {
    fn pull(&mut self, dest: &mut [u8]) -> io::Result<usize> {
        self.0.read(dest)
    }
}

// ---------------------------------------------------------------------------
// Detached
// ---------------------------------------------------------------------------

/// Placeholder source for readers built from preloaded bytes only.
///
/// A detached reader asserts that every operation is satisfiable from bytes
/// it was handed up front. Pulling from `Detached` is therefore a caller
/// bug, not a recoverable condition, and panics.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl ByteSource for Detached {
    fn pull(&mut self, _dest: &mut [u8]) -> io::Result<usize> {
        panic!("pull attempted on a detached reader: preloaded bytes were exhausted");
    }
}
