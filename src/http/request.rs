/// Maximum accepted request-line length. A request that fills the buffer
/// without completing its request-line is answered with 400.
pub const REQUEST_CAPACITY: usize = 2400;

/// One in-flight client request being accumulated across reads.
///
/// The buffer is fixed-capacity and never reallocated. The cursor fields
/// record where parsing left off so that each call to
/// [`parser::advance`](crate::http::parser::advance) only examines bytes it
/// has not classified before. Cursors are plain offsets into `buf` and only
/// ever move forward.
pub struct Request {
    buf: [u8; REQUEST_CAPACITY],
    len: usize,
    /// True once the literal prefix `GET /` has been confirmed. Never
    /// reverts within a request's lifetime.
    pub(crate) method_ok: bool,
    /// Offset of the `/` opening the abs_path, once the method is validated.
    pub(crate) uri_start: usize,
    /// First offset not yet searched for the space ending the URI.
    pub(crate) scan_from: usize,
    /// Offset of the space ending the URI, once found.
    pub(crate) space_at: Option<usize>,
}

impl Request {
    pub fn new() -> Self {
        Self {
            buf: [0; REQUEST_CAPACITY],
            len: 0,
            method_ok: false,
            uri_start: 0,
            scan_from: 0,
            space_at: None,
        }
    }

    /// The bytes received so far.
    pub fn filled(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The writable remainder of the buffer.
    pub fn unfilled(&mut self) -> &mut [u8] {
        &mut self.buf[self.len..]
    }

    /// Marks `n` more bytes of `unfilled` as received.
    pub fn commit(&mut self, n: usize) {
        debug_assert!(n <= REQUEST_CAPACITY - self.len);
        self.len += n;
    }

    /// Copies as much of `bytes` as fits and commits it. Returns the number
    /// of bytes taken.
    pub fn push(&mut self, bytes: &[u8]) -> usize {
        let n = bytes.len().min(REQUEST_CAPACITY - self.len);
        self.buf[self.len..self.len + n].copy_from_slice(&bytes[..n]);
        self.len += n;
        n
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when no more bytes can be accepted.
    pub fn is_full(&self) -> bool {
        self.len == REQUEST_CAPACITY
    }

    /// Whether the `GET /` prefix has been confirmed yet.
    pub fn method_validated(&self) -> bool {
        self.method_ok
    }

    /// Offset of the URI's opening slash. Meaningful only once the method
    /// has been validated.
    pub fn uri_offset(&self) -> usize {
        self.uri_start
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}
