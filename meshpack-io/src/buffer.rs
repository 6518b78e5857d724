//! Cursor over an in-memory byte stream.

/// A read cursor over a contiguous byte buffer.
///
/// Combines the two access styles STL needs: fixed-width little-endian
/// scalar reads for the binary format and whitespace-delimited token
/// scanning for the ASCII format. Every read advances the cursor; short
/// reads return `None` and leave the cursor where it was.
///
/// Whitespace is any run of space, tab, CR, or LF.
///
/// # Example
///
/// ```
/// use meshpack_io::DecoderBuffer;
///
/// let mut buf = DecoderBuffer::new(b"  solid cube");
/// buf.skip_whitespace();
/// assert_eq!(buf.next_token(), Some(&b"solid"[..]));
/// assert_eq!(buf.next_token(), Some(&b"cube"[..]));
/// assert_eq!(buf.next_token(), None);
/// ```
#[derive(Debug)]
pub struct DecoderBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

impl<'a> DecoderBuffer<'a> {
    /// Bind a cursor to the start of `data`.
    #[inline]
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current cursor offset from the start of the buffer.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Seek to an absolute offset. Offsets past the end pin to the end.
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.data.len());
    }

    /// Bytes left between the cursor and the end of the buffer.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Move the cursor forward `n` bytes, pinning to the end of the buffer.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.data.len());
    }

    /// Read `n` bytes, or `None` if fewer remain.
    #[inline]
    pub fn read_bytes(&mut self, n: usize) -> Option<&'a [u8]> {
        if self.remaining() < n {
            return None;
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Some(bytes)
    }

    /// Read a little-endian `u16`.
    #[inline]
    pub fn read_u16(&mut self) -> Option<u16> {
        let b = self.read_bytes(2)?;
        Some(u16::from_le_bytes([b[0], b[1]]))
    }

    /// Read a little-endian `u32`.
    #[inline]
    pub fn read_u32(&mut self) -> Option<u32> {
        let b = self.read_bytes(4)?;
        Some(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read a little-endian `f32`.
    #[inline]
    pub fn read_f32(&mut self) -> Option<f32> {
        let b = self.read_bytes(4)?;
        Some(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Advance over any run of space, tab, CR, or LF.
    pub fn skip_whitespace(&mut self) {
        while self.pos < self.data.len() && is_space(self.data[self.pos]) {
            self.pos += 1;
        }
    }

    /// The next maximal run of non-whitespace bytes after optional leading
    /// whitespace, or `None` at the end of the buffer.
    ///
    /// Tokens are raw bytes: keyword comparison works on any input, and
    /// callers needing text convert (and may reject) themselves.
    pub fn next_token(&mut self) -> Option<&'a [u8]> {
        self.skip_whitespace();
        let start = self.pos;
        while self.pos < self.data.len() && !is_space(self.data[self.pos]) {
            self.pos += 1;
        }
        if self.pos == start {
            None
        } else {
            Some(&self.data[start..self.pos])
        }
    }
}
