//! Position-tracking reader over a borrowed byte buffer

use byteorder::{ByteOrder, LittleEndian};

use crate::error::CursorError;

/// Little-endian cursor over a caller-owned byte buffer.
///
/// Every successful read advances the offset by exactly the width of the
/// value read. A failed read leaves the offset untouched, so the offset always
/// stays within `[0, len]`.
///
/// # Example
///
/// ```
/// use nexus_binary::ByteCursor;
///
/// let data = [0x01, 0x00, 0x00, 0x00, 0x80, 0x3F];
/// let mut cursor = ByteCursor::new(&data);
///
/// assert_eq!(cursor.read_u16().unwrap(), 1);
/// assert_eq!(cursor.read_f32().unwrap(), 1.0);
/// assert!(cursor.is_exhausted());
/// ```
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `buf`
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Create a cursor positioned at `offset`
    ///
    /// An offset equal to the buffer length is allowed (nothing left to read).
    pub fn with_offset(buf: &'a [u8], offset: usize) -> Result<Self, CursorError> {
        if offset > buf.len() {
            return Err(CursorError::OffsetOutOfRange {
                offset,
                len: buf.len(),
            });
        }
        Ok(Self { buf, offset })
    }

    /// Bytes consumed so far
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total length of the underlying buffer
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the underlying buffer is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes left between the offset and the end of the buffer
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Whether every byte has been consumed
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.offset == self.buf.len()
    }

    /// The unread tail of the buffer
    pub fn as_slice(&self) -> &'a [u8] {
        &self.buf[self.offset..]
    }

    /// Release the underlying buffer
    pub fn into_inner(self) -> &'a [u8] {
        self.buf
    }

    /// Advance past `count` bytes without decoding them
    pub fn skip(&mut self, count: usize) -> Result<(), CursorError> {
        self.take(count).map(|_| ())
    }

    /// Read a little-endian `u16` and advance by 2
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16, CursorError> {
        self.take(2).map(LittleEndian::read_u16)
    }

    /// Read a little-endian `u32` and advance by 4
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, CursorError> {
        self.take(4).map(LittleEndian::read_u32)
    }

    /// Read a little-endian `u64` and advance by 8
    ///
    /// The full 64-bit range is preserved. Values are not routed through a
    /// floating-point combination of two 32-bit halves, so nothing is lost
    /// above 2^53.
    #[inline]
    pub fn read_u64(&mut self) -> Result<u64, CursorError> {
        self.take(8).map(LittleEndian::read_u64)
    }

    /// Read a little-endian IEEE-754 `f32` and advance by 4
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32, CursorError> {
        self.take(4).map(LittleEndian::read_f32)
    }

    /// Read `N` consecutive little-endian `f32` values
    ///
    /// Either all `N` values are read or the offset is left unchanged.
    pub fn read_f32_array<const N: usize>(&mut self) -> Result<[f32; N], CursorError> {
        let bytes = self.take(N * 4)?;
        let mut out = [0.0f32; N];
        LittleEndian::read_f32_into(bytes, &mut out);
        Ok(out)
    }

    /// Borrow the next `width` bytes and advance past them
    fn take(&mut self, width: usize) -> Result<&'a [u8], CursorError> {
        let end = match self.offset.checked_add(width) {
            Some(end) if end <= self.buf.len() => end,
            _ => {
                tracing::debug!(
                    offset = self.offset,
                    width,
                    len = self.buf.len(),
                    "cursor read out of bounds"
                );
                return Err(CursorError::OutOfBounds {
                    offset: self.offset,
                    width,
                    len: self.buf.len(),
                });
            }
        };
        let bytes = &self.buf[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }
}
