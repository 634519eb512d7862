//! Cursor error types

/// Errors raised while decoding from a [`ByteCursor`](crate::ByteCursor)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// A read needed more bytes than remain in the buffer
    #[error("read of {width} bytes at offset {offset} exceeds buffer length {len}")]
    OutOfBounds {
        /// Offset the read started at
        offset: usize,
        /// Number of bytes requested
        width: usize,
        /// Total buffer length
        len: usize,
    },

    /// A starting offset was placed past the end of the buffer
    #[error("offset {offset} is past the end of a {len}-byte buffer")]
    OffsetOutOfRange { offset: usize, len: usize },
}
