//! Nexus-Binary: little-endian byte cursor for streamed 3D model data
//!
//! A decoder owns a raw byte buffer (header, vertex, and transform chunks of a
//! streamed model) and pulls fixed-width scalars out of it one after another.
//! [`ByteCursor`] tracks the read position and bounds-checks every read.
//!
//! # Supported scalars
//!
//! | Method          | Width | Result |
//! |-----------------|-------|--------|
//! | `read_u16`      | 2     | `u16`  |
//! | `read_u32`      | 4     | `u32`  |
//! | `read_u64`      | 8     | `u64` (full 64-bit precision) |
//! | `read_f32`      | 4     | `f32`  |
//!
//! All values are little-endian. A read that runs past the end of the buffer
//! returns [`CursorError::OutOfBounds`] and does not move the cursor; the
//! caller decides whether to abort the decode.
//!
//! # Usage
//!
//! ```
//! use nexus_binary::ByteCursor;
//!
//! // vertex_count: u32, index_count: u32, then one f32 scale
//! let data = [3, 0, 0, 0, 6, 0, 0, 0, 0x00, 0x00, 0x00, 0x40];
//! let mut cursor = ByteCursor::new(&data);
//!
//! let vertex_count = cursor.read_u32()?;
//! let index_count = cursor.read_u32()?;
//! let scale = cursor.read_f32()?;
//!
//! assert_eq!((vertex_count, index_count, scale), (3, 6, 2.0));
//! # Ok::<(), nexus_binary::CursorError>(())
//! ```

mod cursor;
mod error;

pub use cursor::ByteCursor;
pub use error::CursorError;
