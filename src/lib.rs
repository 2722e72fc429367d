//! Reads and writes fixed-width numbers, raw byte strings and UTF-16/UTF-32 text at a cursor
//! within a seekable byte stream, with a configurable byte order.
//!
//! # Encoding rules
//!
//! | Method | Width | Byte order |
//! |---|---|---|
//! | `i8`, `u8` | 1 | n/a |
//! | `i16`, `i32`, `i64` | 2, 4, 8 | host |
//! | `i16_ordered`, `i32_ordered`, `i64_ordered` | 2, 4, 8 | configured |
//! | `u16`, `u32`, `u64` | 2, 4, 8 | configured |
//! | `f32`, `f64` | 4, 8 | configured |
//! | UTF-16 / UTF-32 text | 2 / 4 per code unit | configured |
//!
//! The configured byte order defaults to the host's ([`Endian::detect`]).
//!
//! Strings are raw byte runs. Nothing is length-prefixed or padded, so a reader must know how
//! many bytes to ask for.
//!
//! A scalar read with too little data left returns the zero value of its type by default.
//! See [`ReadPolicy`] for the strict alternative.
//!
//! Seeking is not silent in the other direction: moving the cursor before offset 0 with
//! [`ByteStream::skip_position`] fails with [`StreamError::Io`]. The cursor stays where it was,
//! so callers that expect a failed seek to be ignored can discard the error. Seeking past the
//! end is allowed and simply makes the next reads short.
//!
//! ```
//! use endian_stream::{ByteStream, Endian};
//!
//! let mut s = ByteStream::new();
//! s.set_endian(Endian::Big);
//! s.write_u16(0x0102)?;
//! s.write_string("hello")?;
//! assert_eq!(s.as_bytes(), b"\x01\x02hello");
//!
//! s.reset_position()?;
//! assert_eq!(s.read_u16()?, 0x0102);
//! assert_eq!(s.read_string(5)?, b"hello");
//! assert_eq!(s.read_u32()?, 0); // nothing left
//! # Ok::<(), endian_stream::StreamError>(())
//! ```

#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

mod endian;
mod error;
mod reader;
pub mod storage;
mod stream;
pub mod text;
mod writer;


pub use endian::{convert, Endian, Scalar};
pub use error::{Result, StreamError};
pub use storage::{Handle, MemoryBuffer, Storage};
pub use stream::{ByteStream, ReadPolicy, StreamOptions};
pub use text::TextEncoding;
