use core::fmt::Display;
use std::io::Write;

use log::debug;

use crate::storage::Storage;
use crate::text::{self, TextEncoding};
use crate::{ByteStream, Endian, Result, Scalar, StreamError};

/// Typed writes.
///
/// Integer writes accept any integer type and check that the value fits the target type before
/// anything is written; a value out of range fails with `StreamError::Range` and leaves the
/// stream unchanged. Byte order follows the same rules as the reads: host order for `write_i16`,
/// `write_i32` and `write_i64`, configured order for everything else.
impl<S: Storage + Write> ByteStream<S> {
    /// Writes one value of any `Scalar` type in the given byte order.
    pub fn write_scalar<T: Scalar>(&mut self, value: T, endian: Endian) -> Result<()> {
        let bytes = value.encode(endian);
        self.write_bytes(bytes.as_ref())
    }

    /// Writes `bytes` to the output.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.storage.write_all(bytes)?;
        Ok(())
    }

    /// Writes a single `i8` value (−128…127).
    pub fn write_i8<V: TryInto<i8> + Copy + Display>(&mut self, value: V) -> Result<()> {
        let value = in_range(value, "signed 8-bit integer")?;
        self.write_scalar::<i8>(value, Endian::NATIVE)
    }

    /// Writes a single `u8` value (0…255).
    pub fn write_u8<V: TryInto<u8> + Copy + Display>(&mut self, value: V) -> Result<()> {
        let value = in_range(value, "unsigned 8-bit integer")?;
        self.write_scalar::<u8>(value, Endian::NATIVE)
    }

    /// Writes an `i16` in host byte order.
    pub fn write_i16<V: TryInto<i16> + Copy + Display>(&mut self, value: V) -> Result<()> {
        let value = in_range(value, "signed 16-bit integer")?;
        self.write_scalar::<i16>(value, Endian::NATIVE)
    }

    /// Writes an `i16` in the configured byte order.
    pub fn write_i16_ordered<V: TryInto<i16> + Copy + Display>(&mut self, value: V) -> Result<()> {
        let value = in_range(value, "signed 16-bit integer")?;
        self.write_scalar::<i16>(value, self.endian)
    }

    /// Writes a `u16` in the configured byte order.
    pub fn write_u16<V: TryInto<u16> + Copy + Display>(&mut self, value: V) -> Result<()> {
        let value = in_range(value, "unsigned 16-bit integer")?;
        self.write_scalar::<u16>(value, self.endian)
    }

    /// Writes an `i32` in host byte order.
    pub fn write_i32<V: TryInto<i32> + Copy + Display>(&mut self, value: V) -> Result<()> {
        let value = in_range(value, "signed 32-bit integer")?;
        self.write_scalar::<i32>(value, Endian::NATIVE)
    }

    /// Writes an `i32` in the configured byte order.
    pub fn write_i32_ordered<V: TryInto<i32> + Copy + Display>(&mut self, value: V) -> Result<()> {
        let value = in_range(value, "signed 32-bit integer")?;
        self.write_scalar::<i32>(value, self.endian)
    }

    /// Writes a `u32` in the configured byte order.
    pub fn write_u32<V: TryInto<u32> + Copy + Display>(&mut self, value: V) -> Result<()> {
        let value = in_range(value, "unsigned 32-bit integer")?;
        self.write_scalar::<u32>(value, self.endian)
    }

    /// Writes an `i64` in host byte order.
    pub fn write_i64<V: TryInto<i64> + Copy + Display>(&mut self, value: V) -> Result<()> {
        let value = in_range(value, "signed 64-bit integer")?;
        self.write_scalar::<i64>(value, Endian::NATIVE)
    }

    /// Writes an `i64` in the configured byte order.
    pub fn write_i64_ordered<V: TryInto<i64> + Copy + Display>(&mut self, value: V) -> Result<()> {
        let value = in_range(value, "signed 64-bit integer")?;
        self.write_scalar::<i64>(value, self.endian)
    }

    /// Writes a `u64` in the configured byte order.
    pub fn write_u64<V: TryInto<u64> + Copy + Display>(&mut self, value: V) -> Result<()> {
        let value = in_range(value, "unsigned 64-bit integer")?;
        self.write_scalar::<u64>(value, self.endian)
    }

    /// Writes an `f32` value using its 4-byte IEEE 754 representation, in the configured byte
    /// order.
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_scalar(value, self.endian)
    }

    /// Writes an `f64` value using its 8-byte IEEE 754 representation, in the configured byte
    /// order.
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_scalar(value, self.endian)
    }

    /// Writes raw bytes, with no length prefix and no padding.
    ///
    /// Readers must already know how many bytes to ask for.
    pub fn write_string(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
        self.write_bytes(value.as_ref())
    }

    /// Converts `value` from `source` to UTF-16 in the configured byte order and writes it.
    ///
    /// No length prefix and no byte order mark are written.
    pub fn write_string_utf16(
        &mut self,
        value: impl AsRef<[u8]>,
        source: TextEncoding,
    ) -> Result<()> {
        let bytes = text::transcode(value.as_ref(), source, TextEncoding::utf16(self.endian));
        self.write_bytes(&bytes)
    }

    /// Converts `value` from `source` to UTF-32 in the configured byte order and writes it.
    ///
    /// No length prefix and no byte order mark are written.
    pub fn write_string_utf32(
        &mut self,
        value: impl AsRef<[u8]>,
        source: TextEncoding,
    ) -> Result<()> {
        let bytes = text::transcode(value.as_ref(), source, TextEncoding::utf32(self.endian));
        self.write_bytes(&bytes)
    }

    /// Writes `s` as UTF-16 in the configured byte order.
    pub fn write_utf16_str(&mut self, s: &str) -> Result<()> {
        let bytes = TextEncoding::utf16(self.endian).encode(s);
        self.write_bytes(&bytes)
    }

    /// Writes `s` as UTF-32 in the configured byte order.
    pub fn write_utf32_str(&mut self, s: &str) -> Result<()> {
        let bytes = TextEncoding::utf32(self.endian).encode(s);
        self.write_bytes(&bytes)
    }
}

fn in_range<T, V: TryInto<T> + Copy + Display>(value: V, ty: &'static str) -> Result<T> {
    value.try_into().map_err(|_| {
        debug!("rejected write: {value} out of range for {ty}");
        StreamError::Range {
            ty,
            value: value.to_string(),
        }
    })
}
