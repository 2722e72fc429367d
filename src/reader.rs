use std::io::Read;

use log::trace;

use crate::storage::Storage;
use crate::text::TextEncoding;
use crate::{ByteStream, Endian, ReadPolicy, Result, Scalar, StreamError};

/// Typed reads.
///
/// Multi-byte unsigned integers and floats are decoded in the stream's configured byte order.
/// Signed integers read by `read_i16`, `read_i32` and `read_i64` are decoded in the host's byte
/// order regardless of the configured one; this keeps bit compatibility with data written by
/// the matching `write_*` methods on the same host. Use the `_ordered` variants to decode signed
/// integers in the configured byte order instead.
///
/// With the default `ReadPolicy::ZeroOnShortRead`, a scalar read that runs out of data returns
/// `0` (or `0.0`) instead of failing.
impl<S: Storage + Read> ByteStream<S> {
    /// Reads one value of any `Scalar` type in the given byte order, applying the read policy.
    pub fn read_scalar<T: Scalar>(&mut self, endian: Endian) -> Result<T> {
        let mut bytes = T::Bytes::default();
        let got = self.fill(bytes.as_mut())?;
        if got < T::WIDTH {
            trace!("short read: needed {} bytes, got {got}", T::WIDTH);
            return match self.read_policy {
                ReadPolicy::ZeroOnShortRead => Ok(T::default()),
                ReadPolicy::Strict => Err(StreamError::EndOfStream {
                    needed: T::WIDTH,
                    available: got,
                }),
            };
        }
        Ok(T::decode(bytes, endian))
    }

    /// Reads a single `i8` value.
    #[inline(always)]
    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_scalar(Endian::NATIVE)
    }

    /// Reads a single `u8` value.
    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_scalar(Endian::NATIVE)
    }

    /// Reads an `i16` in host byte order.
    #[inline(always)]
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_scalar(Endian::NATIVE)
    }

    /// Reads an `i16` in the configured byte order.
    #[inline(always)]
    pub fn read_i16_ordered(&mut self) -> Result<i16> {
        self.read_scalar(self.endian)
    }

    /// Reads a `u16` in the configured byte order.
    #[inline(always)]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_scalar(self.endian)
    }

    /// Reads an `i32` in host byte order.
    #[inline(always)]
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_scalar(Endian::NATIVE)
    }

    /// Reads an `i32` in the configured byte order.
    #[inline(always)]
    pub fn read_i32_ordered(&mut self) -> Result<i32> {
        self.read_scalar(self.endian)
    }

    /// Reads a `u32` in the configured byte order.
    #[inline(always)]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_scalar(self.endian)
    }

    /// Reads an `i64` in host byte order.
    #[inline(always)]
    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_scalar(Endian::NATIVE)
    }

    /// Reads an `i64` in the configured byte order.
    #[inline(always)]
    pub fn read_i64_ordered(&mut self) -> Result<i64> {
        self.read_scalar(self.endian)
    }

    /// Reads a `u64` in the configured byte order.
    #[inline(always)]
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_scalar(self.endian)
    }

    /// Reads an IEEE 754 single-precision value in the configured byte order.
    #[inline(always)]
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_scalar(self.endian)
    }

    /// Reads an IEEE 754 double-precision value in the configured byte order.
    #[inline(always)]
    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_scalar(self.endian)
    }

    /// Reads up to `length` raw bytes.
    ///
    /// If the stream ends first, the result holds only the bytes that were available; it is
    /// never padded. The read policy does not apply here.
    pub fn read_string(&mut self, length: usize) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        (&mut self.storage)
            .take(length as u64)
            .read_to_end(&mut bytes)?;
        if bytes.len() < length {
            trace!("short string read: wanted {length} bytes, got {}", bytes.len());
        }
        Ok(bytes)
    }

    /// Reads up to `length` raw bytes and returns them as a `bstr::BString`.
    ///
    /// The bytes are not validated; see `read_string`.
    #[cfg(feature = "bstr")]
    pub fn read_string_bstr(&mut self, length: usize) -> Result<bstr::BString> {
        Ok(bstr::BString::from(self.read_string(length)?))
    }

    /// Reads up to `length` raw bytes as UTF-8, replacing invalid sequences with U+FFFD.
    pub fn read_utf8_string_lossy(&mut self, length: usize) -> Result<String> {
        let bytes = self.read_string(length)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Reads up to `length` bytes of UTF-16 text in the configured byte order and converts
    /// them to `target`.
    ///
    /// `length` counts bytes, not characters. If nothing can be read, returns an empty vector.
    pub fn read_string_utf16(&mut self, length: usize, target: TextEncoding) -> Result<Vec<u8>> {
        self.read_text(length, TextEncoding::utf16(self.endian), target)
    }

    /// Reads up to `length` bytes of UTF-32 text in the configured byte order and converts
    /// them to `target`.
    ///
    /// `length` counts bytes, not characters. If nothing can be read, returns an empty vector.
    pub fn read_string_utf32(&mut self, length: usize, target: TextEncoding) -> Result<Vec<u8>> {
        self.read_text(length, TextEncoding::utf32(self.endian), target)
    }

    /// Reads up to `length` bytes of UTF-16 text in the configured byte order.
    pub fn read_utf16_string(&mut self, length: usize) -> Result<String> {
        let bytes = self.read_string(length)?;
        Ok(TextEncoding::utf16(self.endian).decode(&bytes))
    }

    /// Reads up to `length` bytes of UTF-32 text in the configured byte order.
    pub fn read_utf32_string(&mut self, length: usize) -> Result<String> {
        let bytes = self.read_string(length)?;
        Ok(TextEncoding::utf32(self.endian).decode(&bytes))
    }

    fn read_text(
        &mut self,
        length: usize,
        source: TextEncoding,
        target: TextEncoding,
    ) -> Result<Vec<u8>> {
        let bytes = self.read_string(length)?;
        if bytes.is_empty() {
            return Ok(bytes);
        }
        Ok(crate::text::transcode(&bytes, source, target))
    }
}
