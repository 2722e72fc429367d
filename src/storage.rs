//! Backing stores for `ByteStream`.
//!
//! A store is anything that can seek and report its total size. Reading and writing are added
//! by the standard `Read` and `Write` traits, so a read-only handle can still back a stream that
//! is only decoded.

use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

/// The capability set a `ByteStream` needs from its backing store, beyond `Read` and `Write`.
pub trait Storage: Seek {
    /// Total length of the store, in bytes.
    fn size(&mut self) -> io::Result<u64>;
}

/// An in-memory, read-write buffer owned by the stream.
///
/// Writing past the end grows the buffer. Seeking past the end is allowed; a later write fills
/// the gap with zeros.
#[derive(Clone, Debug, Default)]
pub struct MemoryBuffer {
    cursor: Cursor<Vec<u8>>,
}

impl MemoryBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer holding a copy of `bytes`, positioned at offset 0.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes.to_vec()),
        }
    }

    /// The whole contents of the buffer, independent of the current position.
    pub fn as_bytes(&self) -> &[u8] {
        self.cursor.get_ref()
    }

    /// Extracts the inner buffer
    pub fn into_inner(self) -> Vec<u8> {
        self.cursor.into_inner()
    }
}

impl Storage for MemoryBuffer {
    fn size(&mut self) -> io::Result<u64> {
        Ok(self.cursor.get_ref().len() as u64)
    }
}

impl Read for MemoryBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Write for MemoryBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.cursor.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for MemoryBuffer {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

/// An externally opened handle adopted by the stream.
///
/// The stream never closes the handle. Pass `&mut File` (or any other `&mut` handle) to keep it
/// entirely under the caller's control, or take it back with `ByteStream::into_inner`.
#[derive(Debug)]
pub struct Handle<H> {
    inner: H,
}

impl<H> Handle<H> {
    /// Wraps `inner` without touching its position.
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    /// Accesses the inner handle
    pub fn get_mut(&mut self) -> &mut H {
        &mut self.inner
    }

    /// Extracts the inner handle
    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: Seek> Storage for Handle<H> {
    /// Seeks to the end to learn the length, then returns to the previous position.
    fn size(&mut self) -> io::Result<u64> {
        let here = self.inner.stream_position()?;
        let end = self.inner.seek(SeekFrom::End(0))?;
        if end != here {
            self.inner.seek(SeekFrom::Start(here))?;
        }
        Ok(end)
    }
}

impl<H: Read> Read for Handle<H> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<H: Write> Write for Handle<H> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<H: Seek> Seek for Handle<H> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_size_ignores_position() {
        let mut m = MemoryBuffer::from_bytes(&[1, 2, 3]);
        m.seek(SeekFrom::Start(2)).unwrap();
        assert_eq!(m.size().unwrap(), 3);
        assert_eq!(m.stream_position().unwrap(), 2);
    }

    #[test]
    fn handle_size_restores_position() {
        let mut h = Handle::new(Cursor::new(vec![0u8; 10]));
        h.seek(SeekFrom::Start(4)).unwrap();
        assert_eq!(h.size().unwrap(), 10);
        assert_eq!(h.stream_position().unwrap(), 4);
    }
}
