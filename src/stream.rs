use std::io::{Read, Seek, SeekFrom, Write};

use log::{debug, trace};

use crate::storage::{Handle, MemoryBuffer, Storage};
use crate::{Endian, Result, StreamError};

/// What a scalar `read_*` does when fewer bytes remain than the value needs.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum ReadPolicy {
    /// Return the zero value of the type. The bytes that were available are consumed.
    ///
    /// Callers that need to tell a literal zero from a short read have to compare
    /// `position()` against `size()` themselves.
    #[default]
    ZeroOnShortRead,

    /// Fail with `StreamError::EndOfStream`.
    Strict,
}

/// Settings applied when a stream is created.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct StreamOptions {
    /// Byte order for unsigned integers, floats, text and the `_ordered` signed methods.
    /// `None` uses `Endian::detect()`.
    pub endian: Option<Endian>,
    /// Short-read behavior of scalar reads.
    pub read_policy: ReadPolicy,
}

impl StreamOptions {
    /// Sets the byte order.
    pub fn endian(mut self, endian: Endian) -> Self {
        self.endian = Some(endian);
        self
    }

    /// Sets the short-read behavior.
    pub fn read_policy(mut self, read_policy: ReadPolicy) -> Self {
        self.read_policy = read_policy;
        self
    }
}

/// Reads and writes typed values at a cursor within a seekable store.
///
/// The store is either a [`MemoryBuffer`] owned by the stream, or an external handle adopted
/// through [`Handle`]. Typed reads are available when the store implements `Read`, typed writes
/// when it implements `Write`.
///
/// Every operation runs to completion before returning. A stream is meant for one owner issuing
/// operations in sequence; `&mut self` on every cursor-moving method enforces that.
pub struct ByteStream<S> {
    pub(crate) storage: S,
    pub(crate) endian: Endian,
    pub(crate) read_policy: ReadPolicy,
}

impl ByteStream<MemoryBuffer> {
    /// Creates a stream over an empty in-memory buffer.
    pub fn new() -> Self {
        Self::from_memory(MemoryBuffer::new())
    }

    /// Creates a stream over a private copy of `bytes`, positioned at offset 0.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_memory(MemoryBuffer::from_bytes(bytes))
    }

    fn from_memory(buffer: MemoryBuffer) -> Self {
        debug!("memory stream: {} bytes", buffer.as_bytes().len());
        Self::assemble(buffer, StreamOptions::default())
    }

    /// The whole contents of the buffer.
    pub fn as_bytes(&self) -> &[u8] {
        self.storage.as_bytes()
    }

    /// Extracts the contents of the buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.storage.into_inner()
    }
}

impl Default for ByteStream<MemoryBuffer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Seek> ByteStream<Handle<H>> {
    /// Adopts an open handle. The handle's current position becomes the stream's position.
    ///
    /// The stream never closes the handle. Fails with `StreamError::InvalidInput` if the handle
    /// cannot report its position.
    pub fn from_handle(handle: H) -> Result<Self> {
        Self::with_options(Handle::new(handle), StreamOptions::default())
    }

    /// Gives back the adopted handle.
    pub fn into_handle(self) -> H {
        self.storage.into_inner()
    }
}

impl<S: Storage> ByteStream<S> {
    /// Creates a stream over any store, with explicit options.
    ///
    /// Fails with `StreamError::InvalidInput` if the store cannot report its position.
    pub fn with_options(mut storage: S, options: StreamOptions) -> Result<Self> {
        let position = storage
            .stream_position()
            .map_err(StreamError::InvalidInput)?;
        debug!("stream opened at position {position}");
        Ok(Self::assemble(storage, options))
    }

    fn assemble(storage: S, options: StreamOptions) -> Self {
        let endian = options.endian.unwrap_or_else(Endian::detect);
        trace!("stream endian: {endian}, read policy: {:?}", options.read_policy);
        Self {
            storage,
            endian,
            read_policy: options.read_policy,
        }
    }

    /// The configured byte order.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Changes the byte order used by subsequent reads and writes.
    ///
    /// To set it from a name, parse it first: `stream.set_endian("big".parse()?)`. Names other
    /// than `big` and `little` fail with `StreamError::InvalidArgument`.
    pub fn set_endian(&mut self, endian: Endian) {
        if endian != self.endian {
            debug!("endian changed: {} -> {endian}", self.endian);
        }
        self.endian = endian;
    }

    /// The short-read behavior of scalar reads.
    pub fn read_policy(&self) -> ReadPolicy {
        self.read_policy
    }

    /// Changes the short-read behavior of scalar reads.
    pub fn set_read_policy(&mut self, read_policy: ReadPolicy) {
        self.read_policy = read_policy;
    }

    /// Total size of the store, in bytes.
    pub fn size(&mut self) -> Result<u64> {
        Ok(self.storage.size()?)
    }

    /// Current byte offset from the start of the store.
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.storage.stream_position()?)
    }

    /// Moves the cursor to an absolute offset. Offsets past the end are allowed.
    pub fn set_position(&mut self, position: u64) -> Result<()> {
        self.storage.seek(SeekFrom::Start(position))?;
        Ok(())
    }

    /// Moves the cursor relative to its current offset.
    ///
    /// Moving before offset 0 fails with `StreamError::Io` and leaves the cursor where it was.
    pub fn skip_position(&mut self, delta: i64) -> Result<()> {
        self.storage.seek(SeekFrom::Current(delta))?;
        Ok(())
    }

    /// Moves the cursor back to offset 0.
    pub fn reset_position(&mut self) -> Result<()> {
        self.storage.rewind()?;
        Ok(())
    }

    /// Bytes between the cursor and the end of the store; 0 if the cursor is past the end.
    pub fn remaining(&mut self) -> Result<u64> {
        let position = self.position()?;
        Ok(self.size()?.saturating_sub(position))
    }

    /// Returns `true` if no bytes remain after the cursor.
    pub fn is_eof(&mut self) -> Result<bool> {
        Ok(self.remaining()? == 0)
    }

    /// Accesses the store
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Extracts the store
    pub fn into_inner(self) -> S {
        self.storage
    }
}

impl<S: Storage + Write> ByteStream<S> {
    /// Flushes buffered writes to the store.
    pub fn flush(&mut self) -> Result<()> {
        self.storage.flush()?;
        Ok(())
    }
}

impl<S: Storage + Read> ByteStream<S> {
    /// Reads until `buf` is full or the store has no more data. Returns the number of bytes read.
    pub(crate) fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.storage.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }
}
