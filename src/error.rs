use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = core::result::Result<T, StreamError>;

/// Error type for `ByteStream` and its helpers.
#[derive(Error, Debug)]
pub enum StreamError {
    /// The handle given to `ByteStream::from_handle` cannot report or change its position.
    #[error("input must be a seekable handle: {0}")]
    InvalidInput(#[source] std::io::Error),

    /// A named setting (endian, text encoding) was not one of the accepted values.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A `write_*` value does not fit the target type. Nothing was written.
    #[error("value {value} out of range for {ty}")]
    Range {
        /// Name of the target type, e.g. `unsigned 16-bit integer`.
        ty: &'static str,
        /// The rejected value, as written by the caller.
        value: String,
    },

    /// A scalar read ran out of data while the stream is in `ReadPolicy::Strict`.
    ///
    /// The bytes that were available have been consumed.
    #[error("unexpected end of stream: needed {needed} bytes, {available} available")]
    EndOfStream {
        /// Width of the value being read.
        needed: usize,
        /// Bytes that were actually read.
        available: usize,
    },

    /// The underlying storage reported an error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
