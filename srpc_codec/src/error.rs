use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Error, Debug)]
pub enum CodecError {
    /// The stream ended before the descriptor was satisfied,
    /// or a delimiter was never found.
    #[error("Truncated stream: {0}")]
    TruncatedStream(String),

    /// A value does not fit the scalar tag, or its arity disagrees with the descriptor.
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An explicit element count disagrees with the length of the value.
    #[error("Array size mismatch: expected {expected}, got {actual}")]
    ArraySizeMismatch { expected: usize, actual: usize },

    /// Malformed type definition or handshake string.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for CodecError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            CodecError::TruncatedStream(e.to_string())
        } else {
            CodecError::Io(e)
        }
    }
}

impl CodecError {
    pub fn truncated(msg: impl Into<String>) -> Self {
        CodecError::TruncatedStream(msg.into())
    }

    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        CodecError::TypeMismatch(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        CodecError::Configuration(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        CodecError::Parse(msg.into())
    }
}
