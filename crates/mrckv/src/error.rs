//! Error types for mrckv

use std::fmt;
use std::io;

/// Result type alias for mrckv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for store operations
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(io::Error),

    /// Record could not be decoded
    Parse(String),

    /// Value too large (max 5 MiB)
    ValueTooLarge(usize),

    /// Key is empty, too long, or contains characters outside `[A-Za-z0-9_.-]`
    InvalidKey(String),

    /// Store is closed
    Closed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Parse(msg) => write!(f, "Parse error: {}", msg),
            Error::ValueTooLarge(size) => write!(f, "Value too large: {} bytes (max 5 MiB)", size),
            Error::InvalidKey(key) => write!(f, "Invalid key: {:?}", key),
            Error::Closed => write!(f, "Store is closed"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<nom::Err<nom::error::Error<&[u8]>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        match err {
            nom::Err::Incomplete(_) => Error::Parse("record truncated".to_string()),
            nom::Err::Error(e) | nom::Err::Failure(e) => {
                Error::Parse(format!("{:?} ({} bytes remaining)", e.code, e.input.len()))
            }
        }
    }
}
