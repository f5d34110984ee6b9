/*!
    Error types for the vidarray crate ecosystem.
*/

use std::fmt;

/**
    Error type for the vidarray crate ecosystem.

    Construction-time failures (container open, stream selection, decoder
    setup, conversion-context creation) are reported through this type and
    abort session construction. End of stream is never an error — readers
    report it as an absent frame.
*/
#[derive(Debug)]
pub enum Error {
    /// I/O error (file not found, network error, etc.)
    Io(std::io::Error),
    /// Codec error (demux/decode/conversion failure)
    Codec { message: String },
    /// Invalid data (malformed input, contract violation)
    InvalidData { message: String },
    /// Unsupported format (valid but not handled)
    UnsupportedFormat { message: String },
    /// No stream matching the request (missing, wrong type, or undecodable)
    StreamNotFound { message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Codec { message } => write!(f, "codec error: {message}"),
            Self::InvalidData { message } => write!(f, "invalid data: {message}"),
            Self::UnsupportedFormat { message } => write!(f, "unsupported format: {message}"),
            Self::StreamNotFound { message } => write!(f, "stream not found: {message}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl Error {
    /**
        Create a codec error with the given message.
    */
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }

    /**
        Create an invalid data error with the given message.
    */
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /**
        Create an unsupported format error with the given message.
    */
    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }

    /**
        Create a stream-not-found error with the given message.
    */
    pub fn stream_not_found(message: impl Into<String>) -> Self {
        Self::StreamNotFound {
            message: message.into(),
        }
    }
}

/**
    Result type alias for the vidarray crate ecosystem.
*/
pub type Result<T> = std::result::Result<T, Error>;
