//! Unified error type.

use std::fmt;

/// The error type returned by tapresp's fallible operations.
///
/// Failures reported by a wrapped writer travel through unchanged: the tap
/// never re-wraps them. The only error the tap itself produces is
/// [`Error::ShortBufferWrite`].
#[derive(Debug)]
pub enum Error {
    /// The tap's internal copy received fewer bytes than the caller wrote.
    /// Nothing was forwarded to the wrapped writer.
    ///
    /// The tap buffers into a `Vec<u8>`, which always takes the whole slice,
    /// so [`TappingWriter`](crate::TappingWriter) never produces this today.
    ShortBufferWrite { expected: usize, written: usize },

    /// A transport-level failure.
    Io(std::io::Error),

    /// The status code cannot be represented as an [`http::StatusCode`].
    InvalidStatus(u16),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortBufferWrite { expected, written } => write!(
                f,
                "failed to write entirety of input to body: {written} of {expected} bytes"
            ),
            Self::Io(e) => write!(f, "io: {e}"),
            Self::InvalidStatus(code) => write!(f, "invalid status code: {code}"),
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
