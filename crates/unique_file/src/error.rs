use std::io::ErrorKind;

use crate::encoding::DecodeError;

/// An error that is returned by [`crate::write_sync`] and [`crate::write`].
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The current working directory could not be determined while resolving
    /// a relative directory.
    #[error("failed to resolve the target path: {0}")]
    ResolvePath(#[source] std::io::Error),

    /// The text could not be converted to bytes with the requested encoding.
    #[error(transparent)]
    Encoding(#[from] DecodeError),

    /// The file could not be created or written. The message names the file
    /// and the reason reported by the operating system.
    #[error(transparent)]
    Write(std::io::Error),
}

impl WriteError {
    /// Returns the kind of the underlying I/O error. Encoding errors are
    /// reported as [`ErrorKind::InvalidData`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            WriteError::ResolvePath(err) | WriteError::Write(err) => err.kind(),
            WriteError::Encoding(_) => ErrorKind::InvalidData,
        }
    }
}

impl From<WriteError> for std::io::Error {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::ResolvePath(err) | WriteError::Write(err) => err,
            err => std::io::Error::new(err.kind(), err),
        }
    }
}
