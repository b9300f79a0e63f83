//! Error types for template gathering.

use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors that can occur while gathering templates.
#[derive(Debug, Error)]
pub enum GatherError {
    /// A glob or read call on the [`FileAccess`](crate::FileAccess) failed.
    ///
    /// The capability's error is passed through untouched.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A matched file could not be decoded as UTF-8 text.
    #[error("template file {} is not valid UTF-8", path.display())]
    InvalidUtf8 {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },
}

impl GatherError {
    /// Returns the underlying I/O error, if this is one.
    pub fn as_io(&self) -> Option<&io::Error> {
        match self {
            GatherError::Io(err) => Some(err),
            GatherError::InvalidUtf8 { .. } => None,
        }
    }
}

/// Result type for gather operations.
pub type Result<T> = std::result::Result<T, GatherError>;
