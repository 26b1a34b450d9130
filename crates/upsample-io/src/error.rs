//! I/O error types
//!
//! A closed set of failures for reading and writing image files. Callers
//! match on the variant to produce a human-readable message.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for image I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// The input file does not exist or the output file cannot be created
    #[error("cannot open {}", .0.display())]
    NotFound(PathBuf),

    /// The file header is structurally invalid
    #[error("malformed header: {0}")]
    InvalidHeader(String),

    /// The file is valid but uses a variant this codec does not handle
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The stream ended before all declared data was read or written
    #[error("file truncated unexpectedly")]
    Truncated,

    /// Any other I/O failure
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    /// An error from the core library (e.g. invalid dimensions)
    #[error("core error: {0}")]
    Core(#[from] upsample_core::Error),
}

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof | std::io::ErrorKind::WriteZero => IoError::Truncated,
            _ => IoError::Io(err),
        }
    }
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
