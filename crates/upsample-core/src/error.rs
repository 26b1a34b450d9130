//! Error types for upsample-core
//!
//! Provides a unified error type for buffer and image construction and
//! sample access. Each variant carries enough context for diagnostics
//! without exposing storage layout details.

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Invalid number of samples per pixel
    #[error("invalid samples per pixel: {0}")]
    InvalidSpp(u32),

    /// Sample coordinates outside the addressable (interior plus border) region
    #[error("sample ({row}, {col}) outside addressable region of {height}x{width} with border {border}")]
    OutOfBounds {
        row: i32,
        col: i32,
        width: u32,
        height: u32,
        border: u32,
    },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Image dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Storage size would overflow `usize`
    #[error("buffer of {width}x{height} with border {border} is too large")]
    TooLarge { width: u32, height: u32, border: u32 },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
