//! Error types for upsample-filter
//!
//! Every variant is a configuration violation: none of them is transient,
//! and a run that hits one cannot continue.

use thiserror::Error;

/// Errors that can occur while building kernels or filtering
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] upsample_core::Error),

    /// Invalid kernel parameters (tap count, shift)
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Source halo too narrow for the filter
    #[error("source border {border} must exceed filter half-length {half_length}")]
    InsufficientBorder { border: u32, half_length: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
