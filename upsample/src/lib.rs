//! upsample - Fractional-ratio (5/2) polyphase image upsampler
//!
//! Enlarges 8-bit gray or RGB images by exactly 5/2 in each direction with a
//! separable windowed-sinc polyphase filter.
//!
//! # Overview
//!
//! - [`BorderedBuffer`] - sample plane with a replicated halo
//! - [`filter`] - phase kernels, separable passes and quantization
//! - [`io`] - BMP reading and writing
//!
//! # Example
//!
//! ```
//! use upsample::Pix;
//! use upsample::filter::{UpsampleConfig, upsample_pix};
//!
//! let pix = Pix::from_data(4, 2, 1, vec![128; 8]).unwrap();
//! let out = upsample_pix(&pix, &UpsampleConfig::new(7)).unwrap();
//! assert_eq!(out.dimensions(), (10, 5));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use upsample_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use upsample_filter as filter;
pub use upsample_io as io;

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

/// Start logging to stderr at `level`
///
/// `RUST_LOG`, when set, takes precedence over `level`. The returned handle
/// must stay alive for as long as logging is wanted.
pub fn setup_logging(level: &str) -> std::result::Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
}
