//! upsample-filter - Polyphase 5/2 image upsampling
//!
//! This crate provides:
//!
//! - Windowed-sinc phase kernels and the five-phase bank
//! - Separable vertical and horizontal upsampling passes
//! - Range clamping and quantization to 8-bit samples
//! - Whole-image upsampling of every component of a `Pix`
//!
//! # Examples
//!
//! ```
//! use upsample_core::Pix;
//! use upsample_filter::{UpsampleConfig, upsample_pix};
//!
//! let pix = Pix::from_data(2, 2, 1, vec![50; 4]).unwrap();
//! let out = upsample_pix(&pix, &UpsampleConfig::new(7)).unwrap();
//! assert_eq!(out.dimensions(), (5, 5));
//! ```

mod error;
pub mod kernel;
pub mod pipeline;
pub mod quantize;
pub mod upsample;

pub use error::{FilterError, FilterResult};
pub use kernel::{
    MAX_HALF_LENGTH, MIN_TAP_COUNT, NUM_PHASES, PHASE_SHIFTS, PhaseBank, PhaseKernel,
};

// Re-export commonly used functions
pub use pipeline::{DEFAULT_BORDER, UpsampleConfig, upsample_pix};
pub use quantize::{MAX_SAMPLE, clamp_and_quantize, quantize_row};
pub use upsample::{
    Axis, PhaseStep, SOURCE_OFFSETS, SOURCE_STEP, phase_schedule, upsample_2d, upsample_axis,
    upsampled_extent,
};
