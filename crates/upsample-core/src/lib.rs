//! upsample-core - Basic data structures for the polyphase upsampler
//!
//! - [`BorderedBuffer`] - Floating-point sample plane with a replicated halo
//! - [`Pix`] - 8-bit interleaved image exchanged with the codec
//!
//! Filtering lives in `upsample-filter`; file formats in `upsample-io`.

pub mod bordered;
pub mod error;
pub mod pix;

pub use bordered::BorderedBuffer;
pub use error::{Error, Result};
pub use pix::{MAX_SPP, Pix};
