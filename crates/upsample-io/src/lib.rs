//! upsample-io - Image file I/O for the polyphase upsampler
//!
//! Only uncompressed BMP is supported: 8-bit files map to single-component
//! [`Pix`](upsample_core::Pix) images and 24-bit files to three-component
//! ones.
//!
//! # Examples
//!
//! ```
//! use upsample_core::Pix;
//! use upsample_io::{read_bmp, write_bmp};
//!
//! let pix = Pix::new(3, 2, 1).unwrap();
//! let mut bytes = Vec::new();
//! write_bmp(&pix, &mut bytes).unwrap();
//! assert_eq!(read_bmp(bytes.as_slice()).unwrap(), pix);
//! ```

pub mod bmp;
mod error;

pub use bmp::{read_bmp, read_bmp_file, write_bmp, write_bmp_file};
pub use error::{IoError, IoResult};
