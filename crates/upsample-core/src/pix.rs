//! Pix - 8-bit interleaved image
//!
//! `Pix` is the byte-oriented image exchanged with the codec: rows are
//! stored top-down, each row holding `width * spp` samples with the
//! components of a pixel adjacent to each other.
//!
//! # Examples
//!
//! ```
//! use upsample_core::Pix;
//!
//! let mut pix = Pix::new(4, 2, 3).unwrap();
//! pix.set_sample(1, 0, 2, 200).unwrap();
//! assert_eq!(pix.get_sample(1, 0, 2).unwrap(), 200);
//! assert_eq!(pix.row(0).len(), 12);
//! ```

use crate::error::{Error, Result};

/// Largest supported number of samples per pixel
pub const MAX_SPP: u32 = 4;

/// 8-bit image with `spp` interleaved components per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pix {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples (components) per pixel
    spp: u32,
    /// Sample data, row-major, top row first
    data: Vec<u8>,
}

impl Pix {
    /// Create a new image with all samples set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0 and
    /// `Error::InvalidSpp` if `spp` is not in `1..=4`.
    pub fn new(width: u32, height: u32, spp: u32) -> Result<Self> {
        let size = Self::checked_size(width, height, spp)?;
        Ok(Pix {
            width,
            height,
            spp,
            data: vec![0u8; size],
        })
    }

    /// Create an image from interleaved, top-down sample data
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid or the data length
    /// doesn't equal `width * height * spp`.
    pub fn from_data(width: u32, height: u32, spp: u32, data: Vec<u8>) -> Result<Self> {
        let size = Self::checked_size(width, height, spp)?;
        if data.len() != size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{}x{} = {}",
                data.len(),
                width,
                height,
                spp,
                size
            )));
        }
        Ok(Pix {
            width,
            height,
            spp,
            data,
        })
    }

    fn checked_size(width: u32, height: u32, spp: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if spp == 0 || spp > MAX_SPP {
            return Err(Error::InvalidSpp(spp));
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(spp as usize))
            .ok_or(Error::InvalidDimension { width, height })
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of samples per pixel
    #[inline]
    pub fn spp(&self) -> u32 {
        self.spp
    }

    /// Get the image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of bytes in one row
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * self.spp as usize
    }

    /// Get sample `n` of the pixel at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if any coordinate is out of range.
    pub fn get_sample(&self, x: u32, y: u32, n: u32) -> Result<u8> {
        let idx = self.sample_index(x, y, n)?;
        Ok(self.data[idx])
    }

    /// Set sample `n` of the pixel at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if any coordinate is out of range.
    pub fn set_sample(&mut self, x: u32, y: u32, n: u32, value: u8) -> Result<()> {
        let idx = self.sample_index(x, y, n)?;
        self.data[idx] = value;
        Ok(())
    }

    fn sample_index(&self, x: u32, y: u32, n: u32) -> Result<usize> {
        let idx = (y as usize) * self.row_len() + (x as usize) * self.spp as usize + n as usize;
        if x >= self.width || y >= self.height || n >= self.spp {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                len: self.data.len(),
            });
        }
        Ok(idx)
    }

    /// Get row `y`
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let len = self.row_len();
        let start = (y as usize) * len;
        &self.data[start..start + len]
    }

    /// Get row `y` mutably
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let len = self.row_len();
        let start = (y as usize) * len;
        &mut self.data[start..start + len]
    }

    /// Iterate over the samples of component `n` in row `y`
    ///
    /// # Panics
    ///
    /// Panics if `y >= height` or `n >= spp`.
    pub fn component_row(&self, y: u32, n: u32) -> impl Iterator<Item = u8> + '_ {
        assert!(n < self.spp, "component {n} out of range");
        self.row(y)
            .iter()
            .skip(n as usize)
            .step_by(self.spp as usize)
            .copied()
    }

    /// Get raw access to the sample data
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
