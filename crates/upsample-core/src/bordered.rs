//! BorderedBuffer - Floating-point sample plane with a halo
//!
//! A `BorderedBuffer` holds one component of an image as `f32` samples,
//! surrounded on all four sides by `border` extra samples. Convolution
//! passes read past the logical edge into this halo instead of clamping
//! coordinates on every tap.
//!
//! # Coordinates
//!
//! Rows and columns are interior-relative and signed: `(0, 0)` is the
//! first interior sample, and any coordinate in
//! `[-border, height + border) x [-border, width + border)` is addressable.
//!
//! # Examples
//!
//! ```
//! use upsample_core::BorderedBuffer;
//!
//! let mut buf = BorderedBuffer::new(3, 2, 2).unwrap();
//! buf.set_sample(0, 0, 7.0).unwrap();
//! buf.set_sample(1, 2, 9.0).unwrap();
//! buf.extend_boundary();
//!
//! // The halo replicates the nearest interior sample, corners included
//! assert_eq!(buf.get_sample(-2, -2).unwrap(), 7.0);
//! assert_eq!(buf.get_sample(3, 4).unwrap(), 9.0);
//! ```

use crate::error::{Error, Result};

/// Floating-point sample plane with a symmetric border
///
/// # Memory Layout
///
/// Storage is row-major with `(height + 2 * border)` rows of `stride`
/// samples each, where `stride == width + 2 * border`. The interior origin
/// lives at storage index `border * stride + border`.
///
/// Border samples are only meaningful after [`BorderedBuffer::extend_boundary`]
/// has been called following the last write to the interior.
#[derive(Debug, Clone)]
pub struct BorderedBuffer {
    /// Interior width in samples
    width: u32,
    /// Interior height in samples
    height: u32,
    /// Padding on every side
    border: u32,
    /// Row pitch of the backing storage
    stride: usize,
    /// Backing storage, zero-initialized
    data: Vec<f32>,
}

impl BorderedBuffer {
    /// Create a new buffer with all samples (interior and border) set to zero
    ///
    /// # Arguments
    ///
    /// * `width` - Interior width in samples (must be > 0)
    /// * `height` - Interior height in samples (must be > 0)
    /// * `border` - Padding on all four sides (0 for buffers that are
    ///   never read by a convolution pass)
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0, and
    /// `Error::TooLarge` if the padded storage size overflows.
    pub fn new(width: u32, height: u32, border: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let too_large = || Error::TooLarge {
            width,
            height,
            border,
        };
        let pad = (border as usize).checked_mul(2).ok_or_else(too_large)?;
        let stride = (width as usize).checked_add(pad).ok_or_else(too_large)?;
        let rows = (height as usize).checked_add(pad).ok_or_else(too_large)?;
        let size = rows.checked_mul(stride).ok_or_else(too_large)?;
        // Signed coordinates must reach every storage row and column
        if stride > i32::MAX as usize || rows > i32::MAX as usize {
            return Err(too_large());
        }

        Ok(BorderedBuffer {
            width,
            height,
            border,
            stride,
            data: vec![0.0f32; size],
        })
    }

    /// Create a buffer and fill its interior from row-major samples
    ///
    /// The border is left at zero; call [`extend_boundary`](Self::extend_boundary)
    /// before using the buffer as convolution input.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid or
    /// `interior.len() != width * height`.
    pub fn from_interior(width: u32, height: u32, border: u32, interior: &[f32]) -> Result<Self> {
        let mut buf = Self::new(width, height, border)?;
        let expected = (width as usize) * (height as usize);
        if interior.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "interior length {} doesn't match {}x{} = {}",
                interior.len(),
                width,
                height,
                expected
            )));
        }

        for (y, src) in interior.chunks_exact(width as usize).enumerate() {
            buf.row_mut(y as u32).copy_from_slice(src);
        }
        Ok(buf)
    }

    /// Get the interior width in samples
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the interior height in samples
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the interior dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the border width
    #[inline]
    pub fn border(&self) -> u32 {
        self.border
    }

    /// Get the row pitch of the backing storage
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether `(row, col)` lies inside the interior or its border
    #[inline]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        let b = self.border as i64;
        let (row, col) = (row as i64, col as i64);
        row >= -b && row < self.height as i64 + b && col >= -b && col < self.width as i64 + b
    }

    /// Storage index of an interior-relative coordinate
    #[inline]
    fn index(&self, row: i32, col: i32) -> usize {
        let b = self.border as i64;
        ((row as i64 + b) as usize) * self.stride + (col as i64 + b) as usize
    }

    fn out_of_bounds(&self, row: i32, col: i32) -> Error {
        Error::OutOfBounds {
            row,
            col,
            width: self.width,
            height: self.height,
            border: self.border,
        }
    }

    /// Get the sample at interior-relative `(row, col)`
    ///
    /// Negative coordinates address the top/left border.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` if the coordinate is outside the
    /// interior plus border.
    #[inline]
    pub fn get_sample(&self, row: i32, col: i32) -> Result<f32> {
        if !self.contains(row, col) {
            return Err(self.out_of_bounds(row, col));
        }
        Ok(self.data[self.index(row, col)])
    }

    /// Set the sample at interior-relative `(row, col)`
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` if the coordinate is outside the
    /// interior plus border.
    #[inline]
    pub fn set_sample(&mut self, row: i32, col: i32, value: f32) -> Result<()> {
        if !self.contains(row, col) {
            return Err(self.out_of_bounds(row, col));
        }
        let idx = self.index(row, col);
        self.data[idx] = value;
        Ok(())
    }

    /// Get the sample at `(row, col)` without the bounds check
    ///
    /// # Panics
    ///
    /// Panics if the coordinate falls outside the backing storage.
    #[inline]
    pub fn get_sample_unchecked(&self, row: i32, col: i32) -> f32 {
        debug_assert!(self.contains(row, col));
        self.data[self.index(row, col)]
    }

    /// Get the interior part of row `y`
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f32] {
        assert!(y < self.height, "row {y} out of range");
        let start = self.index(y as i32, 0);
        &self.data[start..start + self.width as usize]
    }

    /// Get the interior part of row `y` mutably
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [f32] {
        assert!(y < self.height, "row {y} out of range");
        let start = self.index(y as i32, 0);
        let width = self.width as usize;
        &mut self.data[start..start + width]
    }

    /// Get a full storage row, border columns included
    ///
    /// Element `border + c` of the returned slice is interior column `c`.
    ///
    /// # Panics
    ///
    /// Panics if `y` is outside `[-border, height + border)`.
    #[inline]
    pub fn padded_row(&self, y: i32) -> &[f32] {
        assert!(self.contains(y, 0), "padded row {y} out of range");
        let start = self.index(y, -(self.border as i32));
        &self.data[start..start + self.stride]
    }

    /// Get raw access to the backing storage
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Fill the border by replicating the nearest interior sample
    ///
    /// The first interior row is copied into every row above it and the
    /// last interior row into every row below. Then, for every storage row
    /// (including the rows just written), the leftmost and rightmost
    /// interior samples are copied outward across the border. Doing the
    /// vertical pass first makes the corners equal to the nearest interior
    /// corner sample.
    ///
    /// This is clamp-to-edge replication, not mirroring. It must run after
    /// the last write to the interior and before the buffer is read by a
    /// convolution pass. Repeated calls leave the border unchanged.
    pub fn extend_boundary(&mut self) {
        let border = self.border as i32;
        if border == 0 {
            return;
        }
        let width = self.width as usize;

        let first = self.index(0, 0);
        for r in 1..=border {
            let dst = self.index(-r, 0);
            self.data.copy_within(first..first + width, dst);
        }

        let last = self.index(self.height as i32 - 1, 0);
        for r in 1..=border {
            let dst = self.index(self.height as i32 - 1 + r, 0);
            self.data.copy_within(last..last + width, dst);
        }

        let b = self.border as usize;
        for line in self.data.chunks_exact_mut(self.stride) {
            let left = line[b];
            let right = line[b + width - 1];
            line[..b].fill(left);
            line[b + width..].fill(right);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: u32, height: u32, border: u32) -> BorderedBuffer {
        let data: Vec<f32> = (0..width * height).map(|i| i as f32).collect();
        BorderedBuffer::from_interior(width, height, border, &data).unwrap()
    }

    #[test]
    fn test_creation() {
        let buf = BorderedBuffer::new(10, 4, 3).unwrap();
        assert_eq!(buf.dimensions(), (10, 4));
        assert_eq!(buf.border(), 3);
        assert_eq!(buf.stride(), 16);
        assert_eq!(buf.data().len(), 16 * 10);
        assert!(buf.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(BorderedBuffer::new(0, 4, 2).is_err());
        assert!(BorderedBuffer::new(4, 0, 2).is_err());
        assert!(BorderedBuffer::new(0, 0, 0).is_err());
    }

    #[test]
    fn test_zero_border() {
        let buf = ramp(3, 2, 0);
        assert_eq!(buf.stride(), 3);
        assert_eq!(buf.data(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(buf.get_sample(-1, 0).is_err());
    }

    #[test]
    fn test_from_interior_wrong_size() {
        assert!(BorderedBuffer::from_interior(3, 2, 1, &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_interior_origin_offset() {
        let buf = ramp(4, 3, 2);
        let origin = 2 * buf.stride() + 2;
        assert_eq!(buf.data()[origin], 0.0);
        assert_eq!(buf.data()[origin + 1], 1.0);
        assert_eq!(buf.data()[origin + buf.stride()], 4.0);
    }

    #[test]
    fn test_sample_access_in_border() {
        let mut buf = BorderedBuffer::new(4, 4, 2).unwrap();
        buf.set_sample(-2, -2, 1.5).unwrap();
        buf.set_sample(5, 5, 2.5).unwrap();
        assert_eq!(buf.get_sample(-2, -2).unwrap(), 1.5);
        assert_eq!(buf.get_sample_unchecked(5, 5), 2.5);
        assert!(buf.set_sample(-3, 0, 0.0).is_err());
        assert!(buf.get_sample(0, 6).is_err());
    }

    #[test]
    fn test_rows() {
        let buf = ramp(3, 2, 1);
        assert_eq!(buf.row(1), &[3.0, 4.0, 5.0]);
        let padded = buf.padded_row(0);
        assert_eq!(padded.len(), 5);
        assert_eq!(&padded[1..4], &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_extend_boundary_edges_and_corners() {
        let mut buf = ramp(3, 3, 2);
        buf.extend_boundary();

        // Corners take the nearest interior corner
        assert_eq!(buf.get_sample(-2, -2).unwrap(), 0.0);
        assert_eq!(buf.get_sample(-1, 4).unwrap(), 2.0);
        assert_eq!(buf.get_sample(4, -1).unwrap(), 6.0);
        assert_eq!(buf.get_sample(4, 4).unwrap(), 8.0);

        // Edges replicate along their row/column
        assert_eq!(buf.get_sample(-2, 1).unwrap(), 1.0);
        assert_eq!(buf.get_sample(1, -2).unwrap(), 3.0);
        assert_eq!(buf.get_sample(1, 4).unwrap(), 5.0);
        assert_eq!(buf.get_sample(3, 1).unwrap(), 7.0);

        // Interior untouched
        assert_eq!(buf.row(1), &[3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_extend_boundary_single_sample() {
        let mut buf = BorderedBuffer::from_interior(1, 1, 3, &[42.0]).unwrap();
        buf.extend_boundary();
        assert!(buf.data().iter().all(|&v| v == 42.0));
    }

    #[test]
    fn test_extend_boundary_idempotent() {
        let mut buf = ramp(5, 4, 3);
        buf.extend_boundary();
        let once = buf.data().to_vec();
        buf.extend_boundary();
        assert_eq!(buf.data(), once.as_slice());
    }

    #[test]
    fn test_extend_boundary_overwrites_stale_border() {
        let mut buf = ramp(2, 2, 1);
        buf.set_sample(-1, -1, 99.0).unwrap();
        buf.set_sample(2, 1, -99.0).unwrap();
        buf.extend_boundary();
        assert_eq!(buf.get_sample(-1, -1).unwrap(), 0.0);
        assert_eq!(buf.get_sample(2, 1).unwrap(), 3.0);
    }
}
