//! Whole-image upsampling
//!
//! [`upsample_pix`] runs the separable filter over every component of an
//! 8-bit [`Pix`] and quantizes the result back to 8 bits. Components are
//! filtered independently with one shared [`PhaseBank`].

use crate::kernel::{PhaseBank, check_half_length};
use crate::quantize::clamp_and_quantize;
use crate::upsample::{upsample_2d, upsampled_extent};
use crate::{FilterError, FilterResult};
use log::{debug, trace};
use upsample_core::{BorderedBuffer, Pix};

/// Minimum halo width around each source plane
pub const DEFAULT_BORDER: u32 = 14;

/// Parameters of one upsampling run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsampleConfig {
    half_length: u32,
    border: u32,
}

impl UpsampleConfig {
    /// Configuration for filter half-length `half_length`
    ///
    /// The border is [`DEFAULT_BORDER`], widened to `half_length + 1` for
    /// longer filters.
    pub fn new(half_length: u32) -> Self {
        UpsampleConfig {
            half_length,
            border: DEFAULT_BORDER.max(half_length.saturating_add(1)),
        }
    }

    /// Override the halo width
    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    /// Get the filter half-length `L`
    #[inline]
    pub fn half_length(&self) -> u32 {
        self.half_length
    }

    /// Get the halo width
    #[inline]
    pub fn border(&self) -> u32 {
        self.border
    }

    /// Check the tap-count floor and that the border exceeds `L`
    pub fn validate(&self) -> FilterResult<()> {
        check_half_length(self.half_length)?;
        if self.border <= self.half_length {
            return Err(FilterError::InsufficientBorder {
                border: self.border,
                half_length: self.half_length,
            });
        }
        Ok(())
    }
}

/// Upsample every component of `pix` by 5/2 in both directions
///
/// The output has the same number of components and dimensions
/// `ceil(2.5 * width) x ceil(2.5 * height)`. Filtered samples are clamped to
/// `[0, 255]` and truncated.
///
/// # Errors
///
/// Returns `FilterError::InvalidKernel` or `FilterError::InsufficientBorder`
/// if `config` is invalid, and `FilterError::Core` if a buffer can't be
/// allocated for the requested size.
pub fn upsample_pix(pix: &Pix, config: &UpsampleConfig) -> FilterResult<Pix> {
    config.validate()?;
    let (width, height) = pix.dimensions();
    let out_width = upsampled_extent(width)?;
    let out_height = upsampled_extent(height)?;

    let bank = PhaseBank::new(config.half_length())?;
    let spp = pix.spp();
    let mut out = Pix::new(out_width, out_height, spp)?;
    debug!(
        "upsampling {}x{} ({} spp) to {}x{}, border {}",
        width,
        height,
        spp,
        out_width,
        out_height,
        config.border()
    );

    let mut plane = BorderedBuffer::new(width, height, config.border())?;
    for n in 0..spp {
        for y in 0..height {
            for (d, s) in plane.row_mut(y).iter_mut().zip(pix.component_row(y, n)) {
                *d = s as f32;
            }
        }

        let filtered = upsample_2d(&mut plane, &bank)?;

        for y in 0..out_height {
            let dst = out.row_mut(y).iter_mut().skip(n as usize).step_by(spp as usize);
            for (d, &v) in dst.zip(filtered.row(y)) {
                *d = clamp_and_quantize(v);
            }
        }
        trace!("component {} done", n);
    }

    Ok(out)
}
