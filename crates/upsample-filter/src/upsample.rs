//! Separable 5/2 polyphase upsampling
//!
//! Each pass filters along one axis only: every block of two source
//! samples produces five output samples, one per phase of the
//! [`PhaseBank`]. Phase `w` reads around source index
//! `e + SOURCE_OFFSETS[w]`, where `e` is the first source sample of the
//! block. The orthogonal axis is carried through unchanged.
//!
//! # Trailing edge
//!
//! Output buffers start zeroed. The block loop stops once its source index
//! passes the source extent; the phase loop stops at the first phase whose
//! output index is past the last interior line or whose widest tap would
//! read beyond the source halo. Samples never reached stay at `0.0`, and
//! [`upsample_axis`] returns how many output lines it filled.

use crate::kernel::{NUM_PHASES, PhaseBank};
use crate::{FilterError, FilterResult};
use log::{debug, warn};
use upsample_core::{BorderedBuffer, Error};

/// Source samples consumed per block
pub const SOURCE_STEP: u32 = 2;

/// Source offset of each output phase relative to the block's first sample
pub const SOURCE_OFFSETS: [u32; NUM_PHASES] = [0, 0, 1, 1, 2];

/// Filtering direction of one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Filter down columns; output height grows
    Vertical,
    /// Filter along rows; output width grows
    Horizontal,
}

/// Output length for `n` source samples: `ceil(n * 5 / 2)`
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` if the result overflows `u32`.
pub fn upsampled_extent(n: u32) -> FilterResult<u32> {
    let extent = (n as u64 * NUM_PHASES as u64).div_ceil(SOURCE_STEP as u64);
    u32::try_from(extent).map_err(|_| {
        FilterError::InvalidParameters(format!("upsampled extent of {} overflows", n))
    })
}

/// One output sample position along the filtered axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseStep {
    /// Output index
    pub out: u32,
    /// Source index the kernel is centered on
    pub center: i32,
    /// Phase (kernel) index
    pub phase: usize,
}

/// Output positions produced along one axis, in increasing order
///
/// `src_extent` and `dst_extent` are the interior lengths along the
/// filtered axis; `border` is the source halo width.
pub fn phase_schedule(
    src_extent: u32,
    dst_extent: u32,
    border: u32,
    half_length: u32,
) -> Vec<PhaseStep> {
    let last_readable = src_extent as i64 - 1 + border as i64;
    let mut steps = Vec::with_capacity(dst_extent as usize);

    let (mut block_out, mut block_src) = (0i64, 0i64);
    'blocks: while block_out < dst_extent as i64 {
        if block_src > src_extent as i64 {
            break;
        }
        for (phase, &offset) in SOURCE_OFFSETS.iter().enumerate() {
            let out = block_out + phase as i64;
            let center = block_src + offset as i64;
            if out > dst_extent as i64 - 1 || center + half_length as i64 > last_readable {
                break 'blocks;
            }
            steps.push(PhaseStep {
                out: out as u32,
                center: center as i32,
                phase,
            });
        }
        block_out += NUM_PHASES as i64;
        block_src += SOURCE_STEP as i64;
    }

    steps
}

/// Upsample `src` into `dst` along `axis`
///
/// For [`Axis::Vertical`] the widths must match and `dst` receives the
/// upsampled columns; for [`Axis::Horizontal`] the heights must match.
/// `src` must have been boundary-extended after its last interior write.
///
/// Returns the number of output lines written along `axis`, starting from
/// index 0.
///
/// # Errors
///
/// - `FilterError::InsufficientBorder` if `src.border() <= L`
/// - `FilterError::Core(Error::DimensionMismatch)` if the orthogonal extents differ
pub fn upsample_axis(
    src: &BorderedBuffer,
    dst: &mut BorderedBuffer,
    bank: &PhaseBank,
    axis: Axis,
) -> FilterResult<u32> {
    let half_length = bank.half_length();
    if src.border() <= half_length {
        return Err(FilterError::InsufficientBorder {
            border: src.border(),
            half_length,
        });
    }

    let (src_extent, dst_extent) = match axis {
        Axis::Vertical => {
            if dst.width() != src.width() {
                return Err(Error::DimensionMismatch {
                    expected: (src.width(), dst.height()),
                    actual: dst.dimensions(),
                }
                .into());
            }
            (src.height(), dst.height())
        }
        Axis::Horizontal => {
            if dst.height() != src.height() {
                return Err(Error::DimensionMismatch {
                    expected: (dst.width(), src.height()),
                    actual: dst.dimensions(),
                }
                .into());
            }
            (src.width(), dst.width())
        }
    };

    let steps = phase_schedule(src_extent, dst_extent, src.border(), half_length);
    debug!(
        "{:?} pass: {}x{} -> {}x{}, {} taps",
        axis,
        src.width(),
        src.height(),
        dst.width(),
        dst.height(),
        2 * half_length as u64 + 1
    );

    match axis {
        Axis::Vertical => filter_columns(src, dst, bank, &steps),
        Axis::Horizontal => filter_rows(src, dst, bank, &steps),
    }

    let filled = steps.last().map_or(0, |s| s.out + 1);
    if filled < dst_extent {
        warn!(
            "{:?} pass left {} of {} output lines unwritten",
            axis,
            dst_extent - filled,
            dst_extent
        );
    }
    Ok(filled)
}

/// Vertical pass: each output row is a weighted sum of `2L + 1` source rows
fn filter_columns(
    src: &BorderedBuffer,
    dst: &mut BorderedBuffer,
    bank: &PhaseBank,
    steps: &[PhaseStep],
) {
    let l = bank.half_length() as i32;
    let b = src.border() as usize;
    let width = src.width() as usize;
    let mut acc = vec![0.0f32; width];

    for step in steps {
        acc.fill(0.0);
        let taps = bank.kernel(step.phase).taps();
        for (y, &tap) in (-l..=l).zip(taps) {
            let line = &src.padded_row(step.center + y)[b..b + width];
            for (a, &s) in acc.iter_mut().zip(line) {
                *a += s * tap;
            }
        }
        dst.row_mut(step.out).copy_from_slice(&acc);
    }
}

/// Horizontal pass: each output column is a weighted sum along its row
fn filter_rows(
    src: &BorderedBuffer,
    dst: &mut BorderedBuffer,
    bank: &PhaseBank,
    steps: &[PhaseStep],
) {
    let l = bank.half_length() as i64;
    let b = src.border() as i64;

    for r in 0..src.height() {
        let line = src.padded_row(r as i32);
        let out = dst.row_mut(r);
        for step in steps {
            let start = (b + step.center as i64 - l) as usize;
            let taps = bank.kernel(step.phase).taps();
            let window = &line[start..start + taps.len()];
            out[step.out as usize] = window
                .iter()
                .zip(taps)
                .fold(0.0f32, |sum, (&s, &tap)| sum + s * tap);
        }
    }
}

/// Upsample one component by 5/2 in both directions
///
/// Extends `src`'s boundary, filters vertically into an intermediate buffer
/// with the same border as `src`, re-extends that buffer, and filters
/// horizontally into a borderless output of
/// `ceil(2.5 * width) x ceil(2.5 * height)`.
pub fn upsample_2d(src: &mut BorderedBuffer, bank: &PhaseBank) -> FilterResult<BorderedBuffer> {
    let out_width = upsampled_extent(src.width())?;
    let out_height = upsampled_extent(src.height())?;

    src.extend_boundary();
    let mut intermediate = BorderedBuffer::new(src.width(), out_height, src.border())?;
    upsample_axis(src, &mut intermediate, bank, Axis::Vertical)?;

    intermediate.extend_boundary();
    let mut output = BorderedBuffer::new(out_width, out_height, 0)?;
    upsample_axis(&intermediate, &mut output, bank, Axis::Horizontal)?;

    Ok(output)
}
