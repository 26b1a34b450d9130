//! Polyphase kernels
//!
//! A [`PhaseKernel`] is a 1-D windowed-sinc low-pass filter evaluated at a
//! fractional sub-sample shift. A [`PhaseBank`] holds one kernel per output
//! phase of the fixed 2:5 resampling ratio.
//!
//! The prototype is a sinc with cutoff at 0.4 of Nyquist. The zero-shift
//! kernel is tapered by a Hann-type window of period `L + 0.5` and made even
//! by mirroring the negative taps; shifted kernels use the window
//! `0.5 * (1 + cos(pi * (t - s - L) / (L + 0.5)))` evaluated at every tap.
//! All kernels with `L > 0` are rescaled to unit DC gain.

use crate::{FilterError, FilterResult};
use log::debug;
use std::f64::consts::PI;

/// Floor on the tap count: a kernel with `L > 0` needs `2L + 1 > MIN_TAP_COUNT`
pub const MIN_TAP_COUNT: u32 = 14;

/// Largest supported filter half-length (29 taps)
pub const MAX_HALF_LENGTH: u32 = 14;

/// Output phases per block of the 2:5 ratio
pub const NUM_PHASES: usize = 5;

/// Sub-sample shift of each output phase, in source-sample units
pub const PHASE_SHIFTS: [f32; NUM_PHASES] = [0.0, 0.4, -0.2, 0.2, -0.4];

/// Low-pass cutoff as a fraction of the source Nyquist rate
const CUTOFF: f64 = 0.4;

/// Check a filter half-length against the tap-count floor and
/// [`MAX_HALF_LENGTH`]
///
/// `L == 0` is the identity filter and always passes.
pub fn check_half_length(half_length: u32) -> FilterResult<()> {
    if half_length > MAX_HALF_LENGTH {
        return Err(FilterError::InvalidKernel(format!(
            "half-length {} exceeds the maximum of {}",
            half_length, MAX_HALF_LENGTH
        )));
    }
    let taps = 2 * half_length as u64 + 1;
    if half_length > 0 && taps <= MIN_TAP_COUNT as u64 {
        return Err(FilterError::InvalidKernel(format!(
            "half-length {} gives {} taps, need more than {}",
            half_length, taps, MIN_TAP_COUNT
        )));
    }
    Ok(())
}

fn check_shift(shift: f32) -> FilterResult<()> {
    if !shift.is_finite() {
        return Err(FilterError::InvalidKernel(format!(
            "shift {} is not finite",
            shift
        )));
    }
    Ok(())
}

#[inline]
fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    let arg = CUTOFF * PI * x;
    arg.sin() / arg
}

/// One phase of the polyphase filter bank
///
/// Taps are indexed symmetrically from `-L` to `L`.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseKernel {
    /// Half-length `L`
    half_length: u32,
    /// Fractional shift the kernel was generated for
    shift: f32,
    /// `2L + 1` taps, `taps[0]` is tap `-L`
    taps: Vec<f32>,
}

impl PhaseKernel {
    /// Generate the windowed-sinc kernel for `half_length` and `shift`
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidKernel` if `0 < L` and `2L + 1` does not
    /// exceed [`MIN_TAP_COUNT`], if `L > MAX_HALF_LENGTH`, if `shift` is not
    /// finite, or if the taps sum to zero.
    pub fn generate(half_length: u32, shift: f32) -> FilterResult<Self> {
        check_shift(shift)?;
        if half_length == 0 {
            return Ok(Self::identity(shift));
        }
        check_half_length(half_length)?;

        let l = half_length as i32;
        let period = half_length as f64 + 0.5;
        let mut taps = vec![0.0f32; 2 * half_length as usize + 1];

        if shift == 0.0 {
            // Negative taps come first, so the mirror source is already set
            for t in -l..=l {
                let idx = (t + l) as usize;
                taps[idx] = match t {
                    0 => 1.0,
                    t if t > 0 => taps[(l - t) as usize],
                    t => {
                        let x = t as f64;
                        (sinc(x) * 0.5 * (1.0 + (2.0 * PI * x / period).cos())) as f32
                    }
                };
            }
        } else {
            let s = shift as f64;
            for (tap, t) in taps.iter_mut().zip(-l..=l) {
                let x = t as f64 - s;
                let window = 0.5 * (1.0 + (PI * (x - half_length as f64) / period).cos());
                *tap = (sinc(x) * window) as f32;
            }
        }

        let gain: f64 = taps.iter().map(|&v| v as f64).sum();
        if !gain.is_finite() || gain.abs() < f64::EPSILON {
            return Err(FilterError::InvalidKernel(format!(
                "half-length {} shift {} has zero DC gain",
                half_length, shift
            )));
        }
        let scale = 1.0 / gain;
        for tap in &mut taps {
            *tap = (*tap as f64 * scale) as f32;
        }

        Ok(PhaseKernel {
            half_length,
            shift,
            taps,
        })
    }

    /// The single-tap identity kernel
    pub fn identity(shift: f32) -> Self {
        PhaseKernel {
            half_length: 0,
            shift,
            taps: vec![1.0],
        }
    }

    /// Get the half-length `L`
    #[inline]
    pub fn half_length(&self) -> u32 {
        self.half_length
    }

    /// Get the shift the kernel was generated for
    #[inline]
    pub fn shift(&self) -> f32 {
        self.shift
    }

    /// Get the taps, from `-L` to `L`
    #[inline]
    pub fn taps(&self) -> &[f32] {
        &self.taps
    }

    /// Number of taps (`2L + 1`)
    #[inline]
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    /// Always false: a kernel has at least one tap
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Get tap `t` for `t` in `[-L, L]`
    ///
    /// # Panics
    ///
    /// Panics if `|t| > L`.
    #[inline]
    pub fn tap(&self, t: i32) -> f32 {
        let l = self.half_length as i32;
        assert!((-l..=l).contains(&t), "tap {t} outside [-{l}, {l}]");
        self.taps[(t + l) as usize]
    }

    /// Sum of all taps (the DC gain), accumulated in `f64`
    pub fn sum(&self) -> f64 {
        self.taps.iter().map(|&v| v as f64).sum()
    }
}

/// Kernel bank for the five output phases
///
/// Built once per run from the filter half-length and shared, read-only, by
/// every channel and both passes.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseBank {
    half_length: u32,
    kernels: Vec<PhaseKernel>,
}

impl PhaseBank {
    /// Build the bank using the fixed [`PHASE_SHIFTS`] schedule
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidKernel` if the half-length violates the
    /// tap-count floor.
    pub fn new(half_length: u32) -> FilterResult<Self> {
        let kernels = PHASE_SHIFTS
            .iter()
            .map(|&shift| PhaseKernel::generate(half_length, shift))
            .collect::<FilterResult<Vec<_>>>()?;

        debug!(
            "built phase bank: half-length {}, {} taps per phase, shifts {:?}",
            half_length,
            2 * half_length as u64 + 1,
            PHASE_SHIFTS
        );
        Ok(PhaseBank {
            half_length,
            kernels,
        })
    }

    /// Get the shared half-length `L`
    #[inline]
    pub fn half_length(&self) -> u32 {
        self.half_length
    }

    /// Get the kernel for output phase `phase`
    ///
    /// # Panics
    ///
    /// Panics if `phase >= NUM_PHASES`.
    #[inline]
    pub fn kernel(&self, phase: usize) -> &PhaseKernel {
        &self.kernels[phase]
    }

    /// Get all kernels in phase order
    #[inline]
    pub fn kernels(&self) -> &[PhaseKernel] {
        &self.kernels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_count_floor() {
        for l in 1..=6 {
            assert!(PhaseKernel::generate(l, 0.0).is_err(), "L={l}");
        }
        assert!(PhaseKernel::generate(7, 0.0).is_ok());
        assert!(check_half_length(0).is_ok());
        assert!(check_half_length(MAX_HALF_LENGTH).is_ok());
    }

    #[test]
    fn test_half_length_ceiling() {
        for l in [MAX_HALF_LENGTH + 1, 30000, u32::MAX] {
            assert!(matches!(
                PhaseKernel::generate(l, 0.0),
                Err(FilterError::InvalidKernel(_))
            ));
            assert!(PhaseBank::new(l).is_err());
        }
    }

    #[test]
    fn test_identity_for_zero_length() {
        for shift in [0.0, 0.4, -0.2, 0.2, -0.4] {
            let k = PhaseKernel::generate(0, shift).unwrap();
            assert_eq!(k.taps(), &[1.0]);
            assert_eq!(k.tap(0), 1.0);
            assert_eq!(k.shift(), shift);
        }
    }

    #[test]
    fn test_non_finite_shift() {
        assert!(PhaseKernel::generate(7, f32::NAN).is_err());
        assert!(PhaseKernel::generate(7, f32::NEG_INFINITY).is_err());
        assert!(PhaseKernel::generate(0, f32::INFINITY).is_err());
    }

    #[test]
    fn test_whole_sample_shifts() {
        // Shifts beyond half a sample are legal; integral ones land a tap on
        // the sinc peak
        for shift in [0.7, 1.5, 2.0, -1.25, -2.0] {
            let k = PhaseKernel::generate(7, shift).unwrap();
            assert_eq!(k.len(), 15);
            assert!(k.taps().iter().all(|v| v.is_finite()), "shift={shift}");
            assert!((k.sum() - 1.0).abs() < 1e-3, "shift={shift} sum={}", k.sum());
        }
    }

    #[test]
    fn test_unit_dc_gain() {
        for l in [7, 8, 9, 10, 12, 14] {
            for shift in PHASE_SHIFTS {
                let k = PhaseKernel::generate(l, shift).unwrap();
                assert_eq!(k.len(), 2 * l as usize + 1);
                assert!(
                    (k.sum() - 1.0).abs() < 1e-5,
                    "L={l} shift={shift} sum={}",
                    k.sum()
                );
            }
        }
    }

    #[test]
    fn test_zero_shift_even_symmetry() {
        let k = PhaseKernel::generate(9, 0.0).unwrap();
        for t in 0..=9 {
            assert_eq!(k.tap(t), k.tap(-t));
        }
        // The center tap dominates the low-pass prototype
        assert!(k.taps().iter().all(|&v| v <= k.tap(0)));
    }

    #[test]
    fn test_zero_shift_prototype_values() {
        let l = 7u32;
        let k = PhaseKernel::generate(l, 0.0).unwrap();
        let raw = |t: f64| {
            let arg = 0.4 * PI * t;
            arg.sin() / arg * 0.5 * (1.0 + (2.0 * PI * t / (l as f64 + 0.5)).cos())
        };
        let gain = 1.0 + 2.0 * (1..=7).map(|t| raw(-(t as f64))).sum::<f64>();
        assert!((k.tap(0) as f64 - 1.0 / gain).abs() < 1e-6);
        assert!((k.tap(-3) as f64 - raw(-3.0) / gain).abs() < 1e-6);
    }

    #[test]
    fn test_shifted_window_matches_formula() {
        let (l, s) = (8u32, 0.4f32);
        let k = PhaseKernel::generate(l, s).unwrap();
        let raw: Vec<f64> = (-(l as i32)..=l as i32)
            .map(|t| {
                let x = t as f64 - s as f64;
                let arg = 0.4 * PI * x;
                arg.sin() / arg * 0.5 * (1.0 + (PI * (x - l as f64) / (l as f64 + 0.5)).cos())
            })
            .collect();
        let gain: f64 = raw.iter().sum();
        for (got, want) in k.taps().iter().zip(&raw) {
            assert!((*got as f64 - want / gain).abs() < 1e-5);
        }
    }

    #[test]
    fn test_shifted_kernels_are_not_symmetric() {
        let k = PhaseKernel::generate(7, 0.2).unwrap();
        assert!((k.tap(3) - k.tap(-3)).abs() > 1e-6);
    }

    #[test]
    #[should_panic]
    fn test_tap_out_of_range() {
        let k = PhaseKernel::generate(7, 0.0).unwrap();
        k.tap(8);
    }

    #[test]
    fn test_bank_schedule() {
        let bank = PhaseBank::new(7).unwrap();
        assert_eq!(bank.half_length(), 7);
        assert_eq!(bank.kernels().len(), NUM_PHASES);
        for (w, shift) in PHASE_SHIFTS.iter().enumerate() {
            assert_eq!(bank.kernel(w).shift(), *shift);
            assert_eq!(bank.kernel(w).half_length(), 7);
        }
        assert!(PhaseBank::new(3).is_err());
    }
}
