//! Range clamp and quantization to 8-bit samples

/// Largest representable output sample
pub const MAX_SAMPLE: u8 = 255;

/// Clamp a filtered sample to `[0, 255]` and truncate it to an integer
///
/// Values above 255 pin to 255, values below 0 pin to 0, and in-range
/// values are truncated toward zero rather than rounded. NaN maps to 0.
#[inline]
pub fn clamp_and_quantize(sample: f32) -> u8 {
    if sample > MAX_SAMPLE as f32 {
        MAX_SAMPLE
    } else if sample < 0.0 {
        0
    } else {
        sample as u8
    }
}

/// Quantize `src` into `dst` element by element
///
/// Stops at the shorter of the two slices.
pub fn quantize_row(src: &[f32], dst: &mut [u8]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = clamp_and_quantize(s);
    }
}
