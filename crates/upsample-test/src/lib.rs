//! upsample-test - Regression test framework for the polyphase upsampler
//!
//! Tests record numbered checks on a [`RegParams`] and report the overall
//! result from [`RegParams::cleanup`]. Three modes are supported:
//!
//! - **Generate**: Write golden files for comparison
//! - **Compare**: Compare written images with golden files when present
//! - **Display**: Write images to the regout directory for inspection
//!
//! # Usage
//!
//! ```ignore
//! use upsample_test::{RegParams, uniform_gray};
//!
//! let mut rp = RegParams::new("upsample");
//! let pix = uniform_gray(4, 4, 100)?;
//! rp.compare_values(4.0, pix.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use upsample_core::Pix;

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // upsample-test is at crates/upsample-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

fn build(name: &str, width: u32, height: u32, spp: u32, data: Vec<u8>) -> TestResult<Pix> {
    Pix::from_data(width, height, spp, data).map_err(|e| TestError::ImageBuild {
        name: name.to_string(),
        message: e.to_string(),
    })
}

/// Gray image with every sample set to `value`
pub fn uniform_gray(width: u32, height: u32, value: u8) -> TestResult<Pix> {
    build(
        "uniform_gray",
        width,
        height,
        1,
        vec![value; width as usize * height as usize],
    )
}

/// Gray image ramping left to right from 0 to 255
pub fn gradient_gray(width: u32, height: u32) -> TestResult<Pix> {
    let span = width.saturating_sub(1).max(1);
    let row: Vec<u8> = (0..width).map(|x| (x * 255 / span) as u8).collect();
    let data = row.repeat(height as usize);
    build("gradient_gray", width, height, 1, data)
}

/// RGB checkerboard of `cell`-sized squares alternating between two colors
pub fn checker_rgb(width: u32, height: u32, cell: u32, a: [u8; 3], b: [u8; 3]) -> TestResult<Pix> {
    let cell = cell.max(1);
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            let color = if (x / cell + y / cell) % 2 == 0 { a } else { b };
            data.extend_from_slice(&color);
        }
    }
    build("checker_rgb", width, height, 3, data)
}
