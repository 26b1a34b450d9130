//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use std::fs;
use std::path::Path;
use upsample_core::Pix;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the index of the current check, the mode and
/// whether every check so far has passed.
pub struct RegParams {
    /// Name of the test (e.g., "upsample")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        // Ensure directories exist
        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta || diff.is_nan() {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Compare two images for exact equality
    ///
    /// Dimensions, samples per pixel and every sample must match.
    pub fn compare_pix(&mut self, pix1: &Pix, pix2: &Pix) -> bool {
        self.index += 1;

        if pix1.dimensions() != pix2.dimensions() || pix1.spp() != pix2.spp() {
            let msg = format!(
                "Failure in {}_reg: pix comparison for index {} - dimension mismatch \
                 ({}x{}x{} vs {}x{}x{})",
                self.test_name,
                self.index,
                pix1.width(),
                pix1.height(),
                pix1.spp(),
                pix2.width(),
                pix2.height(),
                pix2.spp()
            );
            self.fail(msg);
            return false;
        }

        for y in 0..pix1.height() {
            if let Some(i) = pix1
                .row(y)
                .iter()
                .zip(pix2.row(y))
                .position(|(a, b)| a != b)
            {
                let msg = format!(
                    "Failure in {}_reg: pix comparison for index {} - sample mismatch at ({}, {})",
                    self.test_name,
                    self.index,
                    i / pix1.spp() as usize,
                    y
                );
                self.fail(msg);
                return false;
            }
        }

        true
    }

    /// Compare two byte arrays
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let msg = format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Write `pix` as BMP to the regout directory and check it against its
    /// golden file
    ///
    /// In generate mode the file is copied to the golden directory. In
    /// compare mode it is compared when a golden file exists; a missing
    /// golden file is reported but not counted as a failure.
    pub fn write_pix_and_check(&mut self, pix: &Pix) -> TestResult<()> {
        self.index += 1;

        let local_path = format!("{}/{}.{:02}.bmp", regout_dir(), self.test_name, self.index);
        upsample_io::write_bmp_file(pix, &local_path).map_err(|e| TestError::ImageWrite {
            path: local_path.clone(),
            message: e.to_string(),
        })?;

        self.check_file(&local_path)
    }

    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let golden_path = format!(
            "{}/{}_golden.{:02}.bmp",
            golden_dir(),
            self.test_name,
            self.index
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    eprintln!("No golden file for index {}: {}", self.index, golden_path);
                    return Ok(());
                }
                if fs::read(local_path)? != fs::read(&golden_path)? {
                    let msg = format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    );
                    self.fail(msg);
                }
            }
            RegTestMode::Display => {
                eprintln!("Wrote: {}", local_path);
            }
        }

        Ok(())
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("params");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.index(), 3);
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_pix() {
        let mut rp = RegParams::new("params_pix");
        let a = Pix::from_data(2, 1, 1, vec![1, 2]).unwrap();
        let b = Pix::from_data(2, 1, 1, vec![1, 3]).unwrap();
        let c = Pix::from_data(1, 1, 2, vec![1, 2]).unwrap();
        assert!(rp.compare_pix(&a, &a.clone()));
        assert!(!rp.compare_pix(&a, &b));
        assert!(!rp.compare_pix(&a, &c));
        assert_eq!(rp.failures().len(), 2);
    }

    #[test]
    fn test_compare_strings() {
        let mut rp = RegParams::new("params_strings");
        assert!(rp.compare_strings(b"abc", b"abc"));
        assert!(!rp.compare_strings(b"abc", b"abd"));
        assert!(!rp.cleanup());
    }
}
