//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use glyphtrain_core::Pix;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare silently, report failures only (default)
    #[default]
    Compare,
    /// Compare and echo every comparison
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
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and recorded failures.
pub struct RegParams {
    /// Name of the test (e.g., "average")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Recorded failures
    failures: Vec<TestError>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "average")
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn record(&mut self, failure: TestError) -> bool {
        eprintln!("Failure in {}_reg: {}", self.test_name, failure);
        self.failures.push(failure);
        false
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        if self.display() {
            eprintln!("  [{}] expected {} actual {}", self.index, expected, actual);
        }
        if (expected - actual).abs() > delta {
            return self.record(TestError::ValueMismatch {
                index: self.index,
                expected,
                actual,
                delta,
            });
        }
        true
    }

    /// Compare two Pix images for exact equality of size, depth and pixels
    ///
    /// # Returns
    ///
    /// `true` if images are identical, `false` otherwise.
    pub fn compare_pix(&mut self, pix1: &Pix, pix2: &Pix) -> bool {
        self.index += 1;
        if self.display() {
            eprintln!(
                "  [{}] pix {}x{} vs {}x{}",
                self.index,
                pix1.width(),
                pix1.height(),
                pix2.width(),
                pix2.height()
            );
        }

        if !pix1.sizes_equal(pix2) {
            let reason = format!(
                "dimension mismatch {}x{}x{} vs {}x{}x{}",
                pix1.width(),
                pix1.height(),
                pix1.depth().bits(),
                pix2.width(),
                pix2.height(),
                pix2.depth().bits()
            );
            return self.record(TestError::PixMismatch {
                index: self.index,
                reason,
            });
        }

        for y in 0..pix1.height() {
            for x in 0..pix1.width() {
                if pix1.get_pixel(x, y) != pix2.get_pixel(x, y) {
                    let reason = format!("pixel mismatch at ({}, {})", x, y);
                    return self.record(TestError::PixMismatch {
                        index: self.index,
                        reason,
                    });
                }
            }
        }
        true
    }

    /// Compare two strings
    ///
    /// # Returns
    ///
    /// `true` if the strings are identical, `false` otherwise.
    pub fn compare_strings(&mut self, expected: &str, actual: &str) -> bool {
        self.index += 1;
        if self.display() {
            eprintln!("  [{}] {:?} vs {:?}", self.index, expected, actual);
        }
        if expected != actual {
            return self.record(TestError::StringMismatch {
                index: self.index,
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
        true
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all comparisons passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        let success = self.failures.is_empty();
        if success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();
        success
    }

    /// Consume the parameters, returning the first failure as an error
    pub fn finish(self) -> TestResult<()> {
        match self.failures.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(()),
        }
    }

    /// Check if all comparisons have passed so far
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Get list of failures
    pub fn failures(&self) -> &[TestError] {
        &self.failures
    }
}
