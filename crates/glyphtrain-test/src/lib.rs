//! glyphtrain-test - Regression test harness for glyphtrain
//!
//! Regression tests create a [`RegParams`], run a sequence of numbered
//! comparisons and finally call [`RegParams::cleanup`], which reports every
//! failure at once instead of stopping at the first one.
//!
//! # Usage
//!
//! ```
//! use glyphtrain_test::RegParams;
//!
//! let mut rp = RegParams::new("average");
//! rp.compare_values(10.0, 10.0, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to echo every comparison

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use glyphtrain_core::Pix;

/// Build a labeled binary glyph from ASCII rows.
///
/// # Arguments
///
/// * `rows` - One string per image row; `#` marks foreground
/// * `label` - Optional text label stored on the image
///
/// # Errors
///
/// Returns [`TestError::Fixture`] when the rows do not describe an image.
pub fn glyph(rows: &[&str], label: Option<&str>) -> TestResult<Pix> {
    let pix = Pix::from_rows(rows).map_err(|e| TestError::Fixture {
        name: label.unwrap_or("<unlabeled>").to_string(),
        message: e.to_string(),
    })?;
    Ok(pix.with_text(label))
}

/// Build a solid `w` x `h` foreground block carrying `label`.
pub fn solid_glyph(w: u32, h: u32, label: &str) -> TestResult<Pix> {
    let row = "#".repeat(w as usize);
    let rows: Vec<&str> = (0..h).map(|_| row.as_str()).collect();
    glyph(&rows, Some(label))
}
