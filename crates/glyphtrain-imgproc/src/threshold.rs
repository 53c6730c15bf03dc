//! Binarization of grayscale images
//!
//! Binary glyphs use 1 for ink. Scans are dark-on-light, so a grayscale
//! pixel darker than the threshold becomes foreground.

use crate::{ImageOpError, ImageOpResult};
use glyphtrain_core::{Pix, PixelDepth};

/// Convert an 8 bpp grayscale image to binary with a fixed threshold.
///
/// Pixels with value `< threshold` become foreground (1), all others
/// background (0). The text label is carried over.
///
/// # Errors
///
/// Returns [`ImageOpError::UnsupportedDepth`] if the input is not 8 bpp.
pub fn threshold_to_binary(pix: &Pix, threshold: u8) -> ImageOpResult<Pix> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(ImageOpError::UnsupportedDepth {
            expected: "8-bpp grayscale",
            actual: pix.depth().bits(),
        });
    }
    let (w, h) = (pix.width(), pix.height());
    let mut out = Pix::new(w, h, PixelDepth::Bit1)?.to_mut();
    out.set_text(pix.text().map(str::to_string));
    for y in 0..h {
        for x in 0..w {
            if pix.get_pixel_unchecked(x, y) < u32::from(threshold) {
                out.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    Ok(out.into())
}

/// Convert any supported image to binary.
///
/// Binary input is returned as a shared clone; grayscale input is
/// thresholded with [`threshold_to_binary`].
pub fn convert_to_1(pix: &Pix, threshold: u8) -> ImageOpResult<Pix> {
    match pix.depth() {
        PixelDepth::Bit1 => Ok(pix.clone()),
        PixelDepth::Bit8 => threshold_to_binary(pix, threshold),
    }
}
