//! Sampled scaling
//!
//! Binary glyphs are scaled by nearest-neighbour sampling: every
//! destination pixel takes the value of the source pixel under its center.
//! 8 bpp images are sampled the same way.

use crate::{ImageOpError, ImageOpResult};
use glyphtrain_core::Pix;

fn sample(pix: &Pix, dw: u32, dh: u32) -> ImageOpResult<Pix> {
    let (sw, sh) = (pix.width(), pix.height());
    if dw == sw && dh == sh {
        return Ok(pix.clone());
    }
    let xmap: Vec<u32> = (0..dw)
        .map(|x| ((((x as f64 + 0.5) * sw as f64) / dw as f64) as u32).min(sw - 1))
        .collect();
    let ymap: Vec<u32> = (0..dh)
        .map(|y| ((((y as f64 + 0.5) * sh as f64) / dh as f64) as u32).min(sh - 1))
        .collect();

    let mut out = Pix::new(dw, dh, pix.depth())?.to_mut();
    out.set_text(pix.text().map(str::to_string));
    for (y, &sy) in ymap.iter().enumerate() {
        for (x, &sx) in xmap.iter().enumerate() {
            let v = pix.get_pixel_unchecked(sx, sy);
            if v != 0 {
                out.set_pixel_unchecked(x as u32, y as u32, v);
            }
        }
    }
    Ok(out.into())
}

/// Scale an image to a specific size
///
/// # Arguments
///
/// * `pix` - Input image
/// * `width` - Target width (0 to maintain aspect ratio)
/// * `height` - Target height (0 to maintain aspect ratio)
///
/// When both targets are 0 the input is returned unchanged.
pub fn scale_to_size(pix: &Pix, width: u32, height: u32) -> ImageOpResult<Pix> {
    let (w, h) = (pix.width() as f64, pix.height() as f64);
    let (dw, dh) = match (width, height) {
        (0, 0) => return Ok(pix.clone()),
        (0, dh) => (((dh as f64 * w / h).round() as u32).max(1), dh),
        (dw, 0) => (dw, ((dw as f64 * h / w).round() as u32).max(1)),
        (dw, dh) => (dw, dh),
    };
    sample(pix, dw, dh)
}

/// Scale an image by independent horizontal and vertical factors
///
/// The output size is the rounded scaled size, at least 1x1.
///
/// # Errors
///
/// Returns [`ImageOpError::InvalidParameters`] for a non-positive factor.
pub fn scale_by_sampling(pix: &Pix, scale_x: f32, scale_y: f32) -> ImageOpResult<Pix> {
    if !(scale_x > 0.0 && scale_y > 0.0) {
        return Err(ImageOpError::InvalidParameters(format!(
            "scale factors must be > 0: {} x {}",
            scale_x, scale_y
        )));
    }
    let dw = ((pix.width() as f32 * scale_x).round() as u32).max(1);
    let dh = ((pix.height() as f32 * scale_y).round() as u32).max(1);
    sample(pix, dw, dh)
}
