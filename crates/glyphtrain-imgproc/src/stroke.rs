//! Stroke-width normalization
//!
//! Glyphs written with different pens are made comparable by thinning the
//! foreground to a one-pixel skeleton and then dilating it back to a fixed
//! width.

use crate::morph::dilate_brick;
use crate::{ImageOpError, ImageOpResult, check_binary};
use glyphtrain_core::{Pix, PixelDepth};

/// Thin the foreground of a binary image to an 8-connected skeleton.
///
/// Uses two-subiteration parallel thinning (Zhang-Suen): end points and
/// pixels whose removal would disconnect a stroke are never deleted.
/// Plain Zhang-Suen erases a 2x2 blob completely; here a pixel whose
/// neighbours were all deleted earlier in the same subiteration is kept,
/// so every connected component leaves at least one pixel.
///
/// # Errors
///
/// Returns an error if the image is not 1 bpp.
pub fn thin(pix: &Pix) -> ImageOpResult<Pix> {
    check_binary(pix)?;
    let (w, h) = (pix.width() as usize, pix.height() as usize);
    // one pixel of background padding on every side
    let gw = w + 2;
    let mut g = vec![0u8; gw * (h + 2)];
    for y in 0..h {
        for x in 0..w {
            g[(y + 1) * gw + x + 1] = pix.get_pixel_unchecked(x as u32, y as u32) as u8;
        }
    }

    let mut removals = Vec::new();
    loop {
        let mut changed = false;
        for step in 0..2 {
            removals.clear();
            for y in 1..=h {
                for x in 1..=w {
                    let i = y * gw + x;
                    if g[i] == 0 {
                        continue;
                    }
                    let n = neighbours(&g, gw, i);
                    let b: u8 = n.iter().sum();
                    if !(2..=6).contains(&b) {
                        continue;
                    }
                    let a = (0..8).filter(|&k| n[k] == 0 && n[(k + 1) % 8] == 1).count();
                    if a != 1 {
                        continue;
                    }
                    let (p2, p4, p6, p8) = (n[0], n[2], n[4], n[6]);
                    let keep = if step == 0 {
                        p2 * p4 * p6 != 0 || p4 * p6 * p8 != 0
                    } else {
                        p2 * p4 * p8 != 0 || p2 * p6 * p8 != 0
                    };
                    if !keep {
                        removals.push(i);
                    }
                }
            }
            for &i in &removals {
                if neighbours(&g, gw, i).iter().any(|&v| v != 0) {
                    g[i] = 0;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    let mut out = Pix::new(w as u32, h as u32, PixelDepth::Bit1)?.to_mut();
    out.set_text(pix.text().map(str::to_string));
    for y in 0..h {
        for x in 0..w {
            if g[(y + 1) * gw + x + 1] != 0 {
                out.set_pixel_unchecked(x as u32, y as u32, 1);
            }
        }
    }
    Ok(out.into())
}

/// p2..p9 of the padded grid `g`, clockwise from north
fn neighbours(g: &[u8], gw: usize, i: usize) -> [u8; 8] {
    [
        g[i - gw],
        g[i - gw + 1],
        g[i + 1],
        g[i + gw + 1],
        g[i + gw],
        g[i + gw - 1],
        g[i - 1],
        g[i - gw - 1],
    ]
}

/// Normalize the stroke width of a binary glyph.
///
/// # Arguments
///
/// * `pix` - 1 bpp input image
/// * `width` - Desired stroke width in pixels (>= 1)
///
/// The image is thinned with [`thin`] and the skeleton dilated by a
/// `width` x `width` brick. The output has the same size as the input.
///
/// # Errors
///
/// Returns an error if the image is not 1 bpp or `width` is 0.
pub fn set_stroke_width(pix: &Pix, width: u32) -> ImageOpResult<Pix> {
    if width == 0 {
        return Err(ImageOpError::InvalidParameters(
            "stroke width must be >= 1".to_string(),
        ));
    }
    let skeleton = thin(pix)?;
    if width == 1 {
        return Ok(skeleton);
    }
    dilate_brick(&skeleton, width, width)
}
