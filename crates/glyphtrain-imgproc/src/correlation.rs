//! Correlation scoring between two binary glyphs

use crate::{ImageOpResult, check_binary};
use glyphtrain_core::{Pix, get_data_bit};

/// Compute the correlation score of two binary images.
///
/// `pix2` is translated by `(round(delx), round(dely))` into the frame of
/// `pix1`, and the foreground pixels present in both are counted. The score
/// is `count^2 / (area1 * area2)`, which is 1.0 for identical glyphs and 0.0
/// for disjoint ones.
///
/// # Arguments
///
/// * `pix1`, `pix2` - 1 bpp images
/// * `area1`, `area2` - Foreground pixel counts of the two images
/// * `delx`, `dely` - Offset applied to `pix2`, usually the difference of
///   the two centroids
/// * `max_diff_w`, `max_diff_h` - Largest allowed width/height difference;
///   images differing by more score 0.0 without comparison
///
/// # Errors
///
/// Returns an error if either image is not 1 bpp.
#[allow(clippy::too_many_arguments)]
pub fn correlation_score_simple(
    pix1: &Pix,
    pix2: &Pix,
    area1: u32,
    area2: u32,
    delx: f32,
    dely: f32,
    max_diff_w: u32,
    max_diff_h: u32,
) -> ImageOpResult<f32> {
    check_binary(pix1)?;
    check_binary(pix2)?;
    if pix1.width().abs_diff(pix2.width()) > max_diff_w
        || pix1.height().abs_diff(pix2.height()) > max_diff_h
    {
        return Ok(0.0);
    }
    if area1 == 0 || area2 == 0 {
        return Ok(0.0);
    }

    let idelx = delx.round() as i64;
    let idely = dely.round() as i64;
    let (w1, h1) = (pix1.width() as i64, pix1.height() as i64);
    let (w2, h2) = (pix2.width() as i64, pix2.height() as i64);

    // overlap of pix2's translated frame with pix1, in pix1 coordinates
    let x0 = idelx.max(0);
    let y0 = idely.max(0);
    let x1 = (idelx + w2).min(w1);
    let y1 = (idely + h2).min(h1);

    let mut count = 0u64;
    for y in y0..y1 {
        let line1 = pix1.row_data(y as u32);
        let line2 = pix2.row_data((y - idely) as u32);
        for x in x0..x1 {
            if get_data_bit(line1, x as u32) & get_data_bit(line2, (x - idelx) as u32) != 0 {
                count += 1;
            }
        }
    }

    let score = (count * count) as f64 / (area1 as f64 * area2 as f64);
    Ok(score as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plus() -> Pix {
        Pix::from_rows(&[".#.", "###", ".#."]).unwrap()
    }

    #[test]
    fn test_identical_scores_one() {
        let p = plus();
        let s = correlation_score_simple(&p, &p, 5, 5, 0.0, 0.0, 5, 5).unwrap();
        assert!((s - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_shift_aligns_images() {
        let a = Pix::from_rows(&["....", ".##.", ".##.", "...."]).unwrap();
        let b = Pix::from_rows(&["##", "##"]).unwrap();
        let aligned = correlation_score_simple(&a, &b, 4, 4, 1.0, 1.0, 5, 5).unwrap();
        assert!((aligned - 1.0).abs() < 1e-6);
        let unaligned = correlation_score_simple(&a, &b, 4, 4, 0.0, 0.0, 5, 5).unwrap();
        assert!((unaligned - 1.0 / 16.0).abs() < 1e-6);
        let rounded = correlation_score_simple(&a, &b, 4, 4, 0.6, 1.4, 5, 5).unwrap();
        assert!((rounded - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_size_difference_scores_zero() {
        let small = plus();
        let wide = Pix::from_rows(&["##########"]).unwrap();
        let s = correlation_score_simple(&small, &wide, 5, 10, 0.0, 0.0, 5, 5).unwrap();
        assert_eq!(s, 0.0);
    }

    #[test]
    fn test_shift_out_of_frame() {
        let p = plus();
        let s = correlation_score_simple(&p, &p, 5, 5, 10.0, 0.0, 5, 5).unwrap();
        assert_eq!(s, 0.0);
    }
}
