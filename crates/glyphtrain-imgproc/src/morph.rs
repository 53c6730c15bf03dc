//! Binary morphology with brick structuring elements
//!
//! A `width` x `height` brick has its origin at `(width / 2, height / 2)`.
//! Brick operations are separable, so each is run as a horizontal pass
//! followed by a vertical pass, and every 1-D pass uses a running sum so
//! the cost does not grow with the brick size.
//!
//! Boundary handling: dilation treats pixels outside the image as OFF, and
//! so does plain erosion. [`close_brick`] pads the image before closing so
//! that glyphs touching the image edge are not eaten by the erosion.

use crate::{ImageOpError, ImageOpResult, check_binary};
use glyphtrain_core::{Pix, PixelDepth};

/// Unpacked binary raster, one byte per pixel.
struct Grid {
    w: usize,
    h: usize,
    cells: Vec<u8>,
}

impl Grid {
    fn from_pix(pix: &Pix, border_x: usize, border_y: usize) -> Self {
        let w = pix.width() as usize + 2 * border_x;
        let h = pix.height() as usize + 2 * border_y;
        let mut cells = vec![0u8; w * h];
        for y in 0..pix.height() {
            for x in 0..pix.width() {
                if pix.get_pixel_unchecked(x, y) != 0 {
                    cells[(y as usize + border_y) * w + x as usize + border_x] = 1;
                }
            }
        }
        Grid { w, h, cells }
    }

    fn to_pix(&self, template: &Pix, border_x: usize, border_y: usize) -> ImageOpResult<Pix> {
        let mut pm = Pix::new(template.width(), template.height(), PixelDepth::Bit1)?.to_mut();
        pm.set_text(template.text().map(str::to_string));
        for y in 0..template.height() {
            for x in 0..template.width() {
                if self.cells[(y as usize + border_y) * self.w + x as usize + border_x] != 0 {
                    pm.set_pixel_unchecked(x, y, 1);
                }
            }
        }
        Ok(pm.into())
    }

    /// Run a 1-D dilation or erosion along rows (`horizontal`) or columns.
    fn pass(&mut self, size: usize, horizontal: bool, dilate: bool) {
        if size <= 1 {
            return;
        }
        let (lines, len) = if horizontal {
            (self.h, self.w)
        } else {
            (self.w, self.h)
        };
        let origin = size / 2;
        let mut line = vec![0u8; len];
        let mut prefix = vec![0usize; len + 1];

        for l in 0..lines {
            let index = |i: usize| if horizontal { l * len + i } else { i * lines + l };
            for (i, px) in line.iter_mut().enumerate() {
                *px = self.cells[index(i)];
            }
            for i in 0..len {
                prefix[i + 1] = prefix[i] + line[i] as usize;
            }
            for i in 0..len {
                let on = if dilate {
                    // out[i] = OR of src[i - d] over offsets d in [-origin, size - 1 - origin]
                    let lo = i.saturating_sub(size - 1 - origin);
                    let hi = (i + origin).min(len - 1);
                    prefix[hi + 1] > prefix[lo]
                } else {
                    // out[i] = AND of src[i + d]; any offset outside the line fails
                    match i.checked_sub(origin) {
                        Some(lo) if lo + size <= len => prefix[lo + size] - prefix[lo] == size,
                        _ => false,
                    }
                };
                self.cells[index(i)] = u8::from(on);
            }
        }
    }
}

fn check_brick(width: u32, height: u32) -> ImageOpResult<()> {
    if width == 0 || height == 0 {
        return Err(ImageOpError::InvalidParameters(format!(
            "brick dimensions must be >= 1: {}x{}",
            width, height
        )));
    }
    Ok(())
}

/// Dilate with a brick (rectangular) structuring element
///
/// # Errors
///
/// Returns an error if the image is not 1 bpp or either dimension is 0.
pub fn dilate_brick(pix: &Pix, width: u32, height: u32) -> ImageOpResult<Pix> {
    check_binary(pix)?;
    check_brick(width, height)?;
    if width == 1 && height == 1 {
        return Ok(pix.clone());
    }
    let mut grid = Grid::from_pix(pix, 0, 0);
    grid.pass(width as usize, true, true);
    grid.pass(height as usize, false, true);
    grid.to_pix(pix, 0, 0)
}

/// Erode with a brick (rectangular) structuring element
///
/// Pixels whose brick would extend past the image edge are cleared.
///
/// # Errors
///
/// Returns an error if the image is not 1 bpp or either dimension is 0.
pub fn erode_brick(pix: &Pix, width: u32, height: u32) -> ImageOpResult<Pix> {
    check_binary(pix)?;
    check_brick(width, height)?;
    if width == 1 && height == 1 {
        return Ok(pix.clone());
    }
    let mut grid = Grid::from_pix(pix, 0, 0);
    grid.pass(width as usize, true, false);
    grid.pass(height as usize, false, false);
    grid.to_pix(pix, 0, 0)
}

/// Close with a brick structuring element, safe at the image border
///
/// Closing = dilation followed by erosion. The image is padded by the
/// brick size on every side before closing and the padding is stripped
/// afterwards, so the result always contains the input.
///
/// # Errors
///
/// Returns an error if the image is not 1 bpp or either dimension is 0.
pub fn close_brick(pix: &Pix, width: u32, height: u32) -> ImageOpResult<Pix> {
    check_binary(pix)?;
    check_brick(width, height)?;
    if width == 1 && height == 1 {
        return Ok(pix.clone());
    }
    let (bx, by) = (width as usize, height as usize);
    let mut grid = Grid::from_pix(pix, bx, by);
    grid.pass(bx, true, true);
    grid.pass(by, false, true);
    grid.pass(bx, true, false);
    grid.pass(by, false, false);
    grid.to_pix(pix, bx, by)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dilate_single_pixel() {
        let pix = Pix::from_rows(&[".....", ".....", "..#..", ".....", "....."]).unwrap();
        let d = dilate_brick(&pix, 3, 3).unwrap();
        assert_eq!(d.count_pixels(), 9);
        assert_eq!(d.get_pixel(1, 1), Some(1));
        assert_eq!(d.get_pixel(0, 0), Some(0));
    }

    #[test]
    fn test_dilate_even_brick_origin() {
        // origin of a 2-wide brick is at offset 1, so growth is to the left
        let pix = Pix::from_rows(&["..#.."]).unwrap();
        let d = dilate_brick(&pix, 2, 1).unwrap();
        let row: Vec<u32> = (0..5).map(|x| d.get_pixel(x, 0).unwrap()).collect();
        assert_eq!(row, vec![0, 1, 1, 0, 0]);
    }

    #[test]
    fn test_erode_clears_edges() {
        let pix = Pix::from_rows(&["#####", "#####", "#####"]).unwrap();
        let e = erode_brick(&pix, 3, 3).unwrap();
        assert_eq!(e.count_pixels(), 3);
        assert_eq!(e.get_pixel(2, 1), Some(1));
    }

    #[test]
    fn test_close_bridges_vertical_gap() {
        let pix = Pix::from_rows(&["#..", "...", "...", "#..", "..#"]).unwrap();
        let c = close_brick(&pix, 1, 70).unwrap();
        // column 0 is filled between its two pixels, column 2 is untouched
        assert_eq!(c.get_pixel(0, 1), Some(1));
        assert_eq!(c.get_pixel(0, 2), Some(1));
        assert_eq!(c.get_pixel(0, 4), Some(0));
        assert_eq!(c.get_pixel(2, 4), Some(1));
        assert_eq!(c.count_pixels(), 5);
    }

    #[test]
    fn test_close_is_extensive() {
        let pix = Pix::from_rows(&["#.#.#", ".#.#.", "#...#"]).unwrap();
        let c = close_brick(&pix, 3, 3).unwrap();
        for y in 0..pix.height() {
            for x in 0..pix.width() {
                if pix.get_pixel(x, y) == Some(1) {
                    assert_eq!(c.get_pixel(x, y), Some(1));
                }
            }
        }
    }

    #[test]
    fn test_invalid_brick() {
        let pix = Pix::from_rows(&["#"]).unwrap();
        assert!(dilate_brick(&pix, 0, 1).is_err());
        let gray = Pix::new(2, 2, PixelDepth::Bit8).unwrap();
        assert!(close_brick(&gray, 1, 3).is_err());
    }
}
