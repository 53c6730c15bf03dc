//! Pixel measurement and region extraction
//!
//! Foreground counts, centroids, bounding boxes and the rectangular
//! clipping used when cutting glyphs out of a larger scan.

use super::{Pix, PixelDepth, get_data_bit, set_data_bit};
use crate::box_::Box;
use crate::error::{Error, Result};

impl Pix {
    /// Count the nonzero pixels.
    ///
    /// For a binary image this is the foreground area.
    pub fn count_pixels(&self) -> u32 {
        let w = self.width();
        let mut count = 0u32;
        match self.depth() {
            PixelDepth::Bit1 => {
                let full_words = (w / 32) as usize;
                let rem = w % 32;
                let tail_mask = if rem == 0 { 0 } else { !0u32 << (32 - rem) };
                for y in 0..self.height() {
                    let line = self.row_data(y);
                    count += line[..full_words].iter().map(|v| v.count_ones()).sum::<u32>();
                    if rem != 0 {
                        count += (line[full_words] & tail_mask).count_ones();
                    }
                }
            }
            PixelDepth::Bit8 => {
                for y in 0..self.height() {
                    for x in 0..w {
                        if self.get_pixel_unchecked(x, y) != 0 {
                            count += 1;
                        }
                    }
                }
            }
        }
        count
    }

    /// Compute the centroid of the foreground.
    ///
    /// Binary images weight every ON pixel equally; grayscale images weight
    /// each pixel by its value. An image without foreground has centroid
    /// `(0.0, 0.0)`.
    pub fn centroid(&self) -> (f32, f32) {
        let mut sum = 0f64;
        let mut xsum = 0f64;
        let mut ysum = 0f64;
        for y in 0..self.height() {
            for x in 0..self.width() {
                let v = self.get_pixel_unchecked(x, y) as f64;
                if v != 0.0 {
                    sum += v;
                    xsum += v * x as f64;
                    ysum += v * y as f64;
                }
            }
        }
        if sum == 0.0 {
            return (0.0, 0.0);
        }
        ((xsum / sum) as f32, (ysum / sum) as f32)
    }

    /// Find the bounding box of the nonzero pixels.
    ///
    /// Returns `None` for an image with no foreground.
    pub fn foreground_box(&self) -> Option<Box> {
        let (mut xmin, mut ymin) = (u32::MAX, u32::MAX);
        let (mut xmax, mut ymax) = (0u32, 0u32);
        let mut found = false;
        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.get_pixel_unchecked(x, y) != 0 {
                    found = true;
                    xmin = xmin.min(x);
                    xmax = xmax.max(x);
                    ymin = ymin.min(y);
                    ymax = ymax.max(y);
                }
            }
        }
        found.then(|| {
            Box::new_unchecked(
                xmin as i32,
                ymin as i32,
                (xmax - xmin + 1) as i32,
                (ymax - ymin + 1) as i32,
            )
        })
    }

    /// Extract the part of the image inside `region`.
    ///
    /// The region is first clipped to the image. The text label is kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the region does not overlap
    /// the image.
    pub fn clip_rectangle(&self, region: &Box) -> Result<Pix> {
        let clipped = region
            .clip(self.width() as i32, self.height() as i32)
            .ok_or_else(|| {
                Error::InvalidParameter(format!(
                    "region {:?} does not overlap {}x{} image",
                    region,
                    self.width(),
                    self.height()
                ))
            })?;
        let (x0, y0) = (clipped.x as u32, clipped.y as u32);
        let (w, h) = (clipped.w as u32, clipped.h as u32);

        let mut pm = Pix::new(w, h, self.depth())?.to_mut();
        pm.set_text(self.text().map(str::to_string));
        for y in 0..h {
            for x in 0..w {
                let v = self.get_pixel_unchecked(x0 + x, y0 + y);
                if v != 0 {
                    pm.set_pixel_unchecked(x, y, v);
                }
            }
        }
        Ok(pm.into())
    }

    /// Clip the image to the bounding box of its foreground.
    ///
    /// Returns the clipped image together with the box it was cut from,
    /// or `None` when the image has no foreground.
    pub fn clip_to_foreground(&self) -> Option<(Pix, Box)> {
        let bbox = self.foreground_box()?;
        let pix = self.clip_rectangle(&bbox).ok()?;
        Some((pix, bbox))
    }

    /// Invert the image.
    ///
    /// Binary pixels are flipped, grayscale values become `255 - v`.
    /// Padding bits past the image width are left untouched.
    pub fn invert(&self) -> Pix {
        let mut pm = self.to_mut();
        let (w, h) = (self.width(), self.height());
        match self.depth() {
            PixelDepth::Bit1 => {
                for y in 0..h {
                    let line = pm.row_data_mut(y);
                    for x in 0..w {
                        let v = get_data_bit(line, x);
                        set_data_bit(line, x, v ^ 1);
                    }
                }
            }
            PixelDepth::Bit8 => {
                for y in 0..h {
                    for x in 0..w {
                        let v = self.get_pixel_unchecked(x, y);
                        pm.set_pixel_unchecked(x, y, 255 - v);
                    }
                }
            }
        }
        pm.into()
    }

    /// Check whether two images have identical size, depth and pixels.
    ///
    /// Text labels and padding bits are ignored.
    pub fn equals(&self, other: &Pix) -> bool {
        if !self.sizes_equal(other) {
            return false;
        }
        (0..self.height()).all(|y| {
            (0..self.width()).all(|x| self.get_pixel_unchecked(x, y) == other.get_pixel_unchecked(x, y))
        })
    }
}
