//! PIX - The glyph image container
//!
//! The `Pix` structure is the image type passed between the training
//! stages. Only 1 bpp (binary glyph) and 8 bpp (grayscale scan or
//! accumulator) images are supported.
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - Pixels are packed MSB to LSB within each word
//! - In a binary image, 1 is foreground (ink) and 0 is background
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership), so a sample stored
//! in several collections is shared rather than copied. To modify pixel
//! data, convert to `PixMut` via [`Pix::try_into_mut`] or [`Pix::to_mut`],
//! then convert back with `Into<Pix>`.

mod access;
mod measure;

pub use access::*;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 1-bit binary image
    Bit1 = 1,
    /// 8-bit grayscale image
    Bit8 = 8,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 1 or 8.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            1 => Ok(PixelDepth::Bit1),
            8 => Ok(PixelDepth::Bit8),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the maximum pixel value representable at this depth.
    pub fn max_value(self) -> u32 {
        (1u32 << self.bits()) - 1
    }
}

/// Internal PIX data
#[derive(Debug)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Depth in bits per pixel
    depth: PixelDepth,
    /// 32-bit words per line
    wpl: u32,
    /// Text label associated with the image
    text: Option<String>,
    /// The image data (packed 32-bit words)
    data: Vec<u32>,
}

impl PixData {
    fn duplicate(&self) -> Self {
        PixData {
            width: self.width,
            height: self.height,
            depth: self.depth,
            wpl: self.wpl,
            text: self.text.clone(),
            data: self.data.clone(),
        }
    }
}

/// PIX - Glyph image container
///
/// # Examples
///
/// ```
/// use glyphtrain_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(20, 30, PixelDepth::Bit1).unwrap();
/// assert_eq!(pix.width(), 20);
/// assert_eq!(pix.height(), 30);
/// assert_eq!(pix.count_pixels(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let wpl = Self::compute_wpl(width, depth);
        let data = vec![0u32; (wpl as usize) * (height as usize)];

        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                depth,
                wpl,
                text: None,
                data,
            }),
        })
    }

    /// Build a binary image from rows of ASCII art.
    ///
    /// Each character is one pixel; `#`, `x`, `X`, `1` and `*` are
    /// foreground, anything else is background. Short rows are padded with
    /// background up to the longest row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullInput`] if there are no rows, or
    /// [`Error::InvalidDimension`] if every row is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphtrain_core::Pix;
    ///
    /// let pix = Pix::from_rows(&[".#.", "###", ".#."]).unwrap();
    /// assert_eq!(pix.count_pixels(), 5);
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::NullInput("no rows"));
        }
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let height = rows.len() as u32;
        let mut pm = Pix::new(width, height, PixelDepth::Bit1)?.to_mut();
        for (y, row) in rows.iter().enumerate() {
            let line = pm.row_data_mut(y as u32);
            for (x, c) in row.chars().enumerate() {
                if matches!(c, '#' | 'x' | 'X' | '1' | '*') {
                    set_data_bit(line, x as u32, 1);
                }
            }
        }
        Ok(pm.into())
    }

    #[inline]
    fn compute_wpl(width: u32, depth: PixelDepth) -> u32 {
        (width * depth.bits()).div_ceil(32)
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get the text label.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.inner.text.as_deref()
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the number of strong references to this PIX.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get the words of a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &self.inner.data[start..end]
    }

    /// Check if two PIX have the same width, height, and depth.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.depth == other.inner.depth
    }

    /// Return this image with its text label replaced.
    ///
    /// The pixel data is only copied when it is shared.
    pub fn with_text(self, text: Option<&str>) -> Pix {
        let mut pm = self.try_into_mut().unwrap_or_else(|p| p.to_mut());
        pm.set_text(text.map(str::to_string));
        pm.into()
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: self.inner.duplicate(),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get the text label.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.inner.text.as_deref()
    }

    /// Set the text label.
    pub fn set_text(&mut self, text: Option<String>) {
        self.inner.text = text;
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the words of a specific row.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &self.inner.data[start..end]
    }

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &mut self.inner.data[start..end]
    }

    /// Clear all pixels to 0.
    pub fn clear(&mut self) {
        self.inner.data.fill(0);
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}
