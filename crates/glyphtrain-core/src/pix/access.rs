//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//!
//! # Pixel packing
//!
//! Pixels are packed MSB-to-LSB within each 32-bit word. For example,
//! in a 1-bit image, pixel 0 occupies bit 31 (MSB) of the first word.

use super::{Pix, PixMut, PixelDepth};
use crate::error::{Error, Result};

#[inline]
fn read_pixel(line: &[u32], x: u32, depth: PixelDepth) -> u32 {
    match depth {
        PixelDepth::Bit1 => get_data_bit(line, x),
        PixelDepth::Bit8 => get_data_byte(line, x),
    }
}

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height` or `x` lies past the row's last word.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        read_pixel(self.row_data(y), x, self.depth())
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(read_pixel(self.row_data(y), x, self.depth()))
    }

    /// Set a pixel value at (x, y).
    ///
    /// The value is masked to the image depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height` or `x` lies past the row's last word.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth();
        let line = self.row_data_mut(y);
        match depth {
            PixelDepth::Bit1 => set_data_bit(line, x, val),
            PixelDepth::Bit8 => set_data_byte(line, x, val),
        }
    }
}

/// Get a 1-bit pixel value.
///
/// Pixels are packed MSB to LSB within each 32-bit word.
#[inline]
pub fn get_data_bit(line: &[u32], x: u32) -> u32 {
    (line[(x >> 5) as usize] >> (31 - (x & 31))) & 1
}

/// Set a 1-bit pixel value.
///
/// Any nonzero `val` sets the bit.
#[inline]
pub fn set_data_bit(line: &mut [u32], x: u32, val: u32) {
    let word = &mut line[(x >> 5) as usize];
    let mask = 0x8000_0000u32 >> (x & 31);
    if val != 0 {
        *word |= mask;
    } else {
        *word &= !mask;
    }
}

/// Get an 8-bit pixel value.
#[inline]
pub fn get_data_byte(line: &[u32], x: u32) -> u32 {
    (line[(x >> 2) as usize] >> (8 * (3 - (x & 3)))) & 0xff
}

/// Set an 8-bit pixel value.
///
/// Only the low 8 bits of `val` are stored.
#[inline]
pub fn set_data_byte(line: &mut [u32], x: u32, val: u32) {
    let word = &mut line[(x >> 2) as usize];
    let shift = 8 * (3 - (x & 3));
    *word = (*word & !(0xff << shift)) | ((val & 0xff) << shift);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_packing_msb_first() {
        let mut line = [0u32; 2];
        set_data_bit(&mut line, 0, 1);
        assert_eq!(line[0], 0x8000_0000);
        set_data_bit(&mut line, 33, 1);
        assert_eq!(line[1], 0x4000_0000);
        assert_eq!(get_data_bit(&line, 33), 1);
        set_data_bit(&mut line, 0, 0);
        assert_eq!(line[0], 0);
    }

    #[test]
    fn test_byte_packing() {
        let mut line = [0u32; 2];
        set_data_byte(&mut line, 0, 0xab);
        set_data_byte(&mut line, 5, 0x1ff);
        assert_eq!(line[0], 0xab00_0000);
        assert_eq!(get_data_byte(&line, 5), 0xff);
        assert_eq!(get_data_byte(&line, 4), 0);
    }

    #[test]
    fn test_set_get_pixel() {
        let mut pm = Pix::new(10, 4, PixelDepth::Bit8).unwrap().to_mut();
        pm.set_pixel(9, 3, 200).unwrap();
        assert_eq!(pm.get_pixel(9, 3), Some(200));
        assert!(pm.set_pixel(10, 0, 1).is_err());
        assert!(pm.set_pixel(0, 4, 1).is_err());
        let pix: Pix = pm.into();
        assert_eq!(pix.get_pixel(9, 3), Some(200));
        assert_eq!(pix.get_pixel(10, 3), None);
    }
}
