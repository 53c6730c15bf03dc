//! Glyphtrain Core - Basic data structures for glyph images
//!
//! This crate provides the fundamental data structures used throughout
//! the glyphtrain workspace:
//!
//! - [`Pix`] / [`PixMut`] - Binary and grayscale image container (immutable / mutable)
//! - [`Box`] / [`Boxa`] - Rectangle regions
//! - [`Pixa`] - Arrays of images with optional bounding boxes
//!
//! Only 1 bpp and 8 bpp images are represented; glyph samples are always
//! binarized before they reach a recognizer.

pub mod box_;
pub mod error;
pub mod pix;
pub mod pixa;

pub use box_::{Box, Boxa, SizeRelation, SizeSelectType};
pub use error::{Error, Result};
pub use pix::{Pix, PixMut, PixelDepth, get_data_bit, get_data_byte, set_data_bit, set_data_byte};
pub use pixa::{Pixa, PixaIter};
