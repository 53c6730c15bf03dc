//! Pixa - Arrays of Pix images
//!
//! A `Pixa` is an ordered batch of glyph images, optionally with the box
//! each glyph was cut from. Sample batches, bootstrap libraries and
//! filtered training sets are all passed around as `Pixa`.

use crate::box_::{Box, Boxa};
use crate::pix::Pix;

/// Array of Pix images
///
/// Images are shared (`Pix` clones are reference counted), so building a
/// `Pixa` from images held elsewhere does not copy pixel data.
#[derive(Debug, Clone, Default)]
pub struct Pixa {
    pix: Vec<Pix>,
    boxa: Boxa,
}

impl Pixa {
    /// Create a new empty Pixa
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new Pixa with capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pix: Vec::with_capacity(capacity),
            boxa: Boxa::with_capacity(capacity),
        }
    }

    /// Get the number of images
    #[inline]
    pub fn len(&self) -> usize {
        self.pix.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pix.is_empty()
    }

    /// Get an image by index
    pub fn get(&self, index: usize) -> Option<&Pix> {
        self.pix.get(index)
    }

    /// Add an image
    pub fn push(&mut self, pix: Pix) {
        self.pix.push(pix);
    }

    /// Add an image together with the box it came from
    pub fn push_with_box(&mut self, pix: Pix, b: Box) {
        self.pix.push(pix);
        self.boxa.push(b);
    }

    /// Get the boxes
    pub fn boxa(&self) -> &Boxa {
        &self.boxa
    }

    /// Append every image (and box) of `other`.
    pub fn join(&mut self, other: &Pixa) {
        self.pix.extend(other.pix.iter().cloned());
        for b in other.boxa.iter() {
            self.boxa.push(*b);
        }
    }

    /// Get the minimum and maximum width and height over all images.
    ///
    /// Returns `(min_w, max_w, min_h, max_h)`, or `None` when empty.
    pub fn size_range(&self) -> Option<(u32, u32, u32, u32)> {
        let first = self.pix.first()?;
        let init = (first.width(), first.width(), first.height(), first.height());
        Some(self.pix.iter().fold(init, |(minw, maxw, minh, maxh), p| {
            (
                minw.min(p.width()),
                maxw.max(p.width()),
                minh.min(p.height()),
                maxh.max(p.height()),
            )
        }))
    }

    /// Create an iterator over Pix references
    pub fn iter(&self) -> PixaIter<'_> {
        PixaIter {
            pixa: self,
            index: 0,
        }
    }
}

/// Iterator over Pixa Pix references
pub struct PixaIter<'a> {
    pixa: &'a Pixa,
    index: usize,
}

impl<'a> Iterator for PixaIter<'a> {
    type Item = &'a Pix;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.pixa.pix.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.pixa.pix.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PixaIter<'_> {}

impl<'a> IntoIterator for &'a Pixa {
    type Item = &'a Pix;
    type IntoIter = PixaIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Pixa {
    type Item = Pix;
    type IntoIter = std::vec::IntoIter<Pix>;

    fn into_iter(self) -> Self::IntoIter {
        self.pix.into_iter()
    }
}

impl FromIterator<Pix> for Pixa {
    fn from_iter<T: IntoIterator<Item = Pix>>(iter: T) -> Self {
        Pixa {
            pix: iter.into_iter().collect(),
            boxa: Boxa::new(),
        }
    }
}

impl Extend<Pix> for Pixa {
    fn extend<T: IntoIterator<Item = Pix>>(&mut self, iter: T) {
        self.pix.extend(iter);
    }
}

impl std::ops::Index<usize> for Pixa {
    type Output = Pix;

    fn index(&self, index: usize) -> &Self::Output {
        &self.pix[index]
    }
}
