//! Box, Boxa - Rectangle regions
//!
//! These structures describe where glyphs sit inside a larger image:
//! connected-component bounds, crop regions and merged character boxes.

use crate::error::{Error, Result};

/// A rectangle region
///
/// A small Copy type; boxes are passed around by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the box is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check if this box overlaps with another
    pub fn overlaps(&self, other: &Box) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Compute the intersection of two boxes
    pub fn intersect(&self, other: &Box) -> Option<Box> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Box {
                x,
                y,
                w: right - x,
                h: bottom - y,
            })
        } else {
            None
        }
    }

    /// Compute the smallest box containing both boxes
    pub fn union(&self, other: &Box) -> Box {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Box {
            x,
            y,
            w: right - x,
            h: bottom - y,
        }
    }

    /// Clip this box to an image of the given size.
    ///
    /// Returns `None` if nothing of the box lies inside the image.
    pub fn clip(&self, width: i32, height: i32) -> Option<Box> {
        self.intersect(&Box::new_unchecked(0, 0, width, height))
    }
}

/// Which box dimensions a size selection tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSelectType {
    /// Test width only
    Width,
    /// Test height only
    Height,
    /// Keep if either width or height passes
    Either,
    /// Keep only if both width and height pass
    Both,
}

/// Comparison applied by a size selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeRelation {
    /// Strictly less than the threshold
    LessThan,
    /// Strictly greater than the threshold
    GreaterThan,
    /// Less than or equal to the threshold
    LessThanOrEqual,
    /// Greater than or equal to the threshold
    GreaterThanOrEqual,
}

impl SizeRelation {
    #[inline]
    fn holds(self, value: i32, threshold: i32) -> bool {
        match self {
            SizeRelation::LessThan => value < threshold,
            SizeRelation::GreaterThan => value > threshold,
            SizeRelation::LessThanOrEqual => value <= threshold,
            SizeRelation::GreaterThanOrEqual => value >= threshold,
        }
    }
}

/// Array of boxes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Boxa {
    boxes: Vec<Box>,
}

impl Boxa {
    /// Create a new empty Boxa
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new Boxa with capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            boxes: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of boxes
    #[inline]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Get a box by index
    pub fn get(&self, index: usize) -> Option<&Box> {
        self.boxes.get(index)
    }

    /// Add a box
    pub fn push(&mut self, b: Box) {
        self.boxes.push(b);
    }

    /// Get all boxes as a slice
    pub fn boxes(&self) -> &[Box] {
        &self.boxes
    }

    /// Get an iterator over boxes
    pub fn iter(&self) -> impl Iterator<Item = &Box> {
        self.boxes.iter()
    }

    /// Repeatedly merge overlapping boxes until no two boxes overlap.
    ///
    /// Each merged pair is replaced by its union, which may in turn overlap
    /// other boxes, so the pass is repeated until it is stable.
    pub fn combine_overlaps(&self) -> Boxa {
        let mut boxes: Vec<Box> = self.boxes.iter().copied().filter(|b| !b.is_empty()).collect();
        loop {
            let mut merged = false;
            let mut i = 0;
            while i < boxes.len() {
                let mut j = i + 1;
                while j < boxes.len() {
                    if boxes[i].overlaps(&boxes[j]) {
                        let other = boxes.remove(j);
                        boxes[i] = boxes[i].union(&other);
                        merged = true;
                    } else {
                        j += 1;
                    }
                }
                i += 1;
            }
            if !merged {
                break;
            }
        }
        Boxa { boxes }
    }

    /// Select boxes by size.
    ///
    /// # Arguments
    ///
    /// * `width` - Width threshold
    /// * `height` - Height threshold
    /// * `select_type` - Which dimensions are tested
    /// * `relation` - Comparison applied to each tested dimension
    ///
    /// # Returns
    ///
    /// A new Boxa with the passing boxes in their original order.
    pub fn select_by_size(
        &self,
        width: i32,
        height: i32,
        select_type: SizeSelectType,
        relation: SizeRelation,
    ) -> Boxa {
        self.boxes
            .iter()
            .copied()
            .filter(|b| {
                let w_ok = relation.holds(b.w, width);
                let h_ok = relation.holds(b.h, height);
                match select_type {
                    SizeSelectType::Width => w_ok,
                    SizeSelectType::Height => h_ok,
                    SizeSelectType::Either => w_ok || h_ok,
                    SizeSelectType::Both => w_ok && h_ok,
                }
            })
            .collect()
    }

    /// Sort boxes left to right by their x coordinate.
    ///
    /// The sort is stable, so boxes sharing an x keep their order.
    pub fn sort_by_x(&mut self) {
        self.boxes.sort_by_key(|b| b.x);
    }
}

impl FromIterator<Box> for Boxa {
    fn from_iter<I: IntoIterator<Item = Box>>(iter: I) -> Self {
        Boxa {
            boxes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Boxa {
    type Item = Box;
    type IntoIter = std::vec::IntoIter<Box>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Boxa {
    type Item = &'a Box;
    type IntoIter = std::slice::Iter<'a, Box>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_creation() {
        let b = Box::new(10, 20, 100, 50).unwrap();
        assert_eq!(b.right(), 110);
        assert_eq!(b.bottom(), 70);
        assert_eq!(b.area(), 5000);
        assert!(Box::new(0, 0, -1, 5).is_err());
    }

    #[test]
    fn test_box_intersect_union() {
        let a = Box::new_unchecked(0, 0, 10, 10);
        let b = Box::new_unchecked(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Some(Box::new_unchecked(5, 5, 5, 5)));
        assert_eq!(a.union(&b), Box::new_unchecked(0, 0, 15, 15));
        let c = Box::new_unchecked(10, 0, 3, 3);
        assert!(!a.overlaps(&c));
        assert!(a.intersect(&c).is_none());
    }

    #[test]
    fn test_box_clip() {
        let b = Box::new_unchecked(-5, 2, 10, 100);
        assert_eq!(b.clip(20, 20), Some(Box::new_unchecked(0, 2, 5, 18)));
        assert!(Box::new_unchecked(30, 0, 2, 2).clip(20, 20).is_none());
    }

    #[test]
    fn test_combine_overlaps_chains() {
        // a overlaps b only after b has absorbed c
        let boxa: Boxa = [
            Box::new_unchecked(0, 0, 4, 4),
            Box::new_unchecked(10, 0, 4, 4),
            Box::new_unchecked(3, 3, 8, 2),
            Box::new_unchecked(30, 0, 2, 2),
        ]
        .into_iter()
        .collect();
        let merged = boxa.combine_overlaps();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get(0), Some(&Box::new_unchecked(0, 0, 14, 5)));
        assert_eq!(merged.get(1), Some(&Box::new_unchecked(30, 0, 2, 2)));
    }

    #[test]
    fn test_select_by_size_both_greater() {
        let boxa: Boxa = [
            Box::new_unchecked(0, 0, 3, 9),
            Box::new_unchecked(0, 0, 2, 20),
            Box::new_unchecked(0, 0, 10, 8),
        ]
        .into_iter()
        .collect();
        let kept = boxa.select_by_size(2, 8, SizeSelectType::Both, SizeRelation::GreaterThan);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.get(0).unwrap().w, 3);
        let either = boxa.select_by_size(2, 8, SizeSelectType::Either, SizeRelation::GreaterThan);
        assert_eq!(either.len(), 3);
    }

    #[test]
    fn test_sort_by_x() {
        let mut boxa: Boxa = [
            Box::new_unchecked(40, 0, 1, 1),
            Box::new_unchecked(5, 0, 1, 1),
            Box::new_unchecked(20, 0, 1, 1),
        ]
        .into_iter()
        .collect();
        boxa.sort_by_x();
        let xs: Vec<i32> = boxa.iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![5, 20, 40]);
    }
}
