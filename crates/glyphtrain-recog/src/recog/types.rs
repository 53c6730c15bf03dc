//! Recognizer data structures

use std::collections::HashMap;
use std::fmt;

use glyphtrain_core::Pix;

use crate::error::{RecogError, RecogResult};

/// Default binarization threshold for images deeper than 1 bpp
pub const DEFAULT_THRESHOLD: u8 = 150;

/// Default maximum vertical shift used when matching
pub const DEFAULT_MAX_Y_SHIFT: u32 = 1;

/// Default number of samples per class below which padding is requested
pub const DEFAULT_MIN_NOPAD: usize = 3;

/// Default cap on the number of samples averaged per class
pub const DEFAULT_MAX_AVERAGE_SAMPLES: usize = 256;

/// Longest label, in bytes, that can be packed into a class key
pub const MAX_LABEL_BYTES: usize = 4;

/// Character set type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharsetType {
    /// Character set type is not specified
    #[default]
    Unknown = 0,
    /// Arabic numerals: 0-9 (10 characters)
    ArabicNumerals = 1,
    /// Lowercase Roman numerals: i, v, x, l, c, d, m (7 characters)
    LcRomanNumerals = 2,
    /// Uppercase Roman numerals: I, V, X, L, C, D, M (7 characters)
    UcRomanNumerals = 3,
    /// Lowercase letters: a-z (26 characters)
    LcAlpha = 4,
    /// Uppercase letters: A-Z (26 characters)
    UcAlpha = 5,
}

impl CharsetType {
    /// Returns the expected number of characters in this charset
    pub fn expected_size(&self) -> usize {
        self.characters().len()
    }

    /// Returns the characters in this charset
    pub fn characters(&self) -> &'static [char] {
        match self {
            CharsetType::Unknown => &[],
            CharsetType::ArabicNumerals => &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'],
            CharsetType::LcRomanNumerals => &['i', 'v', 'x', 'l', 'c', 'd', 'm'],
            CharsetType::UcRomanNumerals => &['I', 'V', 'X', 'L', 'C', 'D', 'M'],
            CharsetType::LcAlpha => &[
                'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p',
                'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
            ],
            CharsetType::UcAlpha => &[
                'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P',
                'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
            ],
        }
    }

    /// Whether a built-in bootstrap template set exists for this charset
    pub fn has_boot_templates(&self) -> bool {
        matches!(self, CharsetType::ArabicNumerals)
    }
}

impl fmt::Display for CharsetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CharsetType::Unknown => "unknown",
            CharsetType::ArabicNumerals => "arabic numerals",
            CharsetType::LcRomanNumerals => "lowercase roman numerals",
            CharsetType::UcRomanNumerals => "uppercase roman numerals",
            CharsetType::LcAlpha => "lowercase alpha",
            CharsetType::UcAlpha => "uppercase alpha",
        };
        f.write_str(name)
    }
}

/// Pack a label into the integer key used for class lookup.
///
/// The UTF-8 bytes are packed big-endian. Returns `None` for an empty label
/// or one longer than [`MAX_LABEL_BYTES`] bytes.
pub fn label_to_key(label: &str) -> Option<u32> {
    let bytes = label.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_LABEL_BYTES {
        return None;
    }
    Some(bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32))
}

/// How samples in a batch are assigned to classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassTarget {
    /// Use each sample's embedded text label
    #[default]
    ByLabel,
    /// Put every sample into the class at this index
    ByExplicitClass(usize),
}

/// How a labeled training image is split into samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelMode {
    /// The image holds one character
    #[default]
    Single,
    /// The image holds a left-to-right string, one character per component
    Multi,
}

/// Configuration of a recognizer
#[derive(Debug, Clone, PartialEq)]
pub struct RecogParams {
    /// Horizontal scale target (0 = keep aspect ratio)
    pub scale_w: u32,
    /// Vertical scale target (0 = keep aspect ratio)
    pub scale_h: u32,
    /// Stroke width for normalized templates (0 = skip)
    pub line_w: u32,
    /// Binarization threshold for depth > 1 (0 selects the default)
    pub threshold: u8,
    /// Maximum vertical shift allowed during matching (0, 1 or 2)
    pub max_y_shift: u32,
    /// Character set being trained
    pub charset_type: CharsetType,
    /// Minimum samples per class before padding is unnecessary
    pub min_nopad: usize,
}

impl Default for RecogParams {
    fn default() -> Self {
        Self {
            scale_w: 0,
            scale_h: 0,
            line_w: 0,
            threshold: DEFAULT_THRESHOLD,
            max_y_shift: DEFAULT_MAX_Y_SHIFT,
            charset_type: CharsetType::Unknown,
            min_nopad: DEFAULT_MIN_NOPAD,
        }
    }
}

impl RecogParams {
    /// Check parameter ranges
    pub fn validate(&self) -> RecogResult<()> {
        if self.max_y_shift > 2 {
            return Err(RecogError::InvalidParameter(format!(
                "max_y_shift must be 0, 1, or 2; got {}",
                self.max_y_shift
            )));
        }
        Ok(())
    }

    pub(crate) fn effective_threshold(&self) -> u8 {
        if self.threshold == 0 {
            DEFAULT_THRESHOLD
        } else {
            self.threshold
        }
    }
}

/// An ordered collection of samples with per-sample statistics
///
/// Centroids and areas are only filled in by [`Recog::finish_training`];
/// while collecting, the tables are empty.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    pub(crate) pix: Vec<Pix>,
    pub(crate) centroids: Vec<(f32, f32)>,
    pub(crate) areas: Vec<u32>,
}

impl SampleSet {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            pix: Vec::with_capacity(capacity),
            centroids: Vec::with_capacity(capacity),
            areas: Vec::with_capacity(capacity),
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.pix.len()
    }

    /// Whether the set holds no samples
    pub fn is_empty(&self) -> bool {
        self.pix.is_empty()
    }

    /// The sample bitmaps
    pub fn pix(&self) -> &[Pix] {
        &self.pix
    }

    /// Per-sample centroids (empty until training is finished)
    pub fn centroids(&self) -> &[(f32, f32)] {
        &self.centroids
    }

    /// Per-sample foreground areas (empty until training is finished)
    pub fn areas(&self) -> &[u32] {
        &self.areas
    }

    pub(crate) fn push(&mut self, pix: Pix) {
        self.pix.push(pix);
    }

    pub(crate) fn push_with_stats(&mut self, pix: Pix, centroid: (f32, f32), area: u32) {
        self.pix.push(pix);
        self.centroids.push(centroid);
        self.areas.push(area);
    }

    pub(crate) fn has_stats(&self) -> bool {
        self.centroids.len() == self.pix.len() && self.areas.len() == self.pix.len()
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.pix.shrink_to_fit();
        self.centroids.shrink_to_fit();
        self.areas.shrink_to_fit();
    }
}

/// An averaged class template
#[derive(Debug, Clone)]
pub struct AverageTemplate {
    /// 1 bpp template bitmap
    pub pix: Pix,
    /// Average centroid of the samples that built the template
    pub centroid: (f32, f32),
    /// Foreground pixel count of the template
    pub area: u32,
}

impl AverageTemplate {
    /// Whether this is the 1x1 stand-in for a class with no samples
    pub fn is_placeholder(&self) -> bool {
        self.area == 0 && self.pix.width() == 1 && self.pix.height() == 1
    }
}

/// One character class
#[derive(Debug, Clone)]
pub struct RecogClass {
    pub(crate) text: String,
    pub(crate) key: u32,
    pub(crate) unscaled: SampleSet,
    pub(crate) scaled: SampleSet,
    pub(crate) average_u: Option<AverageTemplate>,
    pub(crate) average: Option<AverageTemplate>,
}

impl RecogClass {
    pub(crate) fn new(text: &str, key: u32) -> Self {
        Self {
            text: text.to_string(),
            key,
            unscaled: SampleSet::default(),
            scaled: SampleSet::default(),
            average_u: None,
            average: None,
        }
    }

    /// Class label
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Packed label key
    pub fn key(&self) -> u32 {
        self.key
    }

    /// Samples as ingested
    pub fn unscaled(&self) -> &SampleSet {
        &self.unscaled
    }

    /// Normalized samples (empty until training is finished)
    pub fn scaled(&self) -> &SampleSet {
        &self.scaled
    }

    /// Average of the unscaled samples, once averaged
    pub fn average_unscaled(&self) -> Option<&AverageTemplate> {
        self.average_u.as_ref()
    }

    /// Average of the normalized samples, once averaged
    pub fn average(&self) -> Option<&AverageTemplate> {
        self.average.as_ref()
    }
}

/// Size range of the averaged templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TemplateSizes {
    pub minwidth_u: u32,
    pub maxwidth_u: u32,
    pub minheight_u: u32,
    pub maxheight_u: u32,
    pub minwidth: u32,
    pub maxwidth: u32,
}

/// Component size limits used when splitting touching characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SplitLimits {
    /// Minimum component width kept
    pub min_split_w: u32,
    /// Minimum component height kept
    pub min_split_h: u32,
    /// Maximum component height kept
    pub max_split_h: u32,
}

/// Character recognizer
///
/// Holds the labeled training samples, grouped by class, and the templates
/// derived from them.
#[derive(Debug, Clone)]
pub struct Recog {
    /// Configuration
    pub params: RecogParams,
    pub(crate) classes: Vec<RecogClass>,
    pub(crate) lookup: HashMap<u32, usize>,
    pub(crate) num_samples: usize,
    pub(crate) sizes: TemplateSizes,
    pub(crate) split: SplitLimits,
    pub(crate) ave_done: bool,
    pub(crate) train_done: bool,
}

impl Recog {
    pub(crate) fn from_params(params: RecogParams) -> Self {
        Self {
            params,
            classes: Vec::new(),
            lookup: HashMap::new(),
            num_samples: 0,
            sizes: TemplateSizes::default(),
            split: SplitLimits::default(),
            ave_done: false,
            train_done: false,
        }
    }

    /// Number of classes
    pub fn set_size(&self) -> usize {
        self.classes.len()
    }

    /// Number of samples accepted so far
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// All classes, in index order
    pub fn classes(&self) -> &[RecogClass] {
        &self.classes
    }

    /// Class at `index`
    pub fn class(&self, index: usize) -> Option<&RecogClass> {
        self.classes.get(index)
    }

    /// Index of the class with this label
    pub fn class_index(&self, label: &str) -> Option<usize> {
        label_to_key(label).and_then(|key| self.lookup.get(&key).copied())
    }

    /// Class labels in index order
    pub fn class_labels(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.text.as_str()).collect()
    }

    /// Unscaled sample count of every class, in index order
    pub fn sample_counts(&self) -> Vec<usize> {
        self.classes.iter().map(|c| c.unscaled.len()).collect()
    }

    /// Expected number of classes for the configured charset
    pub fn charset_size(&self) -> usize {
        self.params.charset_type.expected_size()
    }

    /// Whether averages are current
    pub fn is_ave_done(&self) -> bool {
        self.ave_done
    }

    /// Whether training has been finished
    pub fn is_train_done(&self) -> bool {
        self.train_done
    }

    /// Template size range, valid after averaging
    pub fn template_sizes(&self) -> TemplateSizes {
        self.sizes
    }

    /// Splitting limits, valid after averaging
    pub fn split_limits(&self) -> SplitLimits {
        self.split
    }
}

impl fmt::Display for Recog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match (self.train_done, self.ave_done) {
            (false, _) => "collecting",
            (true, false) => "finished",
            (true, true) => "averaged",
        };
        write!(
            f,
            "recog: {} classes, {} samples, scale {}x{}, line_w {}, charset {}, {}",
            self.classes.len(),
            self.num_samples,
            self.params.scale_w,
            self.params.scale_h,
            self.params.line_w,
            self.params.charset_type,
            state
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_sizes() {
        assert_eq!(CharsetType::Unknown.expected_size(), 0);
        assert_eq!(CharsetType::ArabicNumerals.expected_size(), 10);
        assert_eq!(CharsetType::UcRomanNumerals.expected_size(), 7);
        assert_eq!(CharsetType::LcAlpha.expected_size(), 26);
        assert!(CharsetType::ArabicNumerals.has_boot_templates());
        assert!(!CharsetType::UcAlpha.has_boot_templates());
    }

    #[test]
    fn test_label_to_key() {
        assert_eq!(label_to_key("A"), Some(0x41));
        assert_eq!(label_to_key("ab"), Some(0x6162));
        assert_eq!(label_to_key("abcd"), Some(0x6162_6364));
        assert_eq!(label_to_key(""), None);
        assert_eq!(label_to_key("abcde"), None);
        // two-byte code point
        assert_eq!(label_to_key("é"), Some(0xc3a9));
        assert_ne!(label_to_key("a"), label_to_key("b"));
    }

    #[test]
    fn test_params_validate() {
        assert!(RecogParams::default().validate().is_ok());
        let p = RecogParams {
            max_y_shift: 3,
            ..Default::default()
        };
        assert!(p.validate().is_err());
        let p = RecogParams {
            threshold: 0,
            ..Default::default()
        };
        assert_eq!(p.effective_threshold(), DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_display() {
        let recog = Recog::from_params(RecogParams {
            scale_h: 40,
            ..Default::default()
        });
        assert_eq!(
            recog.to_string(),
            "recog: 0 classes, 0 samples, scale 0x40, line_w 0, charset unknown, collecting"
        );
    }
}
