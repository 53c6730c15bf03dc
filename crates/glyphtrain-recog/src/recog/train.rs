//! Template training for character recognition
//!
//! Samples are collected per class, then [`Recog::finish_training`] freezes
//! the collection and derives the normalized samples that averaging and
//! matching work on.

use glyphtrain_core::{Box, Pix, Pixa, SizeRelation, SizeSelectType};
use glyphtrain_imgproc::{
    ConnectivityType, close_brick, conncomp_boxes, convert_to_1, scale_to_size, set_stroke_width,
};
use tracing::{debug, info, warn};

use crate::error::{RecogError, RecogResult};

use super::types::{
    CharsetType, ClassTarget, LabelMode, Recog, RecogClass, RecogParams, SampleSet, label_to_key,
};

/// Height of the vertical brick that joins the pieces of one character
/// (dots, accents) before segmentation
const SEGMENT_CLOSE_HEIGHT: u32 = 70;

/// Components must be wider than this to count as characters
const SEGMENT_MIN_WIDTH: i32 = 2;

/// Components must be taller than this to count as characters
const SEGMENT_MIN_HEIGHT: i32 = 8;

/// Creates an empty character recognizer
///
/// # Arguments
///
/// * `scale_w` - Target width for normalized templates (0 = keep aspect)
/// * `scale_h` - Target height for normalized templates (0 = keep aspect)
/// * `line_w` - Stroke width for normalized templates (0 = skip)
/// * `threshold` - Binarization threshold for depth > 1 (0 = default 150)
/// * `max_y_shift` - Maximum vertical shift during matching (0, 1 or 2)
///
/// # Returns
///
/// A new empty recognizer ready for training
pub fn create(
    scale_w: u32,
    scale_h: u32,
    line_w: u32,
    threshold: u8,
    max_y_shift: u32,
) -> RecogResult<Recog> {
    create_with_params(RecogParams {
        scale_w,
        scale_h,
        line_w,
        threshold,
        max_y_shift,
        ..Default::default()
    })
}

/// Creates an empty recognizer from a parameter set
pub fn create_with_params(mut params: RecogParams) -> RecogResult<Recog> {
    params.validate()?;
    params.threshold = params.effective_threshold();
    Ok(Recog::from_params(params))
}

/// Creates a recognizer from labeled images
///
/// Every image is trained as a single labeled character using its embedded
/// text; unlabeled or blank images are skipped. Training is then finished
/// with the template transform and the samples are averaged.
///
/// # Arguments
///
/// * `pixa` - Labeled character images
/// * `scale_w`, `scale_h`, `line_w`, `threshold`, `max_y_shift` - As for
///   [`create`]
pub fn create_from_pixa(
    pixa: &Pixa,
    scale_w: u32,
    scale_h: u32,
    line_w: u32,
    threshold: u8,
    max_y_shift: u32,
) -> RecogResult<Recog> {
    create_from_pixa_with_params(
        pixa,
        RecogParams {
            scale_w,
            scale_h,
            line_w,
            threshold,
            max_y_shift,
            ..Default::default()
        },
    )
}

/// Creates a recognizer from labeled images and a parameter set
///
/// See [`create_from_pixa`].
pub fn create_from_pixa_with_params(pixa: &Pixa, params: RecogParams) -> RecogResult<Recog> {
    if pixa.is_empty() {
        return Err(RecogError::EmptyInput("no labeled images".to_string()));
    }
    let mut recog = create_with_params(params)?;

    for (i, pix) in pixa.iter().enumerate() {
        match recog.train_labeled(pix, None, None, LabelMode::Single) {
            Ok(_) => {}
            Err(e @ (RecogError::InvalidParameter(_) | RecogError::NoContent(_))) => {
                warn!(index = i, error = %e, "skipping training image");
            }
            Err(e) => return Err(e),
        }
    }

    recog.finish_training(true)?;
    recog.average_samples()?;
    Ok(recog)
}

impl Recog {
    /// Adds a labeled training image
    ///
    /// # Arguments
    ///
    /// * `pix` - Training image, 1 or 8 bpp
    /// * `region` - Optional part of `pix` holding the character(s)
    /// * `text` - Label; the image's own text is used when `None`
    /// * `mode` - Whether the image holds one character or a string
    ///
    /// # Returns
    ///
    /// The number of samples added
    pub fn train_labeled(
        &mut self,
        pix: &Pix,
        region: Option<&Box>,
        text: Option<&str>,
        mode: LabelMode,
    ) -> RecogResult<usize> {
        if self.train_done {
            return Err(RecogError::TrainingFinished);
        }

        let pixa = match mode {
            LabelMode::Single => {
                let sample = self.process_single_labeled(pix, region, text)?;
                std::iter::once(sample).collect()
            }
            LabelMode::Multi => self.process_multi_labeled(pix, region, text)?,
        };
        self.add_samples(&pixa, ClassTarget::ByLabel)
    }

    /// Prepares a single labeled character for training
    ///
    /// The image is cropped to `region`, binarized and clipped to its
    /// foreground. The label is `text` if given, otherwise the image text.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameter`] if there is no label and
    /// [`RecogError::NoContent`] if the image has no foreground.
    pub fn process_single_labeled(
        &self,
        pix: &Pix,
        region: Option<&Box>,
        text: Option<&str>,
    ) -> RecogResult<Pix> {
        let label = resolve_label(pix, text)?.to_string();
        let pixb = self.crop_and_binarize(pix, region)?;
        let (clipped, _) = pixb
            .clip_to_foreground()
            .ok_or_else(|| RecogError::NoContent(format!("no foreground for label '{label}'")))?;
        Ok(clipped.with_text(Some(&label)))
    }

    /// Segments a labeled string image into one sample per character
    ///
    /// Components are found after a tall vertical close, so parts of one
    /// character stacked vertically stay together. Boxes too small to be a
    /// character are discarded and the rest are matched, left to right,
    /// with the characters of the label.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::SegmentationMismatch`] when the number of
    /// components differs from the number of characters in the label.
    pub fn process_multi_labeled(
        &self,
        pix: &Pix,
        region: Option<&Box>,
        text: Option<&str>,
    ) -> RecogResult<Pixa> {
        let label = resolve_label(pix, text)?.to_string();
        let pixb = self.crop_and_binarize(pix, region)?;

        let closed = close_brick(&pixb, 1, SEGMENT_CLOSE_HEIGHT)?;
        let mut boxa = conncomp_boxes(&closed, ConnectivityType::EightWay)?
            .combine_overlaps()
            .select_by_size(
                SEGMENT_MIN_WIDTH,
                SEGMENT_MIN_HEIGHT,
                SizeSelectType::Both,
                SizeRelation::GreaterThan,
            );

        let expected = label.chars().count();
        if boxa.len() != expected {
            warn!(
                label = %label,
                expected,
                found = boxa.len(),
                "number of components does not match label length"
            );
            return Err(RecogError::SegmentationMismatch {
                expected,
                found: boxa.len(),
            });
        }

        boxa.sort_by_x();
        let mut pixa = Pixa::with_capacity(expected);
        let mut buf = [0u8; 4];
        for (b, ch) in boxa.iter().zip(label.chars()) {
            let glyph = pixb.clip_rectangle(b)?;
            pixa.push_with_box(glyph.with_text(Some(&*ch.encode_utf8(&mut buf))), *b);
        }
        Ok(pixa)
    }

    fn crop_and_binarize(&self, pix: &Pix, region: Option<&Box>) -> RecogResult<Pix> {
        let cropped = match region {
            Some(b) => pix.clip_rectangle(b)?,
            None => pix.clone(),
        };
        Ok(convert_to_1(&cropped, self.params.threshold)?)
    }

    /// Adds a batch of samples
    ///
    /// With [`ClassTarget::ByLabel`] each sample goes to the class of its
    /// text label, which is created if new; samples whose label cannot be
    /// used are skipped. With [`ClassTarget::ByExplicitClass`] every sample
    /// goes to the given class; an index equal to the class count creates a
    /// class labeled by the first sample's text.
    ///
    /// # Returns
    ///
    /// The number of samples added
    ///
    /// # Errors
    ///
    /// Fails without adding anything if training is finished, the batch is
    /// empty, or the forced class index is out of range.
    pub fn add_samples(&mut self, pixa: &Pixa, target: ClassTarget) -> RecogResult<usize> {
        if self.train_done {
            return Err(RecogError::TrainingFinished);
        }
        if pixa.is_empty() {
            return Err(RecogError::EmptyInput("no samples in batch".to_string()));
        }

        let forced = match target {
            ClassTarget::ByLabel => None,
            ClassTarget::ByExplicitClass(index) => Some(self.resolve_forced_class(index, pixa)?),
        };

        let mut added = 0;
        for (i, pix) in pixa.iter().enumerate() {
            let index = match forced {
                Some(index) => index,
                None => {
                    let Some(text) = pix.text() else {
                        warn!(sample = i, "sample has no text label; skipping");
                        continue;
                    };
                    let Some(key) = label_to_key(text) else {
                        warn!(sample = i, label = %text, "label cannot be used as a class key; skipping");
                        continue;
                    };
                    let existing = self.lookup.get(&key).copied();
                    match existing {
                        Some(index) => index,
                        None => self.push_class(text, key),
                    }
                }
            };
            self.classes[index].unscaled.push(pix.clone());
            self.num_samples += 1;
            added += 1;
        }

        if added > 0 {
            self.ave_done = false;
        }
        Ok(added)
    }

    fn resolve_forced_class(&mut self, index: usize, pixa: &Pixa) -> RecogResult<usize> {
        let nclasses = self.classes.len();
        if index > nclasses {
            return Err(RecogError::InvalidParameter(format!(
                "class index {index} > number of classes {nclasses}"
            )));
        }
        if index < nclasses {
            return Ok(index);
        }

        let text = pixa.get(0).and_then(|p| p.text()).unwrap_or_default();
        let key = label_to_key(text).ok_or_else(|| {
            RecogError::InvalidParameter(format!(
                "new class {index} needs a usable label, got '{text}'"
            ))
        })?;
        if let Some(&existing) = self.lookup.get(&key) {
            return Err(RecogError::InvalidParameter(format!(
                "label '{text}' already belongs to class {existing}"
            )));
        }
        Ok(self.push_class(text, key))
    }

    fn push_class(&mut self, text: &str, key: u32) -> usize {
        let index = self.classes.len();
        self.classes.push(RecogClass::new(text, key));
        self.lookup.insert(key, index);
        info!(label = %text, index, "new class");
        index
    }

    /// Applies the template transform to one sample
    ///
    /// The sample is scaled to `scale_w` x `scale_h` (a 0 target keeps the
    /// aspect ratio on that axis; nothing is done when the size already
    /// matches) and, if `line_w > 0`, its strokes are redrawn at that width.
    pub fn modify_template(&self, pix: &Pix) -> RecogResult<Pix> {
        let (sw, sh) = (self.params.scale_w, self.params.scale_h);
        let (w, h) = (pix.width(), pix.height());
        let scaled = if (sw == 0 || sw == w) && (sh == 0 || sh == h) {
            pix.clone()
        } else {
            scale_to_size(pix, sw, sh)?
        };
        if self.params.line_w == 0 {
            return Ok(scaled);
        }
        Ok(set_stroke_width(&scaled, self.params.line_w)?)
    }

    /// Finishes training
    ///
    /// Records centroid and area for every sample and builds the normalized
    /// sample set, either a shared copy of the samples (`apply_transform ==
    /// false`) or the output of [`Recog::modify_template`]. Afterwards no
    /// more samples are accepted. Calling this again does nothing.
    pub fn finish_training(&mut self, apply_transform: bool) -> RecogResult<()> {
        if self.train_done {
            return Ok(());
        }

        // build everything first so a failed transform leaves the recognizer untouched
        let mut rebuilt = Vec::with_capacity(self.classes.len());
        for class in &self.classes {
            let n = class.unscaled.len();
            let mut stats = Vec::with_capacity(n);
            let mut scaled = SampleSet::with_capacity(n);
            for pix in class.unscaled.pix() {
                stats.push((pix.centroid(), pix.count_pixels()));
                let pixd = if apply_transform {
                    self.modify_template(pix)?
                } else {
                    pix.clone()
                };
                let (centroid, area) = (pixd.centroid(), pixd.count_pixels());
                scaled.push_with_stats(pixd, centroid, area);
            }
            rebuilt.push((stats, scaled));
        }

        for (class, (stats, scaled)) in self.classes.iter_mut().zip(rebuilt) {
            (class.unscaled.centroids, class.unscaled.areas) = stats.into_iter().unzip();
            class.unscaled.shrink_to_fit();
            class.scaled = scaled;
            class.average_u = None;
            class.average = None;
        }
        self.classes.shrink_to_fit();
        self.lookup.shrink_to_fit();

        self.train_done = true;
        self.ave_done = false;
        debug!(classes = self.classes.len(), samples = self.num_samples, "training finished");
        Ok(())
    }

    /// Sets the charset and the padding threshold
    pub fn set_charset(&mut self, charset_type: CharsetType, min_nopad: usize) {
        self.params.charset_type = charset_type;
        self.params.min_nopad = min_nopad;
    }

    /// Returns every unscaled sample, labeled with its class, in class order
    pub fn extract_pixa(&self) -> Pixa {
        let mut pixa = Pixa::with_capacity(self.num_samples);
        for class in &self.classes {
            for pix in class.unscaled.pix() {
                if pix.text() == Some(class.text.as_str()) {
                    pixa.push(pix.clone());
                } else {
                    pixa.push(pix.clone().with_text(Some(&class.text)));
                }
            }
        }
        pixa
    }
}

fn resolve_label<'a>(pix: &'a Pix, text: Option<&'a str>) -> RecogResult<&'a str> {
    text.or_else(|| pix.text())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| RecogError::InvalidParameter("no text label for training image".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphtrain_core::PixelDepth;

    fn labeled(rows: &[&str], label: &str) -> Pix {
        Pix::from_rows(rows).unwrap().with_text(Some(label))
    }

    fn bar(label: &str) -> Pix {
        labeled(&["##", "##", "##", "##"], label)
    }

    fn batch(pix: Vec<Pix>) -> Pixa {
        pix.into_iter().collect()
    }

    #[test]
    fn test_create_validates() {
        assert!(create(0, 40, 0, 150, 3).is_err());
        let recog = create(0, 40, 0, 0, 1).unwrap();
        assert_eq!(recog.params.threshold, 150);
        assert_eq!(recog.set_size(), 0);
        assert!(!recog.is_train_done());
    }

    #[test]
    fn test_add_samples_by_label() {
        let mut recog = create(0, 0, 0, 150, 1).unwrap();
        let n = recog
            .add_samples(&batch(vec![bar("a"), bar("b"), bar("a")]), ClassTarget::ByLabel)
            .unwrap();
        assert_eq!(n, 3);
        assert_eq!(recog.class_labels(), vec!["a", "b"]);
        assert_eq!(recog.sample_counts(), vec![2, 1]);
        assert_eq!(recog.num_samples(), 3);
        assert_eq!(recog.class_index("b"), Some(1));
    }

    #[test]
    fn test_add_samples_skips_bad_labels() {
        let mut recog = create(0, 0, 0, 150, 1).unwrap();
        let unlabeled = Pix::from_rows(&["#"]).unwrap();
        let n = recog
            .add_samples(
                &batch(vec![bar("toolong"), unlabeled, bar(""), bar("x")]),
                ClassTarget::ByLabel,
            )
            .unwrap();
        assert_eq!(n, 1);
        assert_eq!(recog.num_samples(), 1);
        assert_eq!(recog.class_labels(), vec!["x"]);
    }

    #[test]
    fn test_add_samples_forced_class() {
        let mut recog = create(0, 0, 0, 150, 1).unwrap();
        recog
            .add_samples(&batch(vec![bar("a")]), ClassTarget::ByLabel)
            .unwrap();
        // label ignored for an existing forced class
        recog
            .add_samples(&batch(vec![bar("z")]), ClassTarget::ByExplicitClass(0))
            .unwrap();
        assert_eq!(recog.sample_counts(), vec![2]);
        // index == count creates a class from the first label
        recog
            .add_samples(&batch(vec![bar("q"), bar("r")]), ClassTarget::ByExplicitClass(1))
            .unwrap();
        assert_eq!(recog.class_labels(), vec!["a", "q"]);
        assert_eq!(recog.sample_counts(), vec![2, 2]);
        // past the end fails without mutation
        let err = recog
            .add_samples(&batch(vec![bar("s")]), ClassTarget::ByExplicitClass(5))
            .unwrap_err();
        assert!(matches!(err, RecogError::InvalidParameter(_)));
        assert_eq!(recog.num_samples(), 4);
        // a new forced class may not reuse a label
        assert!(
            recog
                .add_samples(&batch(vec![bar("a")]), ClassTarget::ByExplicitClass(2))
                .is_err()
        );
        assert_eq!(recog.set_size(), 2);
    }

    #[test]
    fn test_add_samples_empty_batch() {
        let mut recog = create(0, 0, 0, 150, 1).unwrap();
        let err = recog.add_samples(&Pixa::new(), ClassTarget::ByLabel).unwrap_err();
        assert!(matches!(err, RecogError::EmptyInput(_)));
    }

    #[test]
    fn test_single_labeled_clips_and_binarizes() {
        let recog = create(0, 0, 0, 128, 1).unwrap();
        let mut gray = Pix::new(6, 5, PixelDepth::Bit8).unwrap().to_mut();
        for y in 0..5 {
            for x in 0..6 {
                gray.set_pixel(x, y, 255).unwrap();
            }
        }
        gray.set_pixel(2, 1, 0).unwrap();
        gray.set_pixel(3, 2, 10).unwrap();
        let gray: Pix = gray.into();

        let sample = recog.process_single_labeled(&gray, None, Some("7")).unwrap();
        assert_eq!((sample.width(), sample.height()), (2, 2));
        assert_eq!(sample.depth(), PixelDepth::Bit1);
        assert_eq!(sample.text(), Some("7"));

        let region = Box::new(0, 3, 6, 2).unwrap();
        let err = recog
            .process_single_labeled(&gray, Some(&region), Some("7"))
            .unwrap_err();
        assert!(matches!(err, RecogError::NoContent(_)));

        let err = recog.process_single_labeled(&gray, None, None).unwrap_err();
        assert!(matches!(err, RecogError::InvalidParameter(_)));
    }

    #[test]
    fn test_modify_template() {
        let recog = create(0, 20, 0, 150, 1).unwrap();
        let pix = labeled(&["##", "##", "##", "##", "##"], "1");
        let out = recog.modify_template(&pix).unwrap();
        assert_eq!((out.width(), out.height()), (8, 20));
        assert_eq!(out.text(), Some("1"));

        let same = create(2, 5, 0, 150, 1).unwrap();
        assert!(same.modify_template(&pix).unwrap().equals(&pix));
    }

    #[test]
    fn test_finish_training_stats() {
        let mut recog = create(0, 8, 0, 150, 1).unwrap();
        recog
            .add_samples(&batch(vec![bar("a"), bar("a")]), ClassTarget::ByLabel)
            .unwrap();
        recog.finish_training(true).unwrap();
        let class = recog.class(0).unwrap();
        assert_eq!(class.unscaled().areas(), &[8, 8]);
        assert_eq!(class.unscaled().centroids()[0], (0.5, 1.5));
        assert_eq!(class.scaled().len(), 2);
        assert_eq!(class.scaled().pix()[0].height(), 8);
        assert_eq!(class.scaled().areas(), &[32, 32]);

        // second call is a no-op, ingestion is locked
        recog.finish_training(false).unwrap();
        assert_eq!(recog.class(0).unwrap().scaled().pix()[0].height(), 8);
        assert!(matches!(
            recog.add_samples(&batch(vec![bar("a")]), ClassTarget::ByLabel),
            Err(RecogError::TrainingFinished)
        ));
    }

    #[test]
    fn test_finish_training_without_classes() {
        let mut recog = create(0, 0, 0, 150, 1).unwrap();
        recog.finish_training(true).unwrap();
        assert!(recog.is_train_done());
        assert_eq!(recog.set_size(), 0);
    }

    #[test]
    fn test_extract_pixa_relabels_forced_samples() {
        let mut recog = create(0, 0, 0, 150, 1).unwrap();
        recog
            .add_samples(&batch(vec![bar("a")]), ClassTarget::ByLabel)
            .unwrap();
        recog
            .add_samples(&batch(vec![bar("b")]), ClassTarget::ByExplicitClass(0))
            .unwrap();
        let pixa = recog.extract_pixa();
        assert_eq!(pixa.len(), 2);
        assert!(pixa.iter().all(|p| p.text() == Some("a")));
    }

    #[test]
    fn test_set_charset() {
        let mut recog = create(0, 0, 0, 150, 1).unwrap();
        recog.set_charset(CharsetType::ArabicNumerals, 5);
        assert_eq!(recog.charset_size(), 10);
        assert_eq!(recog.params.min_nopad, 5);
    }
}
