//! Bootstrap padding
//!
//! A recognizer trained on few samples is padded with bootstrap templates
//! for the classes that are missing or under-populated. Padding never
//! changes a recognizer in place: the samples are extracted, augmented and
//! used to build a new one.

use glyphtrain_core::Pixa;
use tracing::{debug, info};

use crate::error::{RecogError, RecogResult};

use super::boot::make_boot_digit_templates;
use super::train::create_from_pixa_with_params;
use super::types::{Recog, RecogParams};

impl Recog {
    /// Returns the labels that need padding, or `None` if none do
    ///
    /// The list holds the charset labels with no class, followed by the
    /// labels of classes with fewer than `min_nopad` samples.
    pub fn padding_needed(&self) -> Option<Vec<String>> {
        let min_nopad = self.params.min_nopad;
        let mut labels: Vec<String> = self
            .params
            .charset_type
            .characters()
            .iter()
            .map(char::to_string)
            .filter(|label| self.class_index(label).is_none())
            .collect();
        labels.extend(
            self.classes
                .iter()
                .filter(|c| c.unscaled.len() < min_nopad)
                .map(|c| c.text.clone()),
        );
        if labels.is_empty() { None } else { Some(labels) }
    }
}

/// Collects the recognizer's samples plus the bootstrap templates whose
/// label is in `labels`
pub fn add_pad_templates(recog: &Recog, labels: &[String], boot: &Pixa) -> Pixa {
    let padding: Pixa = boot
        .iter()
        .filter(|pix| pix.text().is_some_and(|t| labels.iter().any(|l| l == t)))
        .cloned()
        .collect();
    info!(
        labels = ?labels,
        added = padding.len(),
        "padding with bootstrap templates"
    );
    let mut pixa = recog.extract_pixa();
    pixa.join(&padding);
    pixa
}

/// Collects the recognizer's samples plus the bootstrap digits for `labels`
///
/// # Errors
///
/// Returns [`RecogError::UnsupportedCharset`] unless the recognizer's
/// charset is arabic numerals.
pub fn add_digit_pad_templates(recog: &Recog, labels: &[String]) -> RecogResult<Pixa> {
    let charset = recog.params.charset_type;
    if !charset.has_boot_templates() {
        return Err(RecogError::UnsupportedCharset(charset.to_string()));
    }
    let boot = make_boot_digit_templates()?;
    Ok(add_pad_templates(recog, labels, &boot))
}

/// Pads a digit recognizer with bootstrap templates
///
/// Returns `recog` itself when no padding is needed. Otherwise a new
/// recognizer is trained on the old samples plus the bootstrap digits of
/// the classes that need them, with templates scaled to height `scale_h`
/// and stroke width `line_w`. Threshold, vertical shift and charset
/// settings carry over.
///
/// # Errors
///
/// Returns [`RecogError::UnsupportedCharset`] if padding is needed and the
/// charset is not arabic numerals.
pub fn pad_digit_training_set(recog: Recog, scale_h: u32, line_w: u32) -> RecogResult<Recog> {
    let Some(labels) = recog.padding_needed() else {
        debug!("no padding needed");
        return Ok(recog);
    };
    let pixa = add_digit_pad_templates(&recog, &labels)?;
    rebuild(&recog, &pixa, scale_h, line_w)
}

/// Pads a recognizer from a caller-supplied set of labeled templates
///
/// Same as [`pad_digit_training_set`] for any charset.
pub fn pad_training_set_with(
    recog: Recog,
    boot: &Pixa,
    scale_h: u32,
    line_w: u32,
) -> RecogResult<Recog> {
    let Some(labels) = recog.padding_needed() else {
        debug!("no padding needed");
        return Ok(recog);
    };
    let pixa = add_pad_templates(&recog, &labels, boot);
    rebuild(&recog, &pixa, scale_h, line_w)
}

fn rebuild(old: &Recog, pixa: &Pixa, scale_h: u32, line_w: u32) -> RecogResult<Recog> {
    let params = RecogParams {
        scale_w: 0,
        scale_h,
        line_w,
        ..old.params.clone()
    };
    let recog = create_from_pixa_with_params(pixa, params)?;
    info!(
        classes = recog.set_size(),
        samples = recog.num_samples(),
        "rebuilt padded recognizer"
    );
    Ok(recog)
}
