//! Outlier removal
//!
//! Samples are scored by correlation against the normalized average of
//! their class. Within each class, a sample is kept when its score reaches
//! the class cutoff, which is the lower of a fixed minimum score and the
//! score at a chosen rank, so a fraction of every class always survives.

use glyphtrain_core::Pixa;
use glyphtrain_imgproc::correlation_score_simple;
use tracing::debug;

use crate::error::{RecogError, RecogResult};

use super::train::create_from_pixa_with_params;
use super::types::RecogParams;

/// Default minimum correlation score for keeping a sample
pub const DEFAULT_MIN_SCORE: f32 = 0.75;

/// Default fraction of each class that is kept regardless of score
pub const DEFAULT_MIN_FRACTION: f32 = 0.5;

/// Template height used while scoring
const OUTLIER_SCALE_H: u32 = 40;

/// Largest size difference between a sample and its average that is scored
const MAX_SIZE_DIFF: u32 = 5;

/// Options for [`remove_outliers`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierOptions {
    /// Samples scoring at least this are always kept
    pub min_score: f32,
    /// At least this fraction of each class is kept
    pub min_fraction: f32,
}

impl Default for OutlierOptions {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            min_fraction: DEFAULT_MIN_FRACTION,
        }
    }
}

impl OutlierOptions {
    /// Values above 1.0 are clamped to 1.0; values <= 0 select the default.
    pub fn clamped(&self) -> Self {
        let fix = |v: f32, default: f32| if v > 0.0 { v.min(1.0) } else { default };
        Self {
            min_score: fix(self.min_score, DEFAULT_MIN_SCORE),
            min_fraction: fix(self.min_fraction, DEFAULT_MIN_FRACTION),
        }
    }
}

/// Result of [`remove_outliers`]
#[derive(Debug, Clone, Default)]
pub struct OutlierResult {
    /// Samples that passed, grouped by class
    pub kept: Pixa,
    /// Samples that were rejected
    pub removed: Pixa,
    /// Correlation score of each rejected sample
    pub removed_scores: Vec<f32>,
}

/// Score cutoff for one class.
///
/// The scores are sorted ascending and the rank score is taken at index
/// `floor((1 - min_fraction) * (n - 1))`. The cutoff is the smallest of the
/// best score, `min_score` and the rank score. Returns `None` for an empty
/// class.
pub fn retention_cutoff(scores: &[f32], min_score: f32, min_fraction: f32) -> Option<f32> {
    if scores.is_empty() {
        return None;
    }
    let mut sorted = scores.to_vec();
    sorted.sort_by(f32::total_cmp);
    let fraction = (1.0 - min_fraction).clamp(0.0, 1.0);
    let index = ((fraction * (sorted.len() - 1) as f32).floor() as usize).min(sorted.len() - 1);
    let rank_score = sorted[index];
    let max_score = sorted[sorted.len() - 1];
    Some(max_score.min(min_score).min(rank_score))
}

/// Removes samples that correlate poorly with their class average
///
/// A temporary recognizer is trained on `pixa`, normalized to a height of
/// 40 without stroke adjustment and averaged. Each sample is scored against
/// its class average and kept if the score reaches the class cutoff from
/// [`retention_cutoff`].
///
/// # Returns
///
/// The kept samples, as clipped but otherwise unmodified labeled images,
/// and the removed samples with their scores.
pub fn remove_outliers(pixa: &Pixa, options: &OutlierOptions) -> RecogResult<OutlierResult> {
    if pixa.is_empty() {
        return Err(RecogError::EmptyInput("no samples to filter".to_string()));
    }
    let OutlierOptions {
        min_score,
        min_fraction,
    } = options.clamped();

    let params = RecogParams {
        scale_w: 0,
        scale_h: OUTLIER_SCALE_H,
        line_w: 0,
        threshold: 128,
        max_y_shift: 1,
        ..Default::default()
    };
    let mut recog = create_from_pixa_with_params(pixa, params)?;
    recog.average_samples()?;

    let mut result = OutlierResult {
        kept: Pixa::with_capacity(recog.num_samples()),
        ..Default::default()
    };
    for class in recog.classes() {
        let Some(average) = class.average() else {
            continue;
        };
        let scaled = class.scaled();
        let mut scores = Vec::with_capacity(scaled.len());
        for ((pix, &(cx, cy)), &area) in scaled
            .pix()
            .iter()
            .zip(scaled.centroids())
            .zip(scaled.areas())
        {
            let score = correlation_score_simple(
                &average.pix,
                pix,
                average.area,
                area,
                average.centroid.0 - cx,
                average.centroid.1 - cy,
                MAX_SIZE_DIFF,
                MAX_SIZE_DIFF,
            )?;
            if score == 0.0 {
                debug!(label = %class.text(), sample = scores.len(), "zero correlation score");
            }
            scores.push(score);
        }

        let Some(cutoff) = retention_cutoff(&scores, min_score, min_fraction) else {
            continue;
        };
        debug!(label = %class.text(), samples = scores.len(), cutoff, "outlier cutoff");

        for (pix, &score) in class.unscaled().pix().iter().zip(&scores) {
            if score >= cutoff {
                result.kept.push(pix.clone());
            } else {
                result.removed.push(pix.clone());
                result.removed_scores.push(score);
            }
        }
    }

    debug!(
        kept = result.kept.len(),
        removed = result.removed.len(),
        "outlier removal done"
    );
    Ok(result)
}
