//! Class template averaging
//!
//! Each class gets two averages, one over the unscaled samples and one over
//! the normalized samples. Samples are translated so their centroids
//! coincide, summed, and the sum is thresholded at half the sample count.

use glyphtrain_core::{Pix, Pixa, PixelDepth};
use glyphtrain_imgproc::threshold_to_binary;
use tracing::debug;

use crate::error::{RecogError, RecogResult};

use super::types::{
    AverageTemplate, DEFAULT_MAX_AVERAGE_SAMPLES, Recog, SampleSet, SplitLimits, TemplateSizes,
};

/// Options for [`Recog::average_samples_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AverageOptions {
    /// At most this many samples per class contribute to an average;
    /// must be at least 1
    pub max_samples: usize,
    /// Recompute even if the averages are current
    pub force: bool,
}

impl Default for AverageOptions {
    fn default() -> Self {
        Self {
            max_samples: DEFAULT_MAX_AVERAGE_SAMPLES,
            force: false,
        }
    }
}

/// Average the first `max_samples` samples of a set.
///
/// An empty set gives a 1x1 placeholder with centroid (0, 0) and area 0.
///
/// # Errors
///
/// Returns [`RecogError::InvalidParameter`] if `max_samples` is 0.
pub fn accumulate_samples(set: &SampleSet, max_samples: usize) -> RecogResult<AverageTemplate> {
    if max_samples == 0 {
        return Err(RecogError::InvalidParameter(
            "max_samples must be at least 1".to_string(),
        ));
    }
    let n = set.len().min(max_samples);
    let samples: Pixa = set.pix()[..n].iter().cloned().collect();
    let Some((_, maxw, _, maxh)) = samples.size_range() else {
        return Ok(AverageTemplate {
            pix: Pix::new(1, 1, PixelDepth::Bit1)?,
            centroid: (0.0, 0.0),
            area: 0,
        });
    };

    let centroids: Vec<(f32, f32)> = if set.has_stats() {
        set.centroids()[..n].to_vec()
    } else {
        samples.iter().map(Pix::centroid).collect()
    };
    let xave = centroids.iter().map(|c| c.0).sum::<f32>() / n as f32;
    let yave = centroids.iter().map(|c| c.1).sum::<f32>() / n as f32;

    let mut counts = vec![0u32; (maxw * maxh) as usize];

    for (pix, &(cx, cy)) in samples.iter().zip(&centroids) {
        // truncated shift that moves this sample's centroid onto the average
        let dx = (xave - cx) as i64;
        let dy = (yave - cy) as i64;
        for y in 0..pix.height() {
            let ty = y as i64 + dy;
            if ty < 0 || ty >= maxh as i64 {
                continue;
            }
            for x in 0..pix.width() {
                let tx = x as i64 + dx;
                if tx < 0 || tx >= maxw as i64 || pix.get_pixel_unchecked(x, y) == 0 {
                    continue;
                }
                counts[(ty as u32 * maxw + tx as u32) as usize] += 1;
            }
        }
    }

    let mut accum = Pix::new(maxw, maxh, PixelDepth::Bit8)?.to_mut();
    for y in 0..maxh {
        for x in 0..maxw {
            let c = counts[(y * maxw + x) as usize].min(255);
            if c != 0 {
                accum.set_pixel_unchecked(x, y, c);
            }
        }
    }
    let accum: Pix = accum.into();

    // below-threshold pixels come out as 1, so invert to keep the majority
    let thresh = (n.max(2) / 2).min(255) as u8;
    let pix = threshold_to_binary(&accum, thresh)?.invert();
    let area = pix.count_pixels();
    Ok(AverageTemplate {
        pix,
        centroid: (xave, yave),
        area,
    })
}

impl Recog {
    /// Computes the averaged templates of every class
    ///
    /// Does nothing if the averages are already current. See
    /// [`Recog::average_samples_with`].
    pub fn average_samples(&mut self) -> RecogResult<()> {
        self.average_samples_with(&AverageOptions::default())
    }

    /// Computes the averaged templates of every class
    ///
    /// All previous averages are discarded. Each class is averaged over at
    /// most `options.max_samples` samples, separately for the unscaled and
    /// the normalized samples; a class with no samples in a set gets a 1x1
    /// placeholder. The template size range and the splitting limits are
    /// recomputed from the new averages.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameter`] if `options.max_samples`
    /// is 0.
    pub fn average_samples_with(&mut self, options: &AverageOptions) -> RecogResult<()> {
        if options.max_samples == 0 {
            return Err(RecogError::InvalidParameter(
                "max_samples must be at least 1".to_string(),
            ));
        }
        if self.ave_done && !options.force {
            return Ok(());
        }

        let mut averages = Vec::with_capacity(self.classes.len());
        for class in &self.classes {
            let average_u = accumulate_samples(&class.unscaled, options.max_samples)?;
            let average = accumulate_samples(&class.scaled, options.max_samples)?;
            averages.push((average_u, average));
        }
        for (class, (average_u, average)) in self.classes.iter_mut().zip(averages) {
            class.average_u = Some(average_u);
            class.average = Some(average);
        }

        self.update_template_sizes();
        self.ave_done = true;
        debug!(
            classes = self.classes.len(),
            sizes = ?self.sizes,
            split = ?self.split,
            "averaged templates"
        );
        Ok(())
    }

    fn update_template_sizes(&mut self) {
        let real = |t: &Option<AverageTemplate>| -> Option<(u32, u32)> {
            t.as_ref()
                .filter(|a| !a.is_placeholder())
                .map(|a| (a.pix.width(), a.pix.height()))
        };
        let unscaled: Vec<(u32, u32)> = self.classes.iter().filter_map(|c| real(&c.average_u)).collect();
        let scaled: Vec<(u32, u32)> = self.classes.iter().filter_map(|c| real(&c.average)).collect();

        let (minwidth_u, maxwidth_u, minheight_u, maxheight_u) = extent(&unscaled);
        let (minwidth, maxwidth, _, _) = extent(&scaled);
        self.sizes = TemplateSizes {
            minwidth_u,
            maxwidth_u,
            minheight_u,
            maxheight_u,
            minwidth,
            maxwidth,
        };
        self.split = SplitLimits {
            min_split_w: minwidth_u.saturating_sub(5).max(5),
            min_split_h: minheight_u.saturating_sub(5).max(5),
            max_split_h: maxheight_u + 12,
        };
    }
}

/// `(min_w, max_w, min_h, max_h)` over a list of sizes; all 0 when empty
fn extent(sizes: &[(u32, u32)]) -> (u32, u32, u32, u32) {
    let Some(&(w0, h0)) = sizes.first() else {
        return (0, 0, 0, 0);
    };
    sizes
        .iter()
        .fold((w0, w0, h0, h0), |(minw, maxw, minh, maxh), &(w, h)| {
            (minw.min(w), maxw.max(w), minh.min(h), maxh.max(h))
        })
}
