//! glyphtrain-imgproc - Image operations used by glyph training
//!
//! This crate provides the deterministic image operations the recognizer
//! builds on:
//!
//! - Binarization of grayscale scans ([`threshold`])
//! - Brick dilation, erosion and border-safe closing ([`morph`])
//! - Connected-component bounding boxes ([`conncomp`])
//! - Sampled scaling to a target size or by factors ([`scale`])
//! - Stroke-width normalization by thinning and dilation ([`stroke`])
//! - Centroid-aligned correlation scoring ([`correlation`])

pub mod conncomp;
pub mod correlation;
mod error;
pub mod morph;
pub mod scale;
pub mod stroke;
pub mod threshold;

pub use conncomp::{ConnectivityType, conncomp_boxes};
pub use correlation::correlation_score_simple;
pub use error::{ImageOpError, ImageOpResult};
pub use morph::{close_brick, dilate_brick, erode_brick};
pub use scale::{scale_by_sampling, scale_to_size};
pub use stroke::{set_stroke_width, thin};
pub use threshold::{convert_to_1, threshold_to_binary};

use glyphtrain_core::{Pix, PixelDepth};

pub(crate) fn check_binary(pix: &Pix) -> ImageOpResult<()> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(ImageOpError::UnsupportedDepth {
            expected: "1-bpp binary",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}
