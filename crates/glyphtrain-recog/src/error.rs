//! Error types for glyphtrain-recog

use thiserror::Error;

/// Errors that can occur while training a recognizer
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] glyphtrain_core::Error),

    /// Image operation error
    #[error("image operation error: {0}")]
    ImageOp(#[from] glyphtrain_imgproc::ImageOpError),

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Empty sample batch or missing input
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// No foreground found in image
    #[error("no content found: {0}")]
    NoContent(String),

    /// Samples were offered after training was finished
    #[error("training has already been finished")]
    TrainingFinished,

    /// Multi-character segmentation found the wrong number of glyphs
    #[error("segmentation mismatch: label has {expected} characters, found {found} components")]
    SegmentationMismatch { expected: usize, found: usize },

    /// No bootstrap templates exist for the charset
    #[error("unsupported charset for padding: {0}")]
    UnsupportedCharset(String),
}

/// Result type for recognizer operations
pub type RecogResult<T> = Result<T, RecogError>;
