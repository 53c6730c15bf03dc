//! Error types for glyphtrain-imgproc

use thiserror::Error;

/// Errors that can occur during image operations
#[derive(Debug, Error)]
pub enum ImageOpError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] glyphtrain_core::Error),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for image operations
pub type ImageOpResult<T> = Result<T, ImageOpError>;
