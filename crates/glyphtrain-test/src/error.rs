//! Error types for the test harness

use thiserror::Error;

/// Errors that can occur while setting up or checking a regression test
#[derive(Debug, Error)]
pub enum TestError {
    /// A synthetic fixture could not be built
    #[error("failed to build fixture '{name}': {message}")]
    Fixture { name: String, message: String },

    /// Value comparison failed
    #[error(
        "value comparison failed at index {index}: expected {expected}, got {actual}, delta {delta}"
    )]
    ValueMismatch {
        index: usize,
        expected: f64,
        actual: f64,
        delta: f64,
    },

    /// Pix comparison failed
    #[error("pix comparison failed at index {index}: {reason}")]
    PixMismatch { index: usize, reason: String },

    /// String comparison failed
    #[error("string comparison failed at index {index}: {expected:?} vs {actual:?}")]
    StringMismatch {
        index: usize,
        expected: String,
        actual: String,
    },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
