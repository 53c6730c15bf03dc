//! glyphtrain - Training for template-based character recognition
//!
//! # Overview
//!
//! glyphtrain builds the per-class templates a correlation classifier uses
//! to identify isolated characters:
//!
//! - Bitmaps, boxes and image collections (re-exported at the top level)
//! - Image operations used while training ([`imgproc`])
//! - Sample ingestion, averaging, outlier removal and bootstrap padding
//!   ([`recog`])
//!
//! # Example
//!
//! ```
//! use glyphtrain::recog::recog::make_boot_digit_recog;
//!
//! let recog = make_boot_digit_recog(30, 0, 1).unwrap();
//! assert_eq!(recog.set_size(), 10);
//! assert!(recog.padding_needed().is_none());
//! ```

// Re-export core types (primary data structures used everywhere)
pub use glyphtrain_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use glyphtrain_imgproc as imgproc;
pub use glyphtrain_recog as recog;
