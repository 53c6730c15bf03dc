//! glyphtrain-recog - Training for a template-based character recognizer
//!
//! This crate builds the per-class templates a correlation classifier
//! matches against:
//!
//! - **Ingestion**: labeled glyphs, single or segmented from a strip, are
//!   sorted into classes
//! - **Finalization**: every sample gets a normalized (scaled and
//!   stroke-width adjusted) counterpart with centroid and area statistics
//! - **Averaging**: centroid-aligned majority templates per class
//! - **Outlier removal**: samples that correlate poorly with their class
//!   average are dropped
//! - **Bootstrap padding**: under-populated digit classes are filled from a
//!   built-in template library
//!
//! # Quick Start
//!
//! ```
//! use glyphtrain_core::{Pix, Pixa};
//! use glyphtrain_recog::recog::{ClassTarget, create};
//!
//! let mut recog = create(0, 40, 0, 150, 1).unwrap();
//! let one = Pix::from_rows(&[".#.", "##.", ".#.", ".#.", "###"])
//!     .unwrap()
//!     .with_text(Some("1"));
//! let batch: Pixa = vec![one].into_iter().collect();
//! recog.add_samples(&batch, ClassTarget::ByLabel).unwrap();
//! recog.finish_training(true).unwrap();
//! recog.average_samples().unwrap();
//! assert_eq!(recog.class_labels(), vec!["1"]);
//! ```
//!
//! # Modules
//!
//! - [`recog`]: the recognizer and its training operations

mod error;
pub mod recog;

pub use error::{RecogError, RecogResult};

pub use recog::{
    AverageOptions, AverageTemplate, CharsetType, ClassTarget, LabelMode, OutlierOptions,
    OutlierResult, Recog, RecogClass, RecogParams, SampleSet,
};

// Re-export core for convenience
pub use glyphtrain_core;
