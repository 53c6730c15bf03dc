//! Character recognizer training
//!
//! # Overview
//!
//! Training proceeds in stages:
//! 1. Labeled samples are added per class ([`Recog::add_samples`],
//!    [`Recog::train_labeled`])
//! 2. [`Recog::finish_training`] freezes the classes and builds the
//!    normalized samples
//! 3. [`Recog::average_samples`] builds one averaged template per class
//!
//! A candidate sample set can be cleaned with [`remove_outliers`] before
//! training, and a thinly trained digit recognizer can be rebuilt with
//! bootstrap templates by [`pad_digit_training_set`].
//!
//! # Example
//!
//! ```
//! use glyphtrain_core::Pix;
//! use glyphtrain_recog::recog::{LabelMode, create};
//!
//! let mut recog = create(0, 20, 0, 150, 1).unwrap();
//! let strip = Pix::from_rows(&[
//!     "###....###",
//!     "###....###",
//!     "###....###",
//!     "###....###",
//!     "###....###",
//!     "###....###",
//!     "###....###",
//!     "###....###",
//!     "###....###",
//! ])
//! .unwrap();
//! let added = recog
//!     .train_labeled(&strip, None, Some("ll"), LabelMode::Multi)
//!     .unwrap();
//! assert_eq!(added, 2);
//! recog.finish_training(true).unwrap();
//! recog.average_samples().unwrap();
//! ```

mod average;
mod boot;
mod outlier;
mod pad;
mod train;
mod types;

pub use average::*;
pub use boot::*;
pub use outlier::*;
pub use pad::*;
pub use train::*;
pub use types::*;
