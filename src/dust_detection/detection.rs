//! Dust detection core
//!
//! Host-agnostic part of the pipeline: intensity field in, binary mask out.

pub mod config;
mod observer;
mod outlier;
mod refine;
mod detector;

pub use config::{DetectionConfig, DetectionConfigBuilder, DustPolarity};
pub use observer::{DetectionObserver, SilentObserver, TracingObserver};
pub use outlier::{level_mask, outlier_masks, tophat_response, OutlierMasks, OutlierStats};
pub use refine::{combine, grow};
pub use detector::{DetectionOutcome, DustDetector};
