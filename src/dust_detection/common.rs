//! Common utilities module
//!
//! This module contains the error type and step timing helpers shared across
//! the detection pipeline.

pub mod error;
pub mod timing;

pub use error::{DetectionError, Result};
pub use timing::{PipelineTimings, StepGuard, StepTiming};
