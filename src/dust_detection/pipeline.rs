//! Pipeline orchestration module
//!
//! Wires a host raster source, the detector and a host layer sink together.

mod detect_dust;


pub use detect_dust::{detect_dust, DetectionReport, DustDetectionPipeline};
