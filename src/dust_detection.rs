//! Dust speck detection pipeline
//!
//! This module turns a host-provided RGB raster into a binary mask of small,
//! high-contrast specks and hands the mask back to the host as a new RGBA
//! layer. The host side is reached only through the [`RasterSource`] and
//! [`LayerSink`] traits, so the detector itself runs without any editor.

pub mod common;
pub mod raster;
pub mod grayscale;
pub mod morphology;
pub mod detection;
pub mod layer;
pub mod tiff_host;
pub mod pipeline;

pub use common::{
    DetectionError,
    Result,
    PipelineTimings,
    StepTiming,
    StepGuard,
};

pub use raster::{
    Raster,
    Region,
    RegionBytes,
    RasterSource,
    ingest,
};

pub use grayscale::{IntensityField, to_intensity};

pub use morphology::{BinaryMask, StructuringElement};

pub use detection::{
    DetectionConfig,
    DetectionConfigBuilder,
    DetectionObserver,
    DetectionOutcome,
    DustDetector,
    DustPolarity,
    OutlierStats,
    SilentObserver,
    TracingObserver,
};

pub use layer::{
    BlendMode,
    LayerSink,
    LayerSpec,
    materialize,
};

pub use tiff_host::{
    TiffCompression,
    TiffLayerSink,
    TiffRasterSource,
};

pub use pipeline::{
    DetectionReport,
    DustDetectionPipeline,
    detect_dust,
};
