//! TIFF-backed host adapter
//!
//! Stand-in for an editing application: the active layer is an 8-bit TIFF
//! on disk and the mask layer is written out as an RGBA TIFF.

mod tiff_source;
mod tiff_layer_sink;
pub mod types;

pub use tiff_source::TiffRasterSource;
pub use tiff_layer_sink::TiffLayerSink;
pub use types::TiffCompression;
