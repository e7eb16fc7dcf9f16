//! Raster ingestion module
//!
//! This module defines the interleaved 8-bit raster type and the host-side
//! [`RasterSource`] collaborator that supplies region bytes.

mod source;
mod ingest;
pub mod types;

pub use source::RasterSource;
pub use ingest::ingest;
pub use types::{Raster, Region, RegionBytes};
