use crate::dust_detection::common::error::Result;
use crate::dust_detection::raster::types::{Region, RegionBytes};

/// Host capability: hand out the raw bytes of the active layer.
pub trait RasterSource {
    /// Image size as `(width, height)`.
    fn dimensions(&self) -> (usize, usize);

    /// Bits per channel sample of the layer.
    fn bits_per_channel(&self) -> u32 {
        8
    }

    fn fetch_region_bytes(&self, region: &Region) -> Result<RegionBytes>;
}
