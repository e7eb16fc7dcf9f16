use tracing::debug;

use crate::dust_detection::common::error::{DetectionError, Result};
use crate::dust_detection::raster::types::{Raster, Region, RegionBytes};

/// Reshapes the bytes fetched for `region` into an (height, width, bpp)
/// raster.
///
/// A buffer whose length disagrees with the region and its declared
/// bytes-per-pixel is rejected before any detection work starts.
pub fn ingest(region: &Region, fetched: RegionBytes) -> Result<Raster> {
    let RegionBytes { bytes, bytes_per_pixel } = fetched;
    let expected = region
        .sample_count(bytes_per_pixel)
        .ok_or(DetectionError::InvalidDimensions(region.width, region.height))?;

    if bytes_per_pixel == 0 || bytes.len() != expected {
        return Err(DetectionError::MalformedInput {
            expected,
            actual: bytes.len(),
        });
    }

    debug!(
        "Ingesting {}x{} region with {} bytes per pixel",
        region.width, region.height, bytes_per_pixel
    );

    Raster::from_bytes(bytes, region.height, region.width, bytes_per_pixel)
}
