use ndarray::Array3;

use crate::dust_detection::morphology::BinaryMask;
use crate::dust_detection::raster::Raster;

/// The mask layer is RGBA
pub const MASK_CHANNELS: usize = 4;

const BITS_PER_SAMPLE: u32 = 8;

/// Broadcasts the mask to four identical channels: full intensity where dust
/// was flagged, zero elsewhere.
pub fn materialize(mask: &BinaryMask) -> Raster {
    let max = ((1u32 << BITS_PER_SAMPLE) - 1) as u8;
    let (height, width) = mask.dim();
    let data = Array3::from_shape_fn((height, width, MASK_CHANNELS), |(row, col, _)| {
        if mask[[row, col]] { max } else { 0 }
    });
    Raster::from_array(data)
}
