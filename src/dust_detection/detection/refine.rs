use ndarray::Zip;

use crate::dust_detection::common::error::Result;
use crate::dust_detection::morphology::{binary_dilate, BinaryMask, StructuringElement};

/// Pixels flagged by both the level criterion and the top-hat outlier test.
pub fn combine(level: &BinaryMask, tophat: &BinaryMask) -> BinaryMask {
    Zip::from(level)
        .and(tophat)
        .map_collect(|&in_level, &is_outlier| in_level && is_outlier)
}

/// Grows flagged regions by a disk of `radius` so each speck is covered with
/// a margin. A zero radius returns the mask unchanged.
pub fn grow(mask: &BinaryMask, radius: usize) -> Result<BinaryMask> {
    if radius == 0 {
        return Ok(mask.clone());
    }
    binary_dilate(mask, &StructuringElement::Disk(radius))
}
