//! Grayscale projection of 8-bit rasters

use ndarray::{Array2, Axis};

use crate::dust_detection::common::error::{DetectionError, Result};
use crate::dust_detection::raster::Raster;

/// Per-pixel intensity in [0, 1], shape (height, width)
pub type IntensityField = Array2<f64>;

/// Luminance weights applied to R, G and B.
pub const LUMINANCE_WEIGHTS: [f64; 3] = [0.2125, 0.7154, 0.0721];

const SAMPLE_MAX: f64 = u8::MAX as f64;

/// Projects a raster onto a single intensity channel.
///
/// RGB and RGBA rasters use the luminance weighting; alpha is ignored.
/// Gray and gray+alpha rasters are rescaled from their first channel.
pub fn to_intensity(raster: &Raster) -> Result<IntensityField> {
    let view = raster.view();
    match raster.channels() {
        1 | 2 => Ok(view
            .index_axis(Axis(2), 0)
            .mapv(|v| f64::from(v) / SAMPLE_MAX)),
        3 | 4 => {
            let [wr, wg, wb] = LUMINANCE_WEIGHTS;
            Ok(Array2::from_shape_fn(
                (raster.height(), raster.width()),
                |(row, col)| {
                    let r = f64::from(view[[row, col, 0]]) / SAMPLE_MAX;
                    let g = f64::from(view[[row, col, 1]]) / SAMPLE_MAX;
                    let b = f64::from(view[[row, col, 2]]) / SAMPLE_MAX;
                    wr * r + wg * g + wb * b
                },
            ))
        }
        other => Err(DetectionError::UnsupportedFormat(format!(
            "{} channels per pixel",
            other
        ))),
    }
}
