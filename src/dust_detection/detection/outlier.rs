//! Level and top-hat outlier masks
//!
//! A pixel is a dust candidate when its top-hat response is an outlier of
//! the whole response field. The level mask is computed separately so the
//! refiner can require both.

use ndarray::Array2;

use crate::dust_detection::common::error::Result;
use crate::dust_detection::detection::config::{DetectionConfig, DustPolarity};
use crate::dust_detection::grayscale::IntensityField;
use crate::dust_detection::morphology::{
    binary_opening, black_tophat, white_tophat, BinaryMask, StructuringElement,
};

/// Statistics of the top-hat response used for the outlier cut
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierStats {
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Responses strictly above this value are outliers
    pub threshold: f64,
}

impl OutlierStats {
    pub fn of(response: &Array2<f64>, sigma_factor: f64) -> Self {
        let mean = response.mean().unwrap_or(0.0);
        let std_dev = if response.is_empty() {
            0.0
        } else {
            response.std(0.0)
        };
        Self {
            mean,
            std_dev,
            threshold: mean + sigma_factor * std_dev,
        }
    }
}

/// Masks produced by the outlier stage
#[derive(Debug, Clone)]
pub struct OutlierMasks {
    /// Global intensity criterion
    pub level: BinaryMask,
    /// Top-hat outliers after the noise opening
    pub tophat: BinaryMask,
    pub stats: OutlierStats,
}

/// Pixels brighter than `sensitivity` (negative) or darker than
/// `1 - sensitivity` (positive).
pub fn level_mask(field: &IntensityField, polarity: DustPolarity, sensitivity: f64) -> BinaryMask {
    match polarity {
        DustPolarity::Negative => field.mapv(|v| v > sensitivity),
        DustPolarity::Positive => field.mapv(|v| v < 1.0 - sensitivity),
    }
}

/// White top-hat for negatives, black top-hat for positives, using a square
/// of side `spot_size`.
pub fn tophat_response(
    field: &IntensityField,
    polarity: DustPolarity,
    spot_size: usize,
) -> Result<Array2<f64>> {
    let element = StructuringElement::Square(spot_size);
    match polarity {
        DustPolarity::Negative => white_tophat(field, &element),
        DustPolarity::Positive => black_tophat(field, &element),
    }
}

pub fn outlier_masks(field: &IntensityField, config: &DetectionConfig) -> Result<OutlierMasks> {
    let level = level_mask(field, config.polarity, config.sensitivity);

    let response = tophat_response(field, config.polarity, config.spot_size)?;
    let stats = OutlierStats::of(&response, config.sigma_factor);
    let outliers = response.mapv(|v| v > stats.threshold);

    let tophat = if config.noise_radius > 0 {
        binary_opening(&outliers, &StructuringElement::Disk(config.noise_radius))?
    } else {
        outliers
    };

    Ok(OutlierMasks { level, tophat, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn count(mask: &BinaryMask) -> usize {
        mask.iter().filter(|&&v| v).count()
    }

    fn textured(rows: usize, cols: usize) -> IntensityField {
        Array2::from_shape_fn((rows, cols), |(r, c)| ((r * 31 + c * 17) % 97) as f64 / 96.0)
    }

    #[test]
    fn test_stats_of_flat_response() {
        let stats = OutlierStats::of(&Array2::zeros((4, 4)), 3.0);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.threshold, 0.0);
    }

    #[test]
    fn test_stats_population_std() {
        let response = Array2::from_shape_vec((1, 4), vec![0.0, 0.0, 1.0, 1.0]).unwrap();
        let stats = OutlierStats::of(&response, 3.0);
        assert_abs_diff_eq!(stats.mean, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.std_dev, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.threshold, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_level_mask_negative_and_positive() {
        let field = Array2::from_shape_vec((1, 4), vec![0.05, 0.5, 0.86, 1.0]).unwrap();
        let neg = level_mask(&field, DustPolarity::Negative, 0.85);
        let pos = level_mask(&field, DustPolarity::Positive, 0.85);
        assert_eq!(neg.as_slice().unwrap(), &[false, false, true, true]);
        assert_eq!(pos.as_slice().unwrap(), &[true, false, false, false]);
    }

    #[test]
    fn test_level_mask_monotone_in_sensitivity() {
        let field = textured(16, 16);
        let mut previous = usize::MAX;
        for step in 1..=20 {
            let sensitivity = step as f64 / 20.0;
            let flagged = count(&level_mask(&field, DustPolarity::Negative, sensitivity));
            assert!(flagged <= previous, "count grew at sensitivity {}", sensitivity);
            previous = flagged;
        }
    }

    #[test]
    fn test_positive_level_mask_is_negative_on_inverted_field() {
        // Values sit on a 1/96 grid, well clear of the inexact cut points
        let field = textured(12, 12);
        let inverted = field.mapv(|v| 1.0 - v);
        for sensitivity in [0.75, 0.8, 0.85, 0.9, 0.95] {
            assert_eq!(
                level_mask(&field, DustPolarity::Positive, sensitivity),
                level_mask(&inverted, DustPolarity::Negative, sensitivity),
            );
        }
    }

    #[test]
    fn test_flat_field_has_no_outliers() {
        let field = Array2::from_elem((20, 20), 0.5);
        let masks = outlier_masks(&field, &DetectionConfig::default()).unwrap();
        assert_eq!(count(&masks.tophat), 0);
        assert_eq!(masks.stats.std_dev, 0.0);
    }

    #[test]
    fn test_bright_speck_is_an_outlier() {
        let mut field = Array2::from_elem((25, 25), 0.3);
        for r in 11..14 {
            for c in 11..14 {
                field[[r, c]] = 1.0;
            }
        }
        let masks = outlier_masks(&field, &DetectionConfig::default()).unwrap();

        // Noise opening with the radius-1 disk trims the 3x3 block to a cross
        assert_eq!(count(&masks.tophat), 5);
        assert!(masks.tophat[[12, 12]]);
        assert!(masks.level[[12, 12]]);
        assert!(!masks.level[[0, 0]]);
    }

    #[test]
    fn test_dark_speck_is_an_outlier_in_positive_mode() {
        let mut field = Array2::from_elem((25, 25), 0.8);
        for r in 4..7 {
            for c in 18..21 {
                field[[r, c]] = 0.05;
            }
        }
        let config = DetectionConfig::builder()
            .polarity(DustPolarity::Positive)
            .build();
        let masks = outlier_masks(&field, &config).unwrap();

        assert!(masks.tophat[[5, 19]]);
        assert!(masks.level[[5, 19]]);
        assert_eq!(count(&masks.tophat), 5);
    }

    #[test]
    fn test_noise_opening_can_be_disabled() {
        let mut field = Array2::from_elem((21, 21), 0.3);
        field[[10, 10]] = 1.0;

        let opened = outlier_masks(&field, &DetectionConfig::default()).unwrap();
        let raw = outlier_masks(
            &field,
            &DetectionConfig::builder().noise_radius(0).build(),
        )
        .unwrap();

        assert_eq!(count(&opened.tophat), 0);
        assert_eq!(count(&raw.tophat), 1);
        assert!(raw.tophat[[10, 10]]);
    }
}
