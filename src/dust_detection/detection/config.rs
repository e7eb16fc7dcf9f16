//! Detection configuration types

use std::ops::RangeInclusive;

use crate::dust_detection::common::error::{DetectionError, Result};
use crate::dust_detection::layer::BlendMode;

/// Which way dust contrasts with the surrounding image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DustPolarity {
    /// Bright specks on a darker background (scanned negatives)
    #[default]
    Negative,
    /// Dark specks on a lighter background (prints, positives)
    Positive,
}

impl DustPolarity {
    pub fn from_is_negative(is_negative: bool) -> Self {
        if is_negative {
            DustPolarity::Negative
        } else {
            DustPolarity::Positive
        }
    }
}

/// Accepted range of the sensitivity slider, in percent
pub const SENSITIVITY_PERCENT_RANGE: RangeInclusive<u32> = 75..=95;

/// Accepted range of the spot size slider, in pixels
pub const SPOT_SIZE_RANGE: RangeInclusive<u32> = 5..=30;

/// Configuration for a dust detection run
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Bright-on-dark or dark-on-bright specks
    pub polarity: DustPolarity,
    /// Level threshold as a fraction of full intensity, in (0, 1]
    pub sensitivity: f64,
    /// Approximate speck diameter; side of the top-hat square element
    pub spot_size: usize,
    /// Top-hat responses above `mean + sigma_factor * std` count as outliers
    pub sigma_factor: f64,
    /// Disk radius of the opening that drops single-pixel noise (0 disables)
    pub noise_radius: usize,
    /// Disk radius used to grow the final mask over the specks (0 disables)
    pub growth_radius: usize,
    /// Whether to validate image dimensions before detection
    pub validate_dimensions: bool,
    /// Largest accepted width or height when validating
    pub max_dimension: Option<usize>,
    /// Name of the layer created for the mask
    pub layer_name: String,
    /// Compositing mode requested for the mask layer
    pub blend_mode: BlendMode,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            polarity: DustPolarity::Negative,
            sensitivity: 0.85,
            spot_size: 9,
            sigma_factor: 3.0,
            noise_radius: 1,
            growth_radius: 3,
            validate_dimensions: true,
            max_dimension: None,
            layer_name: "dust".to_string(),
            blend_mode: BlendMode::Normal,
        }
    }
}

impl DetectionConfig {
    pub fn builder() -> DetectionConfigBuilder {
        DetectionConfigBuilder::default()
    }

    /// Builds a configuration from the plugin dialog values: a polarity
    /// toggle, sensitivity in integer percent and spot size in pixels.
    pub fn from_plugin_args(is_negative: bool, sensitivity: u32, spot_size: u32) -> Result<Self> {
        if !SENSITIVITY_PERCENT_RANGE.contains(&sensitivity) {
            return Err(DetectionError::InvalidParameter {
                name: "sensitivity",
                value: sensitivity.to_string(),
                reason: format!(
                    "must be between {} and {} percent",
                    SENSITIVITY_PERCENT_RANGE.start(),
                    SENSITIVITY_PERCENT_RANGE.end()
                ),
            });
        }
        if !SPOT_SIZE_RANGE.contains(&spot_size) {
            return Err(DetectionError::InvalidParameter {
                name: "spot_size",
                value: spot_size.to_string(),
                reason: format!(
                    "must be between {} and {} pixels",
                    SPOT_SIZE_RANGE.start(),
                    SPOT_SIZE_RANGE.end()
                ),
            });
        }

        Ok(Self::builder()
            .polarity(DustPolarity::from_is_negative(is_negative))
            .sensitivity(f64::from(sensitivity) / 100.0)
            .spot_size(spot_size as usize)
            .build())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.sensitivity > 0.0 && self.sensitivity <= 1.0) {
            return Err(DetectionError::InvalidParameter {
                name: "sensitivity",
                value: self.sensitivity.to_string(),
                reason: "must lie in (0, 1]".to_string(),
            });
        }
        if self.spot_size == 0 {
            return Err(DetectionError::InvalidParameter {
                name: "spot_size",
                value: "0".to_string(),
                reason: "must be at least one pixel".to_string(),
            });
        }
        if !self.sigma_factor.is_finite() || self.sigma_factor < 0.0 {
            return Err(DetectionError::InvalidParameter {
                name: "sigma_factor",
                value: self.sigma_factor.to_string(),
                reason: "must be a finite, non-negative number".to_string(),
            });
        }
        if self.layer_name.trim().is_empty() {
            return Err(DetectionError::InvalidParameter {
                name: "layer_name",
                value: format!("{:?}", self.layer_name),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for DetectionConfig
#[derive(Default)]
pub struct DetectionConfigBuilder {
    polarity: Option<DustPolarity>,
    sensitivity: Option<f64>,
    spot_size: Option<usize>,
    sigma_factor: Option<f64>,
    noise_radius: Option<usize>,
    growth_radius: Option<usize>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    layer_name: Option<String>,
    blend_mode: Option<BlendMode>,
}

impl DetectionConfigBuilder {
    pub fn polarity(mut self, polarity: DustPolarity) -> Self {
        self.polarity = Some(polarity);
        self
    }

    pub fn sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = Some(sensitivity);
        self
    }

    pub fn spot_size(mut self, spot_size: usize) -> Self {
        self.spot_size = Some(spot_size);
        self
    }

    pub fn sigma_factor(mut self, sigma_factor: f64) -> Self {
        self.sigma_factor = Some(sigma_factor);
        self
    }

    pub fn noise_radius(mut self, radius: usize) -> Self {
        self.noise_radius = Some(radius);
        self
    }

    pub fn growth_radius(mut self, radius: usize) -> Self {
        self.growth_radius = Some(radius);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn layer_name(mut self, name: impl Into<String>) -> Self {
        self.layer_name = Some(name.into());
        self
    }

    pub fn blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = Some(mode);
        self
    }

    pub fn build(self) -> DetectionConfig {
        let default = DetectionConfig::default();
        DetectionConfig {
            polarity: self.polarity.unwrap_or(default.polarity),
            sensitivity: self.sensitivity.unwrap_or(default.sensitivity),
            spot_size: self.spot_size.unwrap_or(default.spot_size),
            sigma_factor: self.sigma_factor.unwrap_or(default.sigma_factor),
            noise_radius: self.noise_radius.unwrap_or(default.noise_radius),
            growth_radius: self.growth_radius.unwrap_or(default.growth_radius),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            layer_name: self.layer_name.unwrap_or(default.layer_name),
            blend_mode: self.blend_mode.unwrap_or(default.blend_mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_defaults_match_dialog() {
        let config = DetectionConfig::default();
        assert_eq!(config.polarity, DustPolarity::Negative);
        assert_abs_diff_eq!(config.sensitivity, 0.85);
        assert_eq!(config.spot_size, 9);
        assert_abs_diff_eq!(config.sigma_factor, 3.0);
        assert_eq!((config.noise_radius, config.growth_radius), (1, 3));
        assert_eq!(config.layer_name, "dust");
        assert_eq!(config.blend_mode, BlendMode::Normal);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = DetectionConfig::builder()
            .polarity(DustPolarity::Positive)
            .sensitivity(0.9)
            .spot_size(15)
            .sigma_factor(2.5)
            .noise_radius(0)
            .growth_radius(5)
            .max_dimension(Some(4096))
            .layer_name("specks")
            .blend_mode(BlendMode::Screen)
            .build();

        assert_eq!(config.polarity, DustPolarity::Positive);
        assert_abs_diff_eq!(config.sensitivity, 0.9);
        assert_eq!(config.spot_size, 15);
        assert_abs_diff_eq!(config.sigma_factor, 2.5);
        assert_eq!(config.noise_radius, 0);
        assert_eq!(config.growth_radius, 5);
        assert_eq!(config.max_dimension, Some(4096));
        assert_eq!(config.layer_name, "specks");
        assert_eq!(config.blend_mode, BlendMode::Screen);
    }

    #[test]
    fn test_from_plugin_args() {
        let config = DetectionConfig::from_plugin_args(false, 80, 11).unwrap();
        assert_eq!(config.polarity, DustPolarity::Positive);
        assert_abs_diff_eq!(config.sensitivity, 0.8, epsilon = 1e-12);
        assert_eq!(config.spot_size, 11);
    }

    #[test]
    fn test_from_plugin_args_rejects_out_of_range() {
        assert!(matches!(
            DetectionConfig::from_plugin_args(true, 50, 9),
            Err(DetectionError::InvalidParameter { name: "sensitivity", .. })
        ));
        assert!(matches!(
            DetectionConfig::from_plugin_args(true, 85, 31),
            Err(DetectionError::InvalidParameter { name: "spot_size", .. })
        ));
        assert!(DetectionConfig::from_plugin_args(true, 95, 5).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero = DetectionConfig::builder().sensitivity(0.0).build();
        let above = DetectionConfig::builder().sensitivity(1.5).build();
        let nan = DetectionConfig::builder().sensitivity(f64::NAN).build();
        let no_spot = DetectionConfig::builder().spot_size(0).build();
        let sigma = DetectionConfig::builder().sigma_factor(-1.0).build();
        let unnamed = DetectionConfig::builder().layer_name("  ").build();

        for config in [zero, above, nan, no_spot, sigma, unnamed] {
            assert!(config.validate().is_err(), "{:?} should be rejected", config);
        }
        assert!(DetectionConfig::builder().sensitivity(1.0).build().validate().is_ok());
    }
}
