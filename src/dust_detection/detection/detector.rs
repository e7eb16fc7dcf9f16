use tracing::info_span;

use crate::dust_detection::common::error::{DetectionError, Result};
use crate::dust_detection::detection::config::DetectionConfig;
use crate::dust_detection::detection::observer::{DetectionObserver, TracingObserver};
use crate::dust_detection::detection::outlier::{outlier_masks, OutlierStats};
use crate::dust_detection::detection::refine::{combine, grow};
use crate::dust_detection::grayscale::{to_intensity, IntensityField};
use crate::dust_detection::morphology::BinaryMask;
use crate::dust_detection::raster::Raster;

/// Every mask produced by one detection run
#[derive(Debug, Clone)]
pub struct DetectionOutcome {
    pub level_mask: BinaryMask,
    pub tophat_mask: BinaryMask,
    /// Level AND top-hat, before growing
    pub combined_mask: BinaryMask,
    /// Final dust mask
    pub mask: BinaryMask,
    pub stats: OutlierStats,
}

impl DetectionOutcome {
    pub fn flagged_pixels(&self) -> usize {
        self.mask.iter().filter(|&&v| v).count()
    }
}

/// Host-agnostic detector: raster or intensity field in, dust mask out.
#[derive(Debug, Clone, Default)]
pub struct DustDetector {
    config: DetectionConfig,
}

impl DustDetector {
    pub fn new(config: DetectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Replaces the configuration without validating it; callers are
    /// expected to run [`DetectionConfig::validate`] before detecting.
    pub fn with_config(mut self, config: DetectionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    pub fn detect(&self, raster: &Raster) -> Result<DetectionOutcome> {
        self.detect_observed(raster, &TracingObserver)
    }

    pub fn detect_observed(
        &self,
        raster: &Raster,
        observer: &dyn DetectionObserver,
    ) -> Result<DetectionOutcome> {
        let field = {
            let _span = info_span!("grayscale", channels = raster.channels()).entered();
            to_intensity(raster)?
        };
        self.detect_field(&field, observer)
    }

    /// Runs the mask stages on an already projected intensity field.
    pub fn detect_field(
        &self,
        field: &IntensityField,
        observer: &dyn DetectionObserver,
    ) -> Result<DetectionOutcome> {
        let (height, width) = field.dim();
        if height == 0 || width == 0 {
            return Err(DetectionError::InvalidDimensions(width, height));
        }

        let masks = {
            let _span = info_span!("outlier_mask", spot_size = self.config.spot_size).entered();
            outlier_masks(field, &self.config)?
        };
        observer.message(&format!(
            "top-hat response mean={:.6} std={:.6} threshold={:.6}",
            masks.stats.mean, masks.stats.std_dev, masks.stats.threshold
        ));
        observer.message(&format!(
            "level mask: {} pixels, top-hat mask: {} pixels",
            count(&masks.level),
            count(&masks.tophat)
        ));

        let (combined_mask, mask) = {
            let _span = info_span!("refine", growth_radius = self.config.growth_radius).entered();
            let combined = combine(&masks.level, &masks.tophat);
            let grown = grow(&combined, self.config.growth_radius)?;
            (combined, grown)
        };
        observer.message(&format!(
            "combined mask: {} pixels, final mask: {} pixels",
            count(&combined_mask),
            count(&mask)
        ));

        Ok(DetectionOutcome {
            level_mask: masks.level,
            tophat_mask: masks.tophat,
            combined_mask,
            mask,
            stats: masks.stats,
        })
    }
}

fn count(mask: &BinaryMask) -> usize {
    mask.iter().filter(|&&v| v).count()
}
