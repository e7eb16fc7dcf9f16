use tracing::{info, instrument, warn};

use crate::dust_detection::{
    common::error::{DetectionError, Result},
    common::timing::PipelineTimings,
    detection::{DetectionConfig, DetectionObserver, DustDetector, OutlierStats, TracingObserver},
    layer::{materialize, LayerSink, LayerSpec},
    raster::{ingest, RasterSource, Region},
};

const SUPPORTED_BITS_PER_CHANNEL: u32 = 8;

/// Summary of one detection run
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionReport {
    pub width: usize,
    pub height: usize,
    /// Pixels set in the final mask
    pub flagged_pixels: usize,
    pub stats: OutlierStats,
    pub layer_name: String,
}

pub struct DustDetectionPipeline<S: RasterSource, K: LayerSink> {
    source: S,
    sink: K,
    detector: DustDetector,
    observer: Box<dyn DetectionObserver>,
}

impl<S: RasterSource, K: LayerSink> DustDetectionPipeline<S, K> {
    /// Pipeline over `source` and `sink`. The configuration is validated
    /// when the pipeline runs.
    pub fn with_custom(source: S, sink: K, config: DetectionConfig) -> Self {
        Self {
            source,
            sink,
            detector: DustDetector::default().with_config(config),
            observer: Box::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: impl DetectionObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        let config = self.detector.config();
        if !config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(DetectionError::InvalidDimensions(width, height));
        }

        if let Some(max) = config.max_dimension {
            if width > max || height > max {
                warn!(
                    "Image dimensions {}x{} exceed maximum {}",
                    width, height, max
                );
                return Err(DetectionError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    #[instrument(skip(self), fields(layer = %self.detector.config().layer_name))]
    pub fn run(&self) -> Result<DetectionReport> {
        self.run_inner(&mut PipelineTimings::new())
    }

    pub fn run_with_timings(&self) -> Result<(DetectionReport, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        let report = self.run_inner(&mut timings)?;
        Ok((report, timings))
    }

    pub(super) fn run_inner(&self, timings: &mut PipelineTimings) -> Result<DetectionReport> {
        let config = self.detector.config();
        config.validate()?;
        info!(
            polarity = ?config.polarity,
            sensitivity = config.sensitivity,
            spot_size = config.spot_size,
            "Starting dust detection"
        );

        let (width, height) = self.source.dimensions();
        self.validate_dimensions(width, height)?;

        let bits = self.source.bits_per_channel();
        if bits != SUPPORTED_BITS_PER_CHANNEL {
            return Err(DetectionError::UnsupportedDepth(bits));
        }

        let region = Region::full(width, height);

        let fetched = {
            let _step = timings.step("fetch_region");
            let _span = tracing::info_span!("fetch_region", width, height).entered();
            self.source.fetch_region_bytes(&region)?
        };

        let raster = {
            let _step = timings.step("ingest");
            let _span = tracing::info_span!("ingest", bytes = fetched.bytes.len()).entered();
            ingest(&region, fetched)?
        };

        let outcome = {
            let _step = timings.step("detect");
            self.detector.detect_observed(&raster, self.observer.as_ref())?
        };

        let layer = {
            let _step = timings.step("materialize");
            let _span = tracing::info_span!("materialize").entered();
            materialize(&outcome.mask)
        };

        let spec = LayerSpec {
            blend_mode: config.blend_mode,
            ..LayerSpec::topmost(config.layer_name.clone())
        };
        {
            let _step = timings.step("create_layer");
            let _span = tracing::info_span!("create_layer", name = %spec.name).entered();
            self.sink.create_layer_from_raster(&spec, &layer)?;
            self.sink.flush_displays()?;
        }

        let report = DetectionReport {
            width,
            height,
            flagged_pixels: outcome.flagged_pixels(),
            stats: outcome.stats,
            layer_name: spec.name,
        };
        info!(
            width,
            height,
            flagged = report.flagged_pixels,
            "Dust detection complete"
        );
        Ok(report)
    }

    pub fn config(&self) -> &DetectionConfig {
        self.detector.config()
    }

    pub fn set_config(&mut self, config: DetectionConfig) {
        self.detector = DustDetector::default().with_config(config);
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }
}

/// Entry point matching the plugin dialog: polarity toggle, sensitivity in
/// percent (75 to 95) and spot size in pixels (5 to 30).
pub fn detect_dust<S: RasterSource, K: LayerSink>(
    source: S,
    sink: K,
    is_negative: bool,
    sensitivity: u32,
    spot_size: u32,
) -> Result<DetectionReport> {
    let config = DetectionConfig::from_plugin_args(is_negative, sensitivity, spot_size)?;
    DustDetectionPipeline::with_custom(source, sink, config).run()
}
