use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::dust_detection::common::error::{DetectionError, Result};
use crate::dust_detection::layer::{LayerSink, LayerSpec, MASK_CHANNELS};
use crate::dust_detection::raster::Raster;
use crate::dust_detection::tiff_host::types::TiffCompression;

/// Layer sink that writes the mask layer to an RGBA TIFF file
#[derive(Debug, Clone)]
pub struct TiffLayerSink {
    path: PathBuf,
    compression: TiffCompression,
}

impl TiffLayerSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            compression: TiffCompression::default(),
        }
    }

    pub fn with_compression(mut self, compression: TiffCompression) -> Self {
        self.compression = compression;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encodes an RGBA raster as TIFF into `output`.
    pub fn encode(&self, raster: &Raster, output: &mut dyn Write) -> Result<()> {
        if raster.channels() != MASK_CHANNELS {
            return Err(DetectionError::UnsupportedFormat(format!(
                "mask layer needs {} channels, got {}",
                MASK_CHANNELS,
                raster.channels()
            )));
        }

        let mut buffer = Vec::new();
        let encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| DetectionError::EncodeError(e.to_string()))?;
        let mut encoder = encoder.with_compression(self.compression.to_encoder());

        encoder.write_image::<tiff::encoder::colortype::RGBA8>(
            raster.width() as u32,
            raster.height() as u32,
            &raster.to_bytes(),
        ).map_err(|e| DetectionError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;
        Ok(())
    }
}

impl LayerSink for TiffLayerSink {
    fn create_layer_from_raster(&self, spec: &LayerSpec, raster: &Raster) -> Result<()> {
        debug!(
            "Writing layer '{}' ({}x{}, opacity {}%, {:?}, position {})",
            spec.name, raster.width(), raster.height(), spec.opacity, spec.blend_mode, spec.position
        );

        let file = File::create(&self.path).map_err(|e| {
            DetectionError::LayerError(format!("{}: {}", self.path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        self.encode(raster, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn flush_displays(&self) -> Result<()> {
        info!(output = %self.path.display(), "Mask layer written");
        Ok(())
    }
}
