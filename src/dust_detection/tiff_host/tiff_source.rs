//! Raster source reading the active layer from a TIFF file.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use crate::dust_detection::common::error::{DetectionError, Result};
use crate::dust_detection::raster::{RasterSource, Region, RegionBytes};

/// Decoded 8-bit TIFF held in memory
#[derive(Debug, Clone)]
pub struct TiffRasterSource {
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
    data: Vec<u8>,
}

impl TiffRasterSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            DetectionError::SourceError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Decodes a gray, gray+alpha, RGB or RGBA TIFF with 8-bit samples.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut decoder = Decoder::new(reader)
            .map_err(|e| DetectionError::DecodeError(e.to_string()))?;

        let (width, height) = decoder
            .dimensions()
            .map_err(|e| DetectionError::DecodeError(e.to_string()))?;
        let colortype = decoder
            .colortype()
            .map_err(|e| DetectionError::DecodeError(e.to_string()))?;

        let (bytes_per_pixel, bits) = match colortype {
            ColorType::Gray(bits) => (1, bits),
            ColorType::GrayA(bits) => (2, bits),
            ColorType::RGB(bits) => (3, bits),
            ColorType::RGBA(bits) => (4, bits),
            other => {
                return Err(DetectionError::UnsupportedFormat(format!("{:?}", other)));
            }
        };
        if bits != 8 {
            return Err(DetectionError::UnsupportedDepth(u32::from(bits)));
        }

        let data = match decoder
            .read_image()
            .map_err(|e| DetectionError::DecodeError(e.to_string()))?
        {
            DecodingResult::U8(data) => data,
            _ => return Err(DetectionError::UnsupportedDepth(u32::from(bits))),
        };

        debug!(
            "Decoded TIFF layer: {}x{}, {} bytes per pixel",
            width, height, bytes_per_pixel
        );

        Self::from_bytes(width as usize, height as usize, bytes_per_pixel, data)
    }

    /// Wraps an interleaved 8-bit buffer of a `width` x `height` image.
    pub fn from_bytes(
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
        data: Vec<u8>,
    ) -> Result<Self> {
        let expected = Region::full(width, height)
            .sample_count(bytes_per_pixel)
            .ok_or(DetectionError::InvalidDimensions(width, height))?;
        if data.len() != expected {
            return Err(DetectionError::MalformedInput {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bytes_per_pixel,
            data,
        })
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }
}

impl RasterSource for TiffRasterSource {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn fetch_region_bytes(&self, region: &Region) -> Result<RegionBytes> {
        let right = region.x.checked_add(region.width);
        let bottom = region.y.checked_add(region.height);
        let inside = matches!((right, bottom), (Some(r), Some(b)) if r <= self.width && b <= self.height);
        if !inside {
            return Err(DetectionError::SourceError(format!(
                "region {}x{}+{}+{} outside {}x{} image",
                region.width, region.height, region.x, region.y, self.width, self.height
            )));
        }

        let stride = self.width * self.bytes_per_pixel;
        let row_bytes = region.width * self.bytes_per_pixel;
        let mut bytes = Vec::with_capacity(row_bytes * region.height);
        for row in region.y..region.y + region.height {
            let start = row * stride + region.x * self.bytes_per_pixel;
            bytes.extend_from_slice(&self.data[start..start + row_bytes]);
        }

        Ok(RegionBytes {
            bytes,
            bytes_per_pixel: self.bytes_per_pixel,
        })
    }
}
