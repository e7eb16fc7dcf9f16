//! Raster data types

use ndarray::{Array3, ArrayView3};

use crate::dust_detection::common::error::{DetectionError, Result};

/// Rectangle of an image, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Left edge
    pub x: usize,
    /// Top edge
    pub y: usize,
    /// Width of the region in pixels
    pub width: usize,
    /// Height of the region in pixels
    pub height: usize,
}

impl Region {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    /// Region covering a whole `width` x `height` image.
    pub fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Number of pixels in the region, `None` when it overflows `usize`.
    pub fn pixel_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// Number of samples for `channels` interleaved channels per pixel.
    pub fn sample_count(&self, channels: usize) -> Option<usize> {
        self.pixel_count()?.checked_mul(channels)
    }
}

/// Raw bytes of a region as returned by the host
#[derive(Debug, Clone)]
pub struct RegionBytes {
    /// Row-major, channel-interleaved samples
    pub bytes: Vec<u8>,
    /// Number of 8-bit samples per pixel
    pub bytes_per_pixel: usize,
}

/// Immutable 8-bit raster of shape (height, width, channels)
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    data: Array3<u8>,
}

impl Raster {
    /// Wraps a flat interleaved buffer, failing when its length is not
    /// `height * width * channels`.
    pub fn from_bytes(
        bytes: Vec<u8>,
        height: usize,
        width: usize,
        channels: usize,
    ) -> Result<Self> {
        let expected = Region::full(width, height)
            .sample_count(channels)
            .ok_or(DetectionError::InvalidDimensions(width, height))?;
        if channels == 0 || bytes.len() != expected {
            return Err(DetectionError::MalformedInput {
                expected,
                actual: bytes.len(),
            });
        }

        let data = Array3::from_shape_vec((height, width, channels), bytes).map_err(|_| {
            DetectionError::MalformedInput {
                expected,
                actual: expected,
            }
        })?;
        Ok(Self { data })
    }

    pub fn from_array(data: Array3<u8>) -> Self {
        Self { data }
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    /// Sample at row `row`, column `col`, channel `channel`.
    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<u8> {
        self.data.get((row, col, channel)).copied()
    }

    /// Flat row-major, channel-interleaved copy of the samples.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }
}
