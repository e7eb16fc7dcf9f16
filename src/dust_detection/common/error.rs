use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("Malformed raster buffer: expected {expected} bytes, got {actual}")]
    MalformedInput { expected: usize, actual: usize },

    #[error("Unsupported bit depth: {0} bits per channel (only 8 is handled)")]
    UnsupportedDepth(u32),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to fetch raster from host: {0}")]
    SourceError(String),

    #[error("Failed to create mask layer: {0}")]
    LayerError(String),

    #[error("Failed to decode TIFF image: {0}")]
    DecodeError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DetectionError>;
