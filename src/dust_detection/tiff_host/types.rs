//! TIFF output configuration types

/// TIFF compression methods for the mask layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced (default)
    #[default]
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

impl TiffCompression {
    pub(crate) fn to_encoder(self) -> tiff::encoder::Compression {
        use tiff::encoder::Compression;
        use tiff::encoder::compression::DeflateLevel;

        match self {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        }
    }
}
