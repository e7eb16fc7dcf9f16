use crate::dust_detection::common::error::Result;
use crate::dust_detection::layer::types::LayerSpec;
use crate::dust_detection::raster::Raster;

/// Host capability: insert a raster as a new layer and refresh the display.
pub trait LayerSink {
    fn create_layer_from_raster(&self, spec: &LayerSpec, raster: &Raster) -> Result<()>;

    /// Refreshes every view of the document after a layer was added.
    fn flush_displays(&self) -> Result<()>;
}
