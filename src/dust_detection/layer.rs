//! Mask layer module
//!
//! This module turns the final dust mask into an RGBA raster and defines the
//! host-side [`LayerSink`] collaborator that inserts it into the image.

mod sink;
mod materialize;
pub mod types;

pub use sink::LayerSink;
pub use materialize::{materialize, MASK_CHANNELS};
pub use types::{BlendMode, LayerSpec};
