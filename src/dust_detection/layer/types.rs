//! Layer description types

/// How the host composites the new layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
}

/// Everything the host needs to insert a layer besides its pixels
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    /// Layer name shown in the host
    pub name: String,
    /// Opacity in percent
    pub opacity: f64,
    pub blend_mode: BlendMode,
    /// Stack position; 0 is the topmost layer
    pub position: usize,
}

impl LayerSpec {
    /// Fully opaque, normal-mode layer at the top of the stack.
    pub fn topmost(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            opacity: 100.0,
            blend_mode: BlendMode::Normal,
            position: 0,
        }
    }
}
