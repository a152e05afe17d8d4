use glam::Vec4;

use crate::resources::texture::TextureHandle;

/// Unlit material: base color and maps, no emissive or shininess.
#[derive(Debug, Clone)]
pub struct UnlitMaterial {
    pub color: Vec4,
    pub map: Option<TextureHandle>,
    pub specular_map: Option<TextureHandle>,
}

impl UnlitMaterial {
    #[must_use]
    pub fn new(color: Vec4) -> Self {
        Self {
            color,
            map: None,
            specular_map: None,
        }
    }

    #[must_use]
    pub fn with_map(mut self, map: Option<TextureHandle>) -> Self {
        self.map = map;
        self
    }
}

