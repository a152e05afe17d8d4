use glam::{Vec3, Vec4};

use crate::resources::texture::TextureHandle;

#[derive(Debug, Clone)]
pub struct MeshPhongMaterial {
    pub color: Vec4,
    pub specular: Vec3,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
    pub shininess: f32,
    /// Faceted normals instead of interpolated ones.
    pub flat_shading: bool,

    pub map: Option<TextureHandle>,
    pub specular_map: Option<TextureHandle>,
    pub bump_map: Option<TextureHandle>,
    pub bump_scale: f32,
}

impl MeshPhongMaterial {
    #[must_use]
    pub fn new(color: Vec4) -> Self {
        Self {
            color,
            specular: Vec3::splat(0.067),
            emissive: Vec3::ZERO,
            emissive_intensity: 1.0,
            shininess: 30.0,
            flat_shading: false,
            map: None,
            specular_map: None,
            bump_map: None,
            bump_scale: 1.0,
        }
    }

    // -- Builder pattern (chainable at construction time) --

    #[must_use]
    pub fn with_specular(mut self, specular: Vec3) -> Self {
        self.specular = specular;
        self
    }

    #[must_use]
    pub fn with_emissive(mut self, emissive: Vec3, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    #[must_use]
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    #[must_use]
    pub fn with_flat_shading(mut self, flat: bool) -> Self {
        self.flat_shading = flat;
        self
    }

    #[must_use]
    pub fn with_map(mut self, map: Option<TextureHandle>) -> Self {
        self.map = map;
        self
    }
}

impl Default for MeshPhongMaterial {
    fn default() -> Self {
        Self::new(Vec4::ONE)
    }
}
