mod phong;
mod unlit;

pub use phong::MeshPhongMaterial;
pub use unlit::UnlitMaterial;

use std::sync::Arc;

use bitflags::bitflags;
use glam::{Vec2, Vec4};
use uuid::Uuid;

use crate::resources::texture::TextureHandle;

pub type MaterialHandle = Arc<Material>;

// Shader feature flags derived from the attached maps and settings
bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MaterialFeatures: u32 {
        const USE_MAP          = 1 << 0;
        const USE_SPECULAR_MAP = 1 << 1;
        const USE_BUMP_MAP     = 1 << 2;
        const FLAT_SHADING     = 1 << 3;
        const WIREFRAME        = 1 << 4;
        const DOUBLE_SIDED     = 1 << 5;
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    /// Back-face culling off.
    Double,
}

/// Pipeline-level material settings.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct MaterialSettings {
    pub transparent: bool,
    pub depth_write: bool,
    pub depth_test: bool,
    pub side: Side,
    pub wireframe: bool,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            transparent: false,
            depth_write: true,
            depth_test: true,
            side: Side::Front,
            wireframe: false,
        }
    }
}

// ============================================================================
// Material data enum
// ============================================================================

#[derive(Debug, Clone)]
pub enum MaterialData {
    /// Lit (Phong) shading.
    Phong(MeshPhongMaterial),
    /// Color and maps only.
    Unlit(UnlitMaterial),
}

/// A renderable material.
///
/// Shared between meshes through [`MaterialHandle`]. Editing one mesh's
/// material goes through `Arc::make_mut`, which detaches it from the others.
#[derive(Debug, Clone)]
pub struct Material {
    pub uuid: Uuid,
    pub name: Option<String>,
    pub data: MaterialData,
    pub settings: MaterialSettings,
    /// UV repeat for diffuse maps attached after compilation, such as a
    /// node-level texture. `None` keeps the texture's own repeat.
    pub map_repeat: Option<Vec2>,
}

impl Material {
    #[must_use]
    pub fn new(data: MaterialData) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: None,
            data,
            settings: MaterialSettings::default(),
            map_repeat: None,
        }
    }

    #[must_use]
    pub fn new_phong(color: Vec4) -> Self {
        Self::new(MaterialData::Phong(MeshPhongMaterial::new(color)))
    }

    #[must_use]
    pub fn new_unlit(color: Vec4) -> Self {
        Self::new(MaterialData::Unlit(UnlitMaterial::new(color)))
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn with_side(mut self, side: Side) -> Self {
        self.settings.side = side;
        self
    }

    #[must_use]
    pub fn with_map_repeat(mut self, repeat: Option<Vec2>) -> Self {
        self.map_repeat = repeat;
        self
    }

    #[must_use]
    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.settings.wireframe = wireframe;
        self
    }

    /// Independent copy with a fresh identity. Textures stay shared.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn shader_name(&self) -> &'static str {
        match &self.data {
            MaterialData::Phong(_) => "mesh_phong",
            MaterialData::Unlit(_) => "mesh_unlit",
        }
    }

    #[must_use]
    pub fn color(&self) -> Vec4 {
        match &self.data {
            MaterialData::Phong(m) => m.color,
            MaterialData::Unlit(m) => m.color,
        }
    }

    pub fn set_color(&mut self, color: Vec4) {
        match &mut self.data {
            MaterialData::Phong(m) => m.color = color,
            MaterialData::Unlit(m) => m.color = color,
        }
    }

    /// Diffuse map.
    #[must_use]
    pub fn map(&self) -> Option<&TextureHandle> {
        match &self.data {
            MaterialData::Phong(m) => m.map.as_ref(),
            MaterialData::Unlit(m) => m.map.as_ref(),
        }
    }

    /// Attaches `texture` as the diffuse map, tiled by [`Self::map_repeat`].
    ///
    /// A tiled map is a shallow copy so the shared handle keeps its repeat.
    pub fn attach_map(&mut self, texture: &TextureHandle) {
        let map = match self.map_repeat {
            Some(repeat) => {
                let mut tiled = texture.shallow_clone();
                tiled.transform.repeat = repeat;
                Arc::new(tiled)
            }
            None => Arc::clone(texture),
        };
        self.set_map(Some(map));
    }

    pub fn set_map(&mut self, map: Option<TextureHandle>) {
        match &mut self.data {
            MaterialData::Phong(m) => m.map = map,
            MaterialData::Unlit(m) => m.map = map,
        }
    }

    #[must_use]
    pub fn specular_map(&self) -> Option<&TextureHandle> {
        match &self.data {
            MaterialData::Phong(m) => m.specular_map.as_ref(),
            MaterialData::Unlit(m) => m.specular_map.as_ref(),
        }
    }

    #[must_use]
    pub fn as_phong(&self) -> Option<&MeshPhongMaterial> {
        match &self.data {
            MaterialData::Phong(m) => Some(m),
            MaterialData::Unlit(_) => None,
        }
    }

    #[must_use]
    pub fn is_unlit(&self) -> bool {
        matches!(self.data, MaterialData::Unlit(_))
    }

    #[must_use]
    pub fn features(&self) -> MaterialFeatures {
        let mut features = MaterialFeatures::empty();
        features.set(MaterialFeatures::USE_MAP, self.map().is_some());
        features.set(MaterialFeatures::USE_SPECULAR_MAP, self.specular_map().is_some());
        if let MaterialData::Phong(m) = &self.data {
            features.set(MaterialFeatures::USE_BUMP_MAP, m.bump_map.is_some());
            features.set(MaterialFeatures::FLAT_SHADING, m.flat_shading);
        }
        features.set(MaterialFeatures::WIREFRAME, self.settings.wireframe);
        features.set(MaterialFeatures::DOUBLE_SIDED, self.settings.side == Side::Double);
        features
    }
}
