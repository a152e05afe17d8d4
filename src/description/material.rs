use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Shading model requested by a material record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingMode {
    Flat,
    #[default]
    Smooth,
    /// Unlit: color and maps only.
    #[serde(alias = "unlit")]
    None,
}

/// Declarative material record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialRecord {
    pub id: String,
    pub color: Vec3,
    pub specular: Vec3,
    pub emissive: Vec3,
    pub shininess: f32,
    pub shading: ShadingMode,
    pub wireframe: bool,
    pub two_sided: bool,
    pub texture_ref: Option<String>,
    pub specular_ref: Option<String>,
    pub bump_ref: Option<String>,
    pub bump_scale: f32,
    /// World units covered by one texture repeat along S; `None` or a
    /// non-positive value means repeat = 1.
    pub tex_length_s: Option<f32>,
    pub tex_length_t: Option<f32>,
}

impl Default for MaterialRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            color: Vec3::ONE,
            specular: Vec3::splat(0.067),
            emissive: Vec3::ZERO,
            shininess: 30.0,
            shading: ShadingMode::Smooth,
            wireframe: false,
            two_sided: false,
            texture_ref: None,
            specular_ref: None,
            bump_ref: None,
            bump_scale: 1.0,
            tex_length_s: None,
            tex_length_t: None,
        }
    }
}

impl MaterialRecord {
    #[must_use]
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_texture(mut self, texture_id: &str) -> Self {
        self.texture_ref = Some(texture_id.to_string());
        self
    }

    #[must_use]
    pub fn with_tex_length(mut self, s: f32, t: f32) -> Self {
        self.tex_length_s = Some(s);
        self.tex_length_t = Some(t);
        self
    }
}

/// Texture coordinate wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    #[default]
    Repeat,
    #[serde(alias = "clamptoedge")]
    Clamp,
    #[serde(alias = "mirroredrepeat")]
    Mirror,
}

/// Declarative texture record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextureRecord {
    pub id: String,
    /// Relative to the scene's asset directory.
    pub filepath: String,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    /// Override images for mip levels 0..7, in level order.
    pub mipmaps: Vec<String>,
    pub is_video: bool,
}

impl TextureRecord {
    #[must_use]
    pub fn new(id: &str, filepath: &str) -> Self {
        Self {
            id: id.to_string(),
            filepath: filepath.to_string(),
            ..Self::default()
        }
    }
}
