use glam::{Vec2, Vec3};

use crate::assets::ResourceResolver;
use crate::description::{MaterialRecord, ShadingMode};
use crate::errors::SceneError;
use crate::resources::material::{
    Material, MaterialData, MeshPhongMaterial, Side, UnlitMaterial,
};
use crate::resources::texture::TextureHandle;

/// Texture units per world unit for one axis; 1 when the length is missing
/// or not positive.
fn repeat_for(length: Option<f32>) -> f32 {
    match length {
        Some(l) if l > 0.0 => 1.0 / l,
        _ => 1.0,
    }
}

/// Compiles a declarative material record.
///
/// Texture references that do not resolve are passed to `report` and the
/// material is built without that map. A diffuse map with a positive
/// `tex_length_s`/`tex_length_t` gets a private copy with repeat
/// `(1 / tex_length_s, 1 / tex_length_t)`; the shared handle is left alone.
/// The repeat is kept on the material for maps attached later.
pub fn compile_material(
    record: &MaterialRecord,
    resolver: &ResourceResolver,
    report: &mut dyn FnMut(SceneError),
) -> Material {
    let mut lookup = |id: &Option<String>, repeat: Option<Vec2>| -> Option<TextureHandle> {
        let id = id.as_deref()?;
        let handle = match repeat {
            Some(repeat) => resolver.resolve_with_repeat(id, repeat),
            None => resolver.resolve(id),
        };
        if handle.is_none() {
            report(SceneError::MissingTexture(id.to_string()));
        }
        handle
    };

    let tiled = record.tex_length_s.is_some_and(|l| l > 0.0)
        || record.tex_length_t.is_some_and(|l| l > 0.0);
    let repeat = tiled.then(|| {
        Vec2::new(
            repeat_for(record.tex_length_s),
            repeat_for(record.tex_length_t),
        )
    });
    let map = lookup(&record.texture_ref, repeat);
    let specular_map = lookup(&record.specular_ref, None);

    let color = record.color.extend(1.0);
    let data = match record.shading {
        ShadingMode::None => {
            let mut unlit = UnlitMaterial::new(color).with_map(map);
            unlit.specular_map = specular_map;
            MaterialData::Unlit(unlit)
        }
        ShadingMode::Flat | ShadingMode::Smooth => {
            let mut phong = MeshPhongMaterial::new(color)
                .with_specular(record.specular)
                .with_emissive(record.emissive, 1.0)
                .with_shininess(record.shininess)
                .with_flat_shading(record.shading == ShadingMode::Flat)
                .with_map(map);
            phong.specular_map = specular_map;
            phong.bump_map = lookup(&record.bump_ref, None);
            phong.bump_scale = record.bump_scale;
            MaterialData::Phong(phong)
        }
    };

    let side = if record.two_sided {
        Side::Double
    } else {
        Side::Front
    };

    let mut material = Material::new(data)
        .with_side(side)
        .with_wireframe(record.wireframe)
        .with_map_repeat(repeat);
    if !record.id.is_empty() {
        material = material.with_name(&record.id);
    }
    material
}

/// Visibly distinct material for primitives that resolve none.
#[must_use]
pub fn fallback_material(color: Vec3) -> Material {
    Material::new_unlit(color.extend(1.0))
        .with_wireframe(true)
        .with_name("fallback")
}

/// Per-face material of a skybox: the face texture lit by its emissive tint.
#[must_use]
pub fn skybox_face_material(map: Option<TextureHandle>, emissive: Vec3, intensity: f32) -> Material {
    let phong = MeshPhongMaterial::new(glam::Vec4::ONE)
        .with_emissive(emissive, intensity)
        .with_map(map);
    Material::new(MaterialData::Phong(phong)).with_name("skybox")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_lengths_repeat_once() {
        assert_eq!(repeat_for(None), 1.0);
        assert_eq!(repeat_for(Some(0.0)), 1.0);
        assert_eq!(repeat_for(Some(-2.0)), 1.0);
        assert_eq!(repeat_for(Some(4.0)), 0.25);
    }
}
