use glam::Vec3;
use uuid::Uuid;

use crate::description::{LightKindSpec, LightSpec};
use crate::errors::{Result, SceneError};

#[derive(Debug, Clone, PartialEq)]
pub struct ShadowConfig {
    pub map_size: u32,
    pub camera_near: f32,
    pub camera_far: f32,
    /// Orthographic shadow camera bounds (directional lights).
    pub camera_bounds: Option<ShadowBounds>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            map_size: 512,
            camera_near: 0.5,
            camera_far: 500.0,
            camera_bounds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub range: f32,
    pub decay: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpotLight {
    pub range: f32,
    /// Cone half-angle in radians.
    pub angle: f32,
    pub penumbra: f32,
    pub decay: f32,
    pub target: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    pub target: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LightKind {
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

/// A compiled light.
///
/// A disabled light keeps existing with zero intensity; its declared
/// intensity stays in `base_intensity` so it can be switched back on.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub uuid: Uuid,
    pub color: Vec3,
    pub intensity: f32,
    pub base_intensity: f32,
    pub enabled: bool,
    /// Position relative to the owning node.
    pub position: Vec3,
    pub kind: LightKind,

    pub cast_shadows: bool,
    pub shadow: ShadowConfig,
}

impl Light {
    /// Builds a light from its spec. Unknown light types are an error.
    pub fn from_spec(spec: &LightSpec) -> Result<Self> {
        let common = &spec.common;
        let mut shadow = ShadowConfig {
            map_size: common.shadow_map_size,
            camera_far: common.shadow_far,
            ..ShadowConfig::default()
        };

        let kind = match &spec.kind {
            LightKindSpec::Point { distance, decay } => LightKind::Point(PointLight {
                range: *distance,
                decay: *decay,
            }),
            LightKindSpec::Spot {
                distance,
                angle,
                penumbra,
                decay,
                target,
            } => LightKind::Spot(SpotLight {
                range: *distance,
                angle: angle.to_radians(),
                penumbra: *penumbra,
                decay: *decay,
                target: *target,
            }),
            LightKindSpec::Directional {
                shadow_left,
                shadow_right,
                shadow_top,
                shadow_bottom,
            } => {
                shadow.camera_bounds = Some(ShadowBounds {
                    left: *shadow_left,
                    right: *shadow_right,
                    top: *shadow_top,
                    bottom: *shadow_bottom,
                });
                LightKind::Directional(DirectionalLight { target: Vec3::ZERO })
            }
            LightKindSpec::Unsupported(ty) => {
                return Err(SceneError::UnsupportedLight(ty.clone()));
            }
        };

        let mut light = Self {
            uuid: Uuid::new_v4(),
            color: common.color,
            intensity: common.intensity,
            base_intensity: common.intensity,
            enabled: true,
            position: common.position,
            kind,
            cast_shadows: common.cast_shadow,
            shadow,
        };
        light.set_enabled(common.enabled);
        Ok(light)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.intensity = if enabled { self.base_intensity } else { 0.0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_light_can_be_switched_back_on() {
        let spec = LightSpec::point(Vec3::ONE, 3.0).enabled(false);
        let mut light = Light::from_spec(&spec).unwrap();
        assert_eq!(light.intensity, 0.0);
        assert_eq!(light.base_intensity, 3.0);

        light.set_enabled(true);
        assert_eq!(light.intensity, 3.0);
    }
}
