use glam::Vec3;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::tag_of;

/// Parameters shared by every light type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LightCommon {
    pub color: Vec3,
    pub intensity: f32,
    pub enabled: bool,
    pub position: Vec3,
    pub cast_shadow: bool,
    pub shadow_map_size: u32,
    pub shadow_far: f32,
}

impl Default for LightCommon {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 1.0,
            enabled: true,
            position: Vec3::ZERO,
            cast_shadow: false,
            shadow_map_size: 512,
            shadow_far: 500.0,
        }
    }
}

/// Light node payload.
#[derive(Debug, Clone, PartialEq)]
pub struct LightSpec {
    pub common: LightCommon,
    pub kind: LightKindSpec,
}

/// Type-specific light parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum LightKindSpec {
    Point {
        distance: f32,
        decay: f32,
    },
    Spot {
        distance: f32,
        /// Cone half-angle in degrees.
        angle: f32,
        penumbra: f32,
        decay: f32,
        target: Vec3,
    },
    Directional {
        shadow_left: f32,
        shadow_right: f32,
        shadow_top: f32,
        shadow_bottom: f32,
    },
    Unsupported(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PointFields {
    distance: f32,
    decay: f32,
}

impl Default for PointFields {
    fn default() -> Self {
        Self {
            distance: 1000.0,
            decay: 2.0,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SpotFields {
    distance: f32,
    angle: f32,
    penumbra: f32,
    decay: f32,
    target: Vec3,
}

impl Default for SpotFields {
    fn default() -> Self {
        Self {
            distance: 1000.0,
            angle: 60.0,
            penumbra: 1.0,
            decay: 2.0,
            target: Vec3::ZERO,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DirectionalFields {
    shadow_left: f32,
    shadow_right: f32,
    shadow_top: f32,
    shadow_bottom: f32,
}

impl Default for DirectionalFields {
    fn default() -> Self {
        Self {
            shadow_left: -5.0,
            shadow_right: 5.0,
            shadow_top: 5.0,
            shadow_bottom: -5.0,
        }
    }
}

impl LightSpec {
    #[must_use]
    pub fn point(color: Vec3, intensity: f32) -> Self {
        Self {
            common: LightCommon {
                color,
                intensity,
                ..LightCommon::default()
            },
            kind: LightKindSpec::Point {
                distance: 1000.0,
                decay: 2.0,
            },
        }
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.common.enabled = enabled;
        self
    }
}

impl<'de> Deserialize<'de> for LightSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        let value = Value::deserialize(deserializer)?;
        let ty = tag_of::<D::Error>(&value, "type")?;
        let common = LightCommon::deserialize(&value).map_err(D::Error::custom)?;

        let kind = match ty.as_str() {
            "pointlight" | "point" => {
                let f = PointFields::deserialize(&value).map_err(D::Error::custom)?;
                LightKindSpec::Point {
                    distance: f.distance,
                    decay: f.decay,
                }
            }
            "spotlight" | "spot" => {
                let f = SpotFields::deserialize(&value).map_err(D::Error::custom)?;
                LightKindSpec::Spot {
                    distance: f.distance,
                    angle: f.angle,
                    penumbra: f.penumbra,
                    decay: f.decay,
                    target: f.target,
                }
            }
            "directionallight" | "directional" => {
                let f = DirectionalFields::deserialize(&value).map_err(D::Error::custom)?;
                LightKindSpec::Directional {
                    shadow_left: f.shadow_left,
                    shadow_right: f.shadow_right,
                    shadow_top: f.shadow_top,
                    shadow_bottom: f.shadow_bottom,
                }
            }
            _ => LightKindSpec::Unsupported(ty),
        };

        Ok(Self { common, kind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spot_light_fills_defaults() {
        let spec: LightSpec = serde_json::from_str(
            r#"{"type": "spotlight", "color": [1, 0.5, 0], "angle": 30, "enabled": false}"#,
        )
        .unwrap();

        assert!(!spec.common.enabled);
        assert_eq!(spec.common.shadow_map_size, 512);
        assert_eq!(spec.common.shadow_far, 500.0);
        match spec.kind {
            LightKindSpec::Spot { angle, decay, .. } => {
                assert_eq!(angle, 30.0);
                assert_eq!(decay, 2.0);
            }
            other => panic!("expected spot light, got {other:?}"),
        }
    }

    #[test]
    fn unknown_light_type_is_kept_for_reporting() {
        let spec: LightSpec = serde_json::from_str(r#"{"type": "arealight"}"#).unwrap();
        assert_eq!(spec.kind, LightKindSpec::Unsupported("arealight".into()));
    }
}
