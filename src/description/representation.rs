use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::tag_of;

/// Geometry payload of a primitive node.
///
/// One variant per primitive kind. The subtype string of the source document
/// is decoded into a variant at deserialization time; the geometry builders
/// match on it exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Representation {
    Rectangle(RectangleParams),
    Box(BoxParams),
    Cylinder(CylinderParams),
    Sphere(SphereParams),
    Triangle(TriangleParams),
    Polygon(PolygonParams),
    Skybox(SkyboxParams),
    Nurbs(NurbsParams),
    Track(TrackParams),
    /// External 3D model instantiated from the scene's asset library.
    Model { path: String },
    /// Subtype string with no builder; reported and skipped.
    Unsupported(String),
}

impl Representation {
    #[must_use]
    pub fn subtype(&self) -> &str {
        match self {
            Self::Rectangle(_) => "rectangle",
            Self::Box(_) => "box",
            Self::Cylinder(_) => "cylinder",
            Self::Sphere(_) => "sphere",
            Self::Triangle(_) => "triangle",
            Self::Polygon(_) => "polygon",
            Self::Skybox(_) => "skybox",
            Self::Nurbs(_) => "nurbs",
            Self::Track(_) => "track",
            Self::Model { .. } => "model3d",
            Self::Unsupported(subtype) => subtype,
        }
    }
}

impl<'de> Deserialize<'de> for Representation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        let value = Value::deserialize(deserializer)?;
        let subtype = tag_of::<D::Error>(&value, "subtype")?;

        fn params<T: serde::de::DeserializeOwned, E: Error>(value: Value) -> Result<T, E> {
            T::deserialize(value).map_err(E::custom)
        }

        Ok(match subtype.as_str() {
            "rectangle" => Self::Rectangle(params(value)?),
            "box" => Self::Box(params(value)?),
            "cylinder" => Self::Cylinder(params(value)?),
            "sphere" => Self::Sphere(params(value)?),
            "triangle" => Self::Triangle(params(value)?),
            "polygon" => Self::Polygon(params(value)?),
            "skybox" => Self::Skybox(params(value)?),
            "nurbs" => Self::Nurbs(params(value)?),
            "track" | "tube" => Self::Track(params(value)?),
            "model3d" | "model" => Self::Model {
                path: super::required_field(&value, "filepath")?,
            },
            _ => Self::Unsupported(subtype),
        })
    }
}

fn one() -> u32 {
    1
}

fn one_f32() -> f32 {
    1.0
}

fn yes() -> bool {
    true
}

/// Axis-aligned rectangle in the XY plane given by two opposite corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleParams {
    pub xy1: Vec2,
    pub xy2: Vec2,
    #[serde(default = "one")]
    pub parts_x: u32,
    #[serde(default = "one")]
    pub parts_y: u32,
}

/// Axis-aligned box given by two opposite corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxParams {
    pub xyz1: Vec3,
    pub xyz2: Vec3,
    #[serde(default = "one")]
    pub parts_x: u32,
    #[serde(default = "one")]
    pub parts_y: u32,
    #[serde(default = "one")]
    pub parts_z: u32,
}

/// Cylinder (or truncated cone) along the Y axis.
///
/// Angles are in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CylinderParams {
    pub base: f32,
    pub top: f32,
    pub height: f32,
    pub slices: u32,
    pub stacks: u32,
    /// `false` leaves the cylinder open-ended.
    pub caps_close: bool,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            base: 1.0,
            top: 1.0,
            height: 1.0,
            slices: 32,
            stacks: 1,
            caps_close: true,
            theta_start: 0.0,
            theta_length: TAU,
        }
    }
}

/// Sphere (or sphere section) around the origin.
///
/// Angles are in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SphereParams {
    pub radius: f32,
    pub slices: u32,
    pub stacks: u32,
    pub phi_start: f32,
    pub phi_length: f32,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            slices: 32,
            stacks: 16,
            phi_start: 0.0,
            phi_length: TAU,
            theta_start: 0.0,
            theta_length: PI,
        }
    }
}

/// Flat triangle from three explicit points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriangleParams {
    pub xyz1: Vec3,
    pub xyz2: Vec3,
    pub xyz3: Vec3,
}

/// Radial fan with a center-to-rim color gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonParams {
    #[serde(default = "one_f32")]
    pub radius: f32,
    #[serde(default = "one")]
    pub stacks: u32,
    #[serde(default = "one")]
    pub slices: u32,
    pub color_c: Vec3,
    pub color_p: Vec3,
}

/// Inward-facing textured cube around the viewer.
///
/// Face texture ids are given in the order front, back, up, down, left, right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkyboxParams {
    #[serde(default = "unit_size")]
    pub size: Vec3,
    #[serde(default)]
    pub center: Vec3,
    #[serde(default)]
    pub emissive: Vec3,
    #[serde(default = "one_f32")]
    pub intensity: f32,
    #[serde(default)]
    pub faces: [Option<String>; 6],
}

fn unit_size() -> Vec3 {
    Vec3::ONE
}

/// Tensor-product surface over a `(degree_u + 1) × (degree_v + 1)` control
/// grid, stored U-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NurbsParams {
    pub degree_u: u32,
    pub degree_v: u32,
    #[serde(default = "one")]
    pub parts_u: u32,
    #[serde(default = "one")]
    pub parts_v: u32,
    pub control_points: Vec<Vec3>,
    /// Rational weights, one per control point; empty means all 1.
    #[serde(default)]
    pub weights: Vec<f32>,
}

/// Ribbon extruded along a sampled curve.
///
/// Give either an explicit `points` polyline, or `control_points` to be
/// sampled with a Catmull-Rom spline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackParams {
    #[serde(default)]
    pub points: Vec<Vec3>,
    #[serde(default)]
    pub control_points: Vec<Vec3>,
    /// Samples per control span when sampling `control_points`; zero uses
    /// the compiler settings' default.
    #[serde(default)]
    pub samples_per_span: u32,
    #[serde(default = "track_width")]
    pub width: f32,
    #[serde(default = "track_height")]
    pub height: f32,
    #[serde(default = "track_width")]
    pub depth: f32,
    #[serde(default = "yes")]
    pub closed: bool,
}

fn track_width() -> f32 {
    7.0
}

fn track_height() -> f32 {
    0.01
}
