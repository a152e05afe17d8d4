use glam::Vec3;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::light::LightSpec;
use super::representation::Representation;
use super::{default_field, required_field, tag_of};

/// One element of the declarative scene tree.
///
/// Children and LOD levels reference other nodes by id; the referenced nodes
/// live in [`SceneDescription::nodes`](super::SceneDescription::nodes).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Filled from the map key when omitted in the document.
    #[serde(default)]
    pub id: String,

    #[serde(flatten)]
    pub kind: NodeKind,

    /// Ordered transformation operations (folded as T·R·S, see
    /// [`crate::scene::transform`]).
    #[serde(default)]
    pub transformations: Vec<TransformOp>,

    /// Material override; `None` inherits the nearest ancestor's material.
    #[serde(default)]
    pub material_ref: Option<String>,

    /// Texture override; `None` inherits the nearest ancestor's texture.
    #[serde(default)]
    pub texture_ref: Option<String>,

    #[serde(default)]
    pub cast_shadow: Option<bool>,
    #[serde(default)]
    pub receive_shadow: Option<bool>,
}

impl Node {
    /// Creates a group node with the given children ids.
    #[must_use]
    pub fn group(id: &str, children: &[&str]) -> Self {
        Self::with_kind(
            id,
            NodeKind::Group {
                children: children.iter().map(|c| (*c).to_string()).collect(),
            },
        )
    }

    /// Creates a primitive leaf.
    #[must_use]
    pub fn primitive(id: &str, representation: Representation) -> Self {
        Self::with_kind(id, NodeKind::Primitive(representation))
    }

    #[must_use]
    pub fn with_kind(id: &str, kind: NodeKind) -> Self {
        Self {
            id: id.to_string(),
            kind,
            transformations: Vec::new(),
            material_ref: None,
            texture_ref: None,
            cast_shadow: None,
            receive_shadow: None,
        }
    }

    #[must_use]
    pub fn with_transformations(mut self, ops: Vec<TransformOp>) -> Self {
        self.transformations = ops;
        self
    }

    #[must_use]
    pub fn with_material(mut self, material_id: &str) -> Self {
        self.material_ref = Some(material_id.to_string());
        self
    }

    #[must_use]
    pub fn with_texture(mut self, texture_id: &str) -> Self {
        self.texture_ref = Some(texture_id.to_string());
        self
    }

    #[must_use]
    pub fn with_cast_shadow(mut self, cast: bool) -> Self {
        self.cast_shadow = Some(cast);
        self
    }

    #[must_use]
    pub fn with_receive_shadow(mut self, receive: bool) -> Self {
        self.receive_shadow = Some(receive);
        self
    }

    /// Ids of the nodes this node recurses into (group children or LOD
    /// levels).
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        let (children, levels): (&[String], &[LodLevelRecord]) = match &self.kind {
            NodeKind::Group { children } => (children.as_slice(), &[]),
            NodeKind::Lod { levels } => (&[], levels.as_slice()),
            _ => (&[], &[]),
        };
        children
            .iter()
            .map(String::as_str)
            .chain(levels.iter().map(|l| l.node.as_str()))
    }
}

/// One distance-gated alternative of a LOD node.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LodLevelRecord {
    pub node: String,
    #[serde(default)]
    pub min_distance: f32,
}

/// Node kind together with its kind-specific payload.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Group { children: Vec<String> },
    Primitive(Representation),
    Light(LightSpec),
    /// Levels ordered ascending by `min_distance`.
    Lod { levels: Vec<LodLevelRecord> },
    /// A kind string the compiler does not know; reported and skipped.
    Unsupported(String),
}

impl NodeKind {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Group { .. } => "group",
            Self::Primitive(_) => "primitive",
            Self::Light(_) => "light",
            Self::Lod { .. } => "lod",
            Self::Unsupported(kind) => kind,
        }
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = tag_of::<D::Error>(&value, "kind")?;

        match kind.as_str() {
            "group" => Ok(Self::Group {
                children: default_field(&value, "children")?,
            }),
            "primitive" => Ok(Self::Primitive(required_field(&value, "representation")?)),
            "light" => Ok(Self::Light(required_field(&value, "light")?)),
            "lod" => Ok(Self::Lod {
                levels: default_field(&value, "levels")?,
            }),
            _ => Ok(Self::Unsupported(kind)),
        }
    }
}

/// A single transformation operation.
///
/// Rotation angles are in degrees, one angle per axis.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOp {
    Translate(Vec3),
    Rotate(Vec3),
    Scale(Vec3),
    /// Unknown operation type; reported and skipped.
    Unsupported(String),
}

impl TransformOp {
    #[must_use]
    pub fn translate(x: f32, y: f32, z: f32) -> Self {
        Self::Translate(Vec3::new(x, y, z))
    }

    #[must_use]
    pub fn rotate(x_deg: f32, y_deg: f32, z_deg: f32) -> Self {
        Self::Rotate(Vec3::new(x_deg, y_deg, z_deg))
    }

    #[must_use]
    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        Self::Scale(Vec3::new(x, y, z))
    }
}

impl<'de> Deserialize<'de> for TransformOp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let ty = tag_of::<D::Error>(&value, "type")?;

        match ty.as_str() {
            "T" | "translate" => Ok(Self::Translate(required_field(&value, "translate")?)),
            "R" | "rotate" => Ok(Self::Rotate(required_field(&value, "rotation")?)),
            "S" | "scale" => Ok(Self::Scale(required_field(&value, "scale")?)),
            other if other.is_empty() => Err(de::Error::invalid_value(
                de::Unexpected::Str(other),
                &"a transformation type",
            )),
            other => Ok(Self::Unsupported(other.to_string())),
        }
    }
}
