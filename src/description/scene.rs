use glam::Vec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::material::{MaterialRecord, TextureRecord};
use super::node::Node;
use crate::errors::Result;

/// Root of a parsed scene description.
///
/// Immutable input of a compile pass. Nodes, materials, textures and cameras
/// are keyed by id; a record whose own `id` is empty takes its map key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescription {
    pub root_id: String,
    #[serde(default)]
    pub nodes: FxHashMap<String, Node>,
    #[serde(default)]
    pub materials: FxHashMap<String, MaterialRecord>,
    #[serde(default)]
    pub textures: FxHashMap<String, TextureRecord>,
    #[serde(default)]
    pub cameras: FxHashMap<String, CameraRecord>,
    #[serde(default)]
    pub active_camera_id: Option<String>,
    #[serde(default)]
    pub options: SceneOptions,
    #[serde(default)]
    pub fog: Option<FogRecord>,
}

impl SceneDescription {
    /// Creates an empty description rooted at `root_id`.
    #[must_use]
    pub fn new(root_id: &str) -> Self {
        Self {
            root_id: root_id.to_string(),
            ..Self::default()
        }
    }

    /// Parses a JSON document and fills missing record ids from their keys.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut description: Self = serde_json::from_str(json)?;
        description.fill_ids();
        Ok(description)
    }

    /// Inserts a node under its own id, replacing any previous one.
    pub fn add_node(&mut self, node: Node) -> &mut Self {
        self.nodes.insert(node.id.clone(), node);
        self
    }

    pub fn add_material(&mut self, id: &str, mut record: MaterialRecord) -> &mut Self {
        record.id = id.to_string();
        self.materials.insert(id.to_string(), record);
        self
    }

    pub fn add_texture(&mut self, record: TextureRecord) -> &mut Self {
        self.textures.insert(record.id.clone(), record);
        self
    }

    fn fill_ids(&mut self) {
        for (key, node) in &mut self.nodes {
            if node.id.is_empty() {
                node.id.clone_from(key);
            }
        }
        for (key, material) in &mut self.materials {
            if material.id.is_empty() {
                material.id.clone_from(key);
            }
        }
        for (key, texture) in &mut self.textures {
            if texture.id.is_empty() {
                texture.id.clone_from(key);
            }
        }
        for (key, camera) in &mut self.cameras {
            if camera.id.is_empty() {
                camera.id.clone_from(key);
            }
        }
    }
}

/// Camera record passed through untouched to the camera collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraRecord {
    #[serde(default)]
    pub id: String,
    /// `perspective` or `orthogonal`.
    #[serde(rename = "type")]
    pub camera_type: String,
    #[serde(default)]
    pub location: Vec3,
    #[serde(default)]
    pub target: Vec3,
    #[serde(default)]
    pub near: f32,
    #[serde(default)]
    pub far: f32,
    /// Vertical field of view in degrees (perspective only).
    #[serde(default)]
    pub angle: Option<f32>,
    #[serde(default)]
    pub left: Option<f32>,
    #[serde(default)]
    pub right: Option<f32>,
    #[serde(default)]
    pub top: Option<f32>,
    #[serde(default)]
    pub bottom: Option<f32>,
}

/// Global scene options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneOptions {
    pub background: Vec3,
    pub ambient: Vec3,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            background: Vec3::ZERO,
            ambient: Vec3::splat(0.2),
        }
    }
}

/// Linear fog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FogRecord {
    pub color: Vec3,
    pub near: f32,
    pub far: f32,
}
