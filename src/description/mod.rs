//! Declarative scene description
//!
//! Read-only input of a compile pass, as handed over by the external document
//! parser:
//! - `SceneDescription`: root container (nodes, materials, textures, cameras,
//!   global options and fog)
//! - `Node` / `NodeKind`: one element of the node tree
//! - `TransformOp`: ordered translate / rotate / scale operations
//! - `Representation`: closed set of primitive shapes
//! - `MaterialRecord` / `TextureRecord`: declarative resource records
//! - `LightSpec`: light parameters for light nodes
//!
//! All types deserialize with `serde`. String tags that select a variant
//! (node kind, primitive subtype, transform type, light type) are decoded into
//! closed enums here; unknown tags become an `Unsupported` variant so the
//! compiler can report and skip them instead of failing the whole document.

pub mod light;
pub mod material;
pub mod node;
pub mod representation;
pub mod scene;

pub use light::{LightCommon, LightKindSpec, LightSpec};
pub use material::{MaterialRecord, ShadingMode, TextureRecord, WrapMode};
pub use node::{LodLevelRecord, Node, NodeKind, TransformOp};
pub use representation::{
    BoxParams, CylinderParams, NurbsParams, PolygonParams, RectangleParams, Representation,
    SkyboxParams, SphereParams, TrackParams, TriangleParams,
};
pub use scene::{CameraRecord, FogRecord, SceneDescription, SceneOptions};

use serde::de::{self, DeserializeOwned};
use serde_json::Value;

/// Reads a required field out of a JSON object during tagged decoding.
pub(crate) fn required_field<T, E>(value: &Value, name: &'static str) -> Result<T, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    match value.get(name) {
        Some(v) => T::deserialize(v).map_err(E::custom),
        None => Err(E::missing_field(name)),
    }
}

/// Reads an optional field, falling back to `T::default()` when absent.
pub(crate) fn default_field<T, E>(value: &Value, name: &'static str) -> Result<T, E>
where
    T: DeserializeOwned + Default,
    E: de::Error,
{
    match value.get(name) {
        Some(Value::Null) | None => Ok(T::default()),
        Some(v) => T::deserialize(v).map_err(E::custom),
    }
}

/// Extracts the string tag that selects a variant.
pub(crate) fn tag_of<E: de::Error>(value: &Value, tag: &'static str) -> Result<String, E> {
    value
        .get(tag)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| E::missing_field(tag))
}
