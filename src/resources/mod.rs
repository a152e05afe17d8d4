//! Core resource definitions
//!
//! Renderer-facing data produced by a compile pass, independent of any GPU
//! backend:
//! - Geometry: vertex attributes, indices, groups and bounds
//! - Texture: sampled view over shared, asynchronously filled pixels
//! - Material: lit / unlit shading parameters and maps
//! - material_builder: material records to materials
//! - Mesh: geometry + material + shadow flags
//! - primitives: the geometry builders

pub mod geometry;
pub mod material_builder;
pub mod material;
pub mod mesh;
pub mod primitives;
pub mod texture;

pub use geometry::{
    Attribute, BoundingBox, Geometry, GeometryGroup, GeometryHandle, VertexFormat,
};
pub use material::{
    Material, MaterialData, MaterialFeatures, MaterialHandle, MaterialSettings, MeshPhongMaterial,
    Side, UnlitMaterial,
};
pub use material_builder::{compile_material, fallback_material};
pub use mesh::Mesh;
pub use primitives::build_geometry;
pub use texture::{
    AddressMode, FilterMode, ImageData, ImageSource, Texture, TextureHandle, TextureSampler,
    TextureTransform,
};
