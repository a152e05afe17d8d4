//! Compiled scene graph
//!
//! - `compiler`: walks a description and builds the render tree
//! - `node`: `RenderNode`, the compiled tree itself
//! - `transform`: local / world matrix resolution
//! - `light`: compiled lights
//! - `lod`: distance-gated level selection
//! - `scene`: `CompiledScene` and the per-pass `CompileReport`

pub mod compiler;
pub mod light;
pub mod lod;
pub mod node;
pub mod scene;
pub mod transform;

pub use compiler::SceneCompiler;
pub use light::{DirectionalLight, Light, LightKind, PointLight, ShadowConfig, SpotLight};
pub use lod::{Lod, LodLevel};
pub use node::RenderNode;
pub use scene::{CompileReport, CompiledScene, Fog};
