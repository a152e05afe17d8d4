#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! Compiles declarative scene descriptions into renderer-ready scene graphs.
//!
//! ```no_run
//! use scene_compiler::{SceneCompiler, SceneDescription};
//!
//! let json = std::fs::read_to_string("scene.json")?;
//! let description = SceneDescription::from_json_str(&json)?;
//! let scene = SceneCompiler::default().compile(&description)?;
//! println!("{} nodes", scene.root.subtree_len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assets;
pub mod description;
pub mod errors;
pub mod resources;
pub mod scene;
pub mod settings;

pub use assets::{AssetLibrary, ImageFileLoader, PlaceholderLoader, ResourceResolver, TextureLoader};
pub use description::{Node, NodeKind, Representation, SceneDescription, TransformOp};
pub use errors::{Result, SceneError};
pub use resources::{Geometry, Material, Mesh, Texture};
pub use scene::{CompileReport, CompiledScene, Light, Lod, RenderNode, SceneCompiler};
pub use settings::CompilerSettings;
