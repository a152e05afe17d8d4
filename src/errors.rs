//! Error Types
//!
//! This module defines the error types used throughout the scene compiler.
//!
//! # Overview
//!
//! The main error type [`SceneError`] covers every failure mode of a compile
//! pass:
//! - Unsupported constructs (unknown node kinds, primitive subtypes, transform
//!   types, light types)
//! - Dangling references (material, texture or child ids that do not resolve)
//! - Malformed geometry input (degenerate boxes, bad NURBS grids)
//! - Resource loading failures reported by the loaders
//!
//! Almost none of these abort a compile. The walker logs them and collects
//! them into a [`CompileReport`](crate::scene::CompileReport) so a partially
//! broken description still produces a usable scene.
//!
//! # Usage
//!
//! ```rust,ignore
//! use scene_compiler::errors::{SceneError, Result};
//!
//! fn build() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the scene compiler.
#[derive(Error, Debug)]
pub enum SceneError {
    // ========================================================================
    // Unsupported Constructs
    // ========================================================================
    /// A node declared a kind the compiler does not know.
    #[error("Unsupported node kind '{kind}' on node '{node}'")]
    UnsupportedNodeKind {
        /// Id of the offending node
        node: String,
        /// The kind as written in the description
        kind: String,
    },

    /// A primitive declared a subtype with no geometry builder.
    #[error("Unsupported primitive subtype '{0}'")]
    UnsupportedPrimitive(String),

    /// A transformation operation of an unknown type.
    #[error("Unsupported transformation type '{0}'")]
    UnsupportedTransform(String),

    /// A light of an unknown type.
    #[error("Unsupported light type '{0}'")]
    UnsupportedLight(String),

    /// A camera record of an unknown type.
    #[error("Unsupported camera type '{kind}' on camera '{camera}'")]
    UnsupportedCamera {
        /// Id of the camera record
        camera: String,
        /// The type as written in the description
        kind: String,
    },

    // ========================================================================
    // Dangling References
    // ========================================================================
    /// A node references a material id that is not registered.
    #[error("Material '{0}' not found")]
    MissingMaterial(String),

    /// A material or node references a texture id that is not registered.
    #[error("Texture '{0}' not found")]
    MissingTexture(String),

    /// A child or LOD level references a node id that does not exist.
    #[error("Node '{0}' not found")]
    MissingNode(String),

    /// The description's root id does not name a node.
    #[error("Root node '{0}' not found")]
    MissingRoot(String),

    /// A node reappears on its own ancestor path.
    #[error("Cycle detected at node '{0}'")]
    CycleDetected(String),

    /// A node sits deeper than `CompilerSettings::max_depth`.
    #[error("Node '{node}' exceeds the maximum depth of {max_depth}")]
    DepthExceeded { node: String, max_depth: usize },

    // ========================================================================
    // Malformed Geometry
    // ========================================================================
    /// Builder input collapses to nothing (zero-area rectangle, coincident
    /// triangle vertices, fewer than two track samples, ...).
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// The NURBS control grid does not match its declared degrees.
    #[error("Invalid NURBS surface: {0}")]
    InvalidNurbs(String),

    // ========================================================================
    // Resource Errors
    // ========================================================================
    /// A texture or model could not be loaded.
    #[error("Failed to load resource '{path}': {reason}")]
    ResourceLoad {
        /// Path of the resource, relative to the asset directory
        path: String,
        /// Loader supplied reason
        reason: String,
    },

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Image decoding error.
    #[error("Image decode error: {0}")]
    ImageDecodeError(String),

    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<image::ImageError> for SceneError {
    fn from(err: image::ImageError) -> Self {
        SceneError::ImageDecodeError(err.to_string())
    }
}

/// Alias for `Result<T, SceneError>`.
pub type Result<T> = std::result::Result<T, SceneError>;
