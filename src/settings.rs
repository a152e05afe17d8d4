//! Compiler Settings
//!
//! Knobs that shape a compile pass without being part of the scene
//! description itself.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use scene_compiler::CompilerSettings;
//!
//! let settings = CompilerSettings::default()
//!     .with_asset_dir("scenes/demo")
//!     .with_max_depth(64);
//! ```

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Configuration for [`SceneCompiler`](crate::scene::SceneCompiler).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerSettings {
    /// Root that texture and model paths are resolved against.
    pub asset_dir: PathBuf,

    /// Color of the wireframe material used when a primitive resolves no
    /// material at all. Magenta so it stands out.
    pub default_material_color: Vec3,

    /// Deepest node nesting the walker follows before reporting the branch
    /// as cyclic.
    pub max_depth: usize,

    /// Radial segments for cylinders that declare zero slices.
    pub cylinder_segments: u32,

    /// `(width, height)` segments for spheres that declare zero slices or
    /// stacks.
    pub sphere_segments: (u32, u32),

    /// Catmull-Rom samples per control span for tracks that do not set their
    /// own.
    pub track_samples_per_span: u32,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("."),
            default_material_color: Vec3::new(1.0, 0.0, 1.0),
            max_depth: 256,
            cylinder_segments: 32,
            sphere_segments: (32, 16),
            track_samples_per_span: 16,
        }
    }
}

impl CompilerSettings {
    #[must_use]
    pub fn with_asset_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.asset_dir = dir.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub fn with_default_material_color(mut self, color: Vec3) -> Self {
        self.default_material_color = color;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn with_track_samples_per_span(mut self, samples: u32) -> Self {
        self.track_samples_per_span = samples;
        self
    }
}
