use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::description::CameraRecord;
use crate::errors::SceneError;
use crate::scene::node::RenderNode;

/// Linear fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Vec3,
    pub near: f32,
    pub far: f32,
}

/// Everything a compile pass skipped or could not resolve.
#[derive(Debug, Default)]
pub struct CompileReport {
    pub diagnostics: Vec<SceneError>,
    /// Description nodes turned into render nodes (LOD copies included).
    pub nodes_compiled: usize,
}

impl CompileReport {
    pub fn push(&mut self, error: SceneError) {
        log::warn!("{error}");
        self.diagnostics.push(error);
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics matching a predicate, e.g.
    /// `report.count(|e| matches!(e, SceneError::MissingTexture(_)))`.
    pub fn count(&self, predicate: impl Fn(&SceneError) -> bool) -> usize {
        self.diagnostics.iter().filter(|e| predicate(e)).count()
    }
}

/// Output of a compile pass, handed to the renderer.
#[derive(Debug)]
pub struct CompiledScene {
    pub root: RenderNode,
    pub background: Vec3,
    pub ambient: Vec3,
    pub fog: Option<Fog>,
    /// Camera records for the camera collaborator.
    pub cameras: FxHashMap<String, CameraRecord>,
    pub active_camera: Option<String>,
    pub report: CompileReport,
}

impl CompiledScene {
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&RenderNode> {
        self.root.find(name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut RenderNode> {
        self.root.find_mut(name)
    }

    #[must_use]
    pub fn active_camera(&self) -> Option<&CameraRecord> {
        self.active_camera.as_ref().and_then(|id| self.cameras.get(id))
    }
}
