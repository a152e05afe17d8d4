use std::path::Path;
use std::sync::Arc;

use glam::Affine3A;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use crate::assets::gates::ImportGates;
use crate::assets::loader::ModelLoader;
use crate::errors::{Result, SceneError};
use crate::scene::RenderNode;

new_key_type! {
    pub struct ModelKey;
}

/// A reusable subtree, instantiated by copy for every node that uses it.
#[derive(Debug, Clone)]
pub struct ModelTemplate {
    pub path: String,
    pub root: RenderNode,
}

#[derive(Default)]
struct LibraryInner {
    templates: SlotMap<ModelKey, Arc<ModelTemplate>>,
    by_path: FxHashMap<String, ModelKey>,
}

/// Model templates owned by one scene.
///
/// Templates are keyed by the path the description uses. Missing templates
/// are imported through the [`ModelLoader`] on first use, once per path even
/// when several callers ask at the same time.
#[derive(Default)]
pub struct AssetLibrary {
    inner: RwLock<LibraryInner>,
    loader: Option<Arc<dyn ModelLoader>>,
    gates: ImportGates,
}

impl std::fmt::Debug for AssetLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetLibrary")
            .field("templates", &self.len())
            .field("has_loader", &self.loader.is_some())
            .finish()
    }
}

impl AssetLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_loader(loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            inner: RwLock::default(),
            loader: Some(loader),
            gates: ImportGates::default(),
        }
    }

    /// Adds (or replaces) the template for `path`.
    pub fn insert(&self, path: &str, root: RenderNode) -> ModelKey {
        let template = Arc::new(ModelTemplate {
            path: path.to_string(),
            root,
        });
        let mut inner = self.inner.write();
        if let Some(&key) = inner.by_path.get(path) {
            inner.templates[key] = template;
            return key;
        }
        let key = inner.templates.insert(template);
        inner.by_path.insert(path.to_string(), key);
        key
    }

    #[must_use]
    pub fn get(&self, key: ModelKey) -> Option<Arc<ModelTemplate>> {
        self.inner.read().templates.get(key).cloned()
    }

    #[must_use]
    pub fn get_by_path(&self, path: &str) -> Option<Arc<ModelTemplate>> {
        let inner = self.inner.read();
        let key = inner.by_path.get(path)?;
        inner.templates.get(*key).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Template for `path`, importing it from `asset_dir` if needed.
    pub fn template(&self, path: &str, asset_dir: &Path) -> Result<Arc<ModelTemplate>> {
        if let Some(template) = self.get_by_path(path) {
            return Ok(template);
        }

        let Some(loader) = &self.loader else {
            return Err(SceneError::ResourceLoad {
                path: path.to_string(),
                reason: "no model loader configured".into(),
            });
        };

        let gate = self.gates.gate(path);
        let _import = gate.lock();
        if let Some(template) = self.get_by_path(path) {
            return Ok(template);
        }

        log::debug!("Importing model '{path}'");
        let root = loader.load_model(&asset_dir.join(path))?;
        let key = self.insert(path, root);
        self.get(key).ok_or_else(|| SceneError::ResourceLoad {
            path: path.to_string(),
            reason: "template vanished after import".into(),
        })
    }

    /// Independent copy of the template for `path`, placed under
    /// `parent_world`.
    pub fn instantiate(
        &self,
        path: &str,
        asset_dir: &Path,
        parent_world: &Arc<Affine3A>,
    ) -> Result<RenderNode> {
        let template = self.template(path, asset_dir)?;
        let mut node = template.root.clone();
        node.rebase(parent_world);
        Ok(node)
    }
}
