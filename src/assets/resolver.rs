use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec2;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::assets::gates::ImportGates;
use crate::assets::loader::TextureLoader;
use crate::description::{SceneDescription, TextureRecord};
use crate::resources::texture::{MAX_MIPMAP_OVERRIDES, Texture, TextureHandle};

/// Maps texture ids to shared texture handles.
///
/// A handle is created once per id, on first request, through the loader.
/// Concurrent first requests for the same id wait on that id's gate, so only
/// one handle (and one load) ever exists for it. Loads run outside the cache
/// lock; requests for other ids are not held up.
pub struct ResourceResolver {
    records: FxHashMap<String, TextureRecord>,
    loader: Arc<dyn TextureLoader>,
    asset_dir: PathBuf,
    cache: RwLock<FxHashMap<String, TextureHandle>>,
    gates: ImportGates,
}

impl std::fmt::Debug for ResourceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceResolver")
            .field("records", &self.records.len())
            .field("asset_dir", &self.asset_dir)
            .field("cached", &self.cache.read().len())
            .finish_non_exhaustive()
    }
}

impl ResourceResolver {
    pub fn new(
        records: FxHashMap<String, TextureRecord>,
        loader: Arc<dyn TextureLoader>,
        asset_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            records,
            loader,
            asset_dir: asset_dir.into(),
            cache: RwLock::new(FxHashMap::default()),
            gates: ImportGates::default(),
        }
    }

    /// Resolver over the texture records of a description.
    pub fn for_description(
        description: &SceneDescription,
        loader: Arc<dyn TextureLoader>,
        asset_dir: impl Into<PathBuf>,
    ) -> Self {
        Self::new(description.textures.clone(), loader, asset_dir)
    }

    /// Registers a ready-made handle under `id`, replacing any cached one.
    pub fn insert(&self, id: &str, texture: TextureHandle) {
        self.cache.write().insert(id.to_string(), texture);
    }

    /// Shared handle for `id`, or `None` for an unknown id.
    pub fn resolve(&self, id: &str) -> Option<TextureHandle> {
        if let Some(handle) = self.cache.read().get(id) {
            return Some(Arc::clone(handle));
        }

        let Some(record) = self.records.get(id) else {
            log::warn!("Texture '{id}' not found");
            return None;
        };

        let gate = self.gates.gate(id);
        let _import = gate.lock();
        // Another caller may have registered it while we waited
        if let Some(handle) = self.cache.read().get(id) {
            return Some(Arc::clone(handle));
        }

        let handle = Arc::new(self.create_texture(id, record));
        let mut cache = self.cache.write();
        Some(Arc::clone(cache.entry(id.to_string()).or_insert(handle)))
    }

    /// Private copy of `id` with its own repeat factors.
    ///
    /// Pixels and mip overrides stay shared with the registered handle.
    pub fn resolve_with_repeat(&self, id: &str, repeat: Vec2) -> Option<TextureHandle> {
        let base = self.resolve(id)?;
        let mut copy = base.shallow_clone();
        copy.transform.repeat = repeat;
        Some(Arc::new(copy))
    }

    /// Number of ids that currently have a handle.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.read().len()
    }

    fn create_texture(&self, id: &str, record: &TextureRecord) -> Texture {
        let source = self.loader.load_texture(&self.asset_dir.join(&record.filepath));
        let mut texture = Texture::new(id, source);
        texture.set_wrap(record.wrap_s, record.wrap_t);
        texture.is_video = record.is_video;

        if record.mipmaps.len() > MAX_MIPMAP_OVERRIDES {
            log::warn!(
                "Texture '{id}' declares {} mipmap levels, only the first {MAX_MIPMAP_OVERRIDES} are used",
                record.mipmaps.len()
            );
        }
        for path in record.mipmaps.iter().take(MAX_MIPMAP_OVERRIDES) {
            texture.push_mipmap(self.loader.load_texture(&self.asset_dir.join(path)));
        }

        log::debug!("Registered texture '{id}' from '{}'", record.filepath);
        texture
    }
}
