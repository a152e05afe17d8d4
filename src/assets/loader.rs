//! Resource loading collaborators.
//!
//! The compiler never decodes anything itself. It asks a [`TextureLoader`]
//! for an image source (which may still be empty) and a [`ModelLoader`] for
//! model templates.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::errors::Result;
use crate::resources::texture::{ImageData, ImageSource};
use crate::scene::RenderNode;

#[cfg(not(target_arch = "wasm32"))]
use std::sync::OnceLock;
#[cfg(not(target_arch = "wasm32"))]
use tokio::runtime::Runtime;

/// Hands out image sources by path.
///
/// Must return immediately. Pixel data may be filled into the returned
/// source at any later time.
pub trait TextureLoader: Send + Sync {
    fn load_texture(&self, path: &Path) -> Arc<ImageSource>;
}

/// Imports an external 3D model as a subtree template.
pub trait ModelLoader: Send + Sync {
    fn load_model(&self, path: &Path) -> Result<RenderNode>;
}

/// Decodes an image file into RGBA8 pixels.
pub fn decode_image_file(path: &Path) -> Result<ImageData> {
    let img = image::open(path)?.to_rgba8();
    let (width, height) = img.dimensions();
    Ok(ImageData::new(width, height, img.into_raw()))
}

#[cfg(not(target_arch = "wasm32"))]
fn get_asset_runtime() -> Option<&'static Runtime> {
    static RUNTIME: OnceLock<Option<Runtime>> = OnceLock::new();
    RUNTIME
        .get_or_init(|| {
            Runtime::new()
                .map_err(|e| log::error!("Failed to create asset loader runtime: {e}"))
                .ok()
        })
        .as_ref()
}

fn decode_into(source: &ImageSource, path: &Path) {
    match decode_image_file(path) {
        Ok(data) => {
            log::debug!("Decoded '{}' ({}x{})", path.display(), data.width, data.height);
            source.fill(data);
        }
        Err(e) => log::error!("Failed to load texture '{}': {e}", path.display()),
    }
}

// ============================================================================
// Image file loader
// ============================================================================

/// Loads image files from disk in the background.
///
/// On native targets decoding runs on a shared tokio runtime; a failed load
/// is logged and leaves the source empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageFileLoader;

impl ImageFileLoader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TextureLoader for ImageFileLoader {
    fn load_texture(&self, path: &Path) -> Arc<ImageSource> {
        let source = Arc::new(ImageSource::pending(&path.to_string_lossy()));

        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(runtime) = get_asset_runtime() {
                let target = Arc::clone(&source);
                let path = path.to_path_buf();
                runtime.spawn_blocking(move || decode_into(&target, &path));
                return source;
            }
        }

        decode_into(&source, path);
        source
    }
}

// ============================================================================
// Placeholder loader
// ============================================================================

/// Loader that never touches the file system.
///
/// Sources are either filled at once with a solid color, or left pending so
/// the caller can fill them later. Every request is recorded.
#[derive(Debug)]
pub struct PlaceholderLoader {
    fill: Option<[u8; 4]>,
    requests: Mutex<Vec<(String, Arc<ImageSource>)>>,
}

impl Default for PlaceholderLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaceholderLoader {
    /// Sources are ready immediately as 1x1 white.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fill: Some([255, 255, 255, 255]),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sources stay pending until filled through [`source_for`](Self::source_for).
    #[must_use]
    pub fn deferred() -> Self {
        Self {
            fill: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requested paths in request order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().iter().map(|(p, _)| p.clone()).collect()
    }

    /// The source most recently handed out for `path`.
    #[must_use]
    pub fn source_for(&self, path: &str) -> Option<Arc<ImageSource>> {
        self.requests
            .lock()
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, s)| Arc::clone(s))
    }
}

impl TextureLoader for PlaceholderLoader {
    fn load_texture(&self, path: &Path) -> Arc<ImageSource> {
        let key = path.to_string_lossy().into_owned();
        let source = Arc::new(match self.fill {
            Some(color) => ImageSource::from_data(&key, ImageData::solid(color)),
            None => ImageSource::pending(&key),
        });
        self.requests.lock().push((key, Arc::clone(&source)));
        source
    }
}
