use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use glam::{Mat3, Vec2};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::description::WrapMode;

/// Maximum number of mip override levels a texture carries (levels 0..7).
pub const MAX_MIPMAP_OVERRIDES: usize = 8;

// ============================================================================
// 1. Image source (shared pixel data, filled asynchronously)
// ============================================================================

/// Decoded RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageData {
    #[must_use]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A single opaque pixel.
    #[must_use]
    pub fn solid(color: [u8; 4]) -> Self {
        Self::new(1, 1, color.to_vec())
    }
}

/// Pixel storage shared by every texture cloned from the same load.
///
/// The loader hands out the source immediately in its pending state and
/// fills it later. Readers must tolerate an empty source and render blank.
#[derive(Debug)]
pub struct ImageSource {
    pub uuid: Uuid,
    /// Path the pixels come from, relative to the asset directory.
    pub path: String,
    data: RwLock<Option<ImageData>>,
    ready: AtomicBool,
    version: AtomicU64,
}

impl ImageSource {
    /// A source whose pixels have not arrived yet.
    #[must_use]
    pub fn pending(path: &str) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            path: path.to_string(),
            data: RwLock::new(None),
            ready: AtomicBool::new(false),
            version: AtomicU64::new(0),
        }
    }

    /// A source that is ready from the start.
    #[must_use]
    pub fn from_data(path: &str, data: ImageData) -> Self {
        let source = Self::pending(path);
        source.fill(data);
        source
    }

    /// Stores decoded pixels and marks the source ready.
    pub fn fill(&self, data: ImageData) {
        *self.data.write() = Some(data);
        self.version.fetch_add(1, Ordering::Relaxed);
        self.ready.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Relaxed)
    }

    /// `(width, height)` once the pixels are in.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.data.read().as_ref().map(|d| (d.width, d.height))
    }

    /// Runs `f` over the pixels if they have arrived.
    pub fn with_data<R>(&self, f: impl FnOnce(&ImageData) -> R) -> Option<R> {
        self.data.read().as_ref().map(f)
    }
}

// ============================================================================
// 2. Sampler & UV transform
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressMode {
    #[default]
    Repeat,
    ClampToEdge,
    MirrorRepeat,
}

impl From<WrapMode> for AddressMode {
    fn from(mode: WrapMode) -> Self {
        match mode {
            WrapMode::Repeat => Self::Repeat,
            WrapMode::Clamp => Self::ClampToEdge,
            WrapMode::Mirror => Self::MirrorRepeat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    Nearest,
    #[default]
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureSampler {
    pub address_mode_u: AddressMode,
    pub address_mode_v: AddressMode,
    pub mag_filter: FilterMode,
    pub min_filter: FilterMode,
    pub mipmap_filter: FilterMode,
}

impl Default for TextureSampler {
    fn default() -> Self {
        Self {
            address_mode_u: AddressMode::Repeat,
            address_mode_v: AddressMode::Repeat,
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            mipmap_filter: FilterMode::Linear,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureTransform {
    pub offset: Vec2,
    pub repeat: Vec2,
    /// Radians, around `center`.
    pub rotation: f32,
    pub center: Vec2,
}

impl Default for TextureTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            repeat: Vec2::ONE,
            rotation: 0.0,
            center: Vec2::new(0.5, 0.5),
        }
    }
}

impl TextureTransform {
    /// 3x3 UV transform matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat3 {
        let c = self.rotation.cos();
        let s = self.rotation.sin();
        let Vec2 { x: ox, y: oy } = self.offset;
        let Vec2 { x: rx, y: ry } = self.repeat;
        let Vec2 { x: cx, y: cy } = self.center;

        Mat3::from_cols_array(&[
            c * rx,
            s * rx,
            0.0,
            -s * ry,
            c * ry,
            0.0,
            (c * -cx + s * -cy + cx) * rx + ox,
            (-s * -cx + c * -cy + cy) * ry + oy,
            1.0,
        ])
    }
}

// ============================================================================
// 3. Texture
// ============================================================================

pub type TextureHandle = Arc<Texture>;

/// A sampled view onto an [`ImageSource`].
///
/// The pixel source (and mip overrides) are shared; sampler and UV transform
/// belong to this texture alone.
#[derive(Debug)]
pub struct Texture {
    pub uuid: Uuid,
    pub name: String,

    pub source: Arc<ImageSource>,
    /// Override images for mip levels 0..7, in level order.
    pub mipmaps: Vec<Arc<ImageSource>>,

    pub sampler: TextureSampler,
    pub transform: TextureTransform,

    pub is_video: bool,

    version: AtomicU64,
}

impl Texture {
    #[must_use]
    pub fn new(name: &str, source: Arc<ImageSource>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            source,
            mipmaps: Vec::new(),
            sampler: TextureSampler::default(),
            transform: TextureTransform::default(),
            is_video: false,
            version: AtomicU64::new(0),
        }
    }

    /// 1x1 texture that is ready immediately.
    #[must_use]
    pub fn create_solid_color(name: &str, color: [u8; 4]) -> Self {
        Self::new(
            name,
            Arc::new(ImageSource::from_data(name, ImageData::solid(color))),
        )
    }

    /// Copy that shares the pixel source but owns its sampler and transform.
    ///
    /// Mip overrides are re-attached to the copy in the same level order.
    #[must_use]
    pub fn shallow_clone(&self) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: self.name.clone(),
            source: Arc::clone(&self.source),
            mipmaps: self.mipmaps.iter().map(Arc::clone).collect(),
            sampler: self.sampler,
            transform: self.transform,
            is_video: self.is_video,
            version: AtomicU64::new(0),
        }
    }

    /// Appends a mip override; levels past the eighth are dropped.
    pub fn push_mipmap(&mut self, level: Arc<ImageSource>) -> bool {
        if self.mipmaps.len() >= MAX_MIPMAP_OVERRIDES {
            return false;
        }
        self.mipmaps.push(level);
        self.needs_update();
        true
    }

    pub fn set_wrap(&mut self, wrap_s: WrapMode, wrap_t: WrapMode) {
        self.sampler.address_mode_u = wrap_s.into();
        self.sampler.address_mode_v = wrap_t.into();
        self.needs_update();
    }

    #[must_use]
    pub fn shares_source_with(&self, other: &Texture) -> bool {
        Arc::ptr_eq(&self.source, &other.source)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.source.is_ready()
    }

    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Relaxed)
    }

    pub fn needs_update(&self) {
        self.version.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_source_becomes_ready_once_filled() {
        let source = ImageSource::pending("a.png");
        assert!(!source.is_ready());
        assert_eq!(source.dimensions(), None);

        source.fill(ImageData::new(2, 1, vec![0; 8]));
        assert!(source.is_ready());
        assert_eq!(source.dimensions(), Some((2, 1)));
        assert_eq!(source.version(), 1);
    }

    #[test]
    fn mipmap_overrides_are_capped() {
        let mut texture = Texture::create_solid_color("t", [255; 4]);
        for i in 0..MAX_MIPMAP_OVERRIDES {
            assert!(texture.push_mipmap(Arc::new(ImageSource::pending(&format!("m{i}")))));
        }
        assert!(!texture.push_mipmap(Arc::new(ImageSource::pending("extra"))));
        assert_eq!(texture.mipmaps.len(), MAX_MIPMAP_OVERRIDES);
    }

    #[test]
    fn identity_transform_matrix() {
        let m = TextureTransform::default().matrix();
        assert!(m.abs_diff_eq(Mat3::IDENTITY, 1e-6));
    }
}
