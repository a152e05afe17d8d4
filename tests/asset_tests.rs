//! Asset Tests
//!
//! Tests for:
//! - ResourceResolver: one shared handle per id, created exactly once
//! - Concurrent resolution from several threads
//! - Slow loads do not hold up other ids
//! - Deferred texture loading observed through shared handles
//! - Mip override and wrap records
//! - AssetLibrary: template import, reuse and independent instances

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use glam::{Affine3A, Vec3};
use rustc_hash::FxHashMap;

use scene_compiler::SceneError;
use scene_compiler::assets::{
    AssetLibrary, ModelLoader, PlaceholderLoader, ResourceResolver, TextureLoader,
};
use scene_compiler::description::{TextureRecord, WrapMode};
use scene_compiler::resources::{AddressMode, ImageData, ImageSource};
use scene_compiler::scene::RenderNode;

fn records(list: Vec<TextureRecord>) -> FxHashMap<String, TextureRecord> {
    list.into_iter().map(|r| (r.id.clone(), r)).collect()
}

// ============================================================================
// ResourceResolver
// ============================================================================

#[test]
fn resolver_creates_each_texture_once() {
    let loader = Arc::new(PlaceholderLoader::new());
    let resolver = ResourceResolver::new(
        records(vec![TextureRecord::new("wood", "wood.png")]),
        loader.clone(),
        "assets",
    );

    let a = resolver.resolve("wood").unwrap();
    let b = resolver.resolve("wood").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(loader.requests(), vec!["assets/wood.png".to_string()]);
    assert_eq!(resolver.cached_len(), 1);
}

#[test]
fn resolver_unknown_id_is_none() {
    let resolver = ResourceResolver::new(
        FxHashMap::default(),
        Arc::new(PlaceholderLoader::new()),
        "assets",
    );
    assert!(resolver.resolve("ghost").is_none());
    assert_eq!(resolver.cached_len(), 0);
}

#[test]
fn concurrent_resolution_yields_one_handle() {
    let loader = Arc::new(PlaceholderLoader::new());
    let resolver = ResourceResolver::new(
        records(vec![TextureRecord::new("wood", "wood.png")]),
        loader.clone(),
        "assets",
    );

    let handles: Vec<_> = std::thread::scope(|s| {
        let workers: Vec<_> = (0..8)
            .map(|_| s.spawn(|| resolver.resolve("wood").unwrap()))
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    assert!(handles.iter().all(|h| Arc::ptr_eq(h, &handles[0])));
    assert_eq!(loader.requests().len(), 1);
}

/// Blocks loads of `slow.png` until released; everything else is instant.
struct GatedLoader {
    started: Mutex<Sender<()>>,
    release: Mutex<Receiver<()>>,
    fallback: PlaceholderLoader,
}

impl TextureLoader for GatedLoader {
    fn load_texture(&self, path: &Path) -> Arc<ImageSource> {
        if path.ends_with("slow.png") {
            self.started.lock().unwrap().send(()).unwrap();
            self.release.lock().unwrap().recv().unwrap();
        }
        self.fallback.load_texture(path)
    }
}

#[test]
fn slow_load_does_not_block_other_ids() {
    let (started_tx, started_rx) = channel();
    let (release_tx, release_rx) = channel();
    let loader = Arc::new(GatedLoader {
        started: Mutex::new(started_tx),
        release: Mutex::new(release_rx),
        fallback: PlaceholderLoader::new(),
    });
    let resolver = ResourceResolver::new(
        records(vec![
            TextureRecord::new("slow", "slow.png"),
            TextureRecord::new("fast", "fast.png"),
            TextureRecord::new("cached", "cached.png"),
        ]),
        loader,
        "assets",
    );
    let cached = resolver.resolve("cached").unwrap();

    std::thread::scope(|s| {
        let slow = s.spawn(|| resolver.resolve("slow"));
        started_rx.recv_timeout(Duration::from_secs(5)).unwrap();

        // The slow load is still in progress here
        let fast = resolver.resolve("fast");
        let again = resolver.resolve("cached");
        release_tx.send(()).unwrap();

        assert!(fast.is_some());
        assert!(Arc::ptr_eq(&again.unwrap(), &cached));
        assert!(slow.join().unwrap().is_some());
    });
    assert_eq!(resolver.cached_len(), 3);
}

#[test]
fn deferred_pixels_show_up_in_every_handle() {
    let loader = Arc::new(PlaceholderLoader::deferred());
    let resolver = ResourceResolver::new(
        records(vec![TextureRecord::new("sky", "sky.png")]),
        loader.clone(),
        "assets",
    );

    let shared = resolver.resolve("sky").unwrap();
    let tiled = resolver
        .resolve_with_repeat("sky", glam::Vec2::new(3.0, 3.0))
        .unwrap();
    assert!(!shared.is_ready());
    assert!(!tiled.is_ready());

    loader
        .source_for("assets/sky.png")
        .unwrap()
        .fill(ImageData::solid([10, 20, 30, 255]));

    assert!(shared.is_ready());
    assert!(tiled.is_ready());
}

#[test]
fn texture_record_wrap_and_mipmaps_are_applied() {
    let loader = Arc::new(PlaceholderLoader::new());
    let mut record = TextureRecord::new("brick", "brick.png");
    record.wrap_s = WrapMode::Clamp;
    record.wrap_t = WrapMode::Mirror;
    record.is_video = true;
    record.mipmaps = (0..10).map(|i| format!("brick_mip{i}.png")).collect();

    let resolver = ResourceResolver::new(records(vec![record]), loader.clone(), "assets");
    let texture = resolver.resolve("brick").unwrap();

    assert_eq!(texture.sampler.address_mode_u, AddressMode::ClampToEdge);
    assert_eq!(texture.sampler.address_mode_v, AddressMode::MirrorRepeat);
    assert!(texture.is_video);
    assert_eq!(texture.mipmaps.len(), 8);
    // Base image plus the eight kept mip levels
    assert_eq!(loader.requests().len(), 9);
}

// ============================================================================
// AssetLibrary
// ============================================================================

struct CountingLoader {
    loads: AtomicUsize,
}

impl ModelLoader for CountingLoader {
    fn load_model(&self, path: &Path) -> scene_compiler::Result<RenderNode> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        let mut root = RenderNode::new(&path.to_string_lossy());
        root.children.push(RenderNode::with_transform(
            "wheel",
            &Arc::new(Affine3A::IDENTITY),
            Some(Affine3A::from_translation(Vec3::X)),
        ));
        Ok(root)
    }
}

#[test]
fn library_imports_each_path_once() {
    let loader = Arc::new(CountingLoader {
        loads: AtomicUsize::new(0),
    });
    let library = AssetLibrary::with_loader(loader.clone());

    let first = library.template("car.glb", Path::new("models")).unwrap();
    let second = library.template("car.glb", Path::new("models")).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(loader.loads.load(Ordering::Relaxed), 1);
    assert_eq!(library.len(), 1);
}

struct SlowLoader {
    loads: AtomicUsize,
}

impl ModelLoader for SlowLoader {
    fn load_model(&self, path: &Path) -> scene_compiler::Result<RenderNode> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        std::thread::sleep(Duration::from_millis(50));
        Ok(RenderNode::new(&path.to_string_lossy()))
    }
}

#[test]
fn concurrent_first_requests_import_once() {
    let loader = Arc::new(SlowLoader {
        loads: AtomicUsize::new(0),
    });
    let library = AssetLibrary::with_loader(loader.clone());

    let templates: Vec<_> = std::thread::scope(|s| {
        let workers: Vec<_> = (0..4)
            .map(|_| s.spawn(|| library.template("car.glb", Path::new(".")).unwrap()))
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    assert!(templates.iter().all(|t| Arc::ptr_eq(t, &templates[0])));
    assert_eq!(loader.loads.load(Ordering::Relaxed), 1);
    assert_eq!(library.len(), 1);
}

#[test]
fn instances_are_rebased_and_independent() {
    let library = AssetLibrary::with_loader(Arc::new(CountingLoader {
        loads: AtomicUsize::new(0),
    }));
    let parent = Arc::new(Affine3A::from_translation(Vec3::new(0.0, 10.0, 0.0)));

    let mut a = library.instantiate("car.glb", Path::new("."), &parent).unwrap();
    let b = library.instantiate("car.glb", Path::new("."), &parent).unwrap();

    let wheel = a.find("wheel").unwrap();
    let p = wheel.world_matrix().transform_point3(Vec3::ZERO);
    assert!((p - Vec3::new(1.0, 10.0, 0.0)).length() < 1e-5);

    a.find_mut("wheel").unwrap().cast_shadow = true;
    assert!(!b.find("wheel").unwrap().cast_shadow);
}

#[test]
fn library_without_loader_reports_resource_load() {
    let library = AssetLibrary::new();
    let err = library
        .instantiate("car.glb", Path::new("."), &Arc::new(Affine3A::IDENTITY))
        .unwrap_err();
    assert!(matches!(err, SceneError::ResourceLoad { path, .. } if path == "car.glb"));
}
