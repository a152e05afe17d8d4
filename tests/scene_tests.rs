//! Scene Compilation Tests
//!
//! Tests for:
//! - World matrix sharing and composition through the tree
//! - Shadow flag propagation (down to descendants, up to ancestors)
//! - Material / texture inheritance and private texture overrides
//! - LOD level ordering and independence
//! - Recoverable diagnostics: unsupported kinds and subtypes, dangling refs,
//!   cycles
//! - Model instancing through the asset library
//! - Full JSON documents (cameras, fog, lights, skybox)

use std::path::Path;
use std::sync::Arc;

use glam::{Vec2, Vec3, Vec4};

use scene_compiler::assets::{AssetLibrary, ModelLoader, PlaceholderLoader};
use scene_compiler::description::{
    LightSpec, LodLevelRecord, MaterialRecord, RectangleParams, TextureRecord, TrackParams,
};
use scene_compiler::{
    CompiledScene, CompilerSettings, Node, NodeKind, Representation, SceneCompiler,
    SceneDescription, SceneError, TransformOp,
};
use scene_compiler::scene::RenderNode;

const EPSILON: f32 = 1e-5;

fn approx_vec3(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn quad() -> Representation {
    Representation::Rectangle(RectangleParams {
        xy1: Vec2::new(-1.0, -1.0),
        xy2: Vec2::new(1.0, 1.0),
        parts_x: 1,
        parts_y: 1,
    })
}

fn compiler() -> SceneCompiler {
    SceneCompiler::default().with_texture_loader(Arc::new(PlaceholderLoader::new()))
}

fn compile(description: &SceneDescription) -> CompiledScene {
    compiler().compile(description).unwrap()
}

fn node<'a>(scene: &'a CompiledScene, id: &str) -> &'a RenderNode {
    scene
        .find(id)
        .unwrap_or_else(|| panic!("node '{id}' missing"))
}

// ============================================================================
// Transforms
// ============================================================================

#[test]
fn untransformed_children_share_the_parent_world_matrix() {
    let mut description = SceneDescription::new("root");
    description
        .add_node(
            Node::group("root", &["holder"])
                .with_transformations(vec![TransformOp::translate(0.0, 5.0, 0.0)]),
        )
        .add_node(Node::group("holder", &["leaf"]))
        .add_node(
            Node::primitive("leaf", quad())
                .with_transformations(vec![TransformOp::scale(2.0, 2.0, 2.0)]),
        );

    let scene = compile(&description);
    let root = node(&scene, "root");
    let holder = node(&scene, "holder");
    let leaf = node(&scene, "leaf");

    assert!(Arc::ptr_eq(root.world_arc(), holder.world_arc()));
    assert!(!holder.has_own_transform());
    assert!(!Arc::ptr_eq(holder.world_arc(), leaf.world_arc()));

    let p = leaf.world_matrix().transform_point3(Vec3::X);
    assert!(approx_vec3(p, Vec3::new(2.0, 5.0, 0.0)), "got {p}");
}

#[test]
fn root_without_transform_is_identity() {
    let mut description = SceneDescription::new("root");
    description.add_node(Node::group("root", &[]));

    let scene = compile(&description);
    assert_eq!(*scene.root.world_matrix(), glam::Affine3A::IDENTITY);
    assert!(scene.report.is_clean());
}

// ============================================================================
// Shadows
// ============================================================================

#[test]
fn shadow_caster_marks_its_ancestors_but_not_siblings() {
    let mut description = SceneDescription::new("root");
    description
        .add_node(Node::group("root", &["a", "c"]))
        .add_node(Node::group("a", &["b"]))
        .add_node(Node::primitive("b", quad()).with_cast_shadow(true))
        .add_node(Node::primitive("c", quad()));

    let scene = compile(&description);
    for id in ["root", "a", "b"] {
        assert!(node(&scene, id).cast_shadow, "{id} should cast");
    }
    assert!(node(&scene, "b").mesh.as_ref().unwrap().cast_shadows);

    let c = node(&scene, "c");
    assert!(!c.cast_shadow);
    assert!(!c.mesh.as_ref().unwrap().cast_shadows);
    assert!(!node(&scene, "root").receive_shadow);
}

#[test]
fn shadow_flags_flow_down_to_descendants() {
    let mut description = SceneDescription::new("floor");
    description
        .add_node(Node::group("floor", &["tile"]).with_receive_shadow(true))
        .add_node(Node::primitive("tile", quad()));

    let scene = compile(&description);
    let tile = node(&scene, "tile");
    assert!(tile.receive_shadow);
    assert!(tile.mesh.as_ref().unwrap().receive_shadows);
    assert!(!tile.cast_shadow);
}

// ============================================================================
// Materials and textures
// ============================================================================

fn painted_scene() -> SceneDescription {
    let mut description = SceneDescription::new("root");
    description
        .add_material("paint", MaterialRecord::default().with_color(Vec3::new(0.0, 0.0, 1.0)))
        .add_texture(TextureRecord::new("brick", "brick.png"))
        .add_node(Node::group("root", &["floor", "wall", "door"]).with_material("paint"))
        .add_node(Node::primitive("floor", quad()))
        .add_node(Node::primitive("wall", quad()).with_texture("brick"))
        .add_node(Node::primitive("door", quad()).with_material("paint"));
    description
}

#[test]
fn material_is_inherited_and_shared() {
    let scene = compile(&painted_scene());
    let floor = node(&scene, "floor").mesh.as_ref().unwrap();
    let door = node(&scene, "door").mesh.as_ref().unwrap();

    assert!(Arc::ptr_eq(&floor.material, &door.material));
    assert_eq!(floor.material.color(), Vec4::new(0.0, 0.0, 1.0, 1.0));
    assert!(scene.report.is_clean());
}

#[test]
fn node_texture_goes_onto_a_private_material() {
    let scene = compile(&painted_scene());
    let floor = node(&scene, "floor").mesh.as_ref().unwrap();
    let wall = node(&scene, "wall").mesh.as_ref().unwrap();

    assert!(!Arc::ptr_eq(&floor.material, &wall.material));
    assert_ne!(floor.material.uuid, wall.material.uuid);
    assert!(floor.material.map().is_none());
    assert_eq!(wall.material.map().map(|t| t.name.as_str()), Some("brick"));
    assert_eq!(wall.material.color(), floor.material.color());
}

#[test]
fn node_texture_keeps_the_material_tiling() {
    let mut description = SceneDescription::new("root");
    description
        .add_material(
            "tiled",
            MaterialRecord::default()
                .with_texture("brick")
                .with_tex_length(2.0, 4.0),
        )
        .add_texture(TextureRecord::new("brick", "brick.png"))
        .add_texture(TextureRecord::new("wood", "wood.png"))
        .add_node(Node::group("root", &["a", "b"]).with_material("tiled"))
        .add_node(Node::primitive("a", quad()))
        .add_node(Node::primitive("b", quad()).with_texture("wood"));

    let scene = compile(&description);
    assert!(scene.report.is_clean());

    let a = node(&scene, "a").mesh.as_ref().unwrap().material.map().unwrap();
    let b = node(&scene, "b").mesh.as_ref().unwrap().material.map().unwrap();
    assert_eq!(a.transform.repeat, Vec2::new(0.5, 0.25));
    assert_eq!(b.name, "wood");
    assert_eq!(b.transform.repeat, Vec2::new(0.5, 0.25));

    // Untiled materials share the registered handle as is
    let plain = compile(&painted_scene());
    let brick = node(&plain, "wall").mesh.as_ref().unwrap().material.map().unwrap();
    assert_eq!(brick.transform.repeat, Vec2::ONE);
}

#[test]
fn dangling_references_are_reported_and_fall_back() {
    let mut description = SceneDescription::new("root");
    description
        .add_node(Node::group("root", &["leaf", "ghost"]))
        .add_node(
            Node::primitive("leaf", quad())
                .with_material("nope")
                .with_texture("missing"),
        );

    let scene = compile(&description);
    let report = &scene.report;
    assert_eq!(report.count(|e| matches!(e, SceneError::MissingMaterial(id) if id == "nope")), 1);
    assert_eq!(report.count(|e| matches!(e, SceneError::MissingTexture(id) if id == "missing")), 1);
    assert_eq!(report.count(|e| matches!(e, SceneError::MissingNode(id) if id == "ghost")), 1);

    let mesh = node(&scene, "leaf").mesh.as_ref().unwrap();
    assert!(mesh.material.settings.wireframe);
    assert_eq!(node(&scene, "root").children.len(), 1);
}

// ============================================================================
// Unsupported input
// ============================================================================

#[test]
fn unknown_primitive_is_skipped_without_touching_siblings() {
    let mut description = SceneDescription::new("root");
    description
        .add_node(Node::group("root", &["left", "blob", "right"]))
        .add_node(Node::primitive("left", quad()))
        .add_node(Node::primitive("blob", Representation::Unsupported("blob".into())))
        .add_node(Node::primitive("right", quad()));

    let scene = compile(&description);
    assert!(node(&scene, "blob").mesh.is_none());
    assert!(node(&scene, "left").mesh.is_some());
    assert!(node(&scene, "right").mesh.is_some());
    assert_eq!(
        scene
            .report
            .count(|e| matches!(e, SceneError::UnsupportedPrimitive(s) if s == "blob")),
        1
    );
}

#[test]
fn unknown_node_kind_is_dropped() {
    let mut description = SceneDescription::new("root");
    description
        .add_node(Node::group("root", &["odd", "leaf"]))
        .add_node(Node::with_kind("odd", NodeKind::Unsupported("hologram".into())))
        .add_node(Node::primitive("leaf", quad()));

    let scene = compile(&description);
    assert!(scene.find("odd").is_none());
    assert!(scene.find("leaf").is_some());
    assert!(matches!(
        &scene.report.diagnostics[..],
        [SceneError::UnsupportedNodeKind { node, kind }] if node == "odd" && kind == "hologram"
    ));
}

#[test]
fn missing_root_is_the_only_fatal_error() {
    let description = SceneDescription::new("root");
    assert!(matches!(
        compiler().compile(&description),
        Err(SceneError::MissingRoot(_))
    ));
}

// ============================================================================
// LOD
// ============================================================================

fn lod_scene() -> SceneDescription {
    let mut description = SceneDescription::new("tree");
    description
        .add_material("bark", MaterialRecord::default())
        .add_node(
            Node::with_kind(
                "tree",
                NodeKind::Lod {
                    levels: vec![
                        LodLevelRecord {
                            node: "low".into(),
                            min_distance: 50.0,
                        },
                        LodLevelRecord {
                            node: "high".into(),
                            min_distance: 0.0,
                        },
                    ],
                },
            )
            .with_material("bark"),
        )
        .add_node(Node::primitive("high", quad()).with_cast_shadow(true))
        .add_node(Node::primitive("low", quad()));
    description
}

#[test]
fn lod_levels_are_sorted_by_distance() {
    let scene = compile(&lod_scene());
    let lod = scene.root.lod.as_ref().unwrap();

    let names: Vec<_> = lod.levels().iter().map(|l| l.node.name.as_str()).collect();
    assert_eq!(names, ["high", "low"]);
    assert_eq!(lod.select(10.0).unwrap().node.name, "high");
    assert_eq!(lod.select(75.0).unwrap().node.name, "low");
    assert!(scene.root.cast_shadow);
}

#[test]
fn lod_levels_own_independent_materials() {
    let mut scene = compile(&lod_scene());

    let low_material = Arc::clone(&node(&scene, "low").mesh.as_ref().unwrap().material);
    {
        let high = scene.find_mut("high").unwrap();
        let mesh = high.mesh.as_mut().unwrap();
        assert!(!Arc::ptr_eq(&mesh.material, &low_material));
        Arc::make_mut(&mut mesh.material).set_color(Vec4::new(1.0, 0.0, 0.0, 1.0));
    }

    let low = node(&scene, "low").mesh.as_ref().unwrap();
    assert_eq!(low.material.color(), Vec4::ONE);
    let high = node(&scene, "high").mesh.as_ref().unwrap();
    assert_eq!(high.material.color(), Vec4::new(1.0, 0.0, 0.0, 1.0));
}

// ============================================================================
// Cycles
// ============================================================================

#[test]
fn cyclic_references_are_cut() {
    let mut description = SceneDescription::new("a");
    description
        .add_node(Node::group("a", &["b"]))
        .add_node(Node::group("b", &["a"]));

    let scene = compile(&description);
    assert_eq!(scene.root.subtree_len(), 2);
    assert_eq!(
        scene
            .report
            .count(|e| matches!(e, SceneError::CycleDetected(_))),
        1
    );
}

#[test]
fn shared_subtrees_are_compiled_per_reference() {
    let mut description = SceneDescription::new("root");
    description
        .add_node(Node::group("root", &["left", "right"]))
        .add_node(
            Node::group("left", &["chair"])
                .with_transformations(vec![TransformOp::translate(-1.0, 0.0, 0.0)]),
        )
        .add_node(
            Node::group("right", &["chair"])
                .with_transformations(vec![TransformOp::translate(1.0, 0.0, 0.0)]),
        )
        .add_node(Node::primitive("chair", quad()));

    let scene = compile(&description);
    assert!(scene.report.is_clean());

    let left = node(&scene, "left").children[0].world_matrix().translation;
    let right = node(&scene, "right").children[0].world_matrix().translation;
    assert!(approx_vec3(left.into(), Vec3::new(-1.0, 0.0, 0.0)));
    assert!(approx_vec3(right.into(), Vec3::new(1.0, 0.0, 0.0)));
}

#[test]
fn depth_guard_cuts_deep_chains() {
    let mut description = SceneDescription::new("n0");
    for i in 0..5 {
        let child = format!("n{}", i + 1);
        description.add_node(Node::group(&format!("n{i}"), &[child.as_str()]));
    }
    description.add_node(Node::primitive("n5", quad()));

    let compiler = compiler();
    let shallow = SceneCompiler::new(CompilerSettings::default().with_max_depth(3))
        .with_texture_loader(Arc::new(PlaceholderLoader::new()));

    assert!(compiler.compile(&description).unwrap().find("n5").is_some());

    let scene = shallow.compile(&description).unwrap();
    assert_eq!(scene.root.subtree_len(), 3);
    assert!(matches!(
        &scene.report.diagnostics[..],
        [SceneError::DepthExceeded { node, max_depth: 3 }] if node == "n3"
    ));
    assert_eq!(
        scene
            .report
            .count(|e| matches!(e, SceneError::CycleDetected(_))),
        0
    );
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn settings_drive_fallback_color_and_track_sampling() {
    let settings = CompilerSettings::default()
        .with_default_material_color(Vec3::new(0.0, 1.0, 0.0))
        .with_track_samples_per_span(4);
    let compiler = SceneCompiler::new(settings)
        .with_texture_loader(Arc::new(PlaceholderLoader::new()));

    let mut description = SceneDescription::new("track");
    description.add_node(Node::primitive(
        "track",
        Representation::Track(TrackParams {
            points: Vec::new(),
            control_points: vec![
                Vec3::ZERO,
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 10.0),
                Vec3::new(0.0, 0.0, 10.0),
            ],
            samples_per_span: 0,
            width: 2.0,
            height: 0.1,
            depth: 2.0,
            closed: true,
        }),
    ));

    let scene = compiler.compile(&description).unwrap();
    let mesh = scene.root.mesh.as_ref().unwrap();
    // Four closed spans of four samples, four vertices per sample
    assert_eq!(mesh.geometry.vertex_count(), 4 * 4 * 4);
    assert_eq!(mesh.material.color(), Vec4::new(0.0, 1.0, 0.0, 1.0));
}

// ============================================================================
// Models
// ============================================================================

struct BoxModelLoader;

impl ModelLoader for BoxModelLoader {
    fn load_model(&self, _path: &Path) -> scene_compiler::Result<RenderNode> {
        let mut root = RenderNode::new("model");
        root.children.push(RenderNode::new("body"));
        Ok(root)
    }
}

#[test]
fn model_primitives_are_instanced_from_the_library() {
    let library = Arc::new(AssetLibrary::with_loader(Arc::new(BoxModelLoader)));
    let compiler = compiler().with_library(Arc::clone(&library));

    let mut description = SceneDescription::new("root");
    description
        .add_node(Node::group("root", &["car"]))
        .add_node(
            Node::primitive("car", Representation::Model { path: "car.glb".into() })
                .with_cast_shadow(true)
                .with_transformations(vec![TransformOp::translate(0.0, 0.0, 3.0)]),
        );

    let scene = compiler.compile(&description).unwrap();
    let body = node(&scene, "body");
    assert!(body.cast_shadow);
    assert!(approx_vec3(
        body.world_matrix().translation.into(),
        Vec3::new(0.0, 0.0, 3.0)
    ));
    assert_eq!(library.len(), 1);
}

#[test]
fn model_without_loader_is_reported() {
    let mut description = SceneDescription::new("car");
    description.add_node(Node::primitive(
        "car",
        Representation::Model { path: "car.glb".into() },
    ));

    let scene = compile(&description);
    assert!(scene.root.children.is_empty());
    assert_eq!(
        scene
            .report
            .count(|e| matches!(e, SceneError::ResourceLoad { .. })),
        1
    );
}

// ============================================================================
// Lights
// ============================================================================

#[test]
fn disabled_light_compiles_with_zero_intensity() {
    let mut description = SceneDescription::new("lamp");
    description.add_node(Node::with_kind(
        "lamp",
        NodeKind::Light(LightSpec::point(Vec3::ONE, 4.0).enabled(false)),
    ));

    let scene = compile(&description);
    let light = scene.root.light.as_ref().unwrap();
    assert!(!light.enabled);
    assert_eq!(light.intensity, 0.0);
    assert_eq!(light.base_intensity, 4.0);
}

// ============================================================================
// JSON documents
// ============================================================================

const DOCUMENT: &str = r#"{
    "rootId": "world",
    "activeCameraId": "main",
    "options": {"background": [0.1, 0.1, 0.2], "ambient": [0.3, 0.3, 0.3]},
    "fog": {"color": [1, 1, 1], "near": 10, "far": 200},
    "cameras": {
        "main": {"type": "perspective", "angle": 60, "near": 0.1, "far": 1000,
                 "location": [0, 5, 20], "target": [0, 0, 0]}
    },
    "textures": {
        "grass": {"filepath": "grass.png", "wrapS": "repeat", "wrapT": "repeat"},
        "sky_front": {"filepath": "sky/front.png"}
    },
    "materials": {
        "lawn": {"color": [0.2, 0.8, 0.2], "textureRef": "grass",
                 "texLengthS": 0.25, "texLengthT": 0.5, "shading": "flat"}
    },
    "nodes": {
        "world": {"kind": "group", "children": ["ground", "sun", "sky", "pole"]},
        "ground": {
            "kind": "primitive",
            "materialRef": "lawn",
            "receiveShadow": true,
            "transformations": [
                {"type": "R", "rotation": [-90, 0, 0]},
                {"type": "S", "scale": [10, 10, 1]}
            ],
            "representation": {"subtype": "rectangle", "xy1": [-1, -1], "xy2": [1, 1]}
        },
        "sun": {
            "kind": "light",
            "light": {"type": "directionallight", "position": [10, 20, 5],
                      "castShadow": true, "intensity": 1.5}
        },
        "sky": {
            "kind": "primitive",
            "representation": {"subtype": "skybox", "size": [500, 500, 500],
                               "emissive": [1, 1, 1], "intensity": 0.5,
                               "faces": ["sky_front", null, null, null, null, null]}
        },
        "pole": {
            "kind": "primitive",
            "castShadow": true,
            "transformations": [{"type": "T", "translate": [0, 2, 0]}],
            "representation": {"subtype": "cylinder", "base": 0.1, "top": 0.1, "height": 4}
        }
    }
}"#;

#[test]
fn json_document_compiles_end_to_end() {
    let description = SceneDescription::from_json_str(DOCUMENT).unwrap();
    let scene = compile(&description);

    assert!(scene.report.is_clean(), "{:?}", scene.report.diagnostics);
    assert_eq!(scene.report.nodes_compiled, 5);
    assert!(approx_vec3(scene.background, Vec3::new(0.1, 0.1, 0.2)));
    assert!(approx_vec3(scene.ambient, Vec3::splat(0.3)));
    assert_eq!(scene.fog.map(|f| f.far), Some(200.0));
    assert_eq!(scene.active_camera().map(|c| c.far), Some(1000.0));

    let ground = node(&scene, "ground");
    let map = ground.mesh.as_ref().unwrap().material.map().unwrap();
    assert_eq!(map.transform.repeat, Vec2::new(4.0, 2.0));
    assert!(ground.receive_shadow && !ground.cast_shadow);

    let sun = node(&scene, "sun").light.as_ref().unwrap();
    assert!(sun.cast_shadows);
    assert!(sun.shadow.camera_bounds.is_some());

    let sky = node(&scene, "sky").mesh.as_ref().unwrap();
    assert_eq!(sky.group_materials.len(), 6);
    assert!(sky.group_materials[0].map().is_some());
    assert!(sky.group_materials[1].map().is_none());

    assert!(node(&scene, "pole").cast_shadow);
    assert!(scene.root.cast_shadow && scene.root.receive_shadow);
}
