//! Scene compiler
//!
//! Walks a [`SceneDescription`] depth-first from its root and produces a
//! [`CompiledScene`]. Inherited state (world matrix, material, texture and
//! shadow flags) travels down as arguments; shadow flags are folded back up
//! once a node's children are built, so no parent links are needed.
//!
//! Everything except a missing root is recoverable: the offending node, op or
//! reference is skipped, the problem lands in the [`CompileReport`], and the
//! rest of the tree compiles as usual.

use std::sync::Arc;

use glam::Affine3A;
use rustc_hash::FxHashMap;

use crate::assets::{AssetLibrary, ImageFileLoader, ResourceResolver, TextureLoader};
use crate::description::{LodLevelRecord, Node, NodeKind, Representation, SceneDescription};
use crate::errors::{Result, SceneError};
use crate::resources::material_builder::{
    compile_material, fallback_material, skybox_face_material,
};
use crate::resources::primitives::build_geometry;
use crate::resources::{MaterialHandle, Mesh, TextureHandle};
use crate::scene::light::Light;
use crate::scene::lod::Lod;
use crate::scene::node::RenderNode;
use crate::scene::scene::{CompileReport, CompiledScene, Fog};
use crate::scene::transform::resolve_local;
use crate::settings::CompilerSettings;

/// Camera types the camera collaborator understands.
const CAMERA_TYPES: [&str; 2] = ["perspective", "orthogonal"];

/// Compiles scene descriptions into render trees.
///
/// One compiler can run any number of passes; each pass owns its own
/// resolver cache unless one is supplied through [`SceneCompiler::compile_with`].
pub struct SceneCompiler {
    settings: CompilerSettings,
    texture_loader: Arc<dyn TextureLoader>,
    library: Arc<AssetLibrary>,
}

impl SceneCompiler {
    #[must_use]
    pub fn new(settings: CompilerSettings) -> Self {
        Self {
            settings,
            texture_loader: Arc::new(ImageFileLoader::new()),
            library: Arc::new(AssetLibrary::new()),
        }
    }

    #[must_use]
    pub fn with_texture_loader(mut self, loader: Arc<dyn TextureLoader>) -> Self {
        self.texture_loader = loader;
        self
    }

    /// Shares a model library across passes (and compilers).
    #[must_use]
    pub fn with_library(mut self, library: Arc<AssetLibrary>) -> Self {
        self.library = library;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    #[must_use]
    pub fn library(&self) -> &Arc<AssetLibrary> {
        &self.library
    }

    /// Compiles `description` with a fresh resolver over its texture records.
    pub fn compile(&self, description: &SceneDescription) -> Result<CompiledScene> {
        let resolver = ResourceResolver::for_description(
            description,
            Arc::clone(&self.texture_loader),
            self.settings.asset_dir.clone(),
        );
        self.compile_with(description, &resolver)
    }

    /// Compiles `description`, resolving textures through `resolver`.
    ///
    /// Fails only when the root id names no node.
    pub fn compile_with(
        &self,
        description: &SceneDescription,
        resolver: &ResourceResolver,
    ) -> Result<CompiledScene> {
        let root_id = description.root_id.as_str();
        if !description.nodes.contains_key(root_id) {
            return Err(SceneError::MissingRoot(root_id.to_string()));
        }

        let mut walk = Walk {
            description,
            settings: &self.settings,
            library: &self.library,
            resolver,
            materials: FxHashMap::default(),
            fallback: None,
            report: CompileReport::default(),
        };

        let identity = Arc::new(Affine3A::IDENTITY);
        let mut path = Vec::new();
        let root = walk
            .compile_node(root_id, &identity, &Inherited::default(), &mut path)
            .unwrap_or_else(|| RenderNode::new(root_id));
        let mut report = walk.report;

        let mut cameras = description.cameras.clone();
        cameras.retain(|id, camera| {
            let known = CAMERA_TYPES.contains(&camera.camera_type.as_str());
            if !known {
                report.push(SceneError::UnsupportedCamera {
                    camera: id.clone(),
                    kind: camera.camera_type.clone(),
                });
            }
            known
        });

        let options = &description.options;
        let fog = description.fog.as_ref().map(|f| Fog {
            color: f.color,
            near: f.near,
            far: f.far,
        });

        let active_camera = description
            .active_camera_id
            .clone()
            .filter(|id| cameras.contains_key(id));
        if let (Some(id), None) = (&description.active_camera_id, &active_camera) {
            log::warn!("Active camera '{id}' is not declared");
        }

        log::info!(
            "Compiled scene '{root_id}': {} nodes, {} diagnostics",
            report.nodes_compiled,
            report.diagnostics.len()
        );

        Ok(CompiledScene {
            root,
            background: options.background,
            ambient: options.ambient,
            fog,
            cameras,
            active_camera,
            report,
        })
    }
}

impl Default for SceneCompiler {
    fn default() -> Self {
        Self::new(CompilerSettings::default())
    }
}

/// State handed from a node to its children.
#[derive(Clone, Default)]
struct Inherited {
    material: Option<MaterialHandle>,
    texture: Option<TextureHandle>,
    cast_shadow: bool,
    receive_shadow: bool,
}

/// One compile pass.
struct Walk<'a> {
    description: &'a SceneDescription,
    settings: &'a CompilerSettings,
    library: &'a AssetLibrary,
    resolver: &'a ResourceResolver,
    /// Compiled materials by record id, shared by every node referencing it.
    materials: FxHashMap<&'a str, MaterialHandle>,
    fallback: Option<MaterialHandle>,
    report: CompileReport,
}

impl<'a> Walk<'a> {
    /// Builds the render subtree for `id`, or `None` when the node is skipped.
    ///
    /// `path` holds the ids of the current ancestors.
    fn compile_node(
        &mut self,
        id: &'a str,
        parent_world: &Arc<Affine3A>,
        inherited: &Inherited,
        path: &mut Vec<&'a str>,
    ) -> Option<RenderNode> {
        let Some(node) = self.description.nodes.get(id) else {
            self.report.push(SceneError::MissingNode(id.to_string()));
            return None;
        };
        if path.contains(&id) {
            self.report.push(SceneError::CycleDetected(id.to_string()));
            return None;
        }
        if path.len() >= self.settings.max_depth {
            self.report.push(SceneError::DepthExceeded {
                node: id.to_string(),
                max_depth: self.settings.max_depth,
            });
            return None;
        }

        let scope = Inherited {
            material: self.node_material(node, inherited),
            texture: self.node_texture(node, inherited),
            cast_shadow: inherited.cast_shadow || node.cast_shadow.unwrap_or(false),
            receive_shadow: inherited.receive_shadow || node.receive_shadow.unwrap_or(false),
        };

        let report = &mut self.report;
        let local = resolve_local(&node.transformations, |e| report.push(e));
        let mut render = RenderNode::with_transform(id, parent_world, local);
        render.cast_shadow = scope.cast_shadow;
        render.receive_shadow = scope.receive_shadow;

        path.push(id);
        match &node.kind {
            NodeKind::Group { children } => {
                for child_id in children {
                    if let Some(child) =
                        self.compile_node(child_id, render.world_arc(), &scope, path)
                    {
                        render.children.push(child);
                    }
                }
            }
            NodeKind::Primitive(representation) => {
                self.attach_primitive(&mut render, representation, &scope);
            }
            NodeKind::Light(spec) => match Light::from_spec(spec) {
                Ok(light) => render.light = Some(light),
                Err(e) => self.report.push(e),
            },
            NodeKind::Lod { levels } => {
                render.lod = Some(Box::new(self.compile_lod(id, levels, &render, &scope, path)));
            }
            NodeKind::Unsupported(kind) => {
                path.pop();
                self.report.push(SceneError::UnsupportedNodeKind {
                    node: id.to_string(),
                    kind: kind.clone(),
                });
                return None;
            }
        }
        path.pop();

        fold_shadows(&mut render);
        log::debug!("Compiled node '{id}' ({})", node.kind.name());
        self.report.nodes_compiled += 1;
        Some(render)
    }

    /// The node's own material when it references a known record, otherwise
    /// the inherited one.
    fn node_material(&mut self, node: &'a Node, inherited: &Inherited) -> Option<MaterialHandle> {
        let Some(material_id) = node.material_ref.as_deref() else {
            return inherited.material.clone();
        };
        if let Some(handle) = self.materials.get(material_id) {
            return Some(Arc::clone(handle));
        }
        let Some(record) = self.description.materials.get(material_id) else {
            self.report
                .push(SceneError::MissingMaterial(material_id.to_string()));
            return inherited.material.clone();
        };

        let report = &mut self.report;
        let handle = Arc::new(compile_material(record, self.resolver, &mut |e| report.push(e)));
        self.materials.insert(material_id, Arc::clone(&handle));
        Some(handle)
    }

    fn node_texture(&mut self, node: &Node, inherited: &Inherited) -> Option<TextureHandle> {
        let Some(texture_id) = node.texture_ref.as_deref() else {
            return inherited.texture.clone();
        };
        let texture = self.resolver.resolve(texture_id);
        if texture.is_none() {
            self.report
                .push(SceneError::MissingTexture(texture_id.to_string()));
            return inherited.texture.clone();
        }
        texture
    }

    fn fallback(&mut self) -> MaterialHandle {
        let color = self.settings.default_material_color;
        Arc::clone(
            self.fallback
                .get_or_insert_with(|| Arc::new(fallback_material(color))),
        )
    }

    /// Material applied to a primitive: the scope's material with the scope's
    /// texture as its map, tiled like the material's own map. The texture goes
    /// onto a private copy so other users of the material keep their map.
    fn surface_material(&mut self, scope: &Inherited) -> MaterialHandle {
        let Some(material) = &scope.material else {
            return self.fallback();
        };
        match &scope.texture {
            Some(texture) => {
                let mut textured = material.duplicate();
                textured.attach_map(texture);
                Arc::new(textured)
            }
            None => Arc::clone(material),
        }
    }

    fn attach_primitive(
        &mut self,
        render: &mut RenderNode,
        representation: &Representation,
        scope: &Inherited,
    ) {
        if let Representation::Model { path } = representation {
            match self
                .library
                .instantiate(path, &self.settings.asset_dir, render.world_arc())
            {
                Ok(mut instance) => {
                    apply_shadows(&mut instance, scope.cast_shadow, scope.receive_shadow);
                    render.children.push(instance);
                }
                Err(e) => self.report.push(e),
            }
            return;
        }

        let geometry = match build_geometry(representation, self.settings) {
            Ok(geometry) => geometry,
            Err(e) => {
                self.report.push(e);
                return;
            }
        };

        let mut mesh = Mesh::new(Arc::new(geometry), self.surface_material(scope)).with_name(&render.name);
        if let Representation::Skybox(params) = representation {
            mesh.group_materials = params
                .faces
                .iter()
                .map(|face| {
                    let map = face.as_deref().and_then(|texture_id| {
                        let texture = self.resolver.resolve(texture_id);
                        if texture.is_none() {
                            self.report
                                .push(SceneError::MissingTexture(texture_id.to_string()));
                        }
                        texture
                    });
                    Arc::new(skybox_face_material(map, params.emissive, params.intensity))
                })
                .collect();
        }
        mesh.cast_shadows = scope.cast_shadow;
        mesh.receive_shadows = scope.receive_shadow;
        render.mesh = Some(mesh);
    }

    /// Builds every level as its own subtree. Each level starts from a deep
    /// copy of the inherited material, so levels never share material state.
    fn compile_lod(
        &mut self,
        id: &str,
        levels: &'a [LodLevelRecord],
        render: &RenderNode,
        scope: &Inherited,
        path: &mut Vec<&'a str>,
    ) -> Lod {
        if !levels.is_sorted_by(|a, b| a.min_distance <= b.min_distance) {
            log::warn!("LOD '{id}' levels are not sorted by distance; reordering");
        }

        let mut lod = Lod::new();
        for level in levels {
            let level_scope = Inherited {
                material: scope.material.as_ref().map(|m| Arc::new(m.duplicate())),
                ..scope.clone()
            };
            if let Some(node) =
                self.compile_node(&level.node, render.world_arc(), &level_scope, path)
            {
                lod.add_level(level.min_distance, node);
            }
        }
        lod
    }
}

/// A node casts (receives) shadows when it or anything below it does.
fn fold_shadows(render: &mut RenderNode) {
    let below = render
        .children
        .iter()
        .chain(render.lod.iter().flat_map(|lod| lod.levels().iter().map(|l| &l.node)));
    for child in below {
        render.cast_shadow |= child.cast_shadow;
        render.receive_shadow |= child.receive_shadow;
    }
}

/// Ors inherited shadow flags into an instantiated model subtree.
fn apply_shadows(node: &mut RenderNode, cast: bool, receive: bool) {
    node.cast_shadow |= cast;
    node.receive_shadow |= receive;
    if let Some(mesh) = &mut node.mesh {
        mesh.cast_shadows |= cast;
        mesh.receive_shadows |= receive;
    }
    for child in &mut node.children {
        apply_shadows(child, cast, receive);
    }
    if let Some(lod) = &mut node.lod {
        for level in lod.levels_mut() {
            apply_shadows(&mut level.node, cast, receive);
        }
    }
}
