use std::sync::Arc;

use glam::Affine3A;

use crate::resources::geometry::BoundingBox;
use crate::resources::mesh::Mesh;
use crate::scene::light::Light;
use crate::scene::lod::Lod;

/// Compiled, renderer-facing counterpart of a description node.
///
/// # Ownership
///
/// A render node owns its children (and LOD levels) outright. There are no
/// parent links; anything that needs inherited state is resolved by the
/// compiler before the node is built.
///
/// # Transform
///
/// - `local`: the node's own folded `T · R · S` matrix (identity when it
///   declares no operations)
/// - `world`: parent world · local, shared with the parent (same `Arc`) when
///   the node declares no operations
#[derive(Debug, Clone)]
pub struct RenderNode {
    /// Id of the description node this was compiled from.
    pub name: String,

    pub local: Affine3A,
    world: Arc<Affine3A>,
    /// Whether `local` came from declared operations.
    transformed: bool,

    pub mesh: Option<Mesh>,
    pub light: Option<Light>,
    pub lod: Option<Box<Lod>>,
    pub children: Vec<RenderNode>,

    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl RenderNode {
    /// A root-level node with identity transforms.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            local: Affine3A::IDENTITY,
            world: Arc::new(Affine3A::IDENTITY),
            transformed: false,
            mesh: None,
            light: None,
            lod: None,
            children: Vec::new(),
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    /// A node placed under `parent_world`, with an optional local matrix.
    #[must_use]
    pub fn with_transform(
        name: &str,
        parent_world: &Arc<Affine3A>,
        local: Option<Affine3A>,
    ) -> Self {
        let world = crate::scene::transform::resolve_world(parent_world, local.as_ref());
        Self {
            local: local.unwrap_or(Affine3A::IDENTITY),
            world,
            transformed: local.is_some(),
            ..Self::new(name)
        }
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world
    }

    /// The shared world matrix handle.
    #[inline]
    #[must_use]
    pub fn world_arc(&self) -> &Arc<Affine3A> {
        &self.world
    }

    #[inline]
    #[must_use]
    pub fn has_own_transform(&self) -> bool {
        self.transformed
    }

    /// Re-derives world matrices for this subtree under a new parent.
    pub fn rebase(&mut self, parent_world: &Arc<Affine3A>) {
        let local = self.transformed.then_some(&self.local);
        self.world = crate::scene::transform::resolve_world(parent_world, local);

        let world = Arc::clone(&self.world);
        for child in &mut self.children {
            child.rebase(&world);
        }
        if let Some(lod) = &mut self.lod {
            for level in lod.levels_mut() {
                level.node.rebase(&world);
            }
        }
    }

    /// Depth-first search by source id, including LOD levels.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&RenderNode> {
        if self.name == name {
            return Some(self);
        }
        self.children
            .iter()
            .chain(self.lod.iter().flat_map(|lod| lod.levels().iter().map(|l| &l.node)))
            .find_map(|child| child.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut RenderNode> {
        if self.name == name {
            return Some(self);
        }
        let lod_nodes = self
            .lod
            .iter_mut()
            .flat_map(|lod| lod.levels_mut().iter_mut().map(|l| &mut l.node));
        self.children
            .iter_mut()
            .chain(lod_nodes)
            .find_map(|child| child.find_mut(name))
    }

    /// Calls `f` on every node of the subtree (pre-order, LOD levels after
    /// children).
    pub fn traverse<'a>(&'a self, f: &mut impl FnMut(&'a RenderNode)) {
        f(self);
        for child in &self.children {
            child.traverse(f);
        }
        if let Some(lod) = &self.lod {
            for level in lod.levels() {
                level.node.traverse(f);
            }
        }
    }

    /// Number of nodes in the subtree, this one included.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        self.traverse(&mut |_| count += 1);
        count
    }

    /// World-space bounds of every mesh in the subtree.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bounds = BoundingBox::EMPTY;
        self.traverse(&mut |node| {
            if let Some(mesh) = &node.mesh {
                bounds = bounds.union(&mesh.bounding_box().transform(node.world_matrix()));
            }
        });
        bounds
    }
}
