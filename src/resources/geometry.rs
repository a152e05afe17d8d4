use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::{Affine3A, Vec3};
use rustc_hash::FxHashMap;
use uuid::Uuid;

pub type GeometryHandle = Arc<Geometry>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    Float32x2,
    Float32x3,
    Float32x4,
}

impl VertexFormat {
    #[must_use]
    pub const fn components(self) -> usize {
        match self {
            Self::Float32x2 => 2,
            Self::Float32x3 => 3,
            Self::Float32x4 => 4,
        }
    }
}

/// One planar vertex attribute.
///
/// Data is kept as flat `f32`s so views of any vector width can be cast out
/// of it without alignment concerns.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub data: Arc<Vec<f32>>,
    /// Data version for change detection
    pub version: u64,
    pub format: VertexFormat,
    pub count: u32,
}

static NEXT_ATTR_VERSION: AtomicU64 = AtomicU64::new(1);

impl Attribute {
    pub fn new_planar<T: bytemuck::Pod>(data: &[T], format: VertexFormat) -> Self {
        let floats: &[f32] = bytemuck::cast_slice(data);
        Self {
            data: Arc::new(floats.to_vec()),
            version: NEXT_ATTR_VERSION.fetch_add(1, Ordering::Relaxed),
            format,
            count: (floats.len() / format.components()) as u32,
        }
    }

    /// Replaces the contents in place (copy-on-write if shared).
    pub fn update_data<T: bytemuck::Pod>(&mut self, new_data: &[T]) {
        let floats: &[f32] = bytemuck::cast_slice(new_data);
        let vec = Arc::make_mut(&mut self.data);
        vec.clear();
        vec.extend_from_slice(floats);
        self.count = (floats.len() / self.format.components()) as u32;
        self.version = NEXT_ATTR_VERSION.fetch_add(1, Ordering::Relaxed);
    }

    /// Typed view, e.g. `as_slice::<[f32; 3]>()`.
    #[must_use]
    pub fn as_slice<T: bytemuck::Pod>(&self) -> &[T] {
        bytemuck::cast_slice(self.data.as_slice())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.data.as_slice())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BoundingBox {
    /// Inverted box; the identity of [`union`](Self::union).
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points.into_iter().fold(Self::EMPTY, |b, p| Self {
            min: b.min.min(p),
            max: b.max.max(p),
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[must_use]
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[must_use]
    pub fn transform(&self, matrix: &Affine3A) -> Self {
        if self.is_empty() {
            return *self;
        }
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];
        Self::from_points(corners.into_iter().map(|p| matrix.transform_point3(p)))
    }
}

/// Index range drawn with one material slot (used by multi-material
/// primitives such as the skybox).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryGroup {
    pub start: u32,
    pub count: u32,
    pub material_index: u32,
}

#[derive(Debug, Clone)]
pub struct Geometry {
    pub uuid: Uuid,

    attributes: FxHashMap<String, Attribute>,
    indices: Option<Arc<Vec<u32>>>,
    pub groups: Vec<GeometryGroup>,

    bounding_box: BoundingBox,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            attributes: FxHashMap::default(),
            indices: None,
            groups: Vec::new(),
            bounding_box: BoundingBox::EMPTY,
        }
    }

    /// Builds a geometry from planar position/normal/uv arrays and a triangle
    /// list, computing its bounds.
    #[must_use]
    pub fn from_buffers(
        positions: &[[f32; 3]],
        normals: &[[f32; 3]],
        uvs: &[[f32; 2]],
        indices: &[u32],
    ) -> Self {
        let mut geo = Self::new();
        geo.set_attribute("position", Attribute::new_planar(positions, VertexFormat::Float32x3));
        geo.set_attribute("normal", Attribute::new_planar(normals, VertexFormat::Float32x3));
        geo.set_attribute("uv", Attribute::new_planar(uvs, VertexFormat::Float32x2));
        geo.set_indices(indices);
        geo.compute_bounding_volume();
        geo
    }

    pub fn attributes(&self) -> &FxHashMap<String, Attribute> {
        &self.attributes
    }

    pub fn set_attribute(&mut self, name: &str, attr: Attribute) {
        self.attributes.insert(name.to_string(), attr);
    }

    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn set_indices(&mut self, indices: &[u32]) {
        self.indices = Some(Arc::new(indices.to_vec()));
    }

    #[must_use]
    pub fn indices(&self) -> &[u32] {
        self.indices.as_deref().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn add_group(&mut self, start: u32, count: u32, material_index: u32) {
        self.groups.push(GeometryGroup {
            start,
            count,
            material_index,
        });
    }

    #[must_use]
    pub fn positions(&self) -> &[[f32; 3]] {
        self.get_attribute("position")
            .map(Attribute::as_slice::<[f32; 3]>)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn normals(&self) -> &[[f32; 3]] {
        self.get_attribute("normal")
            .map(Attribute::as_slice::<[f32; 3]>)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn uvs(&self) -> &[[f32; 2]] {
        self.get_attribute("uv")
            .map(Attribute::as_slice::<[f32; 2]>)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn colors(&self) -> Option<&[[f32; 3]]> {
        self.get_attribute("color").map(Attribute::as_slice::<[f32; 3]>)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions().len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices().len() / 3
    }

    pub fn compute_bounding_volume(&mut self) {
        self.bounding_box =
            BoundingBox::from_points(self.positions().iter().map(|p| Vec3::from_array(*p)));
    }

    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Translates every position by `offset` and refreshes the bounds.
    pub fn translate(&mut self, offset: Vec3) {
        if let Some(attr) = self.attributes.get_mut("position") {
            let moved: Vec<[f32; 3]> = attr
                .as_slice::<[f32; 3]>()
                .iter()
                .map(|p| (Vec3::from_array(*p) + offset).to_array())
                .collect();
            attr.update_data(&moved);
        }
        self.compute_bounding_volume();
    }
}
