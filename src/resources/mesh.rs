use crate::resources::geometry::{BoundingBox, GeometryHandle};
use crate::resources::material::MaterialHandle;

#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,

    // === Resource references ===
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
    /// Per-group materials, indexed by `GeometryGroup::material_index`.
    /// Empty for single-material geometry.
    pub group_materials: Vec<MaterialHandle>,

    // === Instance render settings ===
    pub visible: bool,
    pub cast_shadows: bool,
    pub receive_shadows: bool,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: GeometryHandle, material: MaterialHandle) -> Self {
        Self {
            name: "Mesh".to_string(),
            geometry,
            material,
            group_materials: Vec::new(),
            visible: true,
            cast_shadows: false,
            receive_shadows: false,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Material used for a geometry group, falling back to the main one.
    #[must_use]
    pub fn material_for_group(&self, material_index: u32) -> &MaterialHandle {
        self.group_materials
            .get(material_index as usize)
            .unwrap_or(&self.material)
    }

    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        self.geometry.bounding_box()
    }
}
