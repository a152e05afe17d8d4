use glam::{Vec2, Vec3};

use super::grid_indices;
use crate::description::RectangleParams;
use crate::errors::{Result, SceneError};
use crate::resources::geometry::Geometry;

/// Subdivided rectangle in the XY plane facing +Z.
///
/// Built between the two corners, then moved so the corners' midpoint sits at
/// the origin.
pub fn create_rectangle(params: &RectangleParams) -> Result<Geometry> {
    let min = params.xy1.min(params.xy2);
    let max = params.xy1.max(params.xy2);
    let size = max - min;
    if size.x <= 0.0 || size.y <= 0.0 {
        return Err(SceneError::DegenerateGeometry(format!(
            "rectangle with corners {} and {} has no area",
            params.xy1, params.xy2
        )));
    }

    let grid_x = params.parts_x.max(1);
    let grid_y = params.parts_y.max(1);
    let segment = size / Vec2::new(grid_x as f32, grid_y as f32);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    // Rows run top to bottom so the shared grid winding faces +Z
    for iy in 0..=grid_y {
        let y = max.y - iy as f32 * segment.y;
        for ix in 0..=grid_x {
            let x = min.x + ix as f32 * segment.x;

            positions.push([x, y, 0.0]);
            normals.push([0.0, 0.0, 1.0]);
            uvs.push([ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32]);
        }
    }
    grid_indices(0, grid_x, grid_y, &mut indices);

    let mut geo = Geometry::from_buffers(&positions, &normals, &uvs, &indices);
    let center = (params.xy1 + params.xy2) * 0.5;
    geo.translate(-Vec3::new(center.x, center.y, 0.0));
    Ok(geo)
}
