use super::grid_indices;
use crate::description::BoxParams;
use crate::errors::{Result, SceneError};
use crate::resources::geometry::Geometry;

#[derive(Default)]
struct BoxBuffers {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
}

impl BoxBuffers {
    /// One subdivided face. `u`/`v`/`w` are axis indices; the face lies at
    /// `w = depth / 2` with its normal along the sign of `depth`.
    #[allow(clippy::similar_names)]
    fn build_plane(
        &mut self,
        (u, v, w): (usize, usize, usize),
        (udir, vdir): (f32, f32),
        (width, height, depth): (f32, f32, f32),
        (grid_x, grid_y): (u32, u32),
    ) {
        let segment_width = width / grid_x as f32;
        let segment_height = height / grid_y as f32;
        let width_half = width / 2.0;
        let height_half = height / 2.0;
        let depth_half = depth / 2.0;
        let base = self.positions.len() as u32;

        for iy in 0..=grid_y {
            let y = iy as f32 * segment_height - height_half;
            for ix in 0..=grid_x {
                let x = ix as f32 * segment_width - width_half;

                let mut position = [0.0; 3];
                position[u] = x * udir;
                position[v] = y * vdir;
                position[w] = depth_half;
                self.positions.push(position);

                let mut normal = [0.0; 3];
                normal[w] = depth.signum();
                self.normals.push(normal);

                self.uvs
                    .push([ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32]);
            }
        }

        grid_indices(base, grid_x, grid_y, &mut self.indices);
    }
}

/// Axis-aligned box between two corners, centered at the corners' midpoint
/// (so the result always sits around the origin).
pub fn create_box(params: &BoxParams) -> Result<Geometry> {
    let size = (params.xyz2 - params.xyz1).abs();
    if size.min_element() <= 0.0 {
        return Err(SceneError::DegenerateGeometry(format!(
            "box with corners {} and {} has no volume",
            params.xyz1, params.xyz2
        )));
    }

    let (width, height, depth) = (size.x, size.y, size.z);
    let gx = params.parts_x.max(1);
    let gy = params.parts_y.max(1);
    let gz = params.parts_z.max(1);

    let mut buffers = BoxBuffers::default();
    // +X, -X
    buffers.build_plane((2, 1, 0), (-1.0, -1.0), (depth, height, width), (gz, gy));
    buffers.build_plane((2, 1, 0), (1.0, -1.0), (depth, height, -width), (gz, gy));
    // +Y, -Y
    buffers.build_plane((0, 2, 1), (1.0, 1.0), (width, depth, height), (gx, gz));
    buffers.build_plane((0, 2, 1), (1.0, -1.0), (width, depth, -height), (gx, gz));
    // +Z, -Z
    buffers.build_plane((0, 1, 2), (1.0, -1.0), (width, height, depth), (gx, gy));
    buffers.build_plane((0, 1, 2), (-1.0, -1.0), (width, height, -depth), (gx, gy));

    Ok(Geometry::from_buffers(
        &buffers.positions,
        &buffers.normals,
        &buffers.uvs,
        &buffers.indices,
    ))
}
