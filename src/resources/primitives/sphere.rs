use std::f32::consts::PI;

use crate::description::SphereParams;
use crate::resources::geometry::Geometry;

/// Sphere or sphere section around the origin.
///
/// `phi` sweeps around Y (longitude), `theta` runs from the north pole
/// (latitude). Full spheres skip the degenerate pole triangles.
#[must_use]
pub fn create_sphere(params: &SphereParams) -> Geometry {
    let radius = params.radius;
    let width_segments = params.slices.max(3);
    let height_segments = params.stacks.max(2);
    let theta_end = (params.theta_start + params.theta_length).min(PI);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();
    let mut grid = Vec::with_capacity(height_segments as usize + 1);

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let theta = params.theta_start + v * params.theta_length;
        let (sin_theta, cos_theta) = theta.sin_cos();

        // Pole rows get a half-step U offset so the texture does not pinch
        let u_offset = if iy == 0 && params.theta_start == 0.0 {
            0.5 / width_segments as f32
        } else if iy == height_segments && theta_end >= PI {
            -0.5 / width_segments as f32
        } else {
            0.0
        };

        let mut row = Vec::with_capacity(width_segments as usize + 1);
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = params.phi_start + u * params.phi_length;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = [-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta];
            row.push(positions.len() as u32);
            positions.push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            normals.push(normal);
            uvs.push([u + u_offset, 1.0 - v]);
        }
        grid.push(row);
    }

    for iy in 0..height_segments as usize {
        for ix in 0..width_segments as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];

            if iy != 0 || params.theta_start > 0.0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments as usize - 1 || theta_end < PI {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    Geometry::from_buffers(&positions, &normals, &uvs, &indices)
}
