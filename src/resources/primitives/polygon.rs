use std::f32::consts::TAU;

use crate::description::PolygonParams;
use crate::resources::geometry::{Attribute, Geometry, VertexFormat};

/// Radial fan of `stacks × slices` cells in the XY plane.
///
/// Vertex color goes linearly from `color_c` at the center to `color_p` at
/// the rim; UV is `(slice / slices, stack / stacks)`.
#[must_use]
pub fn create_polygon(params: &PolygonParams) -> Geometry {
    let stacks = params.stacks.max(1);
    let slices = params.slices.max(3);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut colors = Vec::new();

    for j in 0..=stacks {
        let v = j as f32 / stacks as f32;
        let ring = params.radius * v;
        let color = params.color_c.lerp(params.color_p, v);
        for i in 0..=slices {
            let u = i as f32 / slices as f32;
            let (sin, cos) = (u * TAU).sin_cos();

            positions.push([ring * cos, ring * sin, 0.0]);
            normals.push([0.0, 0.0, 1.0]);
            uvs.push([u, v]);
            colors.push(color.to_array());
        }
    }

    let mut indices = Vec::new();
    for j in 0..stacks {
        for i in 0..slices {
            let k = j * (slices + 1) + i;
            // The innermost ring collapses to the center point
            if j > 0 {
                indices.extend_from_slice(&[k, k + slices + 1, k + 1]);
            }
            indices.extend_from_slice(&[k + 1, k + slices + 1, k + slices + 2]);
        }
    }

    let mut geo = Geometry::from_buffers(&positions, &normals, &uvs, &indices);
    geo.set_attribute("color", Attribute::new_planar(&colors, VertexFormat::Float32x3));
    geo
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn colors_blend_from_center_to_rim() {
        let geo = create_polygon(&PolygonParams {
            radius: 1.0,
            stacks: 2,
            slices: 4,
            color_c: Vec3::ZERO,
            color_p: Vec3::ONE,
        });
        let colors = geo.colors().unwrap();
        assert_eq!(colors[0], [0.0, 0.0, 0.0]);
        assert_eq!(colors[5], [0.5, 0.5, 0.5]);
        assert_eq!(colors[10], [1.0, 1.0, 1.0]);
        assert_eq!(geo.uvs()[7], [0.5, 0.5]);
        assert_eq!(geo.triangle_count(), 4 + 4 * 2);
    }
}
