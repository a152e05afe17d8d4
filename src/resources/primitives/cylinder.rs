use glam::Vec3;

use crate::description::CylinderParams;
use crate::resources::geometry::Geometry;

#[derive(Default)]
struct Buffers {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
}

/// Cylinder or truncated cone along Y, centered at the origin.
///
/// `base` is the bottom radius and `top` the top radius. With
/// `caps_close == false` the ends stay open.
#[must_use]
pub fn create_cylinder(params: &CylinderParams) -> Geometry {
    let radial = params.slices.max(3);
    let height_segments = params.stacks.max(1);
    let half_height = params.height / 2.0;

    let mut b = Buffers::default();

    // -- Torso --
    let slope = (params.base - params.top) / params.height;
    let mut rows = Vec::with_capacity(height_segments as usize + 1);
    for y in 0..=height_segments {
        let v = y as f32 / height_segments as f32;
        let radius = v * (params.base - params.top) + params.top;
        let mut row = Vec::with_capacity(radial as usize + 1);

        for x in 0..=radial {
            let u = x as f32 / radial as f32;
            let theta = u * params.theta_length + params.theta_start;
            let (sin, cos) = theta.sin_cos();

            row.push(b.positions.len() as u32);
            b.positions
                .push([radius * sin, -v * params.height + half_height, radius * cos]);
            b.normals
                .push(Vec3::new(sin, slope, cos).normalize_or_zero().to_array());
            b.uvs.push([u, 1.0 - v]);
        }
        rows.push(row);
    }

    for x in 0..radial as usize {
        for y in 0..height_segments as usize {
            let a = rows[y][x];
            let bb = rows[y + 1][x];
            let c = rows[y + 1][x + 1];
            let d = rows[y][x + 1];
            b.indices.extend_from_slice(&[a, bb, d, bb, c, d]);
        }
    }

    // -- Caps --
    if params.caps_close {
        if params.top > 0.0 {
            build_cap(&mut b, params, radial, true);
        }
        if params.base > 0.0 {
            build_cap(&mut b, params, radial, false);
        }
    }

    Geometry::from_buffers(&b.positions, &b.normals, &b.uvs, &b.indices)
}

fn build_cap(b: &mut Buffers, params: &CylinderParams, radial: u32, top: bool) {
    let radius = if top { params.top } else { params.base };
    let sign = if top { 1.0 } else { -1.0 };
    let y = params.height / 2.0 * sign;

    // One center vertex per segment keeps the cap UVs seamless
    let center_start = b.positions.len() as u32;
    for x in 1..=radial {
        b.positions.push([0.0, y, 0.0]);
        b.normals.push([0.0, sign, 0.0]);
        b.uvs.push([(x as f32 - 0.5) / radial as f32, if top { 1.0 } else { 0.0 }]);
    }

    let rim_start = b.positions.len() as u32;
    for x in 0..=radial {
        let u = x as f32 / radial as f32;
        let theta = u * params.theta_length + params.theta_start;
        let (sin, cos) = theta.sin_cos();

        b.positions.push([radius * sin, y, radius * cos]);
        b.normals.push([0.0, sign, 0.0]);
        b.uvs.push([cos * 0.5 + 0.5, sin * 0.5 * sign + 0.5]);
    }

    for x in 0..radial {
        let c = center_start + x;
        let i = rim_start + x;
        if top {
            b.indices.extend_from_slice(&[i, i + 1, c]);
        } else {
            b.indices.extend_from_slice(&[i + 1, i, c]);
        }
    }
}
