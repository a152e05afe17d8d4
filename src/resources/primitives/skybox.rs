use glam::Vec3;

use crate::description::SkyboxParams;
use crate::resources::geometry::Geometry;

/// Face names in group / material-slot order.
pub const SKYBOX_FACES: [&str; 6] = ["front", "back", "up", "down", "left", "right"];

/// `(outward direction, u axis, v axis)` per face, with `u × v` pointing
/// into the cube.
const FACE_AXES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::NEG_Z, Vec3::X, Vec3::Y),
    (Vec3::Z, Vec3::NEG_X, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::X, Vec3::Z, Vec3::Y),
];

/// Inward-facing cube of `size` around `center`.
///
/// Each face is its own geometry group (material index = position in
/// [`SKYBOX_FACES`]) so it can carry its own texture.
#[must_use]
pub fn create_skybox(params: &SkyboxParams) -> Geometry {
    let half = params.size.abs() * 0.5;

    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut uvs = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (dir, u, v) in FACE_AXES {
        let base = positions.len() as u32;
        let inward = (-dir).to_array();
        for (su, sv, uv) in [
            (-1.0, -1.0, [0.0, 0.0]),
            (1.0, -1.0, [1.0, 0.0]),
            (1.0, 1.0, [1.0, 1.0]),
            (-1.0, 1.0, [0.0, 1.0]),
        ] {
            let corner = params.center + (dir + u * su + v * sv) * half;
            positions.push(corner.to_array());
            normals.push(inward);
            uvs.push(uv);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    let mut geo = Geometry::from_buffers(&positions, &normals, &uvs, &indices);
    for face in 0..6 {
        geo.add_group(face * 6, 6, face);
    }
    geo
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_wind_towards_the_inside() {
        let geo = create_skybox(&SkyboxParams {
            size: Vec3::splat(10.0),
            center: Vec3::ZERO,
            emissive: Vec3::ZERO,
            intensity: 1.0,
            faces: Default::default(),
        });

        let positions = geo.positions();
        for tri in geo.indices().chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(positions[i as usize]));
            let face_normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            // Facing inward means pointing back towards the center
            assert!(face_normal.dot(-centroid) > 0.0);
        }
        assert_eq!(geo.groups.len(), 6);
        assert_eq!(geo.bounding_box().max, Vec3::splat(5.0));
    }
}
