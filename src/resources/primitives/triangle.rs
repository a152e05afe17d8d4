use crate::description::TriangleParams;
use crate::errors::{Result, SceneError};
use crate::resources::geometry::Geometry;

/// Flat triangle through three points, visible from both sides.
///
/// UVs follow the triangle's angles: with `a = |p1p2|` and θ the angle at
/// `p1` (law of cosines over the three side lengths), the UVs are `(0,0)`,
/// `(a,0)` and `(a·cosθ, a·sinθ)`.
pub fn create_triangle(params: &TriangleParams) -> Result<Geometry> {
    let (p1, p2, p3) = (params.xyz1, params.xyz2, params.xyz3);

    let cross = (p2 - p1).cross(p3 - p1);
    let normal = cross.try_normalize().ok_or_else(|| {
        SceneError::DegenerateGeometry(format!("triangle {p1}, {p2}, {p3} is collinear"))
    })?;

    let a = p1.distance(p2);
    let b = p2.distance(p3);
    let c = p1.distance(p3);

    // Law of cosines for the angle at p1
    let cos_theta = ((a * a - b * b + c * c) / (2.0 * a * c)).clamp(-1.0, 1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    let positions = [p1.to_array(), p2.to_array(), p3.to_array()];
    let normals = [normal.to_array(); 3];
    let uvs = [[0.0, 0.0], [a, 0.0], [a * cos_theta, a * sin_theta]];
    let indices = [0, 1, 2, 2, 1, 0];

    Ok(Geometry::from_buffers(&positions, &normals, &uvs, &indices))
}
