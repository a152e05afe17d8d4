use glam::Vec3;

use crate::description::NurbsParams;
use crate::errors::{Result, SceneError};
use crate::resources::geometry::Geometry;

/// Bernstein basis values and first derivatives of degree `n` at `t`.
fn bernstein(n: u32, t: f32) -> (Vec<f32>, Vec<f32>) {
    let n = n as usize;
    // Pascal's triangle row n
    let mut binom = vec![1.0_f32; n + 1];
    for i in 1..n {
        for k in (1..=i).rev() {
            binom[k] += binom[k - 1];
        }
    }

    let pow = |base: f32, exp: usize| -> f32 {
        if exp == 0 { 1.0 } else { base.powi(exp as i32) }
    };

    let values = (0..=n)
        .map(|i| binom[i] * pow(t, i) * pow(1.0 - t, n - i))
        .collect();

    // d/dt B(n,i) = n * (B(n-1,i-1) - B(n-1,i))
    let derivs = if n == 0 {
        vec![0.0]
    } else {
        let (lower, _) = bernstein(n as u32 - 1, t);
        (0..=n)
            .map(|i| {
                let left = if i > 0 { lower[i - 1] } else { 0.0 };
                let right = if i < n { lower[i] } else { 0.0 };
                n as f32 * (left - right)
            })
            .collect()
    };

    (values, derivs)
}

struct Surface<'a> {
    degree_u: u32,
    degree_v: u32,
    points: &'a [Vec3],
    weights: Option<&'a [f32]>,
}

impl Surface<'_> {
    /// Position and unnormalized normal at `(u, v)`.
    fn evaluate(&self, u: f32, v: f32) -> (Vec3, Vec3) {
        let (bu, du) = bernstein(self.degree_u, u);
        let (bv, dv) = bernstein(self.degree_v, v);
        let cols = self.degree_v as usize + 1;

        let mut a = Vec3::ZERO;
        let mut a_u = Vec3::ZERO;
        let mut a_v = Vec3::ZERO;
        let mut w = 0.0;
        let mut w_u = 0.0;
        let mut w_v = 0.0;

        for (i, (bui, dui)) in bu.iter().zip(&du).enumerate() {
            for (j, (bvj, dvj)) in bv.iter().zip(&dv).enumerate() {
                let idx = i * cols + j;
                let weight = self.weights.map_or(1.0, |ws| ws[idx]);
                let p = self.points[idx] * weight;

                a += p * (bui * bvj);
                a_u += p * (dui * bvj);
                a_v += p * (bui * dvj);
                w += weight * bui * bvj;
                w_u += weight * dui * bvj;
                w_v += weight * bui * dvj;
            }
        }

        let s = a / w;
        let s_u = (a_u - s * w_u) / w;
        let s_v = (a_v - s * w_v) / w;
        (s, s_u.cross(s_v))
    }
}

/// Tessellates a rational Bézier patch.
///
/// The control grid must hold exactly `(degree_u + 1) × (degree_v + 1)`
/// points, U-major. The patch is sampled on a `(parts_u + 1) × (parts_v + 1)`
/// vertex grid.
pub fn create_nurbs_surface(params: &NurbsParams) -> Result<Geometry> {
    if params.degree_u == 0 || params.degree_v == 0 {
        return Err(SceneError::InvalidNurbs(format!(
            "degrees must be at least 1, got {}x{}",
            params.degree_u, params.degree_v
        )));
    }

    let expected = (params.degree_u as usize + 1) * (params.degree_v as usize + 1);
    if params.control_points.len() != expected {
        return Err(SceneError::InvalidNurbs(format!(
            "degree {}x{} needs {expected} control points, got {}",
            params.degree_u,
            params.degree_v,
            params.control_points.len()
        )));
    }

    let weights = if params.weights.is_empty() {
        None
    } else if params.weights.len() != expected {
        return Err(SceneError::InvalidNurbs(format!(
            "{} weights for {expected} control points",
            params.weights.len()
        )));
    } else if params.weights.iter().any(|w| *w <= 0.0) {
        return Err(SceneError::InvalidNurbs("weights must be positive".into()));
    } else {
        Some(params.weights.as_slice())
    };

    let surface = Surface {
        degree_u: params.degree_u,
        degree_v: params.degree_v,
        points: &params.control_points,
        weights,
    };

    let parts_u = params.parts_u.max(1);
    let parts_v = params.parts_v.max(1);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();

    for iu in 0..=parts_u {
        let u = iu as f32 / parts_u as f32;
        for iv in 0..=parts_v {
            let v = iv as f32 / parts_v as f32;
            let (p, n) = surface.evaluate(u, v);

            positions.push(p.to_array());
            normals.push(n.normalize_or(Vec3::Z).to_array());
            uvs.push([u, v]);
        }
    }

    if positions.iter().any(|p| !Vec3::from_array(*p).is_finite()) {
        return Err(SceneError::InvalidNurbs("surface evaluates to non-finite points".into()));
    }

    let stride = parts_v + 1;
    let mut indices = Vec::new();
    for iu in 0..parts_u {
        for iv in 0..parts_v {
            let a = iu * stride + iv;
            let b = a + stride;
            let c = b + 1;
            let d = a + 1;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Ok(Geometry::from_buffers(&positions, &normals, &uvs, &indices))
}
