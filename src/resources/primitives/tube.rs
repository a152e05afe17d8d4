use glam::Vec3;

use crate::description::TrackParams;
use crate::errors::{Result, SceneError};
use crate::resources::geometry::{Attribute, Geometry, VertexFormat};

const TRACK_COLOR: [f32; 3] = [0.8, 0.8, 0.8];

/// Corner offsets of the cross-section as `(normal sign, binormal sign)`.
const CORNERS: [(f32, f32); 4] = [(-1.0, 1.0), (1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)];
const CORNER_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Quad-strip indices between cross-section ring `i` (0..3) and the next ring
/// (4..7), relative to ring `i`'s first vertex.
const SEGMENT_INDICES: [u32; 36] = [
    0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4, 0, 4, 7, 7, 3, 0, 1, 5, 6, 6, 2, 1, 0, 1, 5, 5, 4, 0, 2,
    3, 7, 7, 6, 2,
];

/// Local frame along the sampled curve.
///
/// Tangent points at the next sample, normal is world-up × tangent and
/// binormal is tangent × normal. Zero-length steps reuse the previous frame.
fn frames(samples: &[Vec3], closed: bool) -> Vec<(Vec3, Vec3)> {
    let n = samples.len();
    let mut out: Vec<(Vec3, Vec3)> = Vec::with_capacity(n);
    let mut previous = (Vec3::X, Vec3::Y);

    for i in 0..n {
        let next = if i + 1 < n {
            Some(samples[i + 1])
        } else if closed {
            Some(samples[0])
        } else {
            None
        };

        let frame = next
            .and_then(|next| (next - samples[i]).try_normalize())
            .and_then(|tangent| {
                let normal = Vec3::Y.cross(tangent).try_normalize()?;
                let binormal = tangent.cross(normal).normalize();
                Some((normal, binormal))
            })
            .unwrap_or(previous);

        previous = frame;
        out.push(frame);
    }
    out
}

/// Ribbon along `samples`.
///
/// Every sample gets a four-vertex cross-section spanning `width` along the
/// normal and `depth` along the binormal, lifted by half the `height`.
/// Consecutive sections are joined; on a closed track the last section joins
/// back onto the first.
pub fn create_track(samples: &[Vec3], params: &TrackParams) -> Result<Geometry> {
    if samples.len() < 2 {
        return Err(SceneError::DegenerateGeometry(format!(
            "track needs at least 2 samples, got {}",
            samples.len()
        )));
    }

    let half_width = params.width / 2.0;
    let half_height = params.height / 2.0;
    let half_depth = params.depth / 2.0;

    let mut positions = Vec::with_capacity(samples.len() * 4);
    let mut normals = Vec::with_capacity(samples.len() * 4);
    let mut uvs = Vec::with_capacity(samples.len() * 4);

    for (point, (normal, binormal)) in samples.iter().zip(frames(samples, params.closed)) {
        for ((ns, bs), uv) in CORNERS.iter().zip(CORNER_UVS) {
            let mut corner = *point + normal * (ns * half_width) + binormal * (bs * half_depth);
            corner.y = point.y + half_height;
            positions.push(corner.to_array());
            normals.push(binormal.to_array());
            uvs.push(uv);
        }
    }

    let ring_count = samples.len() as u32;
    let segments = if params.closed { ring_count } else { ring_count - 1 };
    let mut indices = Vec::with_capacity(segments as usize * SEGMENT_INDICES.len());
    for i in 0..segments {
        let base = i * 4;
        let wraps = i + 1 == ring_count;
        indices.extend(SEGMENT_INDICES.iter().map(|&k| {
            if wraps && k > 3 { k - 4 } else { base + k }
        }));
    }

    let colors = vec![TRACK_COLOR; positions.len()];
    let mut geo = Geometry::from_buffers(&positions, &normals, &uvs, &indices);
    geo.set_attribute("color", Attribute::new_planar(&colors, VertexFormat::Float32x3));
    Ok(geo)
}
