use glam::Vec3;

/// Uniform Catmull-Rom point on the span `p1 → p2`.
fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

/// Samples a Catmull-Rom spline through `points`.
///
/// Each span between consecutive control points yields `samples_per_span`
/// samples. A closed curve also spans from the last point back to the first
/// and does not repeat the start point; an open curve ends exactly on its
/// last control point. Open ends are extrapolated by reflection.
#[must_use]
pub fn sample_catmull_rom(points: &[Vec3], closed: bool, samples_per_span: u32) -> Vec<Vec3> {
    let n = points.len();
    if n < 2 {
        return points.to_vec();
    }

    let per_span = samples_per_span.max(1);
    let at = |i: isize| -> Vec3 {
        if closed {
            points[i.rem_euclid(n as isize) as usize]
        } else if i < 0 {
            2.0 * points[0] - points[1]
        } else if i as usize >= n {
            2.0 * points[n - 1] - points[n - 2]
        } else {
            points[i as usize]
        }
    };

    let spans = if closed { n } else { n - 1 };
    let mut samples = Vec::with_capacity(spans * per_span as usize + 1);
    for span in 0..spans as isize {
        let (p0, p1, p2, p3) = (at(span - 1), at(span), at(span + 1), at(span + 2));
        for s in 0..per_span {
            let t = s as f32 / per_span as f32;
            samples.push(catmull_rom(p0, p1, p2, p3, t));
        }
    }
    if !closed {
        samples.push(points[n - 1]);
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_passes_through_control_points() {
        let points = [Vec3::ZERO, Vec3::X, Vec3::new(1.0, 0.0, 1.0), Vec3::Z];
        let samples = sample_catmull_rom(&points, true, 4);
        assert_eq!(samples.len(), 16);
        for (i, p) in points.iter().enumerate() {
            assert!(samples[i * 4].abs_diff_eq(*p, 1e-6));
        }

        let open = sample_catmull_rom(&points, false, 4);
        assert_eq!(open.len(), 3 * 4 + 1);
        assert_eq!(open.last(), Some(&Vec3::Z));
    }
}
