//! Geometry builders
//!
//! Pure functions turning a [`Representation`] into a [`Geometry`]. Identical
//! input always produces identical buffers.

pub mod box_shape;
pub mod curve;
pub mod cylinder;
pub mod nurbs;
pub mod polygon;
pub mod rectangle;
pub mod skybox;
pub mod sphere;
pub mod triangle;
pub mod tube;

pub use box_shape::create_box;
pub use curve::sample_catmull_rom;
pub use cylinder::create_cylinder;
pub use nurbs::create_nurbs_surface;
pub use polygon::create_polygon;
pub use rectangle::create_rectangle;
pub use skybox::{SKYBOX_FACES, create_skybox};
pub use sphere::create_sphere;
pub use triangle::create_triangle;
pub use tube::create_track;

use crate::description::Representation;
use crate::errors::{Result, SceneError};
use crate::settings::CompilerSettings;

/// Builds the geometry of a primitive.
///
/// `Model` primitives are instantiated from the asset library rather than
/// built here and yield `UnsupportedPrimitive`, as do unknown subtypes.
pub fn build_geometry(
    representation: &Representation,
    settings: &CompilerSettings,
) -> Result<crate::resources::Geometry> {
    match representation {
        Representation::Rectangle(params) => create_rectangle(params),
        Representation::Box(params) => create_box(params),
        Representation::Cylinder(params) => {
            let mut params = params.clone();
            if params.slices == 0 {
                params.slices = settings.cylinder_segments;
            }
            Ok(create_cylinder(&params))
        }
        Representation::Sphere(params) => {
            let mut params = params.clone();
            if params.slices == 0 {
                params.slices = settings.sphere_segments.0;
            }
            if params.stacks == 0 {
                params.stacks = settings.sphere_segments.1;
            }
            Ok(create_sphere(&params))
        }
        Representation::Triangle(params) => create_triangle(params),
        Representation::Polygon(params) => Ok(create_polygon(params)),
        Representation::Skybox(params) => Ok(create_skybox(params)),
        Representation::Nurbs(params) => create_nurbs_surface(params),
        Representation::Track(params) => {
            let samples = if params.control_points.is_empty() {
                params.points.clone()
            } else {
                let per_span = if params.samples_per_span == 0 {
                    settings.track_samples_per_span
                } else {
                    params.samples_per_span
                };
                sample_catmull_rom(&params.control_points, params.closed, per_span)
            };
            create_track(&samples, params)
        }
        Representation::Model { .. } | Representation::Unsupported(_) => Err(
            SceneError::UnsupportedPrimitive(representation.subtype().to_string()),
        ),
    }
}

/// Emits the two triangles of every cell of a `(cols + 1) × (rows + 1)`
/// row-major vertex grid.
pub(crate) fn grid_indices(base: u32, cols: u32, rows: u32, indices: &mut Vec<u32>) {
    let stride = cols + 1;
    for iy in 0..rows {
        for ix in 0..cols {
            let a = base + ix + stride * iy;
            let b = base + ix + stride * (iy + 1);
            let c = base + (ix + 1) + stride * (iy + 1);
            let d = base + (ix + 1) + stride * iy;

            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
}
