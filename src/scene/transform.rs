//! Transform resolution
//!
//! A node's operations are folded per type, never in list order: every
//! translate (in list order) into `T`, every rotate into `R`, every scale
//! into `S`, and the node's local matrix is `T · R · S`. Each rotate applies
//! its X, then Y, then Z angle (degrees).
//!
//! A node without operations does not get a matrix of its own; it shares its
//! parent's world matrix (the same `Arc`).

use std::sync::Arc;

use glam::{Affine3A, Mat3, Vec3};

use crate::description::TransformOp;
use crate::errors::SceneError;

/// Folds `ops` into a local matrix.
///
/// Returns `None` when no supported operation is present. Unsupported
/// operations are handed to `report` and skipped.
pub fn resolve_local(ops: &[TransformOp], mut report: impl FnMut(SceneError)) -> Option<Affine3A> {
    let mut translation = Vec3::ZERO;
    let mut rotation = Mat3::IDENTITY;
    let mut scale = Vec3::ONE;
    let mut any = false;

    for op in ops {
        match op {
            TransformOp::Translate(t) => {
                translation += *t;
                any = true;
            }
            TransformOp::Rotate(degrees) => {
                rotation = rotation
                    * Mat3::from_rotation_x(degrees.x.to_radians())
                    * Mat3::from_rotation_y(degrees.y.to_radians())
                    * Mat3::from_rotation_z(degrees.z.to_radians());
                any = true;
            }
            TransformOp::Scale(s) => {
                scale *= *s;
                any = true;
            }
            TransformOp::Unsupported(kind) => {
                report(SceneError::UnsupportedTransform(kind.clone()));
            }
        }
    }

    any.then(|| {
        Affine3A::from_translation(translation)
            * Affine3A::from_mat3(rotation)
            * Affine3A::from_scale(scale)
    })
}

/// World matrix of a node given its parent's.
///
/// Without a local matrix the parent's `Arc` is returned as is.
#[must_use]
pub fn resolve_world(parent_world: &Arc<Affine3A>, local: Option<&Affine3A>) -> Arc<Affine3A> {
    match local {
        Some(local) => Arc::new(**parent_world * *local),
        None => Arc::clone(parent_world),
    }
}
