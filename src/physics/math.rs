//! Small vector helpers shared by the solvers
//!
//! cgmath covers the basics; these add the guarded normalisation and the
//! projection/reflection pair the collision formulas are written in terms of.

use cgmath::{InnerSpace, Vector3};

/// Normalises `v`, returning `None` for zero-length or non-finite input.
pub fn try_normalize(v: Vector3<f32>) -> Option<Vector3<f32>> {
    let length = v.magnitude();
    if length > f32::EPSILON && length.is_finite() {
        Some(v / length)
    } else {
        None
    }
}

/// Component of `v` along the unit vector `axis`.
pub fn project_onto(v: Vector3<f32>, axis: Vector3<f32>) -> Vector3<f32> {
    axis * v.dot(axis)
}

/// Mirrors `v` across the plane whose unit normal is `normal`.
pub fn reflect(v: Vector3<f32>, normal: Vector3<f32>) -> Vector3<f32> {
    v - normal * (2.0 * v.dot(normal))
}

/// True when every component is finite.
pub fn is_finite(v: Vector3<f32>) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}
