//! Vector and rotation helpers shared by the force model, the collision pass and the predictor.

use nalgebra::{UnitQuaternion, Vector3};

/// Build a vector from an `[x, y, z]` triple, replacing non-finite components by zero.
pub fn vec3(a: [f64; 3]) -> Vector3<f64> {
    let clean = |v: f64| if v.is_finite() { v } else { 0.0 };
    Vector3::new(clean(a[0]), clean(a[1]), clean(a[2]))
}

pub fn to_array(v: &Vector3<f64>) -> [f64; 3] {
    [v.x, v.y, v.z]
}

/// Unit direction of `v`, or the zero vector when `v` is (nearly) zero.
pub fn direction(v: &Vector3<f64>) -> Vector3<f64> {
    v.try_normalize(1.0e-12).unwrap_or_else(Vector3::zeros)
}

pub fn distance(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    (a - b).norm()
}

/// Orientation from Euler angles applied in X, then Y, then Z order (intrinsic),
/// i.e. `R = Rx * Ry * Rz`.
pub fn euler_xyz(angles: &Vector3<f64>) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angles.x)
        * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angles.y)
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angles.z)
}

/// Express a world point in the local frame of a box centred at `origin` with `orientation`.
pub fn to_local(
    point: &Vector3<f64>,
    origin: &Vector3<f64>,
    orientation: &UnitQuaternion<f64>,
) -> Vector3<f64> {
    orientation.inverse_transform_vector(&(point - origin))
}

/// Closest point of the axis-aligned box `[-half, half]` to `local`.
pub fn clamp_to_box(local: &Vector3<f64>, half: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(
        local.x.clamp(-half.x, half.x),
        local.y.clamp(-half.y, half.y),
        local.z.clamp(-half.z, half.z),
    )
}

/// True when `point` lies inside the oriented box, optionally inflated by `margin` on every axis.
pub fn point_in_oriented_box(
    point: &Vector3<f64>,
    origin: &Vector3<f64>,
    orientation: &UnitQuaternion<f64>,
    half: &Vector3<f64>,
    margin: f64,
) -> bool {
    let local = to_local(point, origin, orientation);
    local.x.abs() < half.x + margin
        && local.y.abs() < half.y + margin
        && local.z.abs() < half.z + margin
}
