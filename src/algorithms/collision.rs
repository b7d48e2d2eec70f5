//! Narrow-phase contacts and impulse response.
//!
//! Handled pairs (mover first):
//! - sphere vs sphere: positional split and equal impulse split, regardless of mass;
//! - sphere vs box/car/wedge: the box is always an immovable obstacle;
//! - any body vs the ground plane `y = 0`.
//!
//! Every other combination (box vs box, box vs sphere with the box moving) is ignored.

use crate::math::{clamp_to_box, direction, point_in_oriented_box, to_local};
use crate::models::body::Body;
use crate::models::registry::BodyRegistry;
use crate::scene::ShapeKind;
use nalgebra::Vector3;

/// Friction scaling per sub-step: horizontal speed decays by `friction * dt * FRICTION_RATE`.
pub const FRICTION_RATE: f64 = 10.0;

/// Resolve every contact between the body at `index` and the rest of the registry.
/// Returns the number of contacts that were corrected.
pub fn resolve_contacts(registry: &mut BodyRegistry, index: usize, restitution: f64) -> usize {
    let mut contacts = 0;
    for j in 0..registry.len() {
        let Some((mover, other)) = registry.pair_mut(index, j) else {
            continue;
        };
        let hit = match (mover.kind(), other.kind()) {
            (ShapeKind::Sphere, ShapeKind::Sphere) => sphere_sphere(mover, other, restitution),
            (ShapeKind::Sphere, kind) if kind.is_box_like() => sphere_box(mover, other, restitution),
            _ => false,
        };
        if hit {
            log::trace!("contact {} <-> {}", mover.label(), other.label());
            contacts += 1;
        }
    }
    contacts
}

/// Separate two overlapping spheres and exchange an impulse along the contact normal.
///
/// A movable partner takes half of both the positional correction and the impulse;
/// a fixed partner is left untouched and the mover takes all of it.
pub fn sphere_sphere(mover: &mut Body, other: &mut Body, restitution: f64) -> bool {
    if mover.is_fixed() {
        return false;
    }
    let diff = mover.position - other.position;
    let dist = diff.norm();
    let min_dist = mover.radius() + other.radius();
    if dist >= min_dist {
        return false;
    }

    let overlap = min_dist - dist;
    let normal = if dist > 0.0 { direction(&diff) } else { Vector3::y() };

    if other.is_fixed() {
        mover.position += normal * overlap;
    } else {
        mover.position += normal * (overlap * 0.5);
        other.position -= normal * (overlap * 0.5);
    }

    let v_rel = mover.velocity - other.velocity;
    let v_dot_n = v_rel.dot(&normal);
    if v_dot_n < 0.0 {
        let j = -(1.0 + restitution) * v_dot_n;
        let share = if other.is_fixed() { 1.0 } else { 2.0 };
        let impulse = normal * (j / share);
        mover.velocity += impulse;
        if !other.is_fixed() {
            other.velocity -= impulse;
        }
    }
    true
}

/// Push a sphere out of an oriented box and reflect its normal velocity.
pub fn sphere_box(sphere: &mut Body, obstacle: &Body, restitution: f64) -> bool {
    if sphere.is_fixed() {
        return false;
    }
    let radius = sphere.radius();
    let half = obstacle.half_extents();
    let origin = obstacle.position();
    let orientation = obstacle.orientation();

    if !point_in_oriented_box(&sphere.position, origin, orientation, half, radius) {
        return false;
    }

    let local = to_local(&sphere.position, origin, orientation);
    let closest = clamp_to_box(&local, half);
    let offset = local - closest;
    let dist = offset.norm();
    if dist >= radius {
        return false;
    }

    // centre inside the box: push straight up in the box frame
    let local_normal = if dist > 0.0 { offset / dist } else { Vector3::y() };
    let normal = orientation * local_normal;
    sphere.position += normal * (radius - dist);

    let v_dot_n = sphere.velocity.dot(&normal);
    if v_dot_n < 0.0 {
        sphere.velocity += normal * (-(1.0 + restitution) * v_dot_n);
    }
    true
}

/// Keep a body above `y = 0`: clamp, bounce, and bleed off horizontal speed.
pub fn resolve_ground(body: &mut Body, restitution: f64, friction: f64, sub_dt: f64) -> bool {
    if body.is_fixed() {
        return false;
    }
    let rest = body.ground_offset();
    if body.position.y >= rest {
        return false;
    }

    body.position.y = rest;
    body.velocity.y *= -restitution;
    let damping = (1.0 - friction * sub_dt * FRICTION_RATE).max(0.0);
    body.velocity.x *= damping;
    body.velocity.z *= damping;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GravityMode;
    use crate::scene::BodySpec;
    use std::f64::consts::FRAC_PI_4;

    fn body(spec: BodySpec) -> Body {
        Body::from_spec(&spec, GravityMode::Earth)
    }

    #[test]
    fn elastic_head_on_spheres_swap_velocities() {
        let mut a = body(BodySpec::sphere("A", [-0.9, 5.0, 0.0], 1.0).with_velocity([1.0, 0.0, 0.0]));
        let mut b = body(BodySpec::sphere("B", [0.9, 5.0, 0.0], 1.0).with_velocity([-1.0, 0.0, 0.0]));
        assert!(sphere_sphere(&mut a, &mut b, 1.0));
        assert!((a.velocity().x + 1.0).abs() < 1e-12);
        assert!((b.velocity().x - 1.0).abs() < 1e-12);
        // overlap of 0.2 split evenly
        assert!((a.position().x + 1.0).abs() < 1e-12);
        assert!((b.position().x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn impulse_ignores_mass_ratio() {
        let mut light = body(BodySpec::sphere("L", [0.0, 5.0, 0.0], 0.5).with_mass(1.0).with_velocity([2.0, 0.0, 0.0]));
        let mut heavy = body(BodySpec::sphere("H", [0.9, 5.0, 0.0], 0.5).with_mass(1000.0));
        sphere_sphere(&mut light, &mut heavy, 0.0);
        assert!((light.velocity().x - 1.0).abs() < 1e-12);
        assert!((heavy.velocity().x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fixed_sphere_deflects_without_moving() {
        let mut ball = body(BodySpec::sphere("A", [-0.9, 5.0, 0.0], 0.5).with_velocity([3.0, 0.0, 0.0]));
        let mut post = body(BodySpec::sphere("Post", [0.0, 5.0, 0.0], 0.5).fixed());
        assert!(sphere_sphere(&mut ball, &mut post, 1.0));
        assert!((ball.velocity().x + 3.0).abs() < 1e-12);
        assert!((ball.position().x + 1.0).abs() < 1e-12);
        assert_eq!(*post.position(), Vector3::new(0.0, 5.0, 0.0));
        assert_eq!(*post.velocity(), Vector3::zeros());
    }

    #[test]
    fn separating_spheres_get_no_impulse() {
        let mut a = body(BodySpec::sphere("A", [-0.9, 5.0, 0.0], 1.0).with_velocity([-1.0, 0.0, 0.0]));
        let mut b = body(BodySpec::sphere("B", [0.9, 5.0, 0.0], 1.0));
        assert!(sphere_sphere(&mut a, &mut b, 1.0));
        assert_eq!(a.velocity().x, -1.0);
        assert_eq!(b.velocity().x, 0.0);
    }

    #[test]
    fn sphere_bounces_off_box_top() {
        let mut ball = body(BodySpec::sphere("A", [0.0, 2.4, 0.0], 0.5).with_velocity([1.0, -4.0, 0.0]));
        let block = body(BodySpec::cuboid("Box", ShapeKind::Box, [0.0, 1.0, 0.0], [4.0, 2.0, 4.0]));
        assert!(sphere_box(&mut ball, &block, 0.5));
        assert!((ball.position().y - 2.5).abs() < 1e-12);
        assert!((ball.velocity().y - 2.0).abs() < 1e-12);
        assert_eq!(ball.velocity().x, 1.0);
        assert_eq!(*block.velocity(), Vector3::zeros());
    }

    #[test]
    fn tilted_wedge_normal_is_rotated_into_world() {
        let ramp = body(
            BodySpec::cuboid("Ramp", ShapeKind::Wedge, [0.0, 0.0, 0.0], [10.0, 1.0, 4.0])
                .with_rotation([0.0, 0.0, FRAC_PI_4]),
        );
        let up = ramp.orientation() * Vector3::y();
        let start = up * 0.9;
        let mut ball = body(BodySpec::sphere("A", [start.x, start.y, start.z], 0.5).with_velocity([0.0, -1.0, 0.0]));
        // sphere spawns lifted by the floor clamp; place it explicitly
        ball.position = start;
        assert!(sphere_box(&mut ball, &ramp, 0.0));
        let n = direction(&(ball.position - start));
        assert!((n - up).norm() < 1e-9, "{n:?} vs {up:?}");
        assert!(ball.velocity().dot(&up).abs() < 1e-12);
    }

    #[test]
    fn ground_clamps_bounces_and_damps() {
        let mut ball = body(BodySpec::sphere("A", [0.0, 1.0, 0.0], 0.5).with_velocity([2.0, -3.0, 2.0]));
        ball.position.y = 0.4;
        assert!(resolve_ground(&mut ball, 0.8, 0.1, 0.01));
        assert_eq!(ball.position().y, 0.5);
        assert!((ball.velocity().y - 2.4).abs() < 1e-12);
        assert!((ball.velocity().x - 2.0 * 0.99).abs() < 1e-12);
        assert!(!resolve_ground(&mut ball, 0.8, 0.1, 0.01));
    }

    #[test]
    fn heavy_friction_never_reverses_motion() {
        let mut ball = body(BodySpec::sphere("A", [0.0, 1.0, 0.0], 0.5).with_velocity([2.0, -1.0, 0.0]));
        ball.position.y = 0.0;
        resolve_ground(&mut ball, 0.0, 1.0, 0.5);
        assert_eq!(ball.velocity().x, 0.0);
    }

    #[test]
    fn box_pairs_are_not_resolved() {
        let mut reg = BodyRegistry::new();
        reg.insert(body(BodySpec::cuboid("A", ShapeKind::Box, [0.0, 1.0, 0.0], [2.0; 3])));
        reg.insert(body(BodySpec::cuboid("B", ShapeKind::Box, [0.5, 1.0, 0.0], [2.0; 3])));
        assert_eq!(resolve_contacts(&mut reg, 0, 1.0), 0);
        assert_eq!(reg.at(0).map(|b| b.position().x), Some(0.0));
    }
}
