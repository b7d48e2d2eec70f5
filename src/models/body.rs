use crate::config::GravityMode;
use crate::math::{euler_xyz, vec3};
use crate::scene::{BodySpec, ShapeKind};
use nalgebra::{UnitQuaternion, Vector3};

pub const DEFAULT_MASS: f64 = 1.0;
pub const DEFAULT_CAR_SIZE: [f64; 3] = [4.0, 2.0, 6.0];
pub const DEFAULT_BOX_SIZE: [f64; 3] = [1.0, 1.0, 1.0];
/// Edge length substituted for a single missing box dimension.
pub const MISSING_EDGE: f64 = 2.0;

/// One simulated body with its live kinematic state.
///
/// Position and velocity are only written by the integrator and the contact resolver;
/// everything else is fixed at initialisation.
#[derive(Debug, Clone)]
pub struct Body {
    label: String,
    kind: ShapeKind,
    mass: f64,
    fixed: bool,
    /// Sphere radius; for the box family the largest half edge.
    radius: f64,
    half_extents: Vector3<f64>,
    /// Scene Euler angles (XYZ). Orients box contacts.
    rotation: Vector3<f64>,
    orientation: UnitQuaternion<f64>,
    /// Accumulated cosmetic rolling, never read by the physics.
    spin: Vector3<f64>,
    color: Option<String>,
    pub(crate) position: Vector3<f64>,
    pub(crate) velocity: Vector3<f64>,
}

impl Body {
    /// Initialise a body from its scene spec. Outside SPACE mode spheres, boxes and cars
    /// that start below their resting height are lifted onto the ground.
    pub fn from_spec(spec: &BodySpec, mode: GravityMode) -> Self {
        let size = resolve_size(spec);
        let (radius, half_extents) = match spec.shape {
            ShapeKind::Sphere => (size[0], Vector3::repeat(size[0])),
            _ => {
                let half = Vector3::new(size[0], size[1], size[2]) * 0.5;
                (half.max(), half)
            }
        };

        let mass = match spec.mass {
            Some(m) if m.is_finite() && m != 0.0 => m,
            _ => DEFAULT_MASS,
        };

        let mut position = vec3(spec.pos);
        if mode.has_contacts() {
            let rest = match spec.shape {
                ShapeKind::Sphere => Some(radius),
                ShapeKind::Box | ShapeKind::Car => Some(half_extents.y),
                ShapeKind::Wedge => None,
            };
            if let Some(rest) = rest {
                position.y = position.y.max(rest);
            }
        }

        let rotation = vec3(spec.rotation);
        Self {
            label: spec.label.clone(),
            kind: spec.shape,
            mass,
            fixed: spec.fixed,
            radius,
            half_extents,
            orientation: euler_xyz(&rotation),
            rotation,
            spin: Vector3::zeros(),
            color: spec.color.clone(),
            position,
            velocity: vec3(spec.vel),
        }
    }

    pub fn label(&self) -> &str { &self.label }
    pub fn kind(&self) -> ShapeKind { self.kind }
    pub fn mass(&self) -> f64 { self.mass }
    pub fn is_fixed(&self) -> bool { self.fixed }
    pub fn radius(&self) -> f64 { self.radius }
    pub fn half_extents(&self) -> &Vector3<f64> { &self.half_extents }
    pub fn orientation(&self) -> &UnitQuaternion<f64> { &self.orientation }
    pub fn position(&self) -> &Vector3<f64> { &self.position }
    pub fn velocity(&self) -> &Vector3<f64> { &self.velocity }
    pub fn color(&self) -> Option<&str> { self.color.as_deref() }
    pub fn speed(&self) -> f64 { self.velocity.norm() }

    /// Height of the centre above the lowest point of the body.
    pub fn ground_offset(&self) -> f64 {
        match self.kind {
            ShapeKind::Sphere => self.radius,
            // half height, not the largest half edge, so the floor agrees with the spawn lift
            _ => self.half_extents.y,
        }
    }

    /// Rotation to show on screen: scene orientation plus accumulated rolling.
    pub fn display_rotation(&self) -> Vector3<f64> {
        self.rotation + self.spin
    }

    /// Roll spheres in the direction of travel. Presentational; applied once per frame.
    pub(crate) fn apply_spin(&mut self, frame_delta: f64) {
        if self.kind == ShapeKind::Sphere {
            self.spin.x += self.velocity.z * frame_delta;
            self.spin.z -= self.velocity.x * frame_delta;
        }
    }
}

/// Shape dimensions with fallbacks for missing or malformed entries.
fn resolve_size(spec: &BodySpec) -> [f64; 3] {
    let valid = |v: &f64| v.is_finite() && *v > 0.0;
    if !spec.args.iter().any(valid) {
        if !spec.args.is_empty() {
            log::warn!("body '{}' has no usable dimensions {:?}, using defaults", spec.label, spec.args);
        }
        return match spec.shape {
            ShapeKind::Car => DEFAULT_CAR_SIZE,
            _ => DEFAULT_BOX_SIZE,
        };
    }

    match spec.shape {
        ShapeKind::Sphere => {
            let r = spec.args.first().copied().filter(valid).unwrap_or(DEFAULT_BOX_SIZE[0]);
            [r, r, r]
        }
        _ => {
            let edge = |i: usize| spec.args.get(i).copied().filter(valid).unwrap_or(MISSING_EDGE);
            [edge(0), edge(1), edge(2)]
        }
    }
}
