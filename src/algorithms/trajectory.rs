use crate::config::{GravityMode, SimulationConfig};
use crate::math::vec3;
use crate::scene::{BodySpec, SceneDescription};
use nalgebra::Vector3;

pub const PREVIEW_STEPS: usize = 150;
pub const PREVIEW_DT: f64 = 0.05;

/// Ghost path of one body: collision-free, gravity-only, detached from the live registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    points: Vec<Vector3<f64>>,
}

impl Trajectory {
    pub fn points(&self) -> &[Vector3<f64>] { &self.points }
    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &Vector3<f64>> {
        self.points.iter()
    }

    /// `[x0, y0, z0, x1, ...]` for line renderers.
    pub fn to_flat(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.points.len() * 3);
        for p in &self.points {
            out.push(p.x as f32);
            out.push(p.y as f32);
            out.push(p.z as f32);
        }
        out
    }
}

/// Predict the path of `spec` from its scene position and velocity.
///
/// Fixed bodies give an empty path. Uniform modes apply the vertical field and stop once
/// the path drops below the ground; SPACE mode applies no acceleration and runs all steps.
pub fn predict(spec: &BodySpec, config: &SimulationConfig, steps: usize, dt: f64) -> Trajectory {
    if spec.fixed {
        return Trajectory::default();
    }

    let g = config.vertical_gravity();
    let uniform = config.gravity_mode != GravityMode::Space;
    let mut pos = vec3(spec.pos);
    let mut vel = vec3(spec.vel);
    let mut points = Vec::with_capacity(steps);

    for _ in 0..steps {
        points.push(pos);
        if uniform {
            vel.y -= g * dt;
        }
        pos += vel * dt;
        if uniform && pos.y < 0.0 {
            break;
        }
    }
    Trajectory { points }
}

pub fn predict_default(spec: &BodySpec, config: &SimulationConfig) -> Trajectory {
    predict(spec, config, PREVIEW_STEPS, PREVIEW_DT)
}

/// Default-length previews for every body in the scene, in scene order.
#[cfg(not(feature = "parallel"))]
pub fn predict_scene(scene: &SceneDescription, config: &SimulationConfig) -> Vec<(String, Trajectory)> {
    scene
        .objects
        .iter()
        .map(|spec| (spec.label.clone(), predict_default(spec, config)))
        .collect()
}

/// Default-length previews for every body in the scene, in scene order.
#[cfg(feature = "parallel")]
pub fn predict_scene(scene: &SceneDescription, config: &SimulationConfig) -> Vec<(String, Trajectory)> {
    use rayon::prelude::*;
    scene
        .objects
        .par_iter()
        .map(|spec| (spec.label.clone(), predict_default(spec, config)))
        .collect()
}
