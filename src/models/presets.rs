use crate::config::GravityMode;
use crate::config::G;
use crate::scene::{BodySpec, SceneDescription, ShapeKind};

pub const DEMO_DT: f64 = 1.0 / 60.0;

/// A red ball released from rest ten metres up.
pub fn drop_scene() -> SceneDescription {
    SceneDescription::new(vec![
        BodySpec::sphere("A", [0.0, 10.0, 0.0], 0.5).with_mass(1.0).with_color("red"),
    ])
    .with_gravity_mode(GravityMode::Earth)
}

/// Two equal spheres rolling into each other on the ground.
pub fn head_on_scene() -> SceneDescription {
    SceneDescription::new(vec![
        BodySpec::sphere("Left", [-6.0, 1.0, 0.0], 1.0)
            .with_velocity([4.0, 0.0, 0.0])
            .with_color("royalblue"),
        BodySpec::sphere("Right", [6.0, 1.0, 0.0], 1.0)
            .with_velocity([-4.0, 0.0, 0.0])
            .with_color("tomato"),
    ])
    .with_gravity_mode(GravityMode::Earth)
}

/// A planet on a circular orbit around a fixed star.
pub fn orbit_scene() -> SceneDescription {
    let star_mass = 200.0;
    let radius = 20.0;
    let speed = (G * star_mass / radius).sqrt();
    SceneDescription::new(vec![
        BodySpec::sphere("Sun", [0.0, 0.0, 0.0], 2.0)
            .with_mass(star_mass)
            .with_color("gold")
            .fixed(),
        BodySpec::sphere("Planet", [radius, 0.0, 0.0], 0.6)
            .with_mass(1.0)
            .with_velocity([0.0, 0.0, speed])
            .with_color("deepskyblue"),
    ])
    .with_gravity_mode(GravityMode::Space)
}

/// A ball dropped onto a tilted ramp.
pub fn ramp_scene() -> SceneDescription {
    SceneDescription::new(vec![
        BodySpec::cuboid("Ramp", ShapeKind::Wedge, [0.0, 2.0, 0.0], [12.0, 0.5, 4.0])
            .with_rotation([0.0, 0.0, -0.35])
            .with_color("orange")
            .fixed(),
        BodySpec::sphere("Ball", [-3.0, 8.0, 0.0], 0.5).with_color("white"),
    ])
    .with_gravity_mode(GravityMode::Earth)
}

/// A ball thrown at a parked car.
pub fn crash_scene() -> SceneDescription {
    SceneDescription::new(vec![
        BodySpec::cuboid("Car", ShapeKind::Car, [0.0, 1.0, 0.0], [4.0, 2.0, 6.0])
            .with_mass(1200.0)
            .with_color("blue")
            .fixed(),
        BodySpec::sphere("Ball", [-10.0, 2.0, 0.0], 0.5)
            .with_velocity([12.0, 3.0, 0.0])
            .with_color("green"),
    ])
    .with_gravity_mode(GravityMode::Earth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_have_unique_labels() {
        for scene in [drop_scene(), head_on_scene(), orbit_scene(), ramp_scene(), crash_scene()] {
            let mut labels: Vec<_> = scene.objects.iter().map(|s| s.label.as_str()).collect();
            let n = labels.len();
            labels.sort();
            labels.dedup();
            assert_eq!(labels.len(), n);
            assert!(scene.gravity_mode.is_some());
        }
    }
}
