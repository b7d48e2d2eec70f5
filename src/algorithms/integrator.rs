use crate::algorithms::collision::{resolve_contacts, resolve_ground};
use crate::algorithms::forces::ForceModel;
use crate::config::{SimulationConfig, MAX_FRAME_DT, SUB_STEPS, WARM_UP_TIME};
use crate::models::registry::BodyRegistry;

/// Sub-step length for a displayed frame: the delta is capped at `MAX_FRAME_DT`
/// and split into `SUB_STEPS` equal slices. Negative or non-finite deltas give zero.
pub fn sub_step_dt(frame_delta: f64) -> f64 {
    if !frame_delta.is_finite() || frame_delta <= 0.0 {
        return 0.0;
    }
    frame_delta.min(MAX_FRAME_DT) / SUB_STEPS as f64
}

/// Integration runs only while playing and once the clock is past the warm-up window.
pub fn is_active(playing: bool, clock: f64) -> bool {
    playing && clock >= WARM_UP_TIME
}

/// One semi-implicit Euler slice for the body at `index`, followed by its contact pass.
pub fn sub_step(
    registry: &mut BodyRegistry,
    index: usize,
    model: &ForceModel,
    config: &SimulationConfig,
    sub_dt: f64,
) {
    let acc = model.acceleration(registry, index);
    let Some(body) = registry.at_mut(index) else {
        return;
    };
    if body.is_fixed() {
        return;
    }
    body.velocity += acc * sub_dt;
    body.position += body.velocity * sub_dt;

    if config.gravity_mode.has_contacts() {
        resolve_contacts(registry, index, config.restitution);
        if let Some(body) = registry.at_mut(index) {
            resolve_ground(body, config.restitution, config.friction, sub_dt);
        }
    }
}

/// Advance one body over a displayed frame. Returns false when the body was skipped.
pub fn advance(
    registry: &mut BodyRegistry,
    index: usize,
    frame_delta: f64,
    config: &SimulationConfig,
) -> bool {
    match registry.at(index) {
        Some(body) if !body.is_fixed() => {}
        _ => return false,
    }
    let sub_dt = sub_step_dt(frame_delta);
    if sub_dt == 0.0 {
        return false;
    }

    let model = ForceModel::from_config(config);
    for _ in 0..SUB_STEPS {
        sub_step(registry, index, &model, config, sub_dt);
    }

    if let Some(body) = registry.at_mut(index) {
        body.apply_spin(frame_delta);
    }
    true
}

/// Advance every body in registry order. Later bodies see the end-of-frame state of
/// earlier ones, including impulses those bodies handed out.
pub fn advance_all(registry: &mut BodyRegistry, frame_delta: f64, config: &SimulationConfig) -> usize {
    let mut moved = 0;
    for i in 0..registry.len() {
        if advance(registry, i, frame_delta, config) {
            moved += 1;
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GravityMode;
    use crate::models::body::Body;
    use crate::scene::BodySpec;
    use nalgebra::Vector3;

    fn single(spec: BodySpec, mode: GravityMode) -> BodyRegistry {
        let mut reg = BodyRegistry::new();
        reg.insert(Body::from_spec(&spec, mode));
        reg
    }

    #[test]
    fn frame_delta_is_capped_and_split() {
        assert_eq!(sub_step_dt(0.016), 0.016 / 8.0);
        assert_eq!(sub_step_dt(1.0), MAX_FRAME_DT / 8.0);
        assert_eq!(sub_step_dt(-0.1), 0.0);
        assert_eq!(sub_step_dt(f64::NAN), 0.0);
    }

    #[test]
    fn warm_up_and_pause_gate_integration() {
        assert!(!is_active(true, 0.05));
        assert!(!is_active(false, 5.0));
        assert!(is_active(true, WARM_UP_TIME));
    }

    #[test]
    fn free_flight_matches_closed_form() {
        let cfg = SimulationConfig::default().with_restitution(0.0).with_friction(0.0);
        let mut reg = single(
            BodySpec::sphere("A", [0.0, 50.0, 0.0], 0.5).with_velocity([1.0, 5.0, 0.0]),
            GravityMode::Earth,
        );
        let frames = 40;
        for _ in 0..frames {
            advance(&mut reg, 0, MAX_FRAME_DT, &cfg);
        }
        let t = frames as f64 * MAX_FRAME_DT;
        let body = reg.at(0).unwrap();
        let expected_y = 50.0 + 5.0 * t - 0.5 * 9.8 * t * t;
        // semi-implicit Euler lags the parabola by g*h*t/2
        assert!((body.position().y - expected_y).abs() < 0.1, "{} vs {}", body.position().y, expected_y);
        assert!((body.position().x - t).abs() < 1e-9);
        assert!((body.velocity().y - (5.0 - 9.8 * t)).abs() < 1e-9);
    }

    #[test]
    fn fixed_bodies_are_skipped() {
        let cfg = SimulationConfig::default();
        let mut reg = single(
            BodySpec::sphere("Anchor", [0.0, 3.0, 0.0], 0.5).with_velocity([1.0, 0.0, 0.0]).fixed(),
            GravityMode::Earth,
        );
        assert!(!advance(&mut reg, 0, 0.016, &cfg));
        let body = reg.at(0).unwrap();
        assert_eq!(*body.position(), Vector3::new(0.0, 3.0, 0.0));
        assert_eq!(*body.velocity(), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn space_mode_ignores_ground_and_contacts() {
        let cfg = SimulationConfig::default().with_gravity_mode(GravityMode::Space);
        let mut reg = BodyRegistry::new();
        reg.insert(Body::from_spec(
            &BodySpec::sphere("A", [0.0, 0.2, 0.0], 1.0).with_velocity([0.0, -5.0, 0.0]),
            GravityMode::Space,
        ));
        advance_all(&mut reg, MAX_FRAME_DT, &cfg);
        let body = reg.at(0).unwrap();
        assert!(body.position().y < 0.0, "sank to {}", body.position().y);
    }

    #[test]
    fn floor_holds_after_each_body_finishes_its_own_frame() {
        let cfg = SimulationConfig::default();
        let mut reg = BodyRegistry::new();
        reg.insert(Body::from_spec(&BodySpec::sphere("Under", [0.0, 0.5, 0.0], 0.5), GravityMode::Earth));
        reg.insert(Body::from_spec(
            &BodySpec::sphere("Over", [0.0, 1.6, 0.0], 0.5).with_velocity([0.0, -4.0, 0.0]),
            GravityMode::Earth,
        ));
        for _ in 0..60 {
            advance(&mut reg, 0, 1.0 / 60.0, &cfg);
            assert!(reg.at(0).unwrap().position().y >= 0.5);
            advance(&mut reg, 1, 1.0 / 60.0, &cfg);
            assert!(reg.at(1).unwrap().position().y >= 0.5);
        }
    }

    #[test]
    fn custom_gravity_sets_the_fall_rate() {
        let cfg = SimulationConfig::default()
            .with_gravity_mode(GravityMode::Custom)
            .with_custom_gravity(2.0);
        let mut reg = single(BodySpec::sphere("A", [0.0, 10.0, 0.0], 0.5), GravityMode::Custom);
        advance(&mut reg, 0, MAX_FRAME_DT, &cfg);
        let vy = reg.at(0).unwrap().velocity().y;
        assert!((vy + 2.0 * MAX_FRAME_DT).abs() < 1e-12);
    }
}
