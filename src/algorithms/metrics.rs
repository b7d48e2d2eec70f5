use crate::config::{GravityMode, SimulationConfig, EARTH_GRAVITY, G};
use crate::math::distance;
use crate::models::registry::BodyRegistry;
use serde::Serialize;

/// Pairs closer than this are left out of the SPACE potential.
pub const MIN_POTENTIAL_DISTANCE: f64 = 0.1;

/// Energy diagnostics for one body at one frame. Not retained by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSample {
    pub label: String,
    #[serde(rename = "KE")]
    pub kinetic: f64,
    #[serde(rename = "PE")]
    pub potential: f64,
    pub total: f64,
    pub speed: f64,
    pub time: f64,
}

impl MetricSample {
    pub fn to_flat(&self) -> [f32; 5] {
        [
            self.kinetic as f32,
            self.potential as f32,
            self.total as f32,
            self.speed as f32,
            self.time as f32,
        ]
    }
}

/// Kinetic, potential and total energy of the body at `index`.
///
/// Uniform modes use `m * 9.8 * max(0, y)` whatever the custom gravity is. SPACE mode sums
/// `G * m * m_other / r` over every other body, which is non-negative and only meant for
/// relative display.
pub fn sample(
    registry: &BodyRegistry,
    index: usize,
    config: &SimulationConfig,
    time: f64,
) -> Option<MetricSample> {
    let body = registry.at(index)?;
    let speed = body.speed();
    let kinetic = 0.5 * body.mass() * speed * speed;

    let potential = match config.gravity_mode {
        GravityMode::Space => registry
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != index)
            .map(|(_, other)| {
                let r = distance(body.position(), other.position());
                if r > MIN_POTENTIAL_DISTANCE {
                    G * body.mass() * other.mass() / r
                } else {
                    0.0
                }
            })
            .sum(),
        GravityMode::Earth | GravityMode::Custom => {
            body.mass() * EARTH_GRAVITY * body.position().y.max(0.0)
        }
    };

    Some(MetricSample {
        label: body.label().to_string(),
        kinetic,
        potential,
        total: kinetic + potential,
        speed,
        time,
    })
}

/// Samples for every body, in registry order.
pub fn sample_all(registry: &BodyRegistry, config: &SimulationConfig, time: f64) -> Vec<MetricSample> {
    (0..registry.len())
        .filter_map(|i| sample(registry, i, config, time))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::body::Body;
    use crate::scene::BodySpec;

    fn registry(specs: &[BodySpec], mode: GravityMode) -> BodyRegistry {
        let mut reg = BodyRegistry::new();
        for s in specs {
            reg.insert(Body::from_spec(s, mode));
        }
        reg
    }

    #[test]
    fn earth_energy_of_a_moving_body() {
        let reg = registry(
            &[BodySpec::sphere("A", [0.0, 10.0, 0.0], 0.5).with_mass(2.0).with_velocity([3.0, 4.0, 0.0])],
            GravityMode::Earth,
        );
        let m = sample(&reg, 0, &SimulationConfig::default(), 1.5).unwrap();
        assert_eq!(m.speed, 5.0);
        assert_eq!(m.kinetic, 25.0);
        assert!((m.potential - 2.0 * 9.8 * 10.0).abs() < 1e-9);
        assert_eq!(m.total, m.kinetic + m.potential);
        assert_eq!(m.time, 1.5);
        assert_eq!(m.label, "A");
    }

    #[test]
    fn custom_mode_still_uses_earth_constant_for_potential() {
        let cfg = SimulationConfig::default()
            .with_gravity_mode(GravityMode::Custom)
            .with_custom_gravity(1.0);
        let reg = registry(&[BodySpec::sphere("A", [0.0, 4.0, 0.0], 0.5)], GravityMode::Custom);
        let m = sample(&reg, 0, &cfg, 0.0).unwrap();
        assert!((m.potential - 9.8 * 4.0).abs() < 1e-9);
    }

    #[test]
    fn space_potential_sums_pairs_and_skips_coincident() {
        let cfg = SimulationConfig::default().with_gravity_mode(GravityMode::Space);
        let reg = registry(
            &[
                BodySpec::sphere("A", [0.0, 0.0, 0.0], 0.5).with_mass(2.0),
                BodySpec::sphere("B", [4.0, 0.0, 0.0], 0.5).with_mass(3.0),
                BodySpec::sphere("C", [0.0, 0.0, 0.0], 0.5).with_mass(5.0),
            ],
            GravityMode::Space,
        );
        let m = sample(&reg, 0, &cfg, 0.0).unwrap();
        assert!((m.potential - G * 2.0 * 3.0 / 4.0).abs() < 1e-9);
        assert!(m.potential >= 0.0);
        assert_eq!(sample_all(&reg, &cfg, 0.0).len(), 3);
    }

    #[test]
    fn metrics_serialize_with_display_keys() {
        let reg = registry(&[BodySpec::sphere("A", [0.0, 1.0, 0.0], 0.5)], GravityMode::Earth);
        let m = sample(&reg, 0, &SimulationConfig::default(), 0.0).unwrap();
        let json = serde_json::to_value(&m).unwrap();
        assert!(json.get("KE").is_some());
        assert!(json.get("PE").is_some());
        assert!(json.get("speed").is_some());
    }
}
