use crate::config::{GravityMode, SimulationConfig, G, SOFTENING_FLOOR};
use crate::math::direction;
use crate::models::registry::BodyRegistry;
use nalgebra::Vector3;

/// Acceleration law selected by the gravity mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForceModel {
    /// Constant downward field of magnitude `g`.
    Uniform { g: f64 },
    /// Softened inverse-square attraction towards every other body with positive mass.
    Attraction { g: f64, softening: f64 },
}

impl ForceModel {
    pub fn from_config(config: &SimulationConfig) -> Self {
        match config.gravity_mode {
            GravityMode::Space => ForceModel::Attraction { g: G, softening: SOFTENING_FLOOR },
            GravityMode::Earth | GravityMode::Custom => {
                ForceModel::Uniform { g: config.vertical_gravity() }
            }
        }
    }

    /// Acceleration of the body at `index`. Fixed bodies never accelerate.
    pub fn acceleration(&self, registry: &BodyRegistry, index: usize) -> Vector3<f64> {
        let Some(body) = registry.at(index) else {
            return Vector3::zeros();
        };
        if body.is_fixed() {
            return Vector3::zeros();
        }

        match *self {
            ForceModel::Uniform { g } => Vector3::new(0.0, -g, 0.0),
            ForceModel::Attraction { g, softening } => {
                let mut acc = Vector3::zeros();
                for (j, other) in registry.iter().enumerate() {
                    if j == index || other.mass() <= 0.0 {
                        continue;
                    }
                    let r = other.position() - body.position();
                    let dist_sq = r.norm_squared().max(softening);
                    acc += direction(&r) * (g * other.mass() / dist_sq);
                }
                acc
            }
        }
    }
}

/// Convenience wrapper: acceleration of body `index` under `config`.
pub fn acceleration(registry: &BodyRegistry, index: usize, config: &SimulationConfig) -> Vector3<f64> {
    ForceModel::from_config(config).acceleration(registry, index)
}

/// Direction towards the other body exerting the largest unsoftened pull on `index`,
/// together with that pull's magnitude.
pub fn strongest_pull(registry: &BodyRegistry, index: usize) -> Option<(Vector3<f64>, f64)> {
    let body = registry.at(index)?;
    let mut best: Option<(Vector3<f64>, f64)> = None;
    for (j, other) in registry.iter().enumerate() {
        if j == index || other.mass() <= 0.0 {
            continue;
        }
        let r = other.position() - body.position();
        let dist_sq = r.norm_squared();
        if dist_sq <= 0.0 {
            continue;
        }
        let magnitude = G * other.mass() / dist_sq;
        if best.is_none_or(|(_, m)| magnitude > m) {
            best = Some((direction(&r), magnitude));
        }
    }
    best
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
    fn uniform_modes_pull_straight_down() {
        let reg = registry(&[BodySpec::sphere("A", [0.0, 5.0, 0.0], 1.0)], GravityMode::Earth);
        let earth = SimulationConfig::default();
        assert_eq!(acceleration(&reg, 0, &earth), Vector3::new(0.0, -9.8, 0.0));

        let custom = SimulationConfig::default()
            .with_gravity_mode(GravityMode::Custom)
            .with_custom_gravity(1.62);
        assert_eq!(acceleration(&reg, 0, &custom), Vector3::new(0.0, -1.62, 0.0));
    }

    #[test]
    fn attraction_follows_inverse_square() {
        let reg = registry(
            &[
                BodySpec::sphere("P", [0.0, 0.0, 0.0], 0.5),
                BodySpec::sphere("Sun", [10.0, 0.0, 0.0], 2.0).with_mass(50.0).fixed(),
            ],
            GravityMode::Space,
        );
        let cfg = SimulationConfig::default().with_gravity_mode(GravityMode::Space);
        let a = acceleration(&reg, 0, &cfg);
        assert!((a.x - 100.0 * 50.0 / 100.0).abs() < 1e-9, "{a:?}");
        assert_eq!(a.y, 0.0);
        // the fixed source itself stays put
        assert_eq!(acceleration(&reg, 1, &cfg), Vector3::zeros());
    }

    #[test]
    fn softening_floor_caps_close_range_pull() {
        let reg = registry(
            &[
                BodySpec::sphere("A", [0.0, 0.0, 0.0], 0.5),
                BodySpec::sphere("B", [0.1, 0.0, 0.0], 0.5).with_mass(3.0),
            ],
            GravityMode::Space,
        );
        let a = ForceModel::Attraction { g: G, softening: SOFTENING_FLOOR }.acceleration(&reg, 0);
        assert!((a.x - G * 3.0 / SOFTENING_FLOOR).abs() < 1e-9);
    }

    #[test]
    fn coincident_and_negative_mass_sources_add_nothing() {
        let reg = registry(
            &[
                BodySpec::sphere("A", [1.0, 1.0, 1.0], 0.5),
                BodySpec::sphere("Twin", [1.0, 1.0, 1.0], 0.5),
                BodySpec::sphere("Neg", [5.0, 1.0, 1.0], 0.5).with_mass(-4.0),
            ],
            GravityMode::Space,
        );
        let cfg = SimulationConfig::default().with_gravity_mode(GravityMode::Space);
        let a = acceleration(&reg, 0, &cfg);
        assert_eq!(a, Vector3::zeros());
        assert!(a.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn strongest_pull_picks_the_dominant_source() {
        let reg = registry(
            &[
                BodySpec::sphere("P", [0.0, 0.0, 0.0], 0.5),
                BodySpec::sphere("Near", [0.0, 2.0, 0.0], 0.5).with_mass(1.0),
                BodySpec::sphere("Heavy", [-5.0, 0.0, 0.0], 0.5).with_mass(100.0),
            ],
            GravityMode::Space,
        );
        let (dir, mag) = strongest_pull(&reg, 0).unwrap();
        assert_eq!(dir, Vector3::new(-1.0, 0.0, 0.0));
        assert!((mag - G * 100.0 / 25.0).abs() < 1e-9);
    }
}
