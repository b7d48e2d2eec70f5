use crate::algorithms::forces::strongest_pull;
use crate::config::{GravityMode, SimulationConfig};
use crate::math::{direction, to_array};
use crate::models::registry::BodyRegistry;
use serde::Serialize;

pub const MIN_ARROW_SPEED: f64 = 0.1;
pub const VELOCITY_ARROW_SCALE: f64 = 0.3;
pub const MAX_VELOCITY_ARROW: f64 = 8.0;
pub const PULL_ARROW_LENGTH: f64 = 3.0;
pub const MIN_PULL: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arrow {
    pub direction: [f64; 3],
    pub length: f64,
}

/// Arrows drawn on top of one body when vector display is enabled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorOverlay {
    pub label: String,
    pub velocity: Option<Arrow>,
    /// SPACE mode only: direction of the dominant attractor.
    pub pull: Option<Arrow>,
}

pub fn overlay(registry: &BodyRegistry, index: usize, config: &SimulationConfig) -> Option<VectorOverlay> {
    let body = registry.at(index)?;

    let speed = body.speed();
    let velocity = (speed > MIN_ARROW_SPEED).then(|| Arrow {
        direction: to_array(&direction(body.velocity())),
        length: (speed * VELOCITY_ARROW_SCALE).min(MAX_VELOCITY_ARROW),
    });

    let pull = if config.gravity_mode == GravityMode::Space && !body.is_fixed() {
        strongest_pull(registry, index)
            .filter(|(_, magnitude)| *magnitude > MIN_PULL)
            .map(|(dir, _)| Arrow { direction: to_array(&dir), length: PULL_ARROW_LENGTH })
    } else {
        None
    };

    Some(VectorOverlay { label: body.label().to_string(), velocity, pull })
}

/// Overlays for every body, or nothing when vector display is switched off.
pub fn overlays(registry: &BodyRegistry, config: &SimulationConfig) -> Vec<VectorOverlay> {
    if !config.show_vectors {
        return Vec::new();
    }
    (0..registry.len()).filter_map(|i| overlay(registry, i, config)).collect()
}
