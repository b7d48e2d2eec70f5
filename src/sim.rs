use crate::algorithms::integrator::{advance_all, is_active};
use crate::algorithms::metrics::{sample, sample_all, MetricSample};
use crate::algorithms::trajectory::{predict_default, predict_scene, Trajectory};
use crate::algorithms::vectors::{overlays, VectorOverlay};
use crate::config::{GravityMode, SimulationConfig};
use crate::error::SandboxError;
use crate::math::to_array;
use crate::models::body::Body;
use crate::models::registry::BodyRegistry;
use crate::scene::{BodySpec, SceneDescription, ShapeKind};
use serde::Serialize;

/// Kinematic state of one body after a frame, for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub label: String,
    pub shape: ShapeKind,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    /// Scene orientation plus cosmetic rolling.
    pub rotation: [f64; 3],
    pub mass: f64,
    pub fixed: bool,
}

impl From<&Body> for BodySnapshot {
    fn from(b: &Body) -> Self {
        Self {
            label: b.label().to_string(),
            shape: b.kind(),
            position: to_array(b.position()),
            velocity: to_array(b.velocity()),
            rotation: to_array(&b.display_rotation()),
            mass: b.mass(),
            fixed: b.is_fixed(),
        }
    }
}

/// What happened during one call to [`Simulator::step`].
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub time: f64,
    /// False while paused or warming up.
    pub integrated: bool,
    pub moved: usize,
    pub metrics: Vec<MetricSample>,
}

/// Owns the scene, the configuration and the live registry. Every mutation of body
/// state goes through `&mut self`, so one step has exclusive access to all bodies.
#[derive(Debug, Clone)]
pub struct Simulator {
    scene: SceneDescription,
    config: SimulationConfig,
    registry: BodyRegistry,
    clock: f64,
    frame: u64,
    playing: bool,
}

impl Simulator {
    pub fn new(scene: SceneDescription, config: SimulationConfig) -> Self {
        let mut sim = Self {
            scene: SceneDescription::default(),
            config: config.sanitized(),
            registry: BodyRegistry::new(),
            clock: 0.0,
            frame: 0,
            playing: false,
        };
        sim.load_scene(scene);
        sim
    }

    pub fn scene(&self) -> &SceneDescription { &self.scene }
    pub fn config(&self) -> &SimulationConfig { &self.config }
    pub fn registry(&self) -> &BodyRegistry { &self.registry }
    pub fn len(&self) -> usize { self.registry.len() }
    pub fn is_empty(&self) -> bool { self.registry.is_empty() }
    pub fn time(&self) -> f64 { self.clock }
    pub fn frame(&self) -> u64 { self.frame }
    pub fn is_playing(&self) -> bool { self.playing }

    pub fn play(&mut self) { self.playing = true; }
    pub fn pause(&mut self) { self.playing = false; }
    pub fn set_playing(&mut self, playing: bool) { self.playing = playing; }

    pub fn body(&self, label: &str) -> Option<&Body> {
        self.registry.get(label)
    }

    /// Replace the active scene. The clock restarts, so the warm-up applies again.
    /// A gravity mode carried by the scene becomes the active mode.
    pub fn load_scene(&mut self, scene: SceneDescription) {
        if let Some(mode) = scene.gravity_mode {
            self.config.gravity_mode = mode;
        }

        let mut objects: Vec<BodySpec> = Vec::with_capacity(scene.objects.len());
        for spec in scene.objects {
            match objects.iter().position(|s| s.label == spec.label) {
                Some(i) => {
                    log::warn!("duplicate label '{}' in scene, keeping the later spec", spec.label);
                    objects[i] = spec;
                }
                None => objects.push(spec),
            }
        }
        self.scene = SceneDescription { gravity_mode: scene.gravity_mode, objects };
        self.clock = 0.0;
        self.frame = 0;
        self.reinitialize();
    }

    /// Apply new user controls. Changing the gravity mode re-initialises every body.
    pub fn set_config(&mut self, config: SimulationConfig) {
        let config = config.sanitized();
        let mode_changed = config.gravity_mode != self.config.gravity_mode;
        self.config = config;
        if mode_changed {
            self.reinitialize();
        }
    }

    pub fn set_gravity_mode(&mut self, mode: GravityMode) {
        let config = self.config.clone().with_gravity_mode(mode);
        self.set_config(config);
    }

    /// Insert or replace a single body spec; only that body is re-initialised.
    pub fn update_body(&mut self, spec: BodySpec) {
        let body = Body::from_spec(&spec, self.config.gravity_mode);
        match self.scene.objects.iter().position(|s| s.label == spec.label) {
            Some(i) => self.scene.objects[i] = spec,
            None => self.scene.objects.push(spec),
        }
        self.registry.insert(body);
    }

    pub fn set_body_fixed(&mut self, label: &str, fixed: bool) -> Result<(), SandboxError> {
        let mut spec = self.spec(label)?.clone();
        spec.fixed = fixed;
        self.update_body(spec);
        Ok(())
    }

    pub fn remove_body(&mut self, label: &str) -> Result<Body, SandboxError> {
        self.scene.objects.retain(|s| s.label != label);
        self.registry
            .remove(label)
            .ok_or_else(|| SandboxError::UnknownBody { label: label.to_string() })
    }

    /// Advance the clock by `frame_delta` and, when playing past the warm-up, every
    /// non-fixed body in scene order. Metrics are sampled afterwards, paused or not.
    pub fn step(&mut self, frame_delta: f64) -> FrameReport {
        let delta = if frame_delta.is_finite() { frame_delta.max(0.0) } else { 0.0 };
        self.clock += delta;
        self.frame += 1;

        let integrated = is_active(self.playing, self.clock);
        let moved = if integrated {
            advance_all(&mut self.registry, delta, &self.config)
        } else {
            0
        };
        log::trace!("frame {} t={:.4} moved={}", self.frame, self.clock, moved);

        FrameReport {
            time: self.clock,
            integrated,
            moved,
            metrics: self.metrics(),
        }
    }

    pub fn metrics(&self) -> Vec<MetricSample> {
        sample_all(&self.registry, &self.config, self.clock)
    }

    pub fn metrics_for(&self, label: &str) -> Result<MetricSample, SandboxError> {
        self.registry
            .index_of(label)
            .and_then(|i| sample(&self.registry, i, &self.config, self.clock))
            .ok_or_else(|| SandboxError::UnknownBody { label: label.to_string() })
    }

    pub fn snapshots(&self) -> Vec<BodySnapshot> {
        self.registry.iter().map(BodySnapshot::from).collect()
    }

    /// Ghost path for one body, computed from its scene spec rather than its live state.
    pub fn predict(&self, label: &str) -> Result<Trajectory, SandboxError> {
        Ok(predict_default(self.spec(label)?, &self.config))
    }

    pub fn predict_all(&self) -> Vec<(String, Trajectory)> {
        predict_scene(&self.scene, &self.config)
    }

    pub fn vector_overlays(&self) -> Vec<VectorOverlay> {
        overlays(&self.registry, &self.config)
    }

    fn spec(&self, label: &str) -> Result<&BodySpec, SandboxError> {
        self.scene
            .get(label)
            .ok_or_else(|| SandboxError::UnknownBody { label: label.to_string() })
    }

    fn reinitialize(&mut self) {
        self.registry.clear();
        for spec in &self.scene.objects {
            self.registry.insert(Body::from_spec(spec, self.config.gravity_mode));
        }
        log::debug!(
            "initialised {} bodies in {} mode",
            self.registry.len(),
            self.config.gravity_mode.as_str()
        );
    }
}
