use crate::algorithms::metrics::MetricSample;
use crate::algorithms::vectors::VectorOverlay;
use crate::config::{GravityMode, SimulationConfig};
use crate::error::SandboxError;
use crate::models::presets::{crash_scene, drop_scene, head_on_scene, orbit_scene, ramp_scene};
use crate::scene::{BodySpec, SceneDescription};
use crate::sim::{BodySnapshot, FrameReport, Simulator};

pub const PRESET_DROP: &str = "drop";
pub const PRESET_HEAD_ON: &str = "head-on";
pub const PRESET_ORBIT: &str = "orbit";
pub const PRESET_RAMP: &str = "ramp";
pub const PRESET_CRASH: &str = "crash";

pub struct PresetInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub gravity_mode: GravityMode,
}

pub fn preset_catalog() -> &'static [PresetInfo] {
    &[
        PresetInfo {
            id: PRESET_DROP,
            name: "Dropped ball",
            description: "A ball released from 10 m bounces on the ground.",
            gravity_mode: GravityMode::Earth,
        },
        PresetInfo {
            id: PRESET_HEAD_ON,
            name: "Head-on collision",
            description: "Two equal spheres roll into each other.",
            gravity_mode: GravityMode::Earth,
        },
        PresetInfo {
            id: PRESET_ORBIT,
            name: "Circular orbit",
            description: "A planet circles a fixed star under inverse-square attraction.",
            gravity_mode: GravityMode::Space,
        },
        PresetInfo {
            id: PRESET_RAMP,
            name: "Ramp",
            description: "A ball lands on a tilted wedge and rolls off.",
            gravity_mode: GravityMode::Earth,
        },
        PresetInfo {
            id: PRESET_CRASH,
            name: "Car crash",
            description: "A thrown ball bounces off a parked car.",
            gravity_mode: GravityMode::Earth,
        },
    ]
}

pub fn preset_scene(id: &str) -> Result<SceneDescription, SandboxError> {
    match id {
        PRESET_DROP => Ok(drop_scene()),
        PRESET_HEAD_ON => Ok(head_on_scene()),
        PRESET_ORBIT => Ok(orbit_scene()),
        PRESET_RAMP => Ok(ramp_scene()),
        PRESET_CRASH => Ok(crash_scene()),
        _ => Err(SandboxError::UnknownPreset { id: id.to_string() }),
    }
}

/// Front-end facing wrapper around [`Simulator`] that hands out flat `f32` buffers in
/// scene order, ready to be copied into typed arrays.
pub struct Engine {
    sim: Simulator,
}

impl Engine {
    pub fn new(scene: SceneDescription, config: SimulationConfig) -> Self {
        Self { sim: Simulator::new(scene, config) }
    }

    pub fn new_preset(id: &str) -> Result<Self, SandboxError> {
        let scene = preset_scene(id)?;
        Ok(Self::new(scene, SimulationConfig::default()))
    }

    pub fn from_json(scene: &str, config: SimulationConfig) -> Result<Self, SandboxError> {
        let scene = SceneDescription::from_json(scene)?;
        Ok(Self::new(scene, config))
    }

    pub fn simulator(&self) -> &Simulator { &self.sim }
    pub fn simulator_mut(&mut self) -> &mut Simulator { &mut self.sim }
    pub fn len(&self) -> usize { self.sim.len() }
    pub fn is_empty(&self) -> bool { self.sim.is_empty() }
    pub fn time(&self) -> f64 { self.sim.time() }

    pub fn step(&mut self, frame_delta: f64) -> FrameReport { self.sim.step(frame_delta) }
    pub fn play(&mut self) { self.sim.play(); }
    pub fn pause(&mut self) { self.sim.pause(); }
    pub fn is_playing(&self) -> bool { self.sim.is_playing() }

    pub fn load_scene(&mut self, scene: SceneDescription) { self.sim.load_scene(scene); }
    pub fn set_config(&mut self, config: SimulationConfig) { self.sim.set_config(config); }
    pub fn config(&self) -> &SimulationConfig { self.sim.config() }
    pub fn update_body(&mut self, spec: BodySpec) { self.sim.update_body(spec); }

    pub fn set_body_fixed(&mut self, label: &str, fixed: bool) -> Result<(), SandboxError> {
        self.sim.set_body_fixed(label, fixed)
    }

    pub fn remove_body(&mut self, label: &str) -> Result<(), SandboxError> {
        self.sim.remove_body(label).map(|_| ())
    }

    pub fn labels(&self) -> Vec<String> {
        self.sim.registry().labels().into_iter().map(str::to_string).collect()
    }

    pub fn positions_flat(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.len() * 3);
        for b in self.sim.registry().iter() {
            let p = b.position();
            out.push(p.x as f32);
            out.push(p.y as f32);
            out.push(p.z as f32);
        }
        out
    }

    /// `[x, y, z, vx, vy, vz]` per body.
    pub fn state_matrix_flat(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.len() * 6);
        for b in self.sim.registry().iter() {
            let (p, v) = (b.position(), b.velocity());
            out.extend_from_slice(&[
                p.x as f32, p.y as f32, p.z as f32,
                v.x as f32, v.y as f32, v.z as f32,
            ]);
        }
        out
    }

    pub fn rotations_flat(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.len() * 3);
        for b in self.sim.registry().iter() {
            let r = b.display_rotation();
            out.push(r.x as f32);
            out.push(r.y as f32);
            out.push(r.z as f32);
        }
        out
    }

    /// `[KE, PE, total, speed, time]` per body.
    pub fn metrics_flat(&self) -> Vec<f32> {
        self.sim.metrics().iter().flat_map(MetricSample::to_flat).collect()
    }

    pub fn metrics(&self) -> Vec<MetricSample> { self.sim.metrics() }
    pub fn snapshots(&self) -> Vec<BodySnapshot> { self.sim.snapshots() }
    pub fn vector_overlays(&self) -> Vec<VectorOverlay> { self.sim.vector_overlays() }

    pub fn trajectory_flat(&self, label: &str) -> Result<Vec<f32>, SandboxError> {
        self.sim.predict(label).map(|t| t.to_flat())
    }
}
