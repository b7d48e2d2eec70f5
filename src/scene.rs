use crate::config::GravityMode;
use crate::error::SandboxError;
use serde::{Deserialize, Serialize};

/// Closed set of body shapes. Box, car and wedge all collide as oriented boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ShapeKind {
    #[default]
    Sphere,
    Box,
    Car,
    Wedge,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Sphere => "sphere",
            ShapeKind::Box => "box",
            ShapeKind::Car => "car",
            ShapeKind::Wedge => "wedge",
        }
    }

    pub fn is_box_like(self) -> bool {
        !matches!(self, ShapeKind::Sphere)
    }
}

impl From<String> for ShapeKind {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "sphere" | "ball" => ShapeKind::Sphere,
            "box" | "cube" => ShapeKind::Box,
            "car" => ShapeKind::Car,
            "wedge" | "ramp" => ShapeKind::Wedge,
            other => {
                log::warn!("unknown shape '{other}', treating it as a box");
                ShapeKind::Box
            }
        }
    }
}

/// Initial description of one body, as produced by the scenario generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub label: String,
    #[serde(default)]
    pub pos: [f64; 3],
    #[serde(default)]
    pub vel: [f64; 3],
    #[serde(default)]
    pub shape: ShapeKind,
    /// Radius for spheres, `[width, height, depth]` for the box family.
    #[serde(default)]
    pub args: Vec<f64>,
    #[serde(default)]
    pub mass: Option<f64>,
    #[serde(default)]
    pub fixed: bool,
    #[serde(default)]
    pub rotation: [f64; 3],
    /// Presentational only.
    #[serde(default)]
    pub color: Option<String>,
}

impl BodySpec {
    pub fn sphere(label: &str, pos: [f64; 3], radius: f64) -> Self {
        Self {
            label: label.to_string(),
            pos,
            vel: [0.0; 3],
            shape: ShapeKind::Sphere,
            args: vec![radius],
            mass: None,
            fixed: false,
            rotation: [0.0; 3],
            color: None,
        }
    }

    pub fn cuboid(label: &str, shape: ShapeKind, pos: [f64; 3], size: [f64; 3]) -> Self {
        Self {
            shape,
            args: size.to_vec(),
            ..Self::sphere(label, pos, 0.0)
        }
    }

    pub fn with_velocity(mut self, vel: [f64; 3]) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_rotation(mut self, rotation: [f64; 3]) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }
}

/// Ordered list of body specs; the order is the engine's iteration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default, alias = "gravityMode")]
    pub gravity_mode: Option<GravityMode>,
    #[serde(default, alias = "bodies")]
    pub objects: Vec<BodySpec>,
}

impl SceneDescription {
    pub fn new(objects: Vec<BodySpec>) -> Self {
        Self { gravity_mode: None, objects }
    }

    pub fn with_gravity_mode(mut self, mode: GravityMode) -> Self {
        self.gravity_mode = Some(mode);
        self
    }

    /// Parse a generator response. Unknown top-level keys (explanation, scenario type) are ignored.
    pub fn from_json(text: &str) -> Result<Self, SandboxError> {
        serde_json::from_str(text).map_err(|e| SandboxError::InvalidScene { reason: e.to_string() })
    }

    pub fn to_json(&self) -> Result<String, SandboxError> {
        serde_json::to_string(self).map_err(|e| SandboxError::InvalidScene { reason: e.to_string() })
    }

    pub fn get(&self, label: &str) -> Option<&BodySpec> {
        self.objects.iter().find(|s| s.label == label)
    }
}
