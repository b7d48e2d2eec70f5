use crate::error::SandboxError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Gravitational constant for SPACE mode (scaled for the sandbox).
pub const G: f64 = 100.0;
/// Minimum squared separation used in SPACE attraction.
pub const SOFTENING_FLOOR: f64 = 2.0;
/// Earth gravity; also the constant used for potential energy in every uniform mode.
pub const EARTH_GRAVITY: f64 = 9.8;

pub const MAX_FRAME_DT: f64 = 0.05;
pub const SUB_STEPS: usize = 8;
/// Integration stays off until the clock reaches this many seconds.
pub const WARM_UP_TIME: f64 = 0.1;

pub const MAX_RESTITUTION: f64 = 1.2;
pub const DEFAULT_RESTITUTION: f64 = 0.8;
pub const DEFAULT_FRICTION: f64 = 0.1;

/// Serialises as `EARTH` / `SPACE` / `CUSTOM`; parsing ignores case and surrounding blanks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum GravityMode {
    #[default]
    Earth,
    Space,
    Custom,
}

impl GravityMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GravityMode::Earth => "EARTH",
            GravityMode::Space => "SPACE",
            GravityMode::Custom => "CUSTOM",
        }
    }

    /// Contacts and the ground plane are only active in the uniform-field modes.
    pub fn has_contacts(self) -> bool {
        !matches!(self, GravityMode::Space)
    }
}

impl FromStr for GravityMode {
    type Err = SandboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EARTH" => Ok(GravityMode::Earth),
            "SPACE" => Ok(GravityMode::Space),
            "CUSTOM" => Ok(GravityMode::Custom),
            _ => Err(SandboxError::UnknownGravityMode { value: s.to_string() }),
        }
    }
}

impl TryFrom<String> for GravityMode {
    type Error = SandboxError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Global knobs applied uniformly to every body in a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    pub gravity_mode: GravityMode,
    /// Only read in CUSTOM mode.
    pub custom_gravity: f64,
    pub restitution: f64,
    pub friction: f64,
    pub show_vectors: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity_mode: GravityMode::Earth,
            custom_gravity: EARTH_GRAVITY,
            restitution: DEFAULT_RESTITUTION,
            friction: DEFAULT_FRICTION,
            show_vectors: true,
        }
    }
}

impl SimulationConfig {
    pub fn with_gravity_mode(mut self, mode: GravityMode) -> Self {
        self.gravity_mode = mode;
        self
    }

    pub fn with_custom_gravity(mut self, g: f64) -> Self {
        self.custom_gravity = g;
        self
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    /// Clamp every knob into its legal range; non-finite values fall back to the defaults.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut out = self.clone();

        if !out.custom_gravity.is_finite() {
            log::warn!("custom gravity {} is not finite, using {}", out.custom_gravity, defaults.custom_gravity);
            out.custom_gravity = defaults.custom_gravity;
        }

        out.restitution = clamp_knob("restitution", out.restitution, 0.0, MAX_RESTITUTION, defaults.restitution);
        out.friction = clamp_knob("friction", out.friction, 0.0, 1.0, defaults.friction);
        out
    }

    /// Downward acceleration magnitude of the uniform field (zero in SPACE mode).
    pub fn vertical_gravity(&self) -> f64 {
        match self.gravity_mode {
            GravityMode::Earth => EARTH_GRAVITY,
            GravityMode::Custom => self.custom_gravity,
            GravityMode::Space => 0.0,
        }
    }
}

fn clamp_knob(name: &str, value: f64, lo: f64, hi: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        log::warn!("{name} {value} is not finite, using {fallback}");
        return fallback;
    }
    let clamped = value.clamp(lo, hi);
    if clamped != value {
        log::warn!("{name} {value} outside [{lo}, {hi}], clamped to {clamped}");
    }
    clamped
}
