//! Rigid-body engine for an interactive physics sandbox.
//!
//! A [`Simulator`] owns the scene, the user controls and the live body registry and is
//! driven one displayed frame at a time with [`Simulator::step`]. Rendering, scene
//! generation and charts live outside the crate; they read positions, metrics and
//! ghost trajectories back out.

pub mod algorithms;
pub mod config;
pub mod engine;
pub mod error;
pub mod math;
pub mod models;
pub mod scene;
pub mod sim;

pub use algorithms::metrics::MetricSample;
pub use algorithms::trajectory::Trajectory;
pub use algorithms::vectors::VectorOverlay;
pub use config::{GravityMode, SimulationConfig};
pub use engine::Engine;
pub use error::SandboxError;
pub use models::body::Body;
pub use models::registry::BodyRegistry;
pub use scene::{BodySpec, SceneDescription, ShapeKind};
pub use sim::{BodySnapshot, FrameReport, Simulator};

#[cfg(target_arch = "wasm32")]
pub mod wasm;
