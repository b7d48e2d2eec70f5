//! Error type for the sandbox engine.
//!
//! Only the outer API fails: scene parsing, label lookups, preset selection.
//! The per-frame step itself never returns an error; malformed numbers are
//! clamped on the way in instead.

use core::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SandboxError {
    /// No body with this label is part of the active scene.
    UnknownBody { label: String },
    /// The scene document could not be parsed.
    InvalidScene { reason: String },
    /// No built-in preset with this id.
    UnknownPreset { id: String },
    /// Gravity mode string other than EARTH / SPACE / CUSTOM.
    UnknownGravityMode { value: String },
}

impl fmt::Display for SandboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBody { label } => write!(f, "unknown body '{label}'"),
            Self::InvalidScene { reason } => write!(f, "invalid scene: {reason}"),
            Self::UnknownPreset { id } => write!(f, "unknown preset id '{id}'"),
            Self::UnknownGravityMode { value } => {
                write!(f, "unknown gravity mode '{value}' (expected EARTH, SPACE or CUSTOM)")
            }
        }
    }
}

impl std::error::Error for SandboxError {}
