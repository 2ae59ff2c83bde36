//! Error types
//!
//! None of these ever escape the physics passes: edits and snapshot writes
//! are dropped with a log line, and configuration errors surface at start-up.

use std::path::PathBuf;

use thiserror::Error;

use crate::edit::BodyField;

/// Why a parameter edit was not applied
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("'{0}' is not a number")]
    Malformed(String),

    #[error("{value} is out of range for {}", .field.label())]
    OutOfRange { field: BodyField, value: f64 },

    #[error("no body at index {0}")]
    NoSuchBody(usize),

    #[error("body {0} is not a sphere")]
    NotASphere(usize),
}

/// Invalid simulation configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("at most {max} spheres are supported, got {got}")]
    TooManySpheres { max: usize, got: usize },

    #[error("sphere {name} has invalid radius {radius}")]
    InvalidRadius { name: String, radius: f32 },

    #[error("sphere {name} has elasticity {elasticity} outside [0, 1]")]
    InvalidElasticity { name: String, elasticity: f32 },

    #[error("domain half-extent must be positive, got {0}")]
    InvalidDomain(f32),

    #[error("maximum frame delta must be positive, got {0}")]
    InvalidFrameDt(f32),
}

/// Failure to persist the parameter snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to write snapshot to {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
