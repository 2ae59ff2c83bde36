//! # Spherebox Prelude
//!
//! Commonly used types in one import.
//!
//! ```no_run
//! use spherebox::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = SimulationConfig::default().with_max_frame_dt(0.05);
//!     SphereboxApp::new(config)?.run()
//! }
//! ```

// Application
pub use crate::app::SphereboxApp;
pub use crate::default;

// Configuration
pub use crate::config::{CameraConfig, LightConfig, SimulationConfig, SphereConfig, WindowConfig};

// Physics
pub use crate::physics::{
    Body, BodyKind, BodyView, FrameDriver, FrameInput, FrameReport, SimulationMode,
    SimulationState,
};

// Editing
pub use crate::edit::{BodyField, EditSurface, FieldEdit, ParameterSnapshot, SnapshotSink};

// Simulation framework
pub use crate::simulation::{Simulation, SimulationManager, SphereBoxSimulation};

// Errors
pub use crate::error::{ConfigError, EditError, SnapshotError};

// Third-party types used in public signatures
pub use cgmath::Vector3;
pub use imgui::Ui;
