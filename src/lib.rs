// src/lib.rs
//! Spherebox
//!
//! An interactive N-body gravity and collision simulator for spheres bounded
//! inside a cube, rendered with wgpu and edited live through Dear ImGui.

pub mod app;
pub mod config;
pub mod edit;
pub mod error;
pub mod gfx;
pub mod physics;
pub mod prelude;
pub mod simulation;
pub mod ui;

// Re-export main types for convenience
pub use app::SphereboxApp;
pub use config::SimulationConfig;

/// Creates an application for the default six-sphere scene
pub fn default() -> anyhow::Result<SphereboxApp> {
    SphereboxApp::new(SimulationConfig::default())
}
