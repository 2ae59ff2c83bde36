// src/gfx/mod.rs
//! Graphics
//!
//! A plain forward renderer for the simulator: instanced spheres and boxes
//! lit by two point lights, seen through a first-person camera.

pub mod camera;
pub mod geometry;
pub mod global_bindings;
pub mod instances;
pub mod render_engine;
pub mod texture_resource;
pub mod vertex;

pub use instances::{build_instances, InstanceData, SceneInstances};
pub use render_engine::RenderEngine;
