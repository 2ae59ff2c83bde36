// src/simulation/mod.rs
//! Simulation host
//!
//! The [`Simulation`] trait is what the application loop drives; the
//! [`SimulationManager`] owns the run mode and feeds frame deltas to it.

pub mod manager;
pub mod sphere_box;
pub mod traits;

pub use manager::SimulationManager;
pub use sphere_box::SphereBoxSimulation;
pub use traits::Simulation;
