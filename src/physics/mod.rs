//! Physics core
//!
//! Gravity, collision resolution and integration for spheres in a box. The
//! frame driver in [`integrator`] orders the passes; everything else is plain
//! functions over a `&mut [Body]`.

pub mod body;
pub mod collision;
pub mod gravity;
pub mod integrator;
pub mod math;
pub mod state;

pub use body::{Body, BodyKind, BodyView};
pub use collision::CollisionCounts;
pub use integrator::{FrameDriver, FrameInput, FrameReport, SimulationMode};
pub use state::{SimulationState, FIRST_SPHERE_INDEX};
