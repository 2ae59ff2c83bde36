//! Interface between the application loop and a simulation

use imgui::Ui;

use crate::physics::{BodyView, FrameReport, SimulationMode};

/// A simulation the application can drive, draw and edit
pub trait Simulation {
    /// Name shown in the window title and logs
    fn name(&self) -> &str;

    /// Advances one rendered frame
    ///
    /// # Arguments
    /// * `delta_time` - Wall-clock seconds since the previous frame
    /// * `mode` - Whether simulated time advances this frame
    fn update(&mut self, delta_time: f32, mode: SimulationMode) -> FrameReport;

    /// Builds the simulation's overlay and panels
    fn render_ui(&mut self, ui: &Ui, mode: SimulationMode);

    /// Read-only state for the renderer
    fn views(&self) -> Vec<BodyView>;

    /// Restores the initial conditions
    fn reset(&mut self);
}
