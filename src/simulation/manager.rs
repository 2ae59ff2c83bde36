//! Simulation manager
//!
//! Owns the attached simulation and the run mode, and turns frame deltas into
//! simulation updates.

use imgui::Ui;

use super::traits::Simulation;
use crate::physics::{BodyView, FrameReport, SimulationMode};

/// Runs one simulation inside the application loop
pub struct SimulationManager {
    simulation: Box<dyn Simulation>,
    mode: SimulationMode,
    last_report: Option<FrameReport>,
}

impl SimulationManager {
    pub fn new(simulation: Box<dyn Simulation>) -> Self {
        log::info!("attached simulation '{}'", simulation.name());
        Self {
            simulation,
            mode: SimulationMode::Running,
            last_report: None,
        }
    }

    /// Update simulation (called every frame)
    ///
    /// # Arguments
    /// * `delta_time` - Time elapsed since last frame in seconds
    pub fn update(&mut self, delta_time: f32) -> &FrameReport {
        let report = self.simulation.update(delta_time, self.mode);
        log::trace!(
            "frame {} dt {:.4} gravity pairs {}",
            report.frame,
            report.dt,
            report.gravity_pairs
        );
        self.last_report.insert(report)
    }

    pub fn render_ui(&mut self, ui: &Ui) {
        self.simulation.render_ui(ui, self.mode);
    }

    pub fn views(&self) -> Vec<BodyView> {
        self.simulation.views()
    }

    pub fn mode(&self) -> SimulationMode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.mode.is_paused()
    }

    /// Flips between running and paused and returns the new mode
    pub fn toggle_pause(&mut self) -> SimulationMode {
        self.set_paused(!self.is_paused());
        self.mode
    }

    pub fn set_paused(&mut self, paused: bool) {
        let mode = if paused {
            SimulationMode::Paused
        } else {
            SimulationMode::Running
        };

        if mode != self.mode {
            log::info!(
                "simulation '{}' {}",
                self.simulation.name(),
                if paused { "paused" } else { "resumed" }
            );
        }
        self.mode = mode;
    }

    pub fn reset(&mut self) {
        log::info!("resetting simulation '{}'", self.simulation.name());
        self.simulation.reset();
        self.last_report = None;
    }

    pub fn current_simulation_name(&self) -> &str {
        self.simulation.name()
    }

    pub fn last_report(&self) -> Option<&FrameReport> {
        self.last_report.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SimulationConfig, simulation::SphereBoxSimulation};

    fn manager() -> SimulationManager {
        let simulation = SphereBoxSimulation::new(SimulationConfig::default()).unwrap();
        SimulationManager::new(Box::new(simulation))
    }

    #[test]
    fn test_toggle_pause() {
        let mut manager = manager();
        assert_eq!(manager.mode(), SimulationMode::Running);
        assert_eq!(manager.toggle_pause(), SimulationMode::Paused);
        assert!(manager.is_paused());
        assert_eq!(manager.toggle_pause(), SimulationMode::Running);
    }

    #[test]
    fn test_paused_update_has_zero_dt() {
        let mut manager = manager();
        manager.set_paused(true);
        let before = manager.views();

        let report = manager.update(0.05).clone();

        assert_eq!(report.dt, 0.0);
        assert_eq!(report.frame, 1);
        let after = manager.views();
        for (a, b) in before.iter().zip(&after) {
            assert_eq!(a.location, b.location);
        }
    }

    #[test]
    fn test_reset_clears_report() {
        let mut manager = manager();
        manager.update(0.016);
        assert!(manager.last_report().is_some());
        manager.reset();
        assert!(manager.last_report().is_none());
        assert_eq!(manager.current_simulation_name(), "Spherebox");
    }
}
