//! Spheres under mutual gravity inside a box

use imgui::Ui;

use super::traits::Simulation;
use crate::{
    config::SimulationConfig,
    edit::{EditSurface, FileSink, MemorySink, ParameterSnapshot, SnapshotSink},
    error::ConfigError,
    physics::{BodyView, FrameDriver, FrameInput, FrameReport, SimulationMode, SimulationState},
    ui::panel::{self, PanelColumn},
};

/// The boxed N-body simulation with its parameter table
pub struct SphereBoxSimulation {
    initial: SimulationState,
    state: SimulationState,
    driver: FrameDriver,
    surface: EditSurface,
    table: MemorySink,
    file_sink: Option<FileSink>,
}

impl SphereBoxSimulation {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let state = SimulationState::from_config(&config)?;
        let mut simulation = Self {
            initial: state.clone(),
            state,
            driver: FrameDriver::new(config.max_frame_dt),
            surface: EditSurface::new(),
            table: MemorySink::default(),
            file_sink: config.snapshot_path.map(FileSink::new),
        };
        simulation.publish_snapshot();
        Ok(simulation)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn surface(&self) -> &EditSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut EditSurface {
        &mut self.surface
    }

    /// Latest parameter table
    pub fn snapshot(&self) -> &ParameterSnapshot {
        self.table.latest()
    }

    fn publish_snapshot(&mut self) {
        let snapshot = ParameterSnapshot::capture(&self.state);
        self.table.replace(&snapshot);

        if let Some(sink) = self.file_sink.as_mut() {
            if let Err(err) = sink.write(&snapshot) {
                log::warn!("{}; snapshot file disabled", err);
                self.file_sink = None;
            }
        }
    }
}

/// Table columns, one per sphere, in body order
fn sphere_columns(state: &SimulationState) -> Vec<PanelColumn<'_>> {
    state
        .bodies()
        .iter()
        .enumerate()
        .filter(|(_, body)| body.is_sphere())
        .map(|(body_index, body)| PanelColumn {
            body_index,
            name: &body.name,
            hidden: body.hidden,
        })
        .collect()
}

impl Simulation for SphereBoxSimulation {
    fn name(&self) -> &str {
        "Spherebox"
    }

    fn update(&mut self, delta_time: f32, mode: SimulationMode) -> FrameReport {
        let input = FrameInput {
            wall_dt: delta_time,
            mode,
            edit: self.surface.take_pending(),
        };
        let report = self.driver.step(&mut self.state, input);
        self.publish_snapshot();
        report
    }

    fn render_ui(&mut self, ui: &Ui, mode: SimulationMode) {
        match mode {
            SimulationMode::Running => panel::hint_overlay(ui),
            SimulationMode::Paused => {
                panel::instructions(ui);

                let columns = sphere_columns(&self.state);
                panel::parameter_table(ui, self.table.latest(), &columns, &mut self.surface);
            }
        }
    }

    fn views(&self) -> Vec<BodyView> {
        self.state.views()
    }

    fn reset(&mut self) {
        self.state = self.initial.clone();
        self.driver.reset();
        self.surface.clear_selection();
        self.publish_snapshot();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::BodyField;

    #[test]
    fn test_pending_edit_reaches_state_and_table() {
        let mut simulation = SphereBoxSimulation::new(SimulationConfig::default()).unwrap();

        simulation.surface_mut().select(1, BodyField::PositionY);
        simulation.surface_mut().buffer_mut().push_str("4");
        simulation.surface_mut().commit().unwrap();

        let report = simulation.update(0.0, SimulationMode::Paused);

        assert_eq!(report.edit, Some(Ok(())));
        assert_eq!(simulation.state().bodies()[1].location.y, 4.0);
        assert_eq!(simulation.snapshot().cell(BodyField::PositionY, 0), Some("4.000"));
    }

    #[test]
    fn test_reset_restores_initial_scene() {
        let mut simulation = SphereBoxSimulation::new(SimulationConfig::default()).unwrap();
        simulation.surface_mut().toggle_hidden(2, false);
        simulation.update(0.016, SimulationMode::Running);
        assert!(simulation.state().bodies()[2].hidden);

        simulation.reset();

        assert!(!simulation.state().bodies()[2].hidden);
        assert_eq!(simulation.snapshot().cell(BodyField::Hidden, 1), Some("yes"));
    }

    #[test]
    fn test_unwritable_snapshot_file_is_dropped() {
        let config = SimulationConfig::default()
            .with_snapshot_path("/nonexistent-dir/spherebox/params.txt");
        let mut simulation = SphereBoxSimulation::new(config).unwrap();
        simulation.update(0.016, SimulationMode::Running);

        assert!(simulation.file_sink.is_none());
        assert_eq!(simulation.snapshot().columns(), 6);
    }
}
