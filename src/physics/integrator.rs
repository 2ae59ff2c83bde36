//! Per-frame ordering of the physics passes
//!
//! One call to [`FrameDriver::step`] is one rendered frame:
//! apply the pending edit, snapshot, gravity, collisions, integrate.

use crate::edit::{EditError, FieldEdit};

use super::{
    body::Body,
    collision::{self, CollisionCounts},
    gravity,
    state::SimulationState,
};

/// Whether simulated time advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationMode {
    #[default]
    Running,
    /// Frames keep coming but the simulated `dt` is zero
    Paused,
}

impl SimulationMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Running => Self::Paused,
            Self::Paused => Self::Running,
        }
    }

    pub fn is_paused(self) -> bool {
        self == Self::Paused
    }
}

/// Everything the driver needs from outside for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Wall-clock seconds since the previous frame
    pub wall_dt: f32,
    pub mode: SimulationMode,
    /// At most one edit, applied before the physics passes
    pub edit: Option<FieldEdit>,
}

/// Summary of one frame, mostly for logging and the UI
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    /// Simulated seconds actually fed to gravity and integration
    pub dt: f32,
    pub gravity_pairs: usize,
    pub collisions: CollisionCounts,
    /// Outcome of the frame's edit, if there was one
    pub edit: Option<Result<(), EditError>>,
}

/// Snapshot pass: freeze velocity and location, refresh mass
pub fn snapshot(bodies: &mut [Body]) {
    for body in bodies.iter_mut().filter(|b| b.is_live()) {
        body.snapshot();
    }
}

/// Integration pass: `location += velocity * dt`
pub fn integrate(bodies: &mut [Body], dt: f32) {
    for body in bodies.iter_mut().filter(|b| b.is_colliding()) {
        body.location += body.velocity * dt;
    }
}

/// Drives the physics state one frame at a time
#[derive(Debug, Clone)]
pub struct FrameDriver {
    max_frame_dt: f32,
    frame: u64,
}

impl FrameDriver {
    /// Creates a driver that never advances more than `max_frame_dt` per frame
    pub fn new(max_frame_dt: f32) -> Self {
        Self {
            max_frame_dt,
            frame: 0,
        }
    }

    /// Simulated time for a frame: clamped wall time, or zero while paused
    pub fn simulated_dt(&self, wall_dt: f32, mode: SimulationMode) -> f32 {
        match mode {
            SimulationMode::Paused => 0.0,
            SimulationMode::Running if wall_dt.is_finite() => {
                wall_dt.clamp(0.0, self.max_frame_dt)
            }
            SimulationMode::Running => 0.0,
        }
    }

    /// Advances `state` by one frame
    ///
    /// # Arguments
    /// * `state` - Simulation state, borrowed exclusively for the frame
    /// * `input` - Frame delta, mode and optional pending edit
    pub fn step(&mut self, state: &mut SimulationState, input: FrameInput) -> FrameReport {
        self.frame += 1;

        let edit = input.edit.map(|edit| {
            let outcome = edit.apply(state.bodies_mut());
            match &outcome {
                Ok(()) => log::info!(
                    "applied {} = {} to body {}",
                    edit.field.label(),
                    edit.value,
                    edit.body_index
                ),
                Err(err) => log::warn!("edit rejected: {}", err),
            }
            outcome
        });

        let dt = self.simulated_dt(input.wall_dt, input.mode);
        let g = state.gravitational_constant();
        let bodies = state.bodies_mut();

        snapshot(bodies);
        let gravity_pairs = gravity::apply_gravity(bodies, g, dt);
        let collisions = collision::resolve_collisions(bodies);
        integrate(bodies, dt);

        if collisions != CollisionCounts::default() {
            log::debug!(
                "frame {}: {} sphere contacts, {} wall contacts",
                self.frame,
                collisions.sphere_contacts,
                collisions.boundary_contacts
            );
        }

        FrameReport {
            frame: self.frame,
            dt,
            gravity_pairs,
            collisions,
            edit,
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn reset(&mut self) {
        self.frame = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::BodyField;
    use cgmath::{Vector3, Zero};

    fn drifting_state() -> SimulationState {
        let bodies = vec![
            Body::boundary(15.0),
            Body::sphere("A", Vector3::zero(), 1.0).with_velocity(Vector3::new(1.0, 0.0, 0.0)),
        ];
        SimulationState::new(bodies, 0.0)
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(SimulationMode::Running.toggled(), SimulationMode::Paused);
        assert!(SimulationMode::Running.toggled().is_paused());
        assert_eq!(SimulationMode::Paused.toggled(), SimulationMode::Running);
    }

    #[test]
    fn test_simulated_dt() {
        let driver = FrameDriver::new(0.1);
        assert_eq!(driver.simulated_dt(0.016, SimulationMode::Running), 0.016);
        assert_eq!(driver.simulated_dt(5.0, SimulationMode::Running), 0.1);
        assert_eq!(driver.simulated_dt(0.016, SimulationMode::Paused), 0.0);
        assert_eq!(driver.simulated_dt(f32::NAN, SimulationMode::Running), 0.0);
    }

    #[test]
    fn test_running_frame_integrates() {
        let mut state = drifting_state();
        let mut driver = FrameDriver::new(1.0);

        let report = driver.step(
            &mut state,
            FrameInput {
                wall_dt: 0.5,
                ..Default::default()
            },
        );

        assert_eq!(report.frame, 1);
        assert_eq!(report.dt, 0.5);
        assert_eq!(state.bodies()[1].location, Vector3::new(0.5, 0.0, 0.0));
        assert_eq!(state.bodies()[1].old_location, Vector3::zero());
    }

    #[test]
    fn test_paused_frame_freezes_locations() {
        let mut state = drifting_state();
        let mut driver = FrameDriver::new(1.0);

        let report = driver.step(
            &mut state,
            FrameInput {
                wall_dt: 0.5,
                mode: SimulationMode::Paused,
                edit: None,
            },
        );

        assert_eq!(report.dt, 0.0);
        assert_eq!(state.bodies()[1].location, Vector3::zero());
        assert_eq!(state.bodies()[1].velocity, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_edit_applies_before_physics() {
        let mut state = drifting_state();
        let mut driver = FrameDriver::new(1.0);

        let report = driver.step(
            &mut state,
            FrameInput {
                wall_dt: 1.0,
                mode: SimulationMode::Running,
                edit: Some(FieldEdit::new(1, BodyField::VelocityX, -2.0)),
            },
        );

        assert_eq!(report.edit, Some(Ok(())));
        assert_eq!(state.bodies()[1].location, Vector3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn test_rejected_edit_keeps_prior_value() {
        let mut state = drifting_state();
        let mut driver = FrameDriver::new(1.0);

        let report = driver.step(
            &mut state,
            FrameInput {
                wall_dt: 0.0,
                mode: SimulationMode::Running,
                edit: Some(FieldEdit::new(1, BodyField::Radius, -1.0)),
            },
        );

        assert!(matches!(report.edit, Some(Err(EditError::OutOfRange { .. }))));
        assert_eq!(state.bodies()[1].radius(), 1.0);
    }

    #[test]
    fn test_hidden_body_is_frozen() {
        let mut state = drifting_state();
        state.bodies_mut()[1].hidden = true;
        let mut driver = FrameDriver::new(1.0);

        driver.step(
            &mut state,
            FrameInput {
                wall_dt: 1.0,
                ..Default::default()
            },
        );

        assert_eq!(state.bodies()[1].location, Vector3::zero());
    }
}
