//! Parameter edit surface
//!
//! The panel never touches bodies directly. It produces a [`FieldEdit`] which
//! the frame driver applies at the top of the next frame through
//! [`FieldEdit::apply`], the single place where edit validation lives.

pub mod field;
pub mod input;
pub mod snapshot;

pub use crate::error::EditError;
pub use field::BodyField;
pub use input::{parse_value, EditSurface};
pub use snapshot::{FileSink, MemorySink, ParameterSnapshot, SnapshotSink};

use crate::physics::Body;

/// A single validated-on-apply change to one field of one sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldEdit {
    pub body_index: usize,
    pub field: BodyField,
    /// In table units: percent for elasticity, non-zero means hidden for `Hidden`
    pub value: f64,
}

impl FieldEdit {
    pub fn new(body_index: usize, field: BodyField, value: f64) -> Self {
        Self {
            body_index,
            field,
            value,
        }
    }

    /// An edit that flips the visibility of a sphere currently `hidden` or not
    pub fn toggle_hidden(body_index: usize, hidden: bool) -> Self {
        Self::new(body_index, BodyField::Hidden, if hidden { 0.0 } else { 1.0 })
    }

    /// Writes the value into `bodies[body_index]`
    ///
    /// Leaves the body untouched when the index is wrong, the target is not a
    /// sphere, or the value is out of range for the field.
    pub fn apply(&self, bodies: &mut [Body]) -> Result<(), EditError> {
        let body = bodies
            .get_mut(self.body_index)
            .ok_or(EditError::NoSuchBody(self.body_index))?;

        if !body.is_sphere() {
            return Err(EditError::NotASphere(self.body_index));
        }

        if !self.field.accepts(self.value) {
            return Err(EditError::OutOfRange {
                field: self.field,
                value: self.value,
            });
        }

        let value = self.value as f32;
        match self.field {
            BodyField::Hidden => body.hidden = self.value != 0.0,
            BodyField::PositionX => body.location.x = value,
            BodyField::PositionY => body.location.y = value,
            BodyField::PositionZ => body.location.z = value,
            BodyField::VelocityX => body.velocity.x = value,
            BodyField::VelocityY => body.velocity.y = value,
            BodyField::VelocityZ => body.velocity.z = value,
            BodyField::MassCoefficient => {
                body.mass_coefficient = self.value;
                body.refresh_mass();
            }
            BodyField::MassExponent => {
                body.mass_exponent = self.value;
                body.refresh_mass();
            }
            BodyField::Radius => body.set_radius(value),
            BodyField::Elasticity => body.elasticity = (self.value / 100.0) as f32,
        }

        Ok(())
    }
}

/// Applies `edit` to `bodies`; see [`FieldEdit::apply`]
pub fn apply_edit(bodies: &mut [Body], edit: &FieldEdit) -> Result<(), EditError> {
    edit.apply(bodies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector3, Zero};

    fn bodies() -> Vec<Body> {
        vec![
            Body::boundary(15.0),
            Body::sphere("A", Vector3::zero(), 1.0),
        ]
    }

    #[test]
    fn test_radius_sets_all_scale_components() {
        let mut bodies = bodies();
        apply_edit(&mut bodies, &FieldEdit::new(1, BodyField::Radius, 2.5)).unwrap();
        assert_eq!(bodies[1].scale, Vector3::new(2.5, 2.5, 2.5));
    }

    #[test]
    fn test_elasticity_is_stored_as_fraction() {
        let mut bodies = bodies();
        apply_edit(&mut bodies, &FieldEdit::new(1, BodyField::Elasticity, 40.0)).unwrap();
        assert!((bodies[1].elasticity - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_mass_edit_refreshes_mass() {
        let mut bodies = bodies();
        apply_edit(&mut bodies, &FieldEdit::new(1, BodyField::MassCoefficient, 2.0)).unwrap();
        apply_edit(&mut bodies, &FieldEdit::new(1, BodyField::MassExponent, 3.0)).unwrap();
        assert_eq!(bodies[1].mass, 2000.0);
    }

    #[test]
    fn test_out_of_range_keeps_prior_value() {
        let mut bodies = bodies();
        bodies[1].elasticity = 0.75;

        for (field, value) in [
            (BodyField::Radius, 0.0),
            (BodyField::Radius, -1.0),
            (BodyField::MassCoefficient, 0.0),
            (BodyField::Elasticity, 101.0),
            (BodyField::Elasticity, -1.0),
            (BodyField::PositionX, f64::NAN),
        ] {
            let result = apply_edit(&mut bodies, &FieldEdit::new(1, field, value));
            assert!(matches!(result, Err(EditError::OutOfRange { .. })));
        }

        assert_eq!(bodies[1].radius(), 1.0);
        assert_eq!(bodies[1].mass_coefficient, 1.0);
        assert_eq!(bodies[1].elasticity, 0.75);
        assert_eq!(bodies[1].location, Vector3::zero());
    }

    #[test]
    fn test_hidden_toggle_flips() {
        let mut bodies = bodies();
        let edit = FieldEdit::toggle_hidden(1, bodies[1].hidden);
        apply_edit(&mut bodies, &edit).unwrap();
        assert!(bodies[1].hidden);

        let edit = FieldEdit::toggle_hidden(1, bodies[1].hidden);
        apply_edit(&mut bodies, &edit).unwrap();
        assert!(!bodies[1].hidden);
    }

    #[test]
    fn test_bad_targets() {
        let mut bodies = bodies();
        assert_eq!(
            apply_edit(&mut bodies, &FieldEdit::new(0, BodyField::Radius, 2.0)),
            Err(EditError::NotASphere(0))
        );
        assert_eq!(
            apply_edit(&mut bodies, &FieldEdit::new(9, BodyField::Radius, 2.0)),
            Err(EditError::NoSuchBody(9))
        );
        assert_eq!(bodies[0].scale.x, 15.0);
    }
}
