//! Editable per-sphere fields
//!
//! The order of [`BodyField::ALL`] is the row order of the parameter table and
//! of the snapshot.

use crate::physics::Body;

/// One row of the parameter table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyField {
    Hidden,
    PositionX,
    PositionY,
    PositionZ,
    VelocityX,
    VelocityY,
    VelocityZ,
    MassCoefficient,
    MassExponent,
    Radius,
    /// Edited and displayed in percent, stored as a fraction
    Elasticity,
}

impl BodyField {
    pub const ALL: [BodyField; 11] = [
        BodyField::Hidden,
        BodyField::PositionX,
        BodyField::PositionY,
        BodyField::PositionZ,
        BodyField::VelocityX,
        BodyField::VelocityY,
        BodyField::VelocityZ,
        BodyField::MassCoefficient,
        BodyField::MassExponent,
        BodyField::Radius,
        BodyField::Elasticity,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BodyField::Hidden => "Visible",
            BodyField::PositionX => "Position X",
            BodyField::PositionY => "Position Y",
            BodyField::PositionZ => "Position Z",
            BodyField::VelocityX => "Velocity X",
            BodyField::VelocityY => "Velocity Y",
            BodyField::VelocityZ => "Velocity Z",
            BodyField::MassCoefficient => "Mass (coeff.)",
            BodyField::MassExponent => "Mass (exp.)",
            BodyField::Radius => "Radius",
            BodyField::Elasticity => "Elasticity %",
        }
    }

    pub fn row(self) -> usize {
        BodyField::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }

    pub fn from_row(row: usize) -> Option<Self> {
        BodyField::ALL.get(row).copied()
    }

    /// Toggled by a click rather than edited as text
    pub fn is_toggle(self) -> bool {
        self == BodyField::Hidden
    }

    /// The value as the table shows it; `Hidden` reads 1.0 when hidden
    pub fn read(self, body: &Body) -> f64 {
        match self {
            BodyField::Hidden => f64::from(u8::from(body.hidden)),
            BodyField::PositionX => body.location.x as f64,
            BodyField::PositionY => body.location.y as f64,
            BodyField::PositionZ => body.location.z as f64,
            BodyField::VelocityX => body.velocity.x as f64,
            BodyField::VelocityY => body.velocity.y as f64,
            BodyField::VelocityZ => body.velocity.z as f64,
            BodyField::MassCoefficient => body.mass_coefficient,
            BodyField::MassExponent => body.mass_exponent,
            BodyField::Radius => body.radius() as f64,
            BodyField::Elasticity => body.elasticity as f64 * 100.0,
        }
    }

    /// Table text: `yes`/`no` for visibility, three decimals otherwise
    pub fn format(self, body: &Body) -> String {
        match self {
            BodyField::Hidden if body.hidden => "no".to_string(),
            BodyField::Hidden => "yes".to_string(),
            _ => format!("{:.3}", self.read(body)),
        }
    }

    /// Whether `value` may be stored in this field
    pub fn accepts(self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }

        match self {
            BodyField::Radius | BodyField::MassCoefficient => value > 0.0,
            BodyField::Elasticity => (0.0..=100.0).contains(&value),
            _ => true,
        }
    }
}
