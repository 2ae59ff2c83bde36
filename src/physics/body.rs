//! Rigid bodies tracked by the physics core
//!
//! A body is either one of the simulated spheres or the static cubic domain
//! that bounds them. Both share one record so the frame driver can walk a
//! single array and the edit surface can address any of them by index.

use cgmath::{Vector3, Zero};

/// Shape of a body as seen by the solvers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// A sphere whose radius is `scale.x`
    Sphere,
    /// The immovable domain box; `scale` holds its half-extents
    Boundary,
}

/// A sphere or the domain boundary
///
/// `old_location` and `old_velocity` are refreshed once at the top of every
/// frame and then stay frozen while the collision pass reads them, so a
/// pairwise resolution never depends on which partner was processed first.
#[derive(Debug, Clone)]
pub struct Body {
    /// Display label ("A".."F" for the default scene)
    pub name: String,
    pub kind: BodyKind,
    pub location: Vector3<f32>,
    pub old_location: Vector3<f32>,
    /// Velocity in metres per second
    pub velocity: Vector3<f32>,
    pub old_velocity: Vector3<f32>,
    /// Euler angles in radians, consumed by rendering only
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
    /// Leading digit of the mass in scientific notation
    pub mass_coefficient: f64,
    /// Power of ten of the mass in scientific notation
    pub mass_exponent: f64,
    /// Derived from coefficient and exponent by [`Body::refresh_mass`]
    pub mass: f64,
    /// 1.0 is perfectly elastic, 0.0 perfectly inelastic
    pub elasticity: f32,
    pub collidable: bool,
    /// Hidden bodies skip gravity, collision and integration
    pub hidden: bool,
    /// RGBA colour used by the renderer
    pub color: [f32; 4],
}

impl Body {
    /// Creates a visible, collidable sphere at rest with a mass of 1e10 kg
    pub fn sphere(name: impl Into<String>, location: Vector3<f32>, radius: f32) -> Self {
        let mut body = Self {
            name: name.into(),
            kind: BodyKind::Sphere,
            location,
            old_location: location,
            velocity: Vector3::zero(),
            old_velocity: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::new(radius, radius, radius),
            mass_coefficient: 1.0,
            mass_exponent: 10.0,
            mass: 0.0,
            elasticity: 1.0,
            collidable: true,
            hidden: false,
            color: [0.8, 0.8, 0.8, 1.0],
        };
        body.refresh_mass();
        body
    }

    /// Creates the cubic domain centred on the origin
    pub fn boundary(half_extent: f32) -> Self {
        Self {
            name: "Domain".to_string(),
            kind: BodyKind::Boundary,
            location: Vector3::zero(),
            old_location: Vector3::zero(),
            velocity: Vector3::zero(),
            old_velocity: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::new(half_extent, half_extent, half_extent),
            mass_coefficient: 0.0,
            mass_exponent: 0.0,
            mass: 0.0,
            elasticity: 0.0,
            collidable: true,
            hidden: false,
            color: [0.35, 0.35, 0.4, 1.0],
        }
    }

    pub fn with_velocity(mut self, velocity: Vector3<f32>) -> Self {
        self.velocity = velocity;
        self.old_velocity = velocity;
        self
    }

    pub fn with_mass(mut self, coefficient: f64, exponent: f64) -> Self {
        self.mass_coefficient = coefficient;
        self.mass_exponent = exponent;
        self.refresh_mass();
        self
    }

    pub fn with_elasticity(mut self, elasticity: f32) -> Self {
        self.elasticity = elasticity;
        self
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn is_sphere(&self) -> bool {
        self.kind == BodyKind::Sphere
    }

    /// Whether the body takes part in this frame at all
    pub fn is_live(&self) -> bool {
        !self.hidden
    }

    /// Whether the body takes part in collision and integration this frame
    pub fn is_colliding(&self) -> bool {
        !self.hidden && self.collidable
    }

    pub fn radius(&self) -> f32 {
        self.scale.x
    }

    /// Sets a uniform scale
    pub fn set_radius(&mut self, radius: f32) {
        self.scale = Vector3::new(radius, radius, radius);
    }

    /// `coefficient × 10^exponent`
    pub fn compute_mass(coefficient: f64, exponent: f64) -> f64 {
        coefficient * 10f64.powf(exponent)
    }

    pub fn refresh_mass(&mut self) {
        self.mass = Self::compute_mass(self.mass_coefficient, self.mass_exponent);
    }

    /// Freezes the current state as this frame's reference
    pub fn snapshot(&mut self) {
        self.old_velocity = self.velocity;
        self.old_location = self.location;
        self.refresh_mass();
    }

    /// Linear momentum in kg·m/s, computed in double precision
    pub fn momentum(&self) -> Vector3<f64> {
        Vector3::new(
            self.velocity.x as f64,
            self.velocity.y as f64,
            self.velocity.z as f64,
        ) * self.mass
    }

    /// Read-only view handed to the renderer
    pub fn view(&self) -> BodyView {
        BodyView {
            kind: self.kind,
            location: self.location,
            velocity: self.velocity,
            rotation: self.rotation,
            scale: self.scale,
            hidden: self.hidden,
            color: self.color,
        }
    }
}

/// What the rendering collaborator sees of a body each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyView {
    pub kind: BodyKind,
    pub location: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub hidden: bool,
    pub color: [f32; 4],
}
