//! Simulation configuration
//!
//! [`SimulationConfig::default`] reproduces the stock scene: six unit spheres
//! of 1e10 kg lined up inside a domain of half-extent 15, two point lights and
//! a camera standing back from the origin. Everything can be adjusted with the
//! `with_*` builder methods before the state is built.

use std::path::PathBuf;

use cgmath::{Vector3, Zero};

use crate::{
    error::ConfigError,
    physics::{gravity::GRAVITATIONAL_CONSTANT, Body},
};

/// Maximum number of spheres the parameter panel can address
pub const MAX_SPHERES: usize = 6;

/// Initial conditions of one sphere
#[derive(Debug, Clone, PartialEq)]
pub struct SphereConfig {
    pub name: String,
    pub location: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub radius: f32,
    pub mass_coefficient: f64,
    pub mass_exponent: f64,
    pub elasticity: f32,
    pub hidden: bool,
    pub color: [f32; 4],
}

impl SphereConfig {
    /// A resting, visible unit sphere of 1e10 kg
    pub fn new(name: impl Into<String>, location: Vector3<f32>) -> Self {
        Self {
            name: name.into(),
            location,
            velocity: Vector3::zero(),
            radius: 1.0,
            mass_coefficient: 1.0,
            mass_exponent: 10.0,
            elasticity: 1.0,
            hidden: false,
            color: [0.8, 0.8, 0.8, 1.0],
        }
    }

    pub fn with_velocity(mut self, velocity: Vector3<f32>) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_mass(mut self, coefficient: f64, exponent: f64) -> Self {
        self.mass_coefficient = coefficient;
        self.mass_exponent = exponent;
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

    pub fn to_body(&self) -> Body {
        Body::sphere(self.name.clone(), self.location, self.radius)
            .with_velocity(self.velocity)
            .with_mass(self.mass_coefficient, self.mass_exponent)
            .with_elasticity(self.elasticity)
            .with_color(self.color)
            .with_hidden(self.hidden)
    }
}

/// Window settings
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Spherebox - N-body gravity and collisions".to_string(),
            width: 1000,
            height: 800,
        }
    }
}

/// First-person camera settings
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub position: Vector3<f32>,
    /// Yaw in radians; `-PI / 2` looks down the negative z axis
    pub yaw: f32,
    pub pitch: f32,
    /// Units per second
    pub move_speed: f32,
    /// Radians per pixel of mouse motion
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 4.0, 28.0),
            yaw: -std::f32::consts::FRAC_PI_2,
            pitch: -0.1,
            move_speed: 8.0,
            mouse_sensitivity: 0.002,
            fov_degrees: 45.0,
        }
    }
}

/// A point light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightConfig {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub domain_half_extent: f32,
    pub spheres: Vec<SphereConfig>,
    pub gravitational_constant: f64,
    /// Upper bound on the simulated step, in seconds
    pub max_frame_dt: f32,
    /// Where to mirror the parameter table every frame, if anywhere
    pub snapshot_path: Option<PathBuf>,
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub lights: [LightConfig; 2],
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let spheres = vec![
            SphereConfig::new("A", Vector3::new(0.0, 0.0, 0.0)).with_color([0.90, 0.30, 0.25, 1.0]),
            SphereConfig::new("B", Vector3::new(3.0, 0.0, 0.0)).with_color([0.25, 0.70, 0.35, 1.0]),
            SphereConfig::new("C", Vector3::new(6.0, 0.0, 0.0)).with_color([0.25, 0.45, 0.90, 1.0]),
            SphereConfig::new("D", Vector3::new(-3.0, 0.0, 0.0)).with_color([0.95, 0.80, 0.20, 1.0]),
            SphereConfig::new("E", Vector3::new(-6.0, 0.0, 0.0)).with_color([0.70, 0.35, 0.85, 1.0]),
            SphereConfig::new("F", Vector3::new(0.0, 0.0, 3.0)).with_color([0.20, 0.80, 0.85, 1.0]),
        ];

        Self {
            domain_half_extent: 15.0,
            spheres,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            max_frame_dt: 0.1,
            snapshot_path: None,
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            lights: [
                LightConfig {
                    position: [10.0, 10.0, 10.0],
                    color: [1.0, 1.0, 1.0],
                    intensity: 1.0,
                },
                LightConfig {
                    position: [-10.0, 10.0, -10.0],
                    color: [1.0, 1.0, 1.0],
                    intensity: 1.0,
                },
            ],
        }
    }
}

impl SimulationConfig {
    pub fn with_domain_half_extent(mut self, half_extent: f32) -> Self {
        self.domain_half_extent = half_extent;
        self
    }

    pub fn with_spheres(mut self, spheres: Vec<SphereConfig>) -> Self {
        self.spheres = spheres;
        self
    }

    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    pub fn with_max_frame_dt(mut self, dt: f32) -> Self {
        self.max_frame_dt = dt;
        self
    }

    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    pub fn with_window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    /// Checks the invariants the physics core relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.domain_half_extent > 0.0) {
            return Err(ConfigError::InvalidDomain(self.domain_half_extent));
        }

        if !(self.max_frame_dt > 0.0) || !self.max_frame_dt.is_finite() {
            return Err(ConfigError::InvalidFrameDt(self.max_frame_dt));
        }

        if self.spheres.len() > MAX_SPHERES {
            return Err(ConfigError::TooManySpheres {
                max: MAX_SPHERES,
                got: self.spheres.len(),
            });
        }

        for sphere in &self.spheres {
            if !(sphere.radius > 0.0) || !sphere.radius.is_finite() {
                return Err(ConfigError::InvalidRadius {
                    name: sphere.name.clone(),
                    radius: sphere.radius,
                });
            }

            if !(0.0..=1.0).contains(&sphere.elasticity) {
                return Err(ConfigError::InvalidElasticity {
                    name: sphere.name.clone(),
                    elasticity: sphere.elasticity,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spheres.len(), MAX_SPHERES);
        assert_eq!(config.spheres[5].location, Vector3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_validation_errors() {
        let too_many = SimulationConfig::default().with_spheres(
            (0..7)
                .map(|i| SphereConfig::new(i.to_string(), Vector3::zero()))
                .collect(),
        );
        assert_eq!(
            too_many.validate(),
            Err(ConfigError::TooManySpheres { max: 6, got: 7 })
        );

        let bad_radius = SimulationConfig::default()
            .with_spheres(vec![SphereConfig::new("A", Vector3::zero()).with_radius(0.0)]);
        assert!(matches!(
            bad_radius.validate(),
            Err(ConfigError::InvalidRadius { .. })
        ));

        let bad_elasticity = SimulationConfig::default()
            .with_spheres(vec![SphereConfig::new("A", Vector3::zero()).with_elasticity(1.5)]);
        assert!(matches!(
            bad_elasticity.validate(),
            Err(ConfigError::InvalidElasticity { .. })
        ));

        let bad_dt = SimulationConfig::default().with_max_frame_dt(0.0);
        assert_eq!(bad_dt.validate(), Err(ConfigError::InvalidFrameDt(0.0)));
    }

    #[test]
    fn test_sphere_config_to_body() {
        let body = SphereConfig::new("A", Vector3::new(1.0, 2.0, 3.0))
            .with_radius(2.0)
            .with_mass(5.0, 3.0)
            .with_elasticity(0.25)
            .to_body();

        assert!(body.is_sphere());
        assert_eq!(body.radius(), 2.0);
        assert_eq!(body.mass, 5000.0);
        assert_eq!(body.elasticity, 0.25);
        assert_eq!(body.location, Vector3::new(1.0, 2.0, 3.0));
    }
}
