//! Simulation state owned by the frame driver
//!
//! Holds the body array and the constants the solvers need. Nothing else
//! keeps an alias to the bodies across frames; the renderer gets a fresh
//! slice of [`BodyView`]s each frame.

use cgmath::{InnerSpace, Vector3, Zero};

use crate::{config::SimulationConfig, error::ConfigError};

use super::body::{Body, BodyView};

/// Index of the first sphere; the domain boundary sits at index 0
pub const FIRST_SPHERE_INDEX: usize = 1;

/// All bodies of a running simulation
#[derive(Debug, Clone)]
pub struct SimulationState {
    bodies: Vec<Body>,
    gravitational_constant: f64,
}

impl SimulationState {
    pub fn new(bodies: Vec<Body>, gravitational_constant: f64) -> Self {
        Self {
            bodies,
            gravitational_constant,
        }
    }

    /// Builds the initial scene: the domain followed by the configured spheres
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut bodies = Vec::with_capacity(config.spheres.len() + 1);
        bodies.push(Body::boundary(config.domain_half_extent));
        bodies.extend(config.spheres.iter().map(|sphere| sphere.to_body()));

        log::info!(
            "scene built: {} spheres in a domain of half-extent {}",
            config.spheres.len(),
            config.domain_half_extent
        );

        Ok(Self::new(bodies, config.gravitational_constant))
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn gravitational_constant(&self) -> f64 {
        self.gravitational_constant
    }

    /// The domain boundary, if the scene has one
    pub fn boundary(&self) -> Option<&Body> {
        self.bodies.iter().find(|body| !body.is_sphere())
    }

    /// Spheres in panel column order
    pub fn spheres(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|body| body.is_sphere())
    }

    pub fn sphere_count(&self) -> usize {
        self.spheres().count()
    }

    /// Body index of the sphere shown in panel column `column`
    pub fn sphere_index(&self, column: usize) -> Option<usize> {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, body)| body.is_sphere())
            .nth(column)
            .map(|(index, _)| index)
    }

    /// Per-frame views for the renderer
    pub fn views(&self) -> Vec<BodyView> {
        self.bodies.iter().map(Body::view).collect()
    }

    /// Sum of momenta of live spheres
    pub fn total_momentum(&self) -> Vector3<f64> {
        self.spheres()
            .filter(|body| body.is_live())
            .fold(Vector3::zero(), |total, body| total + body.momentum())
    }

    /// Sum of kinetic energies of live spheres, in joules
    pub fn kinetic_energy(&self) -> f64 {
        self.spheres()
            .filter(|body| body.is_live())
            .map(|body| 0.5 * body.mass * body.velocity.magnitude2() as f64)
            .sum()
    }
}
