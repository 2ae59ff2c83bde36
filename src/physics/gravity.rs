//! Pairwise Newtonian gravity
//!
//! Every live sphere is pulled towards every other live sphere. Velocities are
//! updated in place pair by pair; positions and masses are only read, so the
//! pass sees the state fixed at the top of the frame.

use cgmath::{InnerSpace, Vector3};

use super::{body::Body, math};

/// Gravitational constant in m³ kg⁻¹ s⁻²
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67e-11;

/// Acceleration `body` feels towards `other`
///
/// Returns `None` when the pair has nothing meaningful to contribute:
/// coincident centres, a massless body on either side, or a result that does
/// not fit a finite `f32`.
pub fn acceleration_towards(body: &Body, other: &Body, g: f64) -> Option<Vector3<f32>> {
    let separation = other.location - body.location;
    let distance_sq = separation.magnitude2() as f64;
    if distance_sq <= 0.0 || !has_mass(body) || !has_mass(other) {
        return None;
    }

    let direction = math::try_normalize(separation)?;
    let force = g * body.mass * other.mass / distance_sq;
    let acceleration = direction * (force / body.mass) as f32;
    math::is_finite(acceleration).then_some(acceleration)
}

fn has_mass(body: &Body) -> bool {
    body.mass > 0.0 && body.mass.is_finite()
}

/// Applies one gravity step of length `dt` to every live sphere
///
/// # Arguments
/// * `bodies` - All bodies of the simulation; non-spheres are skipped
/// * `g` - Gravitational constant
/// * `dt` - Simulated seconds for this frame
///
/// # Returns
/// Number of ordered pairs that contributed an acceleration
pub fn apply_gravity(bodies: &mut [Body], g: f64, dt: f32) -> usize {
    let mut contributing = 0;

    for i in 0..bodies.len() {
        if !bodies[i].is_live() || !bodies[i].is_sphere() {
            continue;
        }

        for j in 0..bodies.len() {
            if i == j || !bodies[j].is_live() || !bodies[j].is_sphere() {
                continue;
            }

            let velocity = acceleration_towards(&bodies[i], &bodies[j], g)
                .map(|acceleration| bodies[i].velocity + acceleration * dt)
                .filter(|velocity| math::is_finite(*velocity));

            match velocity {
                Some(velocity) => {
                    bodies[i].velocity = velocity;
                    contributing += 1;
                }
                None => log::trace!(
                    "gravity skipped for pair ({}, {})",
                    bodies[i].name,
                    bodies[j].name
                ),
            }
        }
    }

    contributing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::{BodyField, FieldEdit};
    use cgmath::Zero;

    fn pair(distance: f32) -> Vec<Body> {
        vec![
            Body::sphere("A", Vector3::zero(), 1.0),
            Body::sphere("B", Vector3::new(distance, 0.0, 0.0), 1.0),
        ]
    }

    #[test]
    fn test_newtonian_acceleration() {
        let bodies = pair(10.0);
        let a = acceleration_towards(&bodies[0], &bodies[1], GRAVITATIONAL_CONSTANT).unwrap();

        // G * 1e10 / 100
        let expected = (GRAVITATIONAL_CONSTANT * 1e10 / 100.0) as f32;
        assert!((a.x - expected).abs() < 1e-9);
        assert_eq!(a.y, 0.0);
        assert_eq!(a.z, 0.0);
    }

    #[test]
    fn test_bodies_attract_each_other() {
        let mut bodies = pair(5.0);
        let applied = apply_gravity(&mut bodies, GRAVITATIONAL_CONSTANT, 1.0);

        assert_eq!(applied, 2);
        assert!(bodies[0].velocity.x > 0.0);
        assert!(bodies[1].velocity.x < 0.0);
        // Equal masses pull equally hard
        assert!((bodies[0].velocity.x + bodies[1].velocity.x).abs() < 1e-9);
    }

    #[test]
    fn test_zero_distance_is_a_no_op() {
        let mut bodies = pair(0.0);
        let applied = apply_gravity(&mut bodies, GRAVITATIONAL_CONSTANT, 1.0);

        assert_eq!(applied, 0);
        assert_eq!(bodies[0].velocity, Vector3::zero());
        assert_eq!(bodies[1].velocity, Vector3::zero());
    }

    #[test]
    fn test_massless_body_neither_pulls_nor_is_pulled() {
        let mut bodies = pair(5.0);
        bodies[1] = bodies[1].clone().with_mass(0.0, 10.0);

        let applied = apply_gravity(&mut bodies, GRAVITATIONAL_CONSTANT, 1.0);

        assert_eq!(applied, 0);
        assert!(acceleration_towards(&bodies[0], &bodies[1], GRAVITATIONAL_CONSTANT).is_none());
        assert_eq!(bodies[0].velocity, Vector3::zero());
        assert_eq!(bodies[1].velocity, Vector3::zero());
    }

    #[test]
    fn test_hidden_and_boundary_bodies_are_ignored() {
        let mut bodies = pair(5.0);
        bodies[1].hidden = true;
        bodies.push(Body::boundary(15.0));

        let applied = apply_gravity(&mut bodies, GRAVITATIONAL_CONSTANT, 1.0);

        assert_eq!(applied, 0);
        assert_eq!(bodies[0].velocity, Vector3::zero());
    }

    #[test]
    fn test_huge_mass_never_writes_non_finite_velocity() {
        let mut bodies = pair(4.0);
        FieldEdit::new(1, BodyField::MassExponent, 50.0)
            .apply(&mut bodies)
            .unwrap();
        for body in bodies.iter_mut() {
            body.snapshot();
        }

        apply_gravity(&mut bodies, GRAVITATIONAL_CONSTANT, 0.016);

        // The pull on A overflows f32 and is skipped; B feels A's 1e10 kg normally
        assert_eq!(bodies[0].velocity, Vector3::zero());
        assert!(math::is_finite(bodies[1].velocity));
        assert!(bodies[1].velocity.x < 0.0);
        assert!(acceleration_towards(&bodies[0], &bodies[1], GRAVITATIONAL_CONSTANT).is_none());
    }

    #[test]
    fn test_zero_dt_leaves_velocity_untouched() {
        let mut bodies = pair(5.0);
        apply_gravity(&mut bodies, GRAVITATIONAL_CONSTANT, 0.0);
        assert_eq!(bodies[0].velocity, Vector3::zero());
    }
}
