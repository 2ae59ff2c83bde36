//! Sphere-sphere and sphere-boundary collision resolution
//!
//! Both cases work in one dimension along the contact normal: the velocity is
//! split into the part along the normal, which goes through the collision
//! formula, and the remainder, which is mirrored across the normal and kept.
//!
//! A sphere resolves each partner against that partner's `old_velocity` and
//! `old_location`. Those are frozen for the whole pass, so the result for a
//! body does not depend on the order in which pairs are visited.

use cgmath::{InnerSpace, Vector3, Zero};

use super::{body::Body, body::BodyKind, math};

/// Contacts resolved during one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionCounts {
    /// Ordered sphere pairs whose velocity was updated
    pub sphere_contacts: usize,
    /// Spheres that touched at least one wall
    pub boundary_contacts: usize,
}

/// Whether two spheres overlap or touch, using the frame snapshot
pub fn spheres_touch(body: &Body, other: &Body) -> bool {
    let distance = (other.old_location - body.old_location).magnitude();
    distance <= body.radius() + other.radius()
}

/// Blends the classic elastic and fully inelastic 1-D outcomes
///
/// # Arguments
/// * `via` - Along-normal velocity of the body being resolved
/// * `vib` - Along-normal velocity of its partner
/// * `ma`, `mb` - Masses of the body and its partner
/// * `elasticity` - Combined elasticity in [0, 1]
///
/// # Returns
/// The body's along-normal velocity after the collision, or `None` when the
/// masses do not allow a finite answer
pub fn blend_normal_velocity(
    via: Vector3<f32>,
    vib: Vector3<f32>,
    ma: f64,
    mb: f64,
    elasticity: f64,
) -> Option<Vector3<f32>> {
    let total = ma + mb;
    if !(total > 0.0) || !total.is_finite() {
        return None;
    }

    let elastic_a = (ma - mb) / total;
    let elastic_b = 2.0 * mb / total;
    let shared_a = ma / total;
    let shared_b = mb / total;

    let coefficient_a = elasticity * elastic_a + (1.0 - elasticity) * shared_a;
    let coefficient_b = elasticity * elastic_b + (1.0 - elasticity) * shared_b;

    let vfa = via * coefficient_a as f32 + vib * coefficient_b as f32;
    math::is_finite(vfa).then_some(vfa)
}

/// Post-collision velocity of `body` after hitting the sphere `other`
///
/// Uses `body`'s current velocity and `other`'s frozen `old_velocity`.
/// Returns `None` when the spheres are apart or the geometry is degenerate.
pub fn resolve_sphere_pair(body: &Body, other: &Body) -> Option<Vector3<f32>> {
    if !body.is_sphere() || !other.is_sphere() || !spheres_touch(body, other) {
        return None;
    }

    let normal = math::try_normalize(other.old_location - body.old_location)?;
    let reverse = -normal;

    let via = math::project_onto(body.velocity, normal);
    let residual = body.velocity - via;
    let vib = math::project_onto(other.old_velocity, reverse);

    let elasticity = (body.elasticity as f64 + other.elasticity as f64) / 2.0;
    let vfa = blend_normal_velocity(via, vib, body.mass, other.mass, elasticity)?;

    let velocity = vfa + math::reflect(residual, normal);
    math::is_finite(velocity).then_some(velocity)
}

/// Keeps a sphere inside the box with the given half-extents
///
/// Every violated face contributes its outward normal to one combined normal
/// and pulls the sphere back to tangency with that face. A corner hit is
/// therefore a single event along the blended normal. Only the along-normal
/// velocity is damped, by the sphere's own elasticity.
///
/// # Returns
/// `true` if any face was touched
pub fn resolve_boundary_contact(body: &mut Body, half_extents: Vector3<f32>) -> bool {
    let radius = body.radius();
    let mut combined = Vector3::<f32>::zero();
    let mut touched = false;

    for axis in 0..3 {
        let limit = half_extents[axis] - radius;

        if body.location[axis] + radius >= half_extents[axis] {
            combined[axis] += 1.0;
            body.location[axis] = limit;
            touched = true;
        }

        if body.location[axis] - radius <= -half_extents[axis] {
            combined[axis] -= 1.0;
            body.location[axis] = -limit;
            touched = true;
        }
    }

    if !touched {
        return false;
    }

    // Opposite faces at once cancel out; the clamp still applies
    let Some(normal) = math::try_normalize(combined) else {
        log::trace!("{} touches opposite walls, velocity left as is", body.name);
        return true;
    };

    let via = math::project_onto(body.velocity, normal);
    let residual = body.velocity - via;
    let velocity = -via * body.elasticity + math::reflect(residual, normal);

    if math::is_finite(velocity) {
        body.velocity = velocity;
    }

    true
}

/// Runs the collision pass over every live, collidable sphere
pub fn resolve_collisions(bodies: &mut [Body]) -> CollisionCounts {
    let mut counts = CollisionCounts::default();

    for i in 0..bodies.len() {
        if !bodies[i].is_colliding() || !bodies[i].is_sphere() {
            continue;
        }

        let mut touched_wall = false;

        for j in 0..bodies.len() {
            if i == j || !bodies[j].is_colliding() {
                continue;
            }

            match bodies[j].kind {
                BodyKind::Sphere => {
                    if let Some(velocity) = resolve_sphere_pair(&bodies[i], &bodies[j]) {
                        bodies[i].velocity = velocity;
                        counts.sphere_contacts += 1;
                    }
                }
                BodyKind::Boundary => {
                    let half_extents = bodies[j].scale;
                    touched_wall |= resolve_boundary_contact(&mut bodies[i], half_extents);
                }
            }
        }

        if touched_wall {
            counts.boundary_contacts += 1;
        }
    }

    counts
}
