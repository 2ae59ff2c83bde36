//! Per-frame instance data
//!
//! Turns the body views into two instance lists: spheres (drawn with the
//! sphere mesh) and boxes (domain edges and velocity arrows, drawn with the
//! cube mesh).

use bytemuck::{Pod, Zeroable};
use cgmath::{InnerSpace, Matrix4, Quaternion, Rad, Vector3};

use crate::physics::{BodyKind, BodyView};

/// Thickness of the beams outlining the domain
const EDGE_THICKNESS: f32 = 0.08;
/// Thickness of a velocity arrow
const ARROW_THICKNESS: f32 = 0.06;
const ARROW_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Instance data for one mesh copy
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceData {
    pub fn new(model: Matrix4<f32>, color: [f32; 4]) -> Self {
        Self {
            model: model.into(),
            color,
        }
    }

    /// Layout: model matrix columns at locations 2..=5, colour at 6
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
            6 => Float32x4,
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.model.into()
    }
}

/// Instances to draw this frame, grouped by mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneInstances {
    pub spheres: Vec<InstanceData>,
    pub boxes: Vec<InstanceData>,
}

/// Builds the instance lists for the visible bodies
///
/// # Arguments
/// * `views` - Body views of the current frame
/// * `show_velocity` - Whether to add a velocity arrow per visible sphere
pub fn build_instances(views: &[BodyView], show_velocity: bool) -> SceneInstances {
    let mut instances = SceneInstances::default();

    for view in views.iter().filter(|view| !view.hidden) {
        match view.kind {
            BodyKind::Sphere => {
                instances.spheres.push(sphere_instance(view));
                if show_velocity {
                    instances.boxes.extend(velocity_arrow(view));
                }
            }
            BodyKind::Boundary => instances.boxes.extend(domain_edges(view)),
        }
    }

    instances
}

fn rotation_matrix(rotation: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::from_angle_z(Rad(rotation.z))
        * Matrix4::from_angle_y(Rad(rotation.y))
        * Matrix4::from_angle_x(Rad(rotation.x))
}

fn sphere_instance(view: &BodyView) -> InstanceData {
    let model = Matrix4::from_translation(view.location)
        * rotation_matrix(view.rotation)
        * Matrix4::from_nonuniform_scale(view.scale.x, view.scale.y, view.scale.z);
    InstanceData::new(model, view.color)
}

/// A beam from the sphere's surface along its velocity, as long as its speed
fn velocity_arrow(view: &BodyView) -> Option<InstanceData> {
    let speed = view.velocity.magnitude();
    if !speed.is_finite() || speed <= f32::EPSILON {
        return None;
    }

    let direction = view.velocity / speed;
    let start = view.location + direction * view.scale.x;
    let center = start + direction * (speed * 0.5);
    let orientation = Quaternion::from_arc(Vector3::unit_x(), direction, None);

    let model = Matrix4::from_translation(center)
        * Matrix4::from(orientation)
        * Matrix4::from_nonuniform_scale(speed, ARROW_THICKNESS, ARROW_THICKNESS);
    Some(InstanceData::new(model, ARROW_COLOR))
}

/// The twelve edges of the domain box
fn domain_edges(view: &BodyView) -> Vec<InstanceData> {
    let half = view.scale;
    let mut edges = Vec::with_capacity(12);

    for axis in 0..3 {
        let (a, b) = ((axis + 1) % 3, (axis + 2) % 3);

        for (sign_a, sign_b) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let mut offset = Vector3::new(0.0, 0.0, 0.0);
            offset[a] = sign_a * half[a];
            offset[b] = sign_b * half[b];

            let mut size = Vector3::new(EDGE_THICKNESS, EDGE_THICKNESS, EDGE_THICKNESS);
            size[axis] = 2.0 * half[axis] + EDGE_THICKNESS;

            let model = Matrix4::from_translation(view.location + offset)
                * Matrix4::from_nonuniform_scale(size.x, size.y, size.z);
            edges.push(InstanceData::new(model, view.color));
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector4, Zero};

    fn sphere_view(location: Vector3<f32>, velocity: Vector3<f32>) -> BodyView {
        BodyView {
            kind: BodyKind::Sphere,
            location,
            velocity,
            rotation: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            hidden: false,
            color: [1.0, 0.0, 0.0, 1.0],
        }
    }

    fn domain_view(half_extent: f32) -> BodyView {
        BodyView {
            kind: BodyKind::Boundary,
            location: Vector3::zero(),
            velocity: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::new(half_extent, half_extent, half_extent),
            hidden: false,
            color: [0.5, 0.5, 0.5, 1.0],
        }
    }

    fn transform(instance: &InstanceData, point: Vector3<f32>) -> Vector3<f32> {
        (instance.model_matrix() * point.extend(1.0)).truncate()
    }

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-4
    }

    #[test]
    fn test_instance_counts() {
        let views = vec![
            domain_view(15.0),
            sphere_view(Vector3::zero(), Vector3::new(1.0, 0.0, 0.0)),
            sphere_view(Vector3::new(3.0, 0.0, 0.0), Vector3::zero()),
        ];

        let running = build_instances(&views, false);
        assert_eq!(running.spheres.len(), 2);
        assert_eq!(running.boxes.len(), 12);

        let paused = build_instances(&views, true);
        assert_eq!(paused.boxes.len(), 13);
    }

    #[test]
    fn test_hidden_views_are_skipped() {
        let mut hidden = sphere_view(Vector3::zero(), Vector3::new(1.0, 0.0, 0.0));
        hidden.hidden = true;
        let instances = build_instances(&[hidden], true);
        assert!(instances.spheres.is_empty());
        assert!(instances.boxes.is_empty());
    }

    #[test]
    fn test_arrow_starts_at_sphere_surface() {
        let view = sphere_view(Vector3::new(2.0, 1.0, 0.0), Vector3::new(0.0, 3.0, 4.0));
        let arrow = velocity_arrow(&view).unwrap();

        let tail = transform(&arrow, Vector3::new(-0.5, 0.0, 0.0));
        let tip = transform(&arrow, Vector3::new(0.5, 0.0, 0.0));

        assert!(close(tail, Vector3::new(2.0, 1.6, 0.8)));
        assert!(close(tip, Vector3::new(2.0, 4.6, 4.8)));
    }

    #[test]
    fn test_domain_edges_sit_on_the_box() {
        let edges = domain_edges(&domain_view(15.0));
        for edge in &edges {
            let center = transform(edge, Vector3::zero());
            let on_faces = [center.x, center.y, center.z]
                .iter()
                .filter(|c| (c.abs() - 15.0).abs() < 1e-4)
                .count();
            assert_eq!(on_faces, 2);
        }
    }

    #[test]
    fn test_sphere_scale_and_translation() {
        let mut view = sphere_view(Vector3::new(1.0, 2.0, 3.0), Vector3::zero());
        view.scale = Vector3::new(2.0, 2.0, 2.0);
        let instance = sphere_instance(&view);
        let top = instance.model_matrix() * Vector4::new(0.0, 1.0, 0.0, 1.0);
        assert!(close(top.truncate(), Vector3::new(1.0, 4.0, 3.0)));
    }
}
