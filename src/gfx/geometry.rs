//! # Procedural Geometry Generation
//!
//! The two meshes the renderer needs: a unit-radius UV sphere and a unit cube
//! spanning -0.5..0.5. Triangles wind counter-clockwise seen from outside.

use std::f32::consts::PI;

use cgmath::Vector3;

use super::vertex::Vertex3D;

/// Generated geometry ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    pub vertices: Vec<Vertex3D>,
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Generate a UV sphere of radius 1 centred at the origin
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments, at least 3
/// * `latitude_segments` - Number of horizontal segments, at least 2
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::default();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let point = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            data.vertices.push(Vertex3D {
                position: point,
                normal: point,
            });
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, first + 1, second]);
            data.indices.extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    data
}

/// Generate a unit cube centred at the origin with flat per-face normals
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::default();

    // (normal, u, v) with u x v = normal
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    ];

    for (normal, u, v) in faces {
        let n = Vector3::from(normal) * 0.5;
        let u = Vector3::from(u) * 0.5;
        let v = Vector3::from(v) * 0.5;
        let base = data.vertices.len() as u32;

        for corner in [n - u - v, n + u - v, n + u + v, n - u + v] {
            data.vertices.push(Vertex3D {
                position: corner.into(),
                normal,
            });
        }

        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}
