use super::camera_utils::{Camera, CameraUniform};
use crate::config::CameraConfig;
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Keeps the view from flipping over the vertical
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// First-person camera with y up
#[derive(Debug, Clone, Copy)]
pub struct FpsCamera {
    pub position: Vector3<f32>,
    /// Radians around +y, measured from +x
    pub yaw: f32,
    pub pitch: f32,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for FpsCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        let view = Matrix4::look_to_rh(eye, self.forward(), Vector3::unit_y());
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl FpsCamera {
    pub fn new(position: Vector3<f32>, yaw: f32, pitch: f32, aspect: f32) -> Self {
        let mut camera = Self {
            position,
            yaw,
            pitch: pitch.clamp(-MAX_PITCH, MAX_PITCH),
            aspect,
            fovy: Rad(std::f32::consts::FRAC_PI_4),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
        };
        camera.update_view_proj();
        camera
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::new(config.position, config.yaw, config.pitch, aspect);
        camera.fovy = Deg(config.fov_degrees).into();
        camera.update_view_proj();
        camera
    }

    /// Unit view direction
    pub fn forward(&self) -> Vector3<f32> {
        Vector3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Horizontal unit vector to the right of the view
    pub fn right(&self) -> Vector3<f32> {
        Vector3::new(-self.yaw.sin(), 0.0, self.yaw.cos())
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.yaw = (self.yaw + delta) % std::f32::consts::TAU;
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.pitch = (self.pitch + delta).clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.position.x, self.position.y, self.position.z, 1.0];
        self.uniform.view_proj = self.build_view_projection_matrix().into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_yaw_looks_down_negative_z() {
        let camera = FpsCamera::new(Vector3::zero(), -std::f32::consts::FRAC_PI_2, 0.0, 1.0);
        let forward = camera.forward();
        assert!(forward.x.abs() < 1e-6);
        assert!((forward.z + 1.0).abs() < 1e-6);

        let right = camera.right();
        assert!((right.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = FpsCamera::new(Vector3::zero(), 0.0, 0.0, 1.0);
        camera.add_pitch(10.0);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        camera.add_pitch(-20.0);
        assert!(camera.pitch > -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_uniform_tracks_position() {
        let mut camera = FpsCamera::new(Vector3::new(1.0, 2.0, 3.0), 0.0, 0.0, 1.5);
        camera.position.x = 5.0;
        camera.update_view_proj();
        assert_eq!(camera.uniform.view_position, [5.0, 2.0, 3.0, 1.0]);
    }
}
