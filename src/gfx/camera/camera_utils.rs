use cgmath::{Matrix4, SquareMatrix};
use winit::event::{DeviceEvent, KeyEvent};

use super::{camera_controller::CameraController, fps_camera::FpsCamera};
use crate::config::CameraConfig;

pub struct CameraManager {
    pub camera: FpsCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: FpsCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self::new(
            FpsCamera::from_config(config, aspect),
            CameraController::new(config.move_speed, config.mouse_sensitivity),
        )
    }

    /// Mouse look, ignored unless `look_enabled`
    pub fn process_device_event(&mut self, event: &DeviceEvent, look_enabled: bool) {
        if look_enabled {
            self.controller.process_mouse(event, &mut self.camera);
        }
    }

    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        self.controller.process_key(event);
    }

    /// Applies held movement keys and refreshes the uniform
    pub fn update(&mut self, dt: f32) {
        self.controller.update_camera(&mut self.camera, dt);
        self.camera.update_view_proj();
    }

    pub fn get_view_proj_matrix(&self) -> Matrix4<f32> {
        self.camera.build_view_projection_matrix()
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// Eye position in homogeneous coordinates, padded to 16 bytes
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }
}
