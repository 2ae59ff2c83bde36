use cgmath::{InnerSpace, Vector3, Zero};
use winit::{
    event::{DeviceEvent, ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::fps_camera::FpsCamera;

/// Keyboard movement and mouse look for an [`FpsCamera`]
pub struct CameraController {
    pub move_speed: f32,
    pub mouse_sensitivity: f32,
    forward_held: bool,
    backward_held: bool,
    left_held: bool,
    right_held: bool,
}

impl CameraController {
    pub fn new(move_speed: f32, mouse_sensitivity: f32) -> Self {
        Self {
            move_speed,
            mouse_sensitivity,
            forward_held: false,
            backward_held: false,
            left_held: false,
            right_held: false,
        }
    }

    /// Tracks W/A/S/D and the arrow keys; returns whether the key was one of them
    pub fn process_key(&mut self, event: &KeyEvent) -> bool {
        let PhysicalKey::Code(code) = event.physical_key else {
            return false;
        };
        self.set_key(code, event.state == ElementState::Pressed)
    }

    pub fn set_key(&mut self, code: KeyCode, pressed: bool) -> bool {
        match code {
            KeyCode::KeyW | KeyCode::ArrowUp => self.forward_held = pressed,
            KeyCode::KeyS | KeyCode::ArrowDown => self.backward_held = pressed,
            KeyCode::KeyA | KeyCode::ArrowLeft => self.left_held = pressed,
            KeyCode::KeyD | KeyCode::ArrowRight => self.right_held = pressed,
            _ => return false,
        }
        true
    }

    /// Releases every held key, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.forward_held = false;
        self.backward_held = false;
        self.left_held = false;
        self.right_held = false;
    }

    pub fn process_mouse(&mut self, event: &DeviceEvent, camera: &mut FpsCamera) {
        if let DeviceEvent::MouseMotion { delta } = event {
            camera.add_yaw(delta.0 as f32 * self.mouse_sensitivity);
            camera.add_pitch(-delta.1 as f32 * self.mouse_sensitivity);
        }
    }

    /// Moves the camera along its view for `dt` seconds of held keys
    pub fn update_camera(&self, camera: &mut FpsCamera, dt: f32) {
        let mut direction = Vector3::zero();
        if self.forward_held {
            direction += camera.forward();
        }
        if self.backward_held {
            direction -= camera.forward();
        }
        if self.right_held {
            direction += camera.right();
        }
        if self.left_held {
            direction -= camera.right();
        }

        if direction.magnitude2() > f32::EPSILON {
            camera.position += direction.normalize() * self.move_speed * dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_move_camera() {
        let mut camera = FpsCamera::new(Vector3::zero(), -std::f32::consts::FRAC_PI_2, 0.0, 1.0);
        let mut controller = CameraController::new(2.0, 0.01);

        assert!(controller.set_key(KeyCode::KeyW, true));
        controller.update_camera(&mut camera, 0.5);
        assert!((camera.position.z + 1.0).abs() < 1e-5);

        controller.set_key(KeyCode::KeyW, false);
        controller.set_key(KeyCode::ArrowRight, true);
        controller.update_camera(&mut camera, 1.0);
        assert!((camera.position.x - 2.0).abs() < 1e-5);

        controller.release_all();
        let before = camera.position;
        controller.update_camera(&mut camera, 1.0);
        assert_eq!(camera.position, before);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut camera = FpsCamera::new(Vector3::zero(), 0.0, 0.0, 1.0);
        let mut controller = CameraController::new(2.0, 0.01);
        controller.set_key(KeyCode::KeyA, true);
        controller.set_key(KeyCode::KeyD, true);
        controller.update_camera(&mut camera, 1.0);
        assert_eq!(camera.position, Vector3::zero());
        assert!(!controller.set_key(KeyCode::KeyP, true));
    }
}
