//! Global uniform bindings for camera and lights
//!
//! One uniform buffer at group 0, binding 0, shared by every pipeline. Lights
//! are an indexed array so the shader loops over them instead of looking them
//! up by name.

use wgpu::util::DeviceExt;

use crate::{config::LightConfig, gfx::camera::CameraUniform};

pub const LIGHT_COUNT: usize = 2;

/// One point light as laid out in the shader
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLight {
    pub position: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    _padding: f32,
}

impl From<LightConfig> for PointLight {
    fn from(light: LightConfig) -> Self {
        Self {
            position: light.position,
            intensity: light.intensity,
            color: light.color,
            _padding: 0.0,
        }
    }
}

/// Global uniform buffer content
///
/// MUST match `GlobalUniform` in `shader.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniform {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
    pub lights: [PointLight; LIGHT_COUNT],
}

impl GlobalUniform {
    pub fn new(camera: CameraUniform, lights: [LightConfig; LIGHT_COUNT]) -> Self {
        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            lights: lights.map(PointLight::from),
        }
    }
}

/// The global uniform buffer with its layout and bind group
pub struct GlobalBindings {
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    lights: [LightConfig; LIGHT_COUNT],
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, lights: [LightConfig; LIGHT_COUNT]) -> Self {
        let content = GlobalUniform::new(CameraUniform::default(), lights);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Global Uniform Buffer"),
            contents: bytemuck::bytes_of(&content),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            bind_group_layout,
            bind_group,
            lights,
        }
    }

    /// Uploads the camera for this frame together with the fixed lights
    pub fn update(&self, queue: &wgpu::Queue, camera: CameraUniform) {
        let content = GlobalUniform::new(camera, self.lights);
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&content));
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    #[test]
    fn test_uniform_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<PointLight>(), 32);
        assert_eq!(std::mem::size_of::<GlobalUniform>(), 16 + 64 + 2 * 32);
    }

    #[test]
    fn test_lights_are_indexed_in_config_order() {
        let lights = SimulationConfig::default().lights;
        let uniform = GlobalUniform::new(CameraUniform::default(), lights);
        assert_eq!(uniform.lights[0].position, [10.0, 10.0, 10.0]);
        assert_eq!(uniform.lights[1].position, [-10.0, 10.0, -10.0]);
        assert_eq!(uniform.lights[1].intensity, 1.0);
    }
}
