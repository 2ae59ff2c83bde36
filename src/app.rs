//! Application shell
//!
//! winit event loop driving the simulation, camera, renderer and UI. `P`
//! toggles pause, `Escape` quits, W/A/S/D and the arrow keys move the camera.
//! While running the cursor is grabbed for mouse look; while paused it is
//! released so the parameter table can be clicked.

use std::{sync::Arc, time::Instant};

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowAttributes, WindowId},
};

use crate::{
    config::SimulationConfig,
    gfx::{build_instances, camera::CameraManager, RenderEngine},
    simulation::{SimulationManager, SphereBoxSimulation},
    ui::UiManager,
};

pub struct SphereboxApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: SimulationConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    camera_manager: CameraManager,
    simulation: SimulationManager,
    last_frame: Instant,
    startup_error: Option<anyhow::Error>,
}

impl SphereboxApp {
    /// Builds the scene and the event loop; no window exists until `run`
    pub fn new(config: SimulationConfig) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;

        let simulation = SphereBoxSimulation::new(config.clone())
            .context("invalid simulation configuration")?;
        let aspect = config.window.width as f32 / config.window.height.max(1) as f32;
        let camera_manager = CameraManager::from_config(&config.camera, aspect);

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                ui_manager: None,
                camera_manager,
                simulation: SimulationManager::new(Box::new(simulation)),
                last_frame: Instant::now(),
                startup_error: None,
            },
        })
    }

    /// Runs until the window closes or `Escape` is pressed
    pub fn run(mut self) -> anyhow::Result<()> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop
            .run_app(&mut self.app_state)
            .context("event loop failed")?;

        match self.app_state.startup_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_config = &self.config.window;
        let attributes = WindowAttributes::default()
            .with_title(window_config.title.clone())
            .with_inner_size(LogicalSize::new(window_config.width, window_config.height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );

        let (width, height) = window.inner_size().into();
        let lights = self.config.lights;
        let target = window.clone();
        let renderer = pollster::block_on(async move {
            RenderEngine::new(target, width, height, lights).await
        })?;

        let mut ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
        );
        ui_manager.update_display_size(width, height);

        self.camera_manager
            .camera
            .resize_projection(width, height);
        self.window = Some(window);
        self.render_engine = Some(renderer);
        self.ui_manager = Some(ui_manager);
        self.apply_cursor_mode();
        Ok(())
    }

    /// Grabs the cursor while running, releases it while paused
    fn apply_cursor_mode(&mut self) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let paused = self.simulation.is_paused();
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            ui_manager.set_mouse_enabled(paused);
        }

        if paused {
            if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
                log::debug!("failed to release cursor: {}", err);
            }
            window.set_cursor_visible(true);
        } else {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(err) = grabbed {
                log::debug!("cursor grab unavailable: {}", err);
            }
            window.set_cursor_visible(false);
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let pressed = event.state == ElementState::Pressed;

        match code {
            KeyCode::Escape if pressed => event_loop.exit(),
            KeyCode::KeyP if pressed && !event.repeat => {
                self.simulation.toggle_pause();
                self.camera_manager.controller.release_all();
                self.apply_cursor_mode();
            }
            _ => {
                self.camera_manager.process_keyboard_event(event);
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.camera_manager.update(dt);
        let report = self.simulation.update(dt);
        if let Some(Err(err)) = &report.edit {
            log::debug!("frame {} dropped its edit: {}", report.frame, err);
        }

        let instances = build_instances(&self.simulation.views(), self.simulation.is_paused());

        let (Some(render_engine), Some(ui_manager), Some(window)) = (
            self.render_engine.as_mut(),
            self.ui_manager.as_mut(),
            self.window.as_ref(),
        ) else {
            return;
        };

        render_engine.update(self.camera_manager.camera.uniform);
        render_engine.set_instances(&instances);

        let simulation = &mut self.simulation;
        let result = render_engine.render_frame(|device, queue, encoder, color_attachment| {
            ui_manager.draw(device, queue, encoder, window, color_attachment, |ui| {
                simulation.render_ui(ui);
            });
        });

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_engine.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory");
                event_loop.exit();
            }
            Err(err) => log::warn!("dropped frame: {}", err),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.init_graphics(event_loop) {
            log::error!("start-up failed: {:#}", err);
            self.startup_error = Some(err);
            event_loop.exit();
            return;
        }

        log::info!(
            "running '{}'; press P to pause",
            self.simulation.current_simulation_name()
        );
        self.last_frame = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // Handle UI input first
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            if ui_manager.handle_input(&window, window_id, &event) {
                if ui_manager.wants_keyboard() {
                    self.camera_manager.controller.release_all();
                }
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::Focused(false) => self.camera_manager.controller.release_all(),
            WindowEvent::Focused(true) => self.apply_cursor_mode(),
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let look_enabled = !self.simulation.is_paused()
            && self.window.as_ref().is_some_and(|window| window.has_focus());
        self.camera_manager
            .process_device_event(&event, look_enabled);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
