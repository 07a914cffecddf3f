//! Per-window render loop: owns the renderer and the scene it draws.

use crate::{config::SolarConfig, scene::Scene};
use engine_core::FrameClock;
use renderer::{Camera, RenderError, Renderer};
use winit::{
    event::WindowEvent,
    keyboard::{KeyCode, PhysicalKey},
};

/// Everything needed to draw frames into one window.
pub struct RenderLoop {
    renderer: Renderer,
    scene: Scene,
    camera: Camera,
    clock: FrameClock,
    wireframe: bool,
}

impl RenderLoop {
    pub fn new(renderer: Renderer, scene: Scene, config: &SolarConfig) -> Self {
        let mut camera = Camera::orbiting(config.camera_distance, config.orbit_speed);
        let (width, height) = renderer.dimensions();
        camera.set_aspect(width, height);
        if scene.is_empty() {
            log::warn!("Scene is empty; frames will only show the clear colour");
        }
        log::info!(
            "Render loop ready: {} object(s) {:?}, wireframe {}",
            scene.len(),
            scene.labels(),
            if config.wireframe { "on" } else { "off" }
        );
        Self {
            renderer,
            scene,
            camera,
            clock: FrameClock::new(),
            wireframe: config.wireframe,
        }
    }

    /// Handle a window event. Returns `true` when the app should exit.
    pub fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => true,
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
                self.camera.set_aspect(size.width, size.height);
                false
            }
            WindowEvent::KeyboardInput { event, .. } if event.state.is_pressed() && !event.repeat => {
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => true,
                    PhysicalKey::Code(KeyCode::KeyW) => {
                        self.wireframe = !self.wireframe;
                        log::info!("Wireframe {}", if self.wireframe { "on" } else { "off" });
                        false
                    }
                    _ => false,
                }
            }
            WindowEvent::RedrawRequested => match self.redraw() {
                Ok(()) => {
                    self.renderer.window.request_redraw();
                    false
                }
                Err(e) => {
                    log::error!("Render failed: {}", e);
                    true
                }
            },
            _ => false,
        }
    }

    /// Log frame totals for the session.
    pub fn log_summary(&self) {
        log::info!(
            "Drew {} frames in {:.1}s ({:.1} fps average)",
            self.clock.frame_count(),
            self.clock.elapsed_seconds(),
            self.clock.average_fps()
        );
    }

    /// Whether the wireframe overlay is currently drawn.
    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    fn redraw(&mut self) -> Result<(), RenderError> {
        self.clock.tick();
        self.camera.update(self.clock.delta_seconds());
        self.renderer.update_camera(&self.camera);
        self.renderer.render(self.scene.geometries(), self.wireframe)
    }
}
