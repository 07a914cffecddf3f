//! Solar System: a procedurally generated sphere rendered with wgpu.

mod config;
mod render_loop;
mod scene;

use anyhow::Result;
use config::SolarConfig;
use render_loop::RenderLoop;
use renderer::Renderer;
use scene::SceneBuilder;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

struct App {
    config: SolarConfig,
    build_scene: SceneBuilder,
    render_loop: Option<RenderLoop>,
}

impl App {
    fn new(config: SolarConfig, build_scene: SceneBuilder) -> Self {
        Self {
            config,
            build_scene,
            render_loop: None,
        }
    }

    fn init(&self, event_loop: &ActiveEventLoop) -> Result<RenderLoop> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            &self.config.renderer_options(),
        ))?;
        let scene = (self.build_scene)(&renderer, &self.config)?;
        window.request_redraw();
        Ok(RenderLoop::new(renderer, scene, &self.config))
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.render_loop.is_none() {
            match self.init(event_loop) {
                Ok(render_loop) => self.render_loop = Some(render_loop),
                Err(e) => {
                    log::error!("Failed to initialize: {:#}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(render_loop) = &mut self.render_loop {
            if render_loop.handle_window_event(event) {
                render_loop.log_summary();
                // Remember the overlay toggle for the next run.
                if render_loop.wireframe() != self.config.wireframe {
                    self.config.wireframe = render_loop.wireframe();
                    self.config.save();
                }
                event_loop.exit();
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SolarConfig::load();
    log::info!(
        "Starting Solar System: sphere r={} {}x{}",
        config.sphere.radius,
        config.sphere.sector_count,
        config.sphere.stack_count
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, Box::new(scene::sphere_scene));
    event_loop.run_app(&mut app)?;

    Ok(())
}
