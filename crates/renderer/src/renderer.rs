//! Main renderer managing wgpu state and per-frame drawing.

use crate::{
    camera::{Camera, CameraUniform},
    error::{RenderError, Result},
    geometry::Geometry,
    pipeline::{
        create_camera_bind_group_layout, create_fill_pipeline, create_shader_module,
        create_texture_bind_group, create_texture_bind_group_layout, create_wireframe_pipeline,
    },
    shader_state::{DrawMode, ShaderState},
    texture::{DepthTexture, Texture},
};
use procgen::TextureData;
use std::path::PathBuf;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

/// Settings fixed at renderer creation.
#[derive(Debug, Clone)]
pub struct RendererOptions {
    /// Present with vsync (`AutoVsync`) or as fast as possible (`AutoNoVsync`).
    pub vsync: bool,
    /// Colour the frame is cleared to.
    pub clear_color: wgpu::Color,
    /// Image applied to geometry. `None` or a failed load falls back to a UV grid.
    pub texture_path: Option<PathBuf>,
    /// Cells of the fallback UV grid (columns, rows).
    pub grid_cells: (u32, u32),
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            vsync: true,
            clear_color: wgpu::Color {
                r: 128.0 / 255.0,
                g: 200.0 / 255.0,
                b: 1.0,
                a: 1.0,
            },
            texture_path: None,
            grid_cells: (36, 18),
        }
    }
}

/// Main renderer state.
pub struct Renderer {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    pub window: Arc<Window>,

    // Pipelines
    fill_pipeline: wgpu::RenderPipeline,
    wireframe_pipeline: wgpu::RenderPipeline,

    // Bind groups
    camera_bind_group: wgpu::BindGroup,
    camera_buffer: wgpu::Buffer,
    camera_uniform: CameraUniform,
    texture_bind_group: wgpu::BindGroup,

    depth_texture: DepthTexture,
    clear_color: wgpu::Color,
}

impl Renderer {
    /// Create a new renderer for the given window.
    pub async fn new(window: Arc<Window>, options: &RendererOptions) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        log::info!("Using GPU: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| {
                RenderError::GpuResourceFailure("surface reports no supported formats".into())
            })?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let present_mode = if options.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Camera uniform
        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout = create_camera_bind_group_layout(&device);
        let texture_bind_group_layout = create_texture_bind_group_layout(&device);

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let surface_texture = load_surface_texture(&device, &queue, options);
        let texture_bind_group =
            create_texture_bind_group(&device, &texture_bind_group_layout, &surface_texture);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Geometry Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });
        let shader = create_shader_module(&device);
        let fill_pipeline = create_fill_pipeline(&device, &shader, &pipeline_layout, config.format);
        let wireframe_pipeline =
            create_wireframe_pipeline(&device, &shader, &pipeline_layout, config.format);

        let depth_texture =
            DepthTexture::new(&device, config.width, config.height, "Depth Texture");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            fill_pipeline,
            wireframe_pipeline,
            camera_bind_group,
            camera_buffer,
            camera_uniform,
            texture_bind_group,
            depth_texture,
            clear_color: options.clear_color,
        })
    }

    /// Handle window resize.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = DepthTexture::new(
                &self.device,
                self.config.width,
                self.config.height,
                "Depth Texture",
            );
        }
    }

    /// Update camera uniform.
    pub fn update_camera(&mut self, camera: &Camera) {
        self.camera_uniform.update(camera);
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
    }

    /// Clear the frame, draw every geometry filled, then again as lines if
    /// `wireframe` is set, and present.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render(&mut self, geometries: &[Box<dyn Geometry>], wireframe: bool) -> Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.resize(self.size);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface acquire timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Geometry Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut state = ShaderState::new(
                &mut render_pass,
                &self.fill_pipeline,
                &self.wireframe_pipeline,
                &self.camera_bind_group,
                &self.texture_bind_group,
            );
            for geometry in geometries {
                geometry.draw(&mut state);
            }
            if wireframe {
                state.set_mode(DrawMode::Wireframe);
                for geometry in geometries {
                    geometry.draw(&mut state);
                }
            }
            log::trace!("{} draw calls", state.draw_calls());
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    /// Get window dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Access the device for mesh creation.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }
}

/// The configured image, or a UV grid when none is set or it fails to load.
fn load_surface_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    options: &RendererOptions,
) -> Texture {
    if let Some(path) = &options.texture_path {
        match Texture::from_path(device, queue, path) {
            Ok(texture) => return texture,
            Err(e) => log::warn!("Could not load texture {:?}: {}, using UV grid", path, e),
        }
    }
    let (columns, rows) = options.grid_cells;
    let grid = TextureData::uv_grid(columns, rows, device.limits().max_texture_dimension_2d);
    Texture::from_texture_data(device, queue, &grid, "UV Grid")
}
