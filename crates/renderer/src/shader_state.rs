//! The render state handed to every [`Geometry`](crate::Geometry) during a frame.

use crate::mesh::Mesh;

/// Which primitive set a draw call uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Triangle list through the textured pipeline.
    Fill,
    /// Line list through the wireframe pipeline.
    Wireframe,
}

/// Currently bound pipelines and bind groups for one render pass.
///
/// Geometry never talks to the pass directly: it hands its [`Mesh`] to
/// [`ShaderState::draw_mesh`], which binds whatever the current mode needs.
pub struct ShaderState<'p, 'e> {
    pass: &'p mut wgpu::RenderPass<'e>,
    fill_pipeline: &'p wgpu::RenderPipeline,
    wireframe_pipeline: &'p wgpu::RenderPipeline,
    camera_bind_group: &'p wgpu::BindGroup,
    texture_bind_group: &'p wgpu::BindGroup,
    mode: DrawMode,
    draw_calls: u32,
}

impl<'p, 'e> ShaderState<'p, 'e> {
    pub fn new(
        pass: &'p mut wgpu::RenderPass<'e>,
        fill_pipeline: &'p wgpu::RenderPipeline,
        wireframe_pipeline: &'p wgpu::RenderPipeline,
        camera_bind_group: &'p wgpu::BindGroup,
        texture_bind_group: &'p wgpu::BindGroup,
    ) -> Self {
        Self {
            pass,
            fill_pipeline,
            wireframe_pipeline,
            camera_bind_group,
            texture_bind_group,
            mode: DrawMode::Fill,
            draw_calls: 0,
        }
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DrawMode) {
        self.mode = mode;
    }

    /// Draw calls issued through this state so far.
    pub fn draw_calls(&self) -> u32 {
        self.draw_calls
    }

    /// Bind `mesh` for the current mode and issue one indexed draw.
    pub fn draw_mesh(&mut self, mesh: &Mesh) {
        let (pipeline, index_buffer, count) = match self.mode {
            DrawMode::Fill => (self.fill_pipeline, &mesh.index_buffer, mesh.num_indices),
            DrawMode::Wireframe => (
                self.wireframe_pipeline,
                &mesh.line_index_buffer,
                mesh.num_line_indices,
            ),
        };
        if count == 0 {
            return;
        }

        self.pass.set_pipeline(pipeline);
        self.pass.set_bind_group(0, self.camera_bind_group, &[]);
        self.pass.set_bind_group(1, self.texture_bind_group, &[]);
        self.pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.pass
            .set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.pass.draw_indexed(0..count, 0, 0..1);
        self.draw_calls += 1;
    }
}
