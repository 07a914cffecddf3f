//! GPU mesh: vertex, triangle index and line index buffers.

use crate::error::{RenderError, Result};
use procgen::Sphere;
use wgpu::util::DeviceExt;

/// A GPU mesh with vertex, triangle index and line index buffers.
///
/// Dropping the mesh releases its buffers.
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub line_index_buffer: wgpu::Buffer,
    pub num_indices: u32,
    pub num_line_indices: u32,
}

impl Mesh {
    /// Upload a sphere's interleaved vertices and both index lists.
    pub fn from_sphere(device: &wgpu::Device, sphere: &Sphere) -> Result<Self> {
        Self::new(
            device,
            sphere.interleaved_vertices_bytes(),
            sphere.indices(),
            sphere.line_indices(),
        )
    }

    /// Create a mesh from interleaved vertex bytes and index data.
    ///
    /// Buffer creation runs inside an error scope so allocation and
    /// validation failures come back as [`RenderError::GpuResourceFailure`]
    /// instead of reaching the device's uncaptured-error handler.
    pub fn new(
        device: &wgpu::Device,
        vertex_bytes: &[u8],
        indices: &[u32],
        line_indices: &[u32],
    ) -> Result<Self> {
        if vertex_bytes.is_empty() || indices.is_empty() {
            return Err(RenderError::GpuResourceFailure(
                "refusing to upload an empty mesh".into(),
            ));
        }
        let num_indices = u32::try_from(indices.len())
            .map_err(|_| RenderError::GpuResourceFailure("too many triangle indices".into()))?;
        let num_line_indices = u32::try_from(line_indices.len())
            .map_err(|_| RenderError::GpuResourceFailure("too many line indices".into()))?;

        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: vertex_bytes,
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        // A zero-sized buffer is valid in wgpu but cannot be bound, so keep one index.
        let line_contents: &[u32] = if line_indices.is_empty() { &[0] } else { line_indices };
        let line_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Line Index Buffer"),
            contents: bytemuck::cast_slice(line_contents),
            usage: wgpu::BufferUsages::INDEX,
        });

        let validation = pollster::block_on(device.pop_error_scope());
        let out_of_memory = pollster::block_on(device.pop_error_scope());
        if let Some(err) = validation.or(out_of_memory) {
            log::error!("Mesh upload failed: {}", err);
            return Err(RenderError::GpuResourceFailure(err.to_string()));
        }

        log::debug!(
            "Uploaded mesh: {} vertex bytes, {} indices, {} line indices",
            vertex_bytes.len(),
            num_indices,
            num_line_indices
        );

        Ok(Self {
            vertex_buffer,
            index_buffer,
            line_index_buffer,
            num_indices,
            num_line_indices,
        })
    }
}
