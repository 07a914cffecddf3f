//! Vertex layout matching the interleaved buffers produced by `procgen`.

use bytemuck::{Pod, Zeroable};
use procgen::{FLOATS_PER_VERTEX, NORMAL_OFFSET, TEX_COORD_OFFSET, VERTEX_STRIDE_BYTES};

const FLOAT_SIZE: wgpu::BufferAddress = std::mem::size_of::<f32>() as wgpu::BufferAddress;

/// One interleaved vertex: position, normal, texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

const _: () = assert!(std::mem::size_of::<Vertex>() == VERTEX_STRIDE_BYTES);

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] = [
        // Position
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        },
        // Normal
        wgpu::VertexAttribute {
            offset: NORMAL_OFFSET as wgpu::BufferAddress * FLOAT_SIZE,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        },
        // UV/Tex coords
        wgpu::VertexAttribute {
            offset: TEX_COORD_OFFSET as wgpu::BufferAddress * FLOAT_SIZE,
            shader_location: 2,
            format: wgpu::VertexFormat::Float32x2,
        },
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: (FLOATS_PER_VERTEX as wgpu::BufferAddress) * FLOAT_SIZE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// View an interleaved float buffer as vertices without copying.
    /// Returns `None` if the length is not a whole number of vertices.
    pub fn slice_from_interleaved(data: &[f32]) -> Option<&[Vertex]> {
        bytemuck::try_cast_slice(data).ok()
    }
}
