//! Packing separate vertex attribute streams into one GPU-ready buffer.
//!
//! Layout per vertex (8 × f32, 32 bytes):
//!
//! ```text
//! | px py pz | nx ny nz | s t |
//!   0          3          6
//! ```

use crate::error::{GeometryError, Result};

/// Floats per interleaved vertex.
pub const FLOATS_PER_VERTEX: usize = 8;
/// Float offset of the position inside an interleaved vertex.
pub const POSITION_OFFSET: usize = 0;
/// Float offset of the normal inside an interleaved vertex.
pub const NORMAL_OFFSET: usize = 3;
/// Float offset of the texture coordinate inside an interleaved vertex.
pub const TEX_COORD_OFFSET: usize = 6;
/// Byte stride of one interleaved vertex.
pub const VERTEX_STRIDE_BYTES: usize = FLOATS_PER_VERTEX * std::mem::size_of::<f32>();

/// Separate per-attribute streams, flat `f32` arrays in vertex order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexAttributes {
    /// `[x, y, z, x, y, z, ...]`
    pub positions: Vec<f32>,
    /// `[nx, ny, nz, ...]`
    pub normals: Vec<f32>,
    /// `[s, t, s, t, ...]`
    pub tex_coords: Vec<f32>,
}

impl VertexAttributes {
    /// Number of vertices described by the position stream.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Checks the per-vertex count invariant and returns the vertex count.
pub fn checked_vertex_count(positions: &[f32], normals: &[f32], tex_coords: &[f32]) -> Result<usize> {
    let count = positions.len() / 3;
    let consistent = positions.len() % 3 == 0
        && normals.len() % 3 == 0
        && tex_coords.len() % 2 == 0
        && normals.len() / 3 == count
        && tex_coords.len() / 2 == count;

    if consistent {
        Ok(count)
    } else {
        Err(GeometryError::InconsistentBuffers {
            positions: positions.len(),
            normals: normals.len(),
            tex_coords: tex_coords.len(),
        })
    }
}

/// Interleave positions, normals and texture coordinates into one buffer.
pub fn interleave(positions: &[f32], normals: &[f32], tex_coords: &[f32]) -> Result<Vec<f32>> {
    let count = checked_vertex_count(positions, normals, tex_coords)?;

    let mut out = Vec::with_capacity(count * FLOATS_PER_VERTEX);
    for ((p, n), t) in positions
        .chunks_exact(3)
        .zip(normals.chunks_exact(3))
        .zip(tex_coords.chunks_exact(2))
    {
        out.extend_from_slice(p);
        out.extend_from_slice(n);
        out.extend_from_slice(t);
    }
    Ok(out)
}

/// Split an interleaved buffer back into separate attribute streams.
pub fn deinterleave(interleaved: &[f32]) -> Result<VertexAttributes> {
    if interleaved.len() % FLOATS_PER_VERTEX != 0 {
        return Err(GeometryError::MisalignedInterleaved {
            len: interleaved.len(),
            stride: FLOATS_PER_VERTEX,
        });
    }

    let count = interleaved.len() / FLOATS_PER_VERTEX;
    let mut attrs = VertexAttributes {
        positions: Vec::with_capacity(count * 3),
        normals: Vec::with_capacity(count * 3),
        tex_coords: Vec::with_capacity(count * 2),
    };
    for vertex in interleaved.chunks_exact(FLOATS_PER_VERTEX) {
        attrs
            .positions
            .extend_from_slice(&vertex[POSITION_OFFSET..NORMAL_OFFSET]);
        attrs
            .normals
            .extend_from_slice(&vertex[NORMAL_OFFSET..TEX_COORD_OFFSET]);
        attrs
            .tex_coords
            .extend_from_slice(&vertex[TEX_COORD_OFFSET..FLOATS_PER_VERTEX]);
    }
    Ok(attrs)
}
