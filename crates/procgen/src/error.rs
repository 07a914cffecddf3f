//! Errors raised while building geometry on the CPU.

/// Failures detected by the mesh generator and interleaver.
///
/// Both variants are raised before any output buffer exists, so a caller
/// holding an `Err` never holds a partial mesh.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error(
        "inconsistent vertex buffers: {positions} position floats, {normals} normal floats, {tex_coords} tex coord floats"
    )]
    InconsistentBuffers {
        positions: usize,
        normals: usize,
        tex_coords: usize,
    },
    #[error("interleaved buffer of {len} floats is not a multiple of {stride}")]
    MisalignedInterleaved { len: usize, stride: usize },
}

impl GeometryError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GeometryError>;
