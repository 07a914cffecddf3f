//! Errors raised by the GPU layer.

use procgen::GeometryError;

/// Failures while creating GPU resources or presenting frames.
///
/// None of these can corrupt CPU-side mesh data: a [`procgen::Sphere`] is
/// complete before any of its buffers reach the device.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("GPU resource failure: {0}")]
    GpuResourceFailure(String),
    #[error("no suitable GPU adapter found")]
    NoAdapter,
    #[error(transparent)]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error(transparent)]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error(transparent)]
    Surface(#[from] wgpu::SurfaceError),
    #[error("texture load failed: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RenderError>;
