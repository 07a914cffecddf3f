//! The draw contract shared by everything that can appear in a scene.

use crate::{error::Result, mesh::Mesh, shader_state::ShaderState};
use procgen::Sphere;

/// Anything that can render itself with the caller's shader state.
pub trait Geometry {
    /// Issue the GPU commands for this object. No return value; the only
    /// effect is command submission into `state`'s render pass.
    fn draw(&self, state: &mut ShaderState<'_, '_>);

    /// Human-readable name for logs.
    fn label(&self) -> &str {
        "geometry"
    }
}

/// Empty slot in a scene. Drawing it does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Placeholder;

impl Geometry for Placeholder {
    fn draw(&self, _state: &mut ShaderState<'_, '_>) {}

    fn label(&self) -> &str {
        "placeholder"
    }
}

/// A sphere with its buffers resident on the GPU.
///
/// The CPU mesh is kept alongside the GPU copy so callers can still read
/// the generated data; dropping the model releases the GPU buffers.
pub struct SphereModel {
    sphere: Sphere,
    mesh: Mesh,
}

impl SphereModel {
    /// Upload `sphere` and keep it alongside its GPU buffers.
    pub fn new(device: &wgpu::Device, sphere: Sphere) -> Result<Self> {
        let mesh = Mesh::from_sphere(device, &sphere)?;
        log::info!(
            "Sphere model ready: r={} {}x{} ({} vertices, {} triangles)",
            sphere.radius(),
            sphere.sector_count(),
            sphere.stack_count(),
            sphere.vertex_count(),
            sphere.triangle_count()
        );
        Ok(Self { sphere, mesh })
    }

    pub fn sphere(&self) -> &Sphere {
        &self.sphere
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

impl Geometry for SphereModel {
    fn draw(&self, state: &mut ShaderState<'_, '_>) {
        state.draw_mesh(&self.mesh);
    }

    fn label(&self) -> &str {
        "sphere"
    }
}
