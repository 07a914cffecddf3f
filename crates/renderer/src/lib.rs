//! Rendering system using wgpu for the solar system scene.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod pipeline;
pub mod renderer;
pub mod shader_state;
pub mod texture;
pub mod vertex;

pub use camera::*;
pub use error::RenderError;
pub use geometry::*;
pub use mesh::*;
pub use renderer::*;
pub use shader_state::*;
pub use texture::*;
pub use vertex::*;
