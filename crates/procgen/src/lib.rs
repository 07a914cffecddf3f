//! Procedural geometry for the solar system scene: UV spheres packed into
//! interleaved, indexed buffers, plus the textures used to inspect them.
//!
//! Everything here runs on the CPU. The renderer uploads the byte views a
//! [`Sphere`] exposes; nothing in this crate touches the GPU.

pub mod error;
pub mod interleave;
pub mod sphere;
pub mod textures;

pub use error::GeometryError;
pub use interleave::*;
pub use sphere::*;
pub use textures::*;
