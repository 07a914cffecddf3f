//! Core engine types shared by the geometry generator, renderer and app.
//!
//! This crate provides the foundational types used across all systems:
//! - Model-space coordinates and transforms
//! - Frame timing for the render loop

pub mod time;
pub mod transform;

pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
