//! Model-space coordinates and the transform that places geometry in the world.

use glam::{Mat4, Quat, Vec3};

/// A position or direction in model space.
pub type Coordinate = Vec3;

/// The world origin. Every generated mesh is centered here.
pub const WORLD_ORIGIN: Coordinate = Vec3::ZERO;

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: WORLD_ORIGIN,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity transform (geometry stays where it was generated).
    pub const IDENTITY: Self = Self {
        position: WORLD_ORIGIN,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Create a new transform at the given position.
    pub fn from_position(position: Coordinate) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Transform a model-space point into world space.
    pub fn transform_point(&self, point: Coordinate) -> Coordinate {
        self.to_matrix().transform_point3(point)
    }

    /// True when applying this transform leaves every point unchanged.
    pub fn is_identity(&self) -> bool {
        self.position == WORLD_ORIGIN && self.rotation == Quat::IDENTITY && self.scale == Vec3::ONE
    }

    /// Forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Point the forward axis at `target`, keeping `up` as the vertical reference.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = target - self.position;
        if forward.length_squared() > 0.0001 {
            self.rotation = Quat::from_mat4(&Mat4::look_at_rh(self.position, target, up)).inverse();
        }
    }
}
