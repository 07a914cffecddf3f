//! Fixed orbit camera looking at the world origin.

use bytemuck::{Pod, Zeroable};
use engine_core::{Transform, WORLD_ORIGIN};
use glam::{Mat4, Vec3};

/// Perspective camera circling the origin in the XY plane, `+Z` up.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera transform (position and rotation).
    pub transform: Transform,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Distance from the origin.
    pub distance: f32,
    /// Angle above the equatorial plane, radians.
    pub elevation: f32,
    /// Orbit speed, radians per second. Zero holds the camera still.
    pub orbit_speed: f32,
    azimuth: f32,
}

impl Default for Camera {
    fn default() -> Self {
        let mut camera = Self {
            transform: Transform::default(),
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            aspect: 1.0,
            distance: 4.0,
            elevation: 0.35,
            orbit_speed: 0.3,
            azimuth: 0.0,
        };
        camera.place();
        camera
    }
}

impl Camera {
    /// Camera at `distance` from the origin.
    pub fn orbiting(distance: f32, orbit_speed: f32) -> Self {
        let mut camera = Self {
            distance,
            orbit_speed,
            far: (distance * 10.0).max(100.0),
            ..Default::default()
        };
        camera.place();
        camera
    }

    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Advance the orbit by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.azimuth = (self.azimuth + self.orbit_speed * dt) % std::f32::consts::TAU;
        self.place();
    }

    fn place(&mut self) {
        let (sin_el, cos_el) = self.elevation.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        self.transform.position = Vec3::new(
            self.distance * cos_el * cos_az,
            self.distance * cos_el * sin_az,
            self.distance * sin_el,
        );
        self.transform.look_at(WORLD_ORIGIN, Vec3::Z);
    }

    /// Get the view matrix: the inverse of the camera's world transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.transform.rotation, self.transform.position).inverse()
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }
}

/// Camera uniform data for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4], // w unused, padding
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 4],
        }
    }

    pub fn update(&mut self, camera: &Camera) {
        self.view_proj = camera.view_projection_matrix().to_cols_array_2d();
        self.position = camera.position().extend(1.0).into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_projects_to_screen_center() {
        let mut camera = Camera::default();
        camera.set_aspect(1280, 720);
        let clip = camera.view_projection_matrix() * WORLD_ORIGIN.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5, "ndc = {:?}", ndc);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn orbit_keeps_distance_and_moves() {
        let mut camera = Camera::orbiting(6.0, 1.0);
        let before = camera.position();
        camera.update(0.5);
        let after = camera.position();
        assert!((after.length() - 6.0).abs() < 1e-4);
        assert!((after - before).length() > 0.1);
        assert!((camera.transform.forward() - (-after.normalize())).length() < 1e-4);
    }

    #[test]
    fn view_matrix_follows_transform() {
        let mut camera = Camera::orbiting(5.0, 1.0);
        camera.update(1.25);
        let expected = Mat4::look_at_rh(camera.position(), WORLD_ORIGIN, Vec3::Z);
        assert!(camera.view_matrix().abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn zero_speed_holds_still() {
        let mut camera = Camera::orbiting(5.0, 0.0);
        let before = camera.position();
        camera.update(10.0);
        assert_eq!(camera.position(), before);
    }

    #[test]
    fn set_aspect_guards_zero_height() {
        let mut camera = Camera::default();
        camera.set_aspect(800, 0);
        assert_eq!(camera.aspect, 800.0);
    }

    #[test]
    fn uniform_tracks_camera() {
        let camera = Camera::default();
        let mut uniform = CameraUniform::new();
        uniform.update(&camera);
        assert_eq!(uniform.view_proj, camera.view_projection_matrix().to_cols_array_2d());
        assert_eq!(uniform.position[3], 1.0);
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    }
}
