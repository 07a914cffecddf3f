//! The flat list of geometry drawn each frame.

use crate::config::SolarConfig;
use procgen::Sphere;
use renderer::{Geometry, RenderError, Renderer, SphereModel};

/// Builds the scene once the GPU device exists. Injected into the app at startup.
pub type SceneBuilder = Box<dyn Fn(&Renderer, &SolarConfig) -> Result<Scene, RenderError>>;

/// Geometry drawn in insertion order.
#[derive(Default)]
pub struct Scene {
    geometries: Vec<Box<dyn Geometry>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, geometry: impl Geometry + 'static) {
        log::debug!("Scene: added {}", geometry.label());
        self.geometries.push(Box::new(geometry));
    }

    pub fn geometries(&self) -> &[Box<dyn Geometry>] {
        &self.geometries
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Labels in draw order.
    pub fn labels(&self) -> Vec<&str> {
        self.geometries.iter().map(|g| g.label()).collect()
    }
}

/// The default scene: one sphere built from the config.
pub fn sphere_scene(renderer: &Renderer, config: &SolarConfig) -> Result<Scene, RenderError> {
    let sphere = Sphere::from_params(config.sphere.origin(), config.sphere.params())?;
    let mut scene = Scene::new();
    scene.push(SphereModel::new(renderer.device(), sphere)?);
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use renderer::Placeholder;

    #[test]
    fn new_scene_is_empty() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert_eq!(scene.len(), 0);
        assert!(scene.geometries().is_empty());
    }

    #[test]
    fn push_keeps_draw_order() {
        let mut scene = Scene::new();
        scene.push(Placeholder);
        scene.push(Placeholder);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.labels(), vec!["placeholder", "placeholder"]);
    }

    #[test]
    fn invalid_sphere_config_fails_before_upload() {
        let mut config = SolarConfig::default();
        config.sphere.radius = 0.0;
        let err = Sphere::from_params(config.sphere.origin(), config.sphere.params()).unwrap_err();
        let err: RenderError = err.into();
        assert!(matches!(err, RenderError::Geometry(_)));
    }
}
