//! Scene configuration (window, sphere, presentation). Loaded from solar.ron at startup.

use engine_core::Coordinate;
use procgen::SphereParams;
use renderer::RendererOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "solar.ron";

/// Sphere construction inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereConfig {
    /// Recorded on the sphere; the mesh itself is always centered on the world origin.
    #[serde(default)]
    pub origin: [f32; 3],
    #[serde(default = "default_radius")]
    pub radius: f32,
    /// Longitude subdivisions (>= 3).
    #[serde(default = "default_sector_count")]
    pub sector_count: u32,
    /// Latitude subdivisions (>= 2).
    #[serde(default = "default_stack_count")]
    pub stack_count: u32,
}

fn default_radius() -> f32 {
    1.0
}
fn default_sector_count() -> u32 {
    36
}
fn default_stack_count() -> u32 {
    18
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            origin: [0.0; 3],
            radius: default_radius(),
            sector_count: default_sector_count(),
            stack_count: default_stack_count(),
        }
    }
}

impl SphereConfig {
    pub fn origin(&self) -> Coordinate {
        Coordinate::from_array(self.origin)
    }

    pub fn params(&self) -> SphereParams {
        SphereParams::new(self.radius, self.sector_count, self.stack_count)
    }
}

/// Persistent settings. Loaded from `solar.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_size")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_size")]
    pub window_height: u32,
    #[serde(default = "default_title")]
    pub title: String,
    /// Enable vsync (recommended to avoid tearing).
    #[serde(default = "default_true")]
    pub vsync: bool,
    /// Background colour, linear RGB in [0, 1].
    #[serde(default = "default_clear_color")]
    pub clear_color: [f32; 3],
    /// Draw the line-list overlay on top of the filled mesh.
    #[serde(default)]
    pub wireframe: bool,
    /// Optional PNG/JPEG applied via the sphere's texture coordinates.
    #[serde(default)]
    pub texture: Option<PathBuf>,
    /// Camera distance from the origin.
    #[serde(default = "default_camera_distance")]
    pub camera_distance: f32,
    /// Camera orbit speed in radians per second.
    #[serde(default = "default_orbit_speed")]
    pub orbit_speed: f32,
    #[serde(default)]
    pub sphere: SphereConfig,
}

fn default_window_size() -> u32 {
    800
}
fn default_title() -> String {
    "Solar System".to_string()
}
fn default_true() -> bool {
    true
}
fn default_clear_color() -> [f32; 3] {
    [128.0 / 255.0, 200.0 / 255.0, 1.0]
}
fn default_camera_distance() -> f32 {
    4.0
}
fn default_orbit_speed() -> f32 {
    0.3
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_size(),
            window_height: default_window_size(),
            title: default_title(),
            vsync: default_true(),
            clear_color: default_clear_color(),
            wireframe: false,
            texture: None,
            camera_distance: default_camera_distance(),
            orbit_speed: default_orbit_speed(),
            sphere: SphereConfig::default(),
        }
    }
}

impl SolarConfig {
    /// Load config from `solar.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(data) => match Self::from_ron(&data) {
                Ok(c) => {
                    log::info!("Loaded config from {:?}", path);
                    return c;
                }
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            },
            Err(_) => log::debug!("No config at {:?}, using defaults", path),
        }
        Self::default()
    }

    pub fn from_ron(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }

    /// Save current config to `solar.ron`. Logs on error.
    pub fn save(&self) {
        self.save_to(&config_path());
    }

    pub fn save_to(&self, path: &Path) {
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialize config: {}", e),
        }
    }

    pub fn renderer_options(&self) -> RendererOptions {
        let [r, g, b] = self.clear_color;
        RendererOptions {
            vsync: self.vsync,
            clear_color: wgpu::Color {
                r: f64::from(r),
                g: f64::from(g),
                b: f64::from(b),
                a: 1.0,
            },
            texture_path: self.texture.clone(),
            grid_cells: (self.sphere.sector_count, self.sphere.stack_count),
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ron_gives_defaults() {
        let config = SolarConfig::from_ron("()").unwrap();
        assert_eq!(config, SolarConfig::default());
        assert_eq!(config.sphere.params(), SphereParams::new(1.0, 36, 18));
    }

    #[test]
    fn partial_sphere_section_keeps_other_defaults() {
        let config =
            SolarConfig::from_ron("(wireframe: true, sphere: (radius: 2.5, stack_count: 9))")
                .unwrap();
        assert!(config.wireframe);
        assert_eq!(config.sphere.radius, 2.5);
        assert_eq!(config.sphere.stack_count, 9);
        assert_eq!(config.sphere.sector_count, 36);
        assert_eq!(config.window_width, 800);
    }

    #[test]
    fn invalid_ron_is_an_error() {
        assert!(SolarConfig::from_ron("(window_width: \"wide\")").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("solar-config-does-not-exist.ron");
        assert_eq!(SolarConfig::load_from(&path), SolarConfig::default());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let path = std::env::temp_dir().join(format!("solar-config-{}.ron", std::process::id()));
        let config = SolarConfig {
            wireframe: true,
            texture: Some(PathBuf::from("earth.png")),
            sphere: SphereConfig {
                origin: [1.0, 2.0, 3.0],
                radius: 0.5,
                sector_count: 12,
                stack_count: 6,
            },
            ..Default::default()
        };
        config.save_to(&path);
        let loaded = SolarConfig::load_from(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn renderer_options_follow_config() {
        let config = SolarConfig {
            vsync: false,
            clear_color: [0.0, 0.5, 1.0],
            ..Default::default()
        };
        let options = config.renderer_options();
        assert!(!options.vsync);
        assert_eq!(options.clear_color.g, 0.5);
        assert_eq!(options.grid_cells, (36, 18));
        assert!(options.texture_path.is_none());
    }

    #[test]
    fn origin_converts_to_coordinate() {
        let sphere = SphereConfig {
            origin: [1.0, -2.0, 3.0],
            ..Default::default()
        };
        assert_eq!(sphere.origin(), Coordinate::new(1.0, -2.0, 3.0));
    }
}
