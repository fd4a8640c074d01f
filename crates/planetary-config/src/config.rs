use std::path::Path;

use planetary_math::Vec3;
use planetary_mesh::IcosphereParams;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name inside the config directory.
pub const CONFIG_FILE: &str = "config.ron";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub planet: PlanetConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Framebuffer width in pixels.
    pub width: u32,
    /// Framebuffer height in pixels.
    pub height: u32,
    pub title: String,
}

/// Free-fly camera setup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Use the fixed orthographic box instead of a perspective projection.
    pub orthographic: bool,
    pub start_position: Vec3,
    /// Units per second.
    pub move_speed: f32,
    /// Speed multiplier while left control is held.
    pub boost_multiplier: f32,
    /// Radians per second of roll.
    pub roll_speed: f32,
    /// Radians per pixel of mouse motion.
    pub mouse_sensitivity: f32,
}

/// The generated planet and its atmosphere shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Clamped to [`IcosphereParams::MAX_SUBDIVISIONS`] on load.
    pub subdivisions: u32,
    pub amplitude: f32,
    pub noise_scale: Vec3,
    pub noise_offset: Vec3,
    /// Build and draw the atmosphere shell.
    pub atmosphere: bool,
    /// Uniform scale of the atmosphere relative to the planet.
    pub atmosphere_scale: f32,
    /// Planet spin in radians per second about +Y.
    pub spin_speed: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter used when `RUST_LOG` is unset, e.g. "info" or "planetary_mesh=debug".
    pub log_level: String,
    /// Frames the headless runner renders before exiting.
    pub frames: u32,
    /// Log per-frame camera state at debug level.
    pub trace_camera: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 854,
            height: 480,
            title: "Planetary".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 70.0,
            near: 0.0001,
            far: 1000.0,
            orthographic: false,
            start_position: Vec3::new(0.0, 0.0, -3.0),
            move_speed: 1.0,
            boost_multiplier: 4.0,
            roll_speed: 1.0,
            mouse_sensitivity: 0.002,
        }
    }
}

impl Default for PlanetConfig {
    fn default() -> Self {
        let params = IcosphereParams::default();
        Self {
            subdivisions: params.subdivisions,
            amplitude: params.amplitude,
            noise_scale: params.noise_scale,
            noise_offset: params.noise_offset,
            atmosphere: true,
            atmosphere_scale: 1.25,
            spin_speed: 0.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            frames: 120,
            trace_camera: false,
        }
    }
}

impl PlanetConfig {
    /// Builder parameters for the planet surface.
    pub fn surface_params(&self) -> IcosphereParams {
        IcosphereParams {
            subdivisions: self.subdivisions,
            noise_scale: self.noise_scale,
            noise_offset: self.noise_offset,
            amplitude: self.amplitude,
            winding: Default::default(),
        }
    }
}

impl WindowConfig {
    /// Width over height. Zero when the height is zero.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }
}

impl Config {
    /// Loads `config.ron` from `config_dir`, writing a default one first if
    /// it does not exist.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);

        if path.exists() {
            let mut config = Self::read(config_dir)?;
            config.clamp_to_limits();
            log::info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    fn read(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Ok(ron::from_str(&contents)?)
    }

    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_err)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty)?;

        let path = config_dir.join(CONFIG_FILE);
        std::fs::write(&path, serialized).map_err(|source| ConfigError::Write { path, source })?;
        Ok(())
    }

    /// Re-reads the file. `Some` only when the contents differ from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let mut fresh = Self::read(config_dir)?;
        fresh.clamp_to_limits();

        if &fresh != self {
            log::info!("Config reloaded with changes");
            Ok(Some(fresh))
        } else {
            Ok(None)
        }
    }

    /// Pulls out-of-range values back to what the application supports.
    pub fn clamp_to_limits(&mut self) {
        let max = IcosphereParams::MAX_SUBDIVISIONS;
        if self.planet.subdivisions > max {
            log::warn!(
                "planet.subdivisions {} exceeds the supported maximum, using {}",
                self.planet.subdivisions,
                max
            );
            self.planet.subdivisions = max;
        }
        if self.window.height == 0 {
            log::warn!("window.height is 0, using 1");
            self.window.height = 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let text = ron::ser::to_string_pretty(
            &Config::default(),
            ron::ser::PrettyConfig::new().depth_limit(3),
        )
        .unwrap();
        assert!(text.contains("width: 854"));
        assert!(text.contains("subdivisions: 2"));
        assert!(text.contains("log_level: \"info\""));
    }

    #[test]
    fn test_roundtrip() {
        let mut config = Config::default();
        config.planet.noise_offset = Vec3::new(0.5, -1.0, 2.0);
        let text = ron::to_string(&config).unwrap();
        assert_eq!(ron::from_str::<Config>(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = ron::from_str("(planet: (amplitude: 0.3))").unwrap();
        assert_eq!(config.planet.amplitude, 0.3);
        assert_eq!(config.planet.subdivisions, 2);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        assert!(ron::from_str::<Config>("(render: (msaa: 4), planet: (seed: 9))").is_ok());
    }

    #[test]
    fn test_comments_are_accepted() {
        let config: Config = ron::from_str("// planet\n(\n  // nothing set\n)").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_ron_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{ not ron").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("planetary");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.window.width = 1920;
        config.planet.subdivisions = 5;
        config.camera.orthographic = true;
        config.save(dir.path()).unwrap();
        assert_eq!(Config::load_or_create(dir.path()).unwrap(), config);
    }

    #[test]
    fn test_load_clamps_subdivisions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "(planet: (subdivisions: 14))").unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config.planet.subdivisions, IcosphereParams::MAX_SUBDIVISIONS);
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());

        let mut edited = config.clone();
        edited.planet.amplitude = 0.25;
        edited.save(dir.path()).unwrap();
        let reloaded = config.reload(dir.path()).unwrap().unwrap();
        assert_eq!(reloaded.planet.amplitude, 0.25);
    }

    #[test]
    fn test_reload_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::default().reload(dir.path()),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_surface_params_follow_planet_section() {
        let mut planet = PlanetConfig::default();
        planet.subdivisions = 3;
        planet.amplitude = -0.2;
        let params = planet.surface_params();
        assert_eq!(params.subdivisions, 3);
        assert_eq!(params.amplitude, -0.2);
        assert_eq!(params.winding, planetary_mesh::Winding::CounterClockwise);
    }

    #[test]
    fn test_aspect_ratio() {
        assert!((WindowConfig::default().aspect_ratio() - 854.0 / 480.0).abs() < 1e-6);
    }
}
