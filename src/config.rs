//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`STARMAP_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Data file locations
    #[serde(default)]
    pub data: DataConfig,
    /// Editor configuration
    #[serde(default)]
    pub editor: EditorConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`STARMAP_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // STARMAP_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("STARMAP_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Star Map".to_string(),
            width: 1280,
            height: 800,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Distance from the pivot on startup and after reset
    pub start_distance: f32,
    /// Closest zoom
    pub min_distance: f32,
    /// Farthest zoom
    pub max_distance: f32,
    /// Maximum pitch angle in radians
    pub pitch_limit: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 55.0,
            near: 0.1,
            far: 50_000.0,
            start_distance: 1800.0,
            min_distance: 300.0,
            max_distance: 6000.0,
            pitch_limit: 1.55,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Radians of orbit per pixel dragged
    pub orbit_sensitivity: f32,
    /// Fractional distance change per wheel notch
    pub zoom_step: f32,
    /// System pick radius in pixels
    pub pick_radius: f32,
    /// Lane pick distance in pixels
    pub lane_pick_radius: f32,
    /// Most a press may travel and still count as a click, in pixels
    pub click_slop: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            orbit_sensitivity: 0.005,
            zoom_step: 0.12,
            pick_radius: 18.0,
            lane_pick_radius: 20.0,
            click_slop: 4.0,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Lane color [r, g, b, a]
    pub lane_color: [f32; 4],
    /// Star color [r, g, b]
    pub star_color: [f32; 3],
    /// Star sprite size in pixels
    pub star_size: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.043, 0.055, 0.075, 1.0],
            lane_color: [1.0, 0.85, 0.35, 1.0],
            star_color: [1.0, 0.92, 0.6],
            star_size: 6.0,
        }
    }
}

/// Data file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Map document to load
    pub systems_path: PathBuf,
    /// Directory exports are written to
    pub export_dir: PathBuf,
    /// Detail store directory; platform data dir when unset
    pub detail_dir: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            systems_path: PathBuf::from("systems.json"),
            export_dir: PathBuf::from("."),
            detail_dir: None,
        }
    }
}

impl DataConfig {
    /// Configured detail directory, else `<data dir>/starmap/details`
    pub fn resolved_detail_dir(&self) -> PathBuf {
        match &self.detail_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("starmap")
                .join("details"),
        }
    }
}

/// Editor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Password for edit modes; empty disables the lock
    pub password: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            password: "starmap".to_string(),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.camera.start_distance, 1800.0);
        assert_eq!(config.editor.password, "starmap");
        assert_eq!(config.data.systems_path, PathBuf::from("systems.json"));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("star_size"));
        assert!(toml.contains("password"));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: AppConfig = toml::from_str("[camera]\nfov = 70.0\n").unwrap();
        assert_eq!(config.camera.fov, 70.0);
        assert_eq!(config.camera.max_distance, 6000.0);
        assert_eq!(config.input.pick_radius, 18.0);
    }

    #[test]
    fn test_explicit_detail_dir_wins() {
        let data = DataConfig {
            detail_dir: Some(PathBuf::from("/tmp/details")),
            ..DataConfig::default()
        };
        assert_eq!(data.resolved_detail_dir(), PathBuf::from("/tmp/details"));
        assert!(DataConfig::default().resolved_detail_dir().ends_with("starmap/details"));
    }
}
