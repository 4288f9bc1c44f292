//! Configuration structs with sensible defaults and RON persistence.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
const CONFIG_FILE: &str = "config.ron";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Simulation timing and starting pose.
    pub sim: SimConfig,
    /// Input settings.
    pub input: InputConfig,
    /// External map-tile service settings.
    pub map: MapConfig,
    /// Engine audio settings.
    pub audio: AudioConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Base window title. The HUD line is appended to it every frame.
    pub title: String,
}

/// Simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Upper bound on the elapsed time fed to the integrators, in seconds.
    pub max_dt: f64,
    /// Where and how the flight begins.
    pub start: StartPose,
}

/// Initial flight pose.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StartPose {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Heading in degrees.
    pub heading: f64,
    /// Pitch in degrees.
    pub pitch: f64,
    /// Altitude in feet.
    pub altitude: f64,
    /// Airspeed in knots.
    pub speed: f64,
    /// Throttle fraction.
    pub throttle: f64,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Throttle change per wheel line.
    pub scroll_step: f64,
    /// Keybinding overrides (action name -> key label), e.g. `"Brake": "b"`.
    pub keybindings: HashMap<String, String>,
}

/// Map-tile service configuration.
///
/// A missing key is a supported state: the procedural backdrop is used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    /// API key for the tile service.
    pub api_key: Option<String>,
    /// Map style identifier.
    pub map_id: String,
}

/// Engine audio configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    /// Allow the audio subsystem to start on the first click.
    pub enabled: bool,
    /// Master volume multiplier (0.0 - 1.0).
    pub master_volume: f32,
    /// Start the flight muted.
    pub start_muted: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Append a smoothed FPS counter to the HUD line.
    pub show_fps: bool,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "SkyHUD".to_string(),
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_dt: 0.05,
            start: StartPose::default(),
        }
    }
}

impl Default for StartPose {
    fn default() -> Self {
        // San Francisco International, climbing out over the bay.
        Self {
            latitude: 37.6213,
            longitude: -122.379,
            heading: 120.0,
            pitch: -6.0,
            altitude: 1200.0,
            speed: 220.0,
            throttle: 0.55,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            scroll_step: 0.04,
            keybindings: HashMap::new(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            map_id: String::new(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            master_volume: 1.0,
            start_muted: false,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_fps: true,
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
