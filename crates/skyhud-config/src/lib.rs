//! Configuration system for SkyHUD.
//!
//! Runtime settings persist to disk as `config.ron`. CLI flags (clap) override
//! file values, and the optional map-tile credential pair can also come from
//! the environment or a `.env` file.

mod cli;
mod config;
mod credentials;
mod error;

pub use cli::CliArgs;
pub use config::{
    AudioConfig, Config, DebugConfig, InputConfig, MapConfig, SimConfig, StartPose, WindowConfig,
};
pub use credentials::{API_KEY_ENV, MAP_ID_ENV, MapCredentials, PLACEHOLDER_API_KEY};
pub use error::ConfigError;
