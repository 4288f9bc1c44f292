//! Command-line argument parsing for SkyHUD.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// SkyHUD command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "skyhud", about = "Stylized flight HUD demo")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Map-tile service API key.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Map style identifier.
    #[arg(long)]
    pub map_id: Option<String>,

    /// Start muted.
    #[arg(long)]
    pub mute: bool,

    /// Run without a window for the given number of simulated seconds.
    #[arg(long, value_name = "SECONDS")]
    pub headless: Option<f64>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref key) = args.api_key {
            self.map.api_key = Some(key.clone());
        }
        if let Some(ref id) = args.map_id {
            self.map.map_id = id.clone();
        }
        if args.mute {
            self.audio.start_muted = true;
        }
    }
}
