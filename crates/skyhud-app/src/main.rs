//! SkyHUD: a stylised flight HUD over a map-tile or procedural backdrop.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p skyhud-app -- --headless 10` to fly without a window.

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use skyhud_app::{
    AppError, ConfigWatcher, FlightSession, PlatformDirs, RELOAD_INTERVAL, run_window,
};
use skyhud_config::{CliArgs, Config, MapCredentials};
use tracing::{error, info};

/// Directories plus the config as read from disk, before CLI overrides.
struct Startup {
    dirs: PlatformDirs,
    file_config: Config,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Logging is not up yet, so startup failures go straight to stderr.
    let startup = match startup(&args) {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("Failed to start: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = startup.file_config.clone();
    config.apply_cli_overrides(&args);

    skyhud_log::init_logging(
        Some(&startup.dirs.log_dir),
        cfg!(debug_assertions),
        Some(&config),
    );

    match run(&args, &config, startup) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn startup(args: &CliArgs) -> Result<Startup, AppError> {
    let dirs = PlatformDirs::prepare(args.config.clone())?;
    let file_config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    Ok(Startup { dirs, file_config })
}

fn run(args: &CliArgs, config: &Config, startup: Startup) -> Result<(), AppError> {
    let credentials = MapCredentials::resolve(&config.map);
    let mut session = FlightSession::new(config, credentials.as_ref());

    match args.headless {
        Some(seconds) => {
            if !seconds.is_finite() || seconds < 0.0 {
                return Err(AppError::HeadlessDuration(seconds));
            }
            let ticks = session.run_headless(seconds);
            info!("Headless flight finished after {ticks} ticks");
            Ok(())
        }
        None => {
            let watcher = ConfigWatcher::new(
                startup.dirs.config_dir,
                startup.file_config,
                RELOAD_INTERVAL,
                Instant::now(),
            );
            run_window(config, session, watcher)
        }
    }
}
