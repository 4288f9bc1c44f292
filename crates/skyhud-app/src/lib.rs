//! SkyHUD application: platform directories, the flight session that wires
//! the simulation to its presentation sinks, config hot-reload, and the winit
//! window.

pub mod error;
pub mod platform;
pub mod reload;
pub mod session;
pub mod window;

pub use error::AppError;
pub use platform::{PlatformDirs, PlatformError};
pub use reload::{ConfigWatcher, RELOAD_INTERVAL};
pub use session::{FlightSession, initial_state};
pub use window::{SkyHudWindow, frame_interval, run_window, window_attributes_from_config};
