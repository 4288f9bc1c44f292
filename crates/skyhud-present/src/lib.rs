//! Presentation sinks: everything that reads the flight state each tick to
//! drive the HUD, the backdrop or map camera, the aircraft model, the speed
//! streaks, and the engine audio parameters.

pub mod audio;
pub mod backdrop;
pub mod hud;
pub mod model;
pub mod speed_lines;

pub use audio::{AudioOutput, AudioParams, AudioStatus, EngineAudio, RecordingOutput};
pub use backdrop::{
    Backdrop, BackdropError, BackdropKind, CameraPose, DetachedTileService, Peak,
    ProceduralBackdrop, TileCamera, TileService, select_backdrop,
};
pub use hud::{HudState, format_hud};
pub use model::ModelPose;
pub use speed_lines::{SpeedLines, Streak};
