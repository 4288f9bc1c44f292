//! Input sampling: held-key tracking, control bindings, and the edge-event
//! queue drained once per simulation tick.

pub mod bindings;
pub mod events;
pub mod keyboard;
pub mod mouse;
pub mod sampler;

pub use bindings::{ControlAction, ControlBindings};
pub use events::{InputEvent, InputQueue, InputSender};
pub use keyboard::{KeyboardState, RawKeyEvent, key_label};
pub use mouse::scroll_lines;
pub use sampler::{FrameIntents, InputSampler};
