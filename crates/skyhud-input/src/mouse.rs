//! Mouse wheel normalisation.

use winit::event::MouseScrollDelta;

/// Pixels of trackpad scroll treated as one wheel line.
pub const PIXELS_PER_LINE: f64 = 40.0;

/// Convert a winit wheel delta into lines (positive = scroll up / away).
pub fn scroll_lines(delta: MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_x, y) => f64::from(y),
        MouseScrollDelta::PixelDelta(pos) => pos.y / PIXELS_PER_LINE,
    }
}
