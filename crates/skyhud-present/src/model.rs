//! Pose of the on-screen aircraft model.
//!
//! The model exaggerates or damps each attitude angle so the jet reads
//! clearly at HUD scale rather than mirroring the true attitude.

use glam::{Quat, Vec3};
use skyhud_sim::{FlightState, FrameContext, PresentationSink};

/// Model pitch per degree of aircraft pitch.
pub const PITCH_GAIN: f64 = 0.6;
/// Model roll per degree of aircraft roll.
pub const ROLL_GAIN: f64 = 0.8;
/// Model yaw per degree of yaw rate.
pub const YAW_GAIN: f64 = 0.4;
/// Fixed forward offset of the model, pixels.
pub const TRANSLATE_Z: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModelPose {
    /// Rotation about X, degrees.
    pub rotate_x: f64,
    /// Rotation about Z, degrees.
    pub rotate_z: f64,
    /// Rotation about Y, degrees.
    pub rotate_y: f64,
    pub afterburner: bool,
    /// Throttle gauge fill, whole percent.
    pub throttle_fill_pct: u8,
}

impl ModelPose {
    pub fn from_state(state: &FlightState) -> Self {
        Self {
            rotate_x: state.pitch * PITCH_GAIN,
            rotate_z: state.roll * ROLL_GAIN,
            rotate_y: state.yaw * YAW_GAIN,
            afterburner: state.boost,
            throttle_fill_pct: (state.throttle * 100.0).round().clamp(0.0, 100.0) as u8,
        }
    }

    /// Combined rotation, applied X then Z then Y in the model's frame.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_x((self.rotate_x as f32).to_radians())
            * Quat::from_rotation_z((self.rotate_z as f32).to_radians())
            * Quat::from_rotation_y((self.rotate_y as f32).to_radians())
    }

    pub fn translation(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, TRANSLATE_Z)
    }
}

impl PresentationSink for ModelPose {
    fn present(&mut self, state: &FlightState, _frame: &FrameContext) {
        *self = Self::from_state(state);
    }
}
