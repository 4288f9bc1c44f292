//! Control Integrator: held keys -> attitude, heading and throttle.

use skyhud_input::{ControlAction, InputSampler};

use crate::state::{FlightState, normalize_heading};
use crate::tuning::{
    HEADING_COUPLING, PITCH_MAX, PITCH_MIN, PITCH_RATE, ROLL_MAX, ROLL_MIN, ROLL_RATE,
    THROTTLE_BOOST_RISE, THROTTLE_BRAKE_FALL, THROTTLE_MAX, THROTTLE_MIN, THROTTLE_RISE, YAW_DECAY,
    YAW_RATE,
};

/// Control intents sampled from the held keys for one tick.
///
/// Axis intents are -1, 0 or +1.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlIntent {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
    pub boost: bool,
    pub brake: bool,
}

impl ControlIntent {
    /// Read the current key set through the sampler's bindings.
    pub fn sample(input: &InputSampler) -> Self {
        Self {
            pitch: input.axis(ControlAction::PitchDown, ControlAction::PitchUp),
            roll: input.axis(ControlAction::RollLeft, ControlAction::RollRight),
            yaw: input.axis(ControlAction::YawLeft, ControlAction::YawRight),
            boost: input.is_held(ControlAction::Boost),
            brake: input.is_held(ControlAction::Brake),
        }
    }
}

/// Integrate one tick of control input into `state`.
///
/// Rolling also turns: heading moves by `roll intent * HEADING_COUPLING`
/// plus the decaying yaw rate.
pub fn apply_controls(state: &mut FlightState, intent: &ControlIntent, dt: f64) {
    state.boost = intent.boost;
    state.brake = intent.brake;

    state.roll = (state.roll + intent.roll * ROLL_RATE * dt).clamp(ROLL_MIN, ROLL_MAX);
    state.pitch = (state.pitch + intent.pitch * PITCH_RATE * dt).clamp(PITCH_MIN, PITCH_MAX);

    state.yaw += intent.yaw * YAW_RATE * dt;
    state.heading =
        normalize_heading(state.heading + (intent.roll * HEADING_COUPLING + state.yaw) * dt);
    state.yaw *= YAW_DECAY;

    let throttle = if state.brake {
        state.throttle - THROTTLE_BRAKE_FALL * dt
    } else {
        let rate = if state.boost {
            THROTTLE_BOOST_RISE
        } else {
            THROTTLE_RISE
        };
        state.throttle + rate * dt
    };
    state.throttle = throttle.clamp(THROTTLE_MIN, THROTTLE_MAX);
}
