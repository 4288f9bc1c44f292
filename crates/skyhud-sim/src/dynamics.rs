//! Dynamics Integrator: speed, altitude, position and g-force.

use crate::state::FlightState;
use crate::tuning::{
    ALTITUDE_MAX, ALTITUDE_MIN, BASE_SPEED, CLIMB_COEFF, GFORCE_MAX, GFORCE_MIN,
    GFORCE_SENSITIVITY, POSITION_SCALE, SECONDS_PER_HOUR, SPEED_RANGE, SPEED_SMOOTHING,
};

/// Speed the aircraft settles at for a given throttle.
pub fn target_speed(throttle: f64) -> f64 {
    BASE_SPEED + throttle * SPEED_RANGE
}

/// Advances the state after the controls have been applied.
///
/// Holds the previous tick's pitch and roll for the g-force estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dynamics {
    last_pitch: f64,
    last_roll: f64,
}

impl Dynamics {
    /// Start tracking from `state`'s current attitude.
    pub fn new(state: &FlightState) -> Self {
        Self {
            last_pitch: state.pitch,
            last_roll: state.roll,
        }
    }

    /// Integrate one tick.
    pub fn step(&mut self, state: &mut FlightState, dt: f64) {
        // Low-pass toward the target; the factor saturates so a long step
        // lands on the target instead of overshooting it.
        let smoothing = (SPEED_SMOOTHING * dt).min(1.0);
        state.speed += (target_speed(state.throttle) - state.speed) * smoothing;

        let climb_rate = state.pitch.to_radians().sin() * state.speed * CLIMB_COEFF;
        state.altitude = (state.altitude + climb_rate * dt).clamp(ALTITUDE_MIN, ALTITUDE_MAX);

        // Flat-plane approximation, only meaningful for short hops.
        let distance = state.speed / SECONDS_PER_HOUR * dt;
        let (sin_h, cos_h) = state.heading.to_radians().sin_cos();
        state.position.latitude += cos_h * distance * POSITION_SCALE;
        state.position.longitude += sin_h * distance * POSITION_SCALE;

        let pitch_delta = (state.pitch - self.last_pitch).abs();
        let roll_delta = (state.roll - self.last_roll).abs();
        state.gforce =
            (GFORCE_MIN + (pitch_delta + roll_delta) * GFORCE_SENSITIVITY).min(GFORCE_MAX);
        self.last_pitch = state.pitch;
        self.last_roll = state.roll;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_speed() {
        assert!((target_speed(0.1) - 202.0).abs() < 1e-9);
        assert!((target_speed(1.0) - 670.0).abs() < 1e-9);
    }

    #[test]
    fn test_speed_moves_toward_target() {
        let mut state = FlightState::default();
        let mut dynamics = Dynamics::new(&state);
        let before = state.speed;
        dynamics.step(&mut state, 0.05);
        let expected = before + (target_speed(0.55) - before) * 0.45 * 0.05;
        assert!((state.speed - expected).abs() < 1e-9);
    }

    #[test]
    fn test_huge_step_lands_on_target() {
        let mut state = FlightState::default();
        let mut dynamics = Dynamics::new(&state);
        dynamics.step(&mut state, 100.0);
        assert!((state.speed - target_speed(state.throttle)).abs() < 1e-9);
    }

    #[test]
    fn test_positive_pitch_climbs() {
        let mut state = FlightState {
            pitch: 20.0,
            ..FlightState::default()
        };
        let mut dynamics = Dynamics::new(&state);
        dynamics.step(&mut state, 0.05);
        assert!(state.altitude > 1200.0);
    }

    #[test]
    fn test_negative_pitch_descends_to_floor() {
        let mut state = FlightState {
            pitch: -50.0,
            ..FlightState::default()
        };
        let mut dynamics = Dynamics::new(&state);
        for _ in 0..2000 {
            dynamics.step(&mut state, 0.05);
        }
        assert_eq!(state.altitude, ALTITUDE_MIN);
    }

    #[test]
    fn test_heading_north_moves_latitude_only() {
        let mut state = FlightState {
            heading: 0.0,
            speed: 360.0,
            throttle: 0.40384615384615385, // target == 360 kts
            ..FlightState::default()
        };
        let start = state.position;
        let mut dynamics = Dynamics::new(&state);
        dynamics.step(&mut state, 1.0);
        // 360 kts for 1 s = 0.1 distance units, scaled by 0.3.
        assert!((state.position.latitude - start.latitude - 0.03).abs() < 1e-6);
        assert!((state.position.longitude - start.longitude).abs() < 1e-12);
    }

    #[test]
    fn test_gforce_from_attitude_change() {
        let mut state = FlightState::default();
        let mut dynamics = Dynamics::new(&state);
        state.pitch += 4.0;
        state.roll -= 6.0;
        dynamics.step(&mut state, 0.05);
        assert!((state.gforce - 1.5).abs() < 1e-9);

        dynamics.step(&mut state, 0.05);
        assert!((state.gforce - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_gforce_capped() {
        let mut state = FlightState::default();
        let mut dynamics = Dynamics::new(&state);
        state.roll = 80.0;
        state.pitch = 30.0;
        dynamics.step(&mut state, 0.05);
        assert_eq!(state.gforce, GFORCE_MAX);
    }
}
