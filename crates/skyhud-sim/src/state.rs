//! The single mutable flight state and its band invariants.

use crate::tuning::{
    ALTITUDE_MAX, ALTITUDE_MIN, GFORCE_MAX, GFORCE_MIN, PITCH_MAX, PITCH_MIN, ROLL_MAX, ROLL_MIN,
    THROTTLE_MAX, THROTTLE_MIN,
};

/// Geodetic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPosition {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Aircraft state advanced once per tick.
///
/// Only the simulation mutates it; presentation sinks receive `&FlightState`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightState {
    /// Position, moved by a flat-earth offset each tick.
    pub position: GeoPosition,
    /// Degrees in `[0, 360)`.
    pub heading: f64,
    /// Degrees in `[PITCH_MIN, PITCH_MAX]`. Positive pitch gains altitude.
    pub pitch: f64,
    /// Degrees in `[ROLL_MIN, ROLL_MAX]`.
    pub roll: f64,
    /// Transient yaw rate, decays toward zero.
    pub yaw: f64,
    /// Feet in `[ALTITUDE_MIN, ALTITUDE_MAX]`.
    pub altitude: f64,
    /// Knots, smoothed toward the throttle target.
    pub speed: f64,
    /// Fraction in `[THROTTLE_MIN, THROTTLE_MAX]`.
    pub throttle: f64,
    /// Boost key held this tick.
    pub boost: bool,
    /// Brake key held this tick.
    pub brake: bool,
    /// Estimated load factor in `[GFORCE_MIN, GFORCE_MAX]`.
    pub gforce: f64,
    /// Engine audio muted.
    pub muted: bool,
}

impl Default for FlightState {
    fn default() -> Self {
        Self {
            position: GeoPosition::new(37.6213, -122.379),
            heading: 120.0,
            pitch: -6.0,
            roll: 0.0,
            yaw: 0.0,
            altitude: 1200.0,
            speed: 220.0,
            throttle: 0.55,
            boost: false,
            brake: false,
            gforce: 1.0,
            muted: false,
        }
    }
}

impl FlightState {
    /// Saturate every banded field and normalise the heading.
    pub fn clamp_to_bands(&mut self) {
        self.heading = normalize_heading(self.heading);
        self.pitch = self.pitch.clamp(PITCH_MIN, PITCH_MAX);
        self.roll = self.roll.clamp(ROLL_MIN, ROLL_MAX);
        self.altitude = self.altitude.clamp(ALTITUDE_MIN, ALTITUDE_MAX);
        self.throttle = self.throttle.clamp(THROTTLE_MIN, THROTTLE_MAX);
        self.gforce = self.gforce.clamp(GFORCE_MIN, GFORCE_MAX);
    }

    /// Whether every banded field is inside its band.
    pub fn within_bands(&self) -> bool {
        (0.0..360.0).contains(&self.heading)
            && (PITCH_MIN..=PITCH_MAX).contains(&self.pitch)
            && (ROLL_MIN..=ROLL_MAX).contains(&self.roll)
            && (ALTITUDE_MIN..=ALTITUDE_MAX).contains(&self.altitude)
            && (THROTTLE_MIN..=THROTTLE_MAX).contains(&self.throttle)
            && (GFORCE_MIN..=GFORCE_MAX).contains(&self.gforce)
    }
}

/// Wrap `degrees` into `[0, 360)`.
///
/// `rem_euclid` can round a tiny negative input up to exactly 360.0, which
/// is folded back to 0.
pub fn normalize_heading(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_within_bands() {
        assert!(FlightState::default().within_bands());
    }

    #[test]
    fn test_normalize_heading() {
        assert!((normalize_heading(370.0) - 10.0).abs() < 1e-12);
        assert!((normalize_heading(-10.0) - 350.0).abs() < 1e-12);
        assert!((normalize_heading(720.0)).abs() < 1e-12);
        assert!((normalize_heading(359.5) - 359.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_heading_tiny_negative() {
        let h = normalize_heading(-1e-17);
        assert!((0.0..360.0).contains(&h), "got {h}");
    }

    #[test]
    fn test_clamp_to_bands_saturates() {
        let mut state = FlightState {
            heading: -90.0,
            pitch: 99.0,
            roll: -200.0,
            altitude: 0.0,
            throttle: 0.0,
            gforce: 12.0,
            ..FlightState::default()
        };
        state.clamp_to_bands();
        assert!(state.within_bands());
        assert!((state.heading - 270.0).abs() < 1e-12);
        assert_eq!(state.pitch, PITCH_MAX);
        assert_eq!(state.roll, ROLL_MIN);
        assert_eq!(state.altitude, ALTITUDE_MIN);
        assert_eq!(state.throttle, THROTTLE_MIN);
        assert_eq!(state.gforce, GFORCE_MAX);
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let mut state = FlightState {
            pitch: -70.0,
            ..FlightState::default()
        };
        state.clamp_to_bands();
        let once = state;
        state.clamp_to_bands();
        assert_eq!(state, once);
    }
}
