//! Flight-model constants. Angles in degrees, altitude in feet, speed in knots.

// Attitude bands
pub const PITCH_MIN: f64 = -50.0;
pub const PITCH_MAX: f64 = 30.0;
pub const ROLL_MIN: f64 = -80.0;
pub const ROLL_MAX: f64 = 80.0;

// Control rates (deg/s per unit intent)
pub const ROLL_RATE: f64 = 65.0;
pub const PITCH_RATE: f64 = 48.0;
pub const YAW_RATE: f64 = 55.0;
/// Heading change per second per unit of roll intent (banked turn).
pub const HEADING_COUPLING: f64 = 40.0;
/// Per-tick geometric decay applied to yaw.
pub const YAW_DECAY: f64 = 0.88;

// Throttle (fraction per second)
pub const THROTTLE_MIN: f64 = 0.1;
pub const THROTTLE_MAX: f64 = 1.0;
pub const THROTTLE_RISE: f64 = 0.08;
pub const THROTTLE_BOOST_RISE: f64 = 0.3;
pub const THROTTLE_BRAKE_FALL: f64 = 0.45;

// Speed
pub const BASE_SPEED: f64 = 150.0;
pub const SPEED_RANGE: f64 = 520.0;
/// First-order low-pass rate toward the target speed, per second.
pub const SPEED_SMOOTHING: f64 = 0.45;

// Altitude
pub const ALTITUDE_MIN: f64 = 120.0;
pub const ALTITUDE_MAX: f64 = 9000.0;
pub const CLIMB_COEFF: f64 = 0.62;

// Flat-plane position step: degrees per (knot-hour) of travel.
pub const POSITION_SCALE: f64 = 0.3;
pub const SECONDS_PER_HOUR: f64 = 3600.0;

// G-force estimate
pub const GFORCE_MIN: f64 = 1.0;
pub const GFORCE_MAX: f64 = 6.0;
pub const GFORCE_SENSITIVITY: f64 = 0.05;
