//! HUD readout displayed via the window title.
//!
//! Rounds the flight state into the numbers a pilot reads, keeps a smoothed
//! FPS counter, and exposes the two pieces of HUD geometry: the horizon
//! line's rotation and the throttle marker's position on its rail.

use skyhud_sim::{FlightState, FrameContext, PresentationSink};
use std::time::Instant;

/// Throttle rail top, as a fraction of viewport height.
const RAIL_TOP: f64 = 0.2;
/// Throttle rail length, as a fraction of viewport height.
const RAIL_LENGTH: f64 = 0.6;

/// HUD values computed each tick.
#[derive(Debug, Clone)]
pub struct HudState {
    /// Rounded airspeed in knots.
    pub speed_kts: i64,
    /// Rounded altitude in feet.
    pub altitude_ft: i64,
    /// Rounded throttle percentage.
    pub throttle_pct: i64,
    /// Load factor, shown to one decimal.
    pub gforce: f64,
    /// Heading in degrees.
    pub heading_deg: f64,
    /// Horizon line rotation in radians (follows roll).
    pub horizon_angle_rad: f64,
    /// Throttle marker position as a fraction of viewport height.
    pub throttle_marker: f64,
    /// Whether the engine is muted.
    pub muted: bool,
    /// Frames per second (smoothed).
    pub fps: f64,
    last_frame: Instant,
    frame_time_ema: f64,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            speed_kts: 0,
            altitude_ft: 0,
            throttle_pct: 0,
            gforce: 1.0,
            heading_deg: 0.0,
            horizon_angle_rad: 0.0,
            throttle_marker: RAIL_TOP + RAIL_LENGTH,
            muted: false,
            fps: 0.0,
            last_frame: Instant::now(),
            frame_time_ema: 1.0 / 60.0,
        }
    }
}

impl HudState {
    /// Refresh every readout from `state`.
    pub fn update(&mut self, state: &FlightState) {
        self.speed_kts = state.speed.round() as i64;
        self.altitude_ft = state.altitude.round() as i64;
        self.throttle_pct = (state.throttle * 100.0).round() as i64;
        self.gforce = state.gforce;
        self.heading_deg = state.heading;
        self.horizon_angle_rad = state.roll.to_radians();
        self.throttle_marker = RAIL_TOP + RAIL_LENGTH * (1.0 - state.throttle);
        self.muted = state.muted;

        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;
        if dt > 0.0 {
            self.frame_time_ema = self.frame_time_ema * 0.9 + dt * 0.1;
            self.fps = 1.0 / self.frame_time_ema;
        }
    }
}

impl PresentationSink for HudState {
    fn present(&mut self, state: &FlightState, _frame: &FrameContext) {
        self.update(state);
    }
}

/// Format the HUD as one line.
///
/// Example: `SPD 220 kts | ALT 1200 ft | THR 55% | 1.0g | HDG 120°`
pub fn format_hud(hud: &HudState, show_fps: bool) -> String {
    let mut line = format!(
        "SPD {} kts | ALT {} ft | THR {}% | {:.1}g | HDG {:03.0}\u{00b0}",
        hud.speed_kts, hud.altitude_ft, hud.throttle_pct, hud.gforce, hud.heading_deg.floor(),
    );
    if hud.muted {
        line.push_str(" | MUTED");
    }
    if show_fps {
        line.push_str(&format!(" | FPS {:.0}", hud.fps));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readouts_round() {
        let state = FlightState {
            speed: 219.6,
            altitude: 1200.4,
            throttle: 0.556,
            ..FlightState::default()
        };
        let mut hud = HudState::default();
        hud.update(&state);
        assert_eq!(hud.speed_kts, 220);
        assert_eq!(hud.altitude_ft, 1200);
        assert_eq!(hud.throttle_pct, 56);
    }

    #[test]
    fn test_throttle_marker_range() {
        let mut hud = HudState::default();
        hud.update(&FlightState {
            throttle: 1.0,
            ..FlightState::default()
        });
        assert!((hud.throttle_marker - 0.2).abs() < 1e-12);
        hud.update(&FlightState {
            throttle: 0.1,
            ..FlightState::default()
        });
        assert!((hud.throttle_marker - 0.74).abs() < 1e-12);
    }

    #[test]
    fn test_horizon_follows_roll() {
        let mut hud = HudState::default();
        hud.update(&FlightState {
            roll: 90.0,
            ..FlightState::default()
        });
        assert!((hud.horizon_angle_rad - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_format_hud_output() {
        let mut hud = HudState::default();
        hud.update(&FlightState::default());
        let s = format_hud(&hud, false);
        assert_eq!(s, "SPD 220 kts | ALT 1200 ft | THR 55% | 1.0g | HDG 120\u{00b0}");
    }

    #[test]
    fn test_format_hud_pads_heading_and_flags() {
        let hud = HudState {
            heading_deg: 7.9,
            gforce: 2.35,
            muted: true,
            fps: 59.6,
            ..HudState::default()
        };
        let s = format_hud(&hud, true);
        assert!(s.contains("HDG 007\u{00b0}"));
        assert!(s.contains("2.4g") || s.contains("2.3g"));
        assert!(s.contains("MUTED"));
        assert!(s.ends_with("FPS 60"));
    }
}
