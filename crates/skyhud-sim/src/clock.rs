//! Variable-timestep frame clock.
//!
//! One simulation tick runs per displayed frame. The elapsed time is clamped
//! to [`MAX_DT`] so a stall (hidden window, debugger pause, slow frame) is
//! simulated as one ordinary step instead of a huge jump.

use std::time::Instant;
use tracing::{debug, warn};

/// Largest elapsed time handed to the integrators, in seconds.
pub const MAX_DT: f64 = 0.05;

/// Frames slower than this are reported at `warn` level.
pub const STALL_WARN_SECS: f64 = 0.25;

/// How a measured frame relates to the clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTiming {
    /// Used as measured.
    OnTime,
    /// Longer than `max_dt`; simulated as `max_dt`. Logged at `debug`.
    Clamped,
    /// Clamped and longer than [`STALL_WARN_SECS`]. Logged at `warn`.
    Stalled,
}

impl FrameTiming {
    pub fn classify(elapsed: f64, max_dt: f64) -> Self {
        if elapsed.is_nan() || elapsed <= max_dt {
            Self::OnTime
        } else if elapsed > STALL_WARN_SECS {
            Self::Stalled
        } else {
            Self::Clamped
        }
    }
}

/// Measures frame-to-frame time and clamps it into `[0, max_dt]`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Instant,
    max_dt: f64,
    frame_count: u64,
    total_sim_time: f64,
}

impl FrameClock {
    /// A clock starting now. Non-positive or non-finite `max_dt` falls back to [`MAX_DT`].
    pub fn new(max_dt: f64) -> Self {
        let max_dt = if max_dt.is_finite() && max_dt > 0.0 {
            max_dt
        } else {
            MAX_DT
        };
        Self {
            last_time: Instant::now(),
            max_dt,
            frame_count: 0,
            total_sim_time: 0.0,
        }
    }

    /// Measure wall-clock time since the previous call and return the clamped `dt`.
    pub fn tick(&mut self) -> f64 {
        self.tick_at(Instant::now())
    }

    /// Like [`tick`](Self::tick) with an explicit timestamp. A timestamp
    /// earlier than the previous one yields `dt = 0`.
    pub fn tick_at(&mut self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.last_time).as_secs_f64();
        self.last_time = now;
        self.advance(elapsed)
    }

    /// Account for `elapsed` seconds without reading the wall clock.
    pub fn advance(&mut self, elapsed: f64) -> f64 {
        let dt = if elapsed.is_nan() {
            0.0
        } else {
            elapsed.clamp(0.0, self.max_dt)
        };

        match FrameTiming::classify(elapsed, self.max_dt) {
            FrameTiming::OnTime => {}
            FrameTiming::Clamped => debug!(
                "Clamping frame time {:.1}ms to {:.1}ms",
                elapsed * 1000.0,
                dt * 1000.0
            ),
            FrameTiming::Stalled => warn!(
                "Frame stalled for {:.1}ms, simulating {:.1}ms",
                elapsed * 1000.0,
                dt * 1000.0
            ),
        }

        self.frame_count += 1;
        self.total_sim_time += dt;
        dt
    }

    /// The configured upper bound on `dt`.
    pub fn max_dt(&self) -> f64 {
        self.max_dt
    }

    /// Number of ticks measured so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Total simulated seconds (sum of clamped `dt`).
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_DT)
    }
}
