//! Speed-line streaks that animate faster and brighter with throttle.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use skyhud_sim::{FlightState, FrameContext, PresentationSink};

/// Number of streaks on screen.
pub const STREAK_COUNT: usize = 20;

/// One streak. Horizontal placement and delay are fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Streak {
    /// Horizontal offset, percent of viewport width.
    pub left_pct: f32,
    /// Animation start delay, seconds.
    pub delay: f32,
    /// Animation cycle length, seconds.
    pub duration: f32,
    pub opacity: f32,
}

/// The streak set. Created lazily on the first tick from the throttle at
/// that moment.
#[derive(Debug, Clone)]
pub struct SpeedLines {
    seed: u64,
    streaks: Vec<Streak>,
}

impl SpeedLines {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            streaks: Vec::new(),
        }
    }

    pub fn streaks(&self) -> &[Streak] {
        &self.streaks
    }

    fn spawn(&mut self, throttle: f32) {
        let mut rng = Xoshiro256StarStar::seed_from_u64(self.seed);
        self.streaks = (0..STREAK_COUNT)
            .map(|_| Streak {
                left_pct: rng.gen_range(0.0..100.0),
                delay: rng.gen_range(0.0..1.5),
                duration: 1.6 - throttle * 0.9,
                opacity: 0.2 + throttle * 0.7,
            })
            .collect();
    }

    pub fn update(&mut self, throttle: f64) {
        let throttle = throttle as f32;
        if self.streaks.is_empty() {
            self.spawn(throttle);
        }
        let duration = 1.8 - throttle * 1.1;
        let opacity = 0.2 + throttle * 0.7;
        for streak in &mut self.streaks {
            streak.duration = duration;
            streak.opacity = opacity;
        }
    }
}

impl PresentationSink for SpeedLines {
    fn present(&mut self, state: &FlightState, _frame: &FrameContext) {
        self.update(state.throttle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_spawn() {
        let mut lines = SpeedLines::new(3);
        assert!(lines.streaks().is_empty());
        lines.update(0.5);
        assert_eq!(lines.streaks().len(), STREAK_COUNT);
        for streak in lines.streaks() {
            assert!((0.0..100.0).contains(&streak.left_pct));
            assert!((0.0..1.5).contains(&streak.delay));
        }
    }

    #[test]
    fn test_full_throttle_is_fast_and_bright() {
        let mut lines = SpeedLines::new(3);
        lines.update(1.0);
        let streak = lines.streaks()[0];
        assert!((streak.duration - 0.7).abs() < 1e-6);
        assert!((streak.opacity - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_placement_survives_updates() {
        let mut lines = SpeedLines::new(11);
        lines.update(0.2);
        let before: Vec<_> = lines.streaks().iter().map(|s| (s.left_pct, s.delay)).collect();
        lines.update(0.9);
        let after: Vec<_> = lines.streaks().iter().map(|s| (s.left_pct, s.delay)).collect();
        assert_eq!(before, after);
    }
}
