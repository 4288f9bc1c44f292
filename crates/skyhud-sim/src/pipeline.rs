//! The per-tick pipeline.
//!
//! Order within a tick never varies: drain queued input, apply the
//! single-shot intents, run the Control Integrator, run the Dynamics
//! Integrator, then hand the finished state to presentation.

use skyhud_input::{InputQueue, InputSampler};
use tracing::{debug, info};

use crate::clock::FrameClock;
use crate::controls::{ControlIntent, apply_controls};
use crate::dynamics::Dynamics;
use crate::state::FlightState;
use crate::tuning::{THROTTLE_MAX, THROTTLE_MIN};

/// Per-tick facts that are not flight state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Clamped elapsed time used for this tick, seconds.
    pub dt: f64,
    /// 1-based tick number.
    pub frame: u64,
    /// Total simulated seconds including this tick.
    pub sim_time: f64,
    /// A click during this tick asked audio to start or resume.
    pub activate_audio: bool,
}

/// Consumer of the finished state each tick: camera, HUD, model, audio.
///
/// Receives a shared borrow, so it cannot alter the simulation. It may keep
/// its own derived state between ticks.
pub trait PresentationSink {
    fn present(&mut self, state: &FlightState, frame: &FrameContext);
}

/// Owns the flight state and runs the tick pipeline.
#[derive(Debug, Clone)]
pub struct Simulation {
    state: FlightState,
    dynamics: Dynamics,
    input: InputSampler,
    clock: FrameClock,
}

impl Simulation {
    /// Start from `state` (saturated into its bands).
    pub fn new(mut state: FlightState, input: InputSampler, clock: FrameClock) -> Self {
        state.clamp_to_bands();
        Self {
            dynamics: Dynamics::new(&state),
            state,
            input,
            clock,
        }
    }

    /// Current state.
    pub fn state(&self) -> &FlightState {
        &self.state
    }

    /// The input sampler, for feeding events directly.
    pub fn input_mut(&mut self) -> &mut InputSampler {
        &mut self.input
    }

    /// The frame clock.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Run one display frame: drain `queue`, measure wall-clock `dt`, step,
    /// and call `present` once with the finished state.
    pub fn frame(
        &mut self,
        queue: &InputQueue,
        present: impl FnMut(&FlightState, &FrameContext),
    ) -> FrameContext {
        self.input.drain(queue);
        let dt = self.clock.tick();
        self.run_tick(dt, present)
    }

    /// Run one tick for `elapsed` seconds of (unclamped) time.
    pub fn advance(
        &mut self,
        elapsed: f64,
        present: impl FnMut(&FlightState, &FrameContext),
    ) -> FrameContext {
        let dt = self.clock.advance(elapsed);
        self.run_tick(dt, present)
    }

    fn run_tick(
        &mut self,
        dt: f64,
        mut present: impl FnMut(&FlightState, &FrameContext),
    ) -> FrameContext {
        let intents = self.input.take_intents();

        if intents.flips_mute() {
            self.state.muted = !self.state.muted;
            info!(muted = self.state.muted, "Engine audio mute toggled");
        }
        if intents.throttle_nudge != 0.0 && !intents.throttle_nudge.is_nan() {
            self.state.throttle =
                (self.state.throttle + intents.throttle_nudge).clamp(THROTTLE_MIN, THROTTLE_MAX);
            debug!(throttle = self.state.throttle, "Throttle nudged");
        }

        let intent = ControlIntent::sample(&self.input);
        apply_controls(&mut self.state, &intent, dt);
        self.dynamics.step(&mut self.state, dt);
        debug_assert!(self.state.within_bands(), "{:?}", self.state);

        let frame = FrameContext {
            dt,
            frame: self.clock.frame_count(),
            sim_time: self.clock.total_sim_time(),
            activate_audio: intents.activate_audio,
        };
        present(&self.state, &frame);
        frame
    }
}

/// Call every sink in order with the same state.
pub fn present_all(
    sinks: &mut [&mut dyn PresentationSink],
    state: &FlightState,
    frame: &FrameContext,
) {
    for sink in sinks.iter_mut() {
        sink.present(state, frame);
    }
}
