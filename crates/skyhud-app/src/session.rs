//! One flight: the simulation plus every presentation sink it feeds.

use skyhud_config::{Config, MapCredentials, StartPose};
use skyhud_input::{ControlBindings, InputQueue, InputSampler, InputSender};
use skyhud_present::{
    Backdrop, DetachedTileService, EngineAudio, HudState, ModelPose, RecordingOutput, SpeedLines,
    TileService, format_hud, select_backdrop,
};
use skyhud_sim::{
    FlightState, FrameClock, FrameContext, GeoPosition, PresentationSink, Simulation, present_all,
};
use tracing::info;

/// Seed for the procedural scenery (peaks and speed streaks).
const SCENERY_SEED: u64 = 0x5eed_5ca1;

/// Initial flight state for a configured start pose.
pub fn initial_state(start: &StartPose, muted: bool) -> FlightState {
    FlightState {
        position: GeoPosition::new(start.latitude, start.longitude),
        heading: start.heading,
        pitch: start.pitch,
        altitude: start.altitude,
        speed: start.speed,
        throttle: start.throttle,
        muted,
        ..FlightState::default()
    }
}

pub struct FlightSession {
    sim: Simulation,
    queue: InputQueue,
    hud: HudState,
    model: ModelPose,
    speed_lines: SpeedLines,
    audio: EngineAudio,
    backdrop: Box<dyn Backdrop>,
    show_fps: bool,
}

impl FlightSession {
    /// Build a session with a detached tile service.
    pub fn new(config: &Config, credentials: Option<&MapCredentials>) -> Self {
        Self::with_tile_service(config, credentials, Box::new(DetachedTileService::default()))
    }

    pub fn with_tile_service(
        config: &Config,
        credentials: Option<&MapCredentials>,
        service: Box<dyn TileService>,
    ) -> Self {
        let bindings = ControlBindings::with_overrides(&config.input.keybindings);
        let input = InputSampler::new(bindings, config.input.scroll_step);
        let state = initial_state(&config.sim.start, config.audio.start_muted);
        let sim = Simulation::new(state, input, FrameClock::new(config.sim.max_dt));
        let backdrop = select_backdrop(credentials, service, sim.state(), SCENERY_SEED);

        Self {
            sim,
            queue: InputQueue::new(),
            hud: HudState::default(),
            model: ModelPose::default(),
            speed_lines: SpeedLines::new(SCENERY_SEED),
            audio: EngineAudio::new(
                RecordingOutput::default(),
                config.audio.enabled,
                f64::from(config.audio.master_volume),
            ),
            backdrop,
            show_fps: config.debug.show_fps,
        }
    }

    /// Apply the live-tunable parts of a reloaded config: bindings, wheel
    /// step, master volume and the FPS readout. The flight itself carries on.
    pub fn apply_config(&mut self, config: &Config) {
        let bindings = ControlBindings::with_overrides(&config.input.keybindings);
        self.sim
            .input_mut()
            .rebind(bindings, config.input.scroll_step);
        self.audio
            .set_master_volume(f64::from(config.audio.master_volume));
        self.show_fps = config.debug.show_fps;
        info!("Applied reloaded config");
    }

    /// Handle for platform callbacks to queue input.
    pub fn sender(&self) -> InputSender {
        self.queue.sender()
    }

    /// Run one display frame against the wall clock.
    pub fn frame(&mut self) -> FrameContext {
        let Self {
            sim,
            queue,
            hud,
            model,
            speed_lines,
            audio,
            backdrop,
            ..
        } = self;
        sim.frame(queue, |state, frame| {
            backdrop.present(state, frame);
            let sinks: &mut [&mut dyn PresentationSink] =
                &mut [&mut *hud, &mut *model, &mut *speed_lines, &mut *audio];
            present_all(sinks, state, frame);
        })
    }

    /// Run one tick for `elapsed` seconds, draining queued input first.
    pub fn step(&mut self, elapsed: f64) -> FrameContext {
        let Self {
            sim,
            queue,
            hud,
            model,
            speed_lines,
            audio,
            backdrop,
            ..
        } = self;
        sim.input_mut().drain(queue);
        sim.advance(elapsed, |state, frame| {
            backdrop.present(state, frame);
            let sinks: &mut [&mut dyn PresentationSink] =
                &mut [&mut *hud, &mut *model, &mut *speed_lines, &mut *audio];
            present_all(sinks, state, frame);
        })
    }

    /// Simulate `seconds` of flight at the clock's maximum step, logging the
    /// HUD once per simulated second. Returns the number of ticks run.
    pub fn run_headless(&mut self, seconds: f64) -> u64 {
        let dt = self.sim.clock().max_dt();
        let ticks = (seconds / dt).ceil() as u64;
        let per_second = (1.0 / dt).round().max(1.0) as u64;
        for tick in 1..=ticks {
            self.step(dt);
            if tick % per_second == 0 || tick == ticks {
                info!("{}", self.hud_line());
            }
        }
        ticks
    }

    /// Pause engine audio (window focus lost).
    pub fn suspend_audio(&mut self) {
        self.audio.suspend();
    }

    /// The HUD formatted as one line.
    pub fn hud_line(&self) -> String {
        format_hud(&self.hud, self.show_fps)
    }

    pub fn state(&self) -> &FlightState {
        self.sim.state()
    }

    pub fn backdrop(&self) -> &dyn Backdrop {
        self.backdrop.as_ref()
    }

    pub fn audio(&self) -> &EngineAudio {
        &self.audio
    }

    pub fn model(&self) -> &ModelPose {
        &self.model
    }

    pub fn speed_lines(&self) -> &SpeedLines {
        &self.speed_lines
    }
}
