//! Engine-sound parameters.
//!
//! Turns throttle, boost, roll and the mute flag into volume, oscillator
//! pitch, filter cutoff and stereo pan, and glides each toward its target.
//! Synthesis itself lives behind [`AudioOutput`].

use skyhud_sim::{FlightState, FrameContext, PresentationSink};
use tracing::{debug, info};

const VOLUME_TAU: f64 = 0.06;
const OSC_TAU: f64 = 0.05;
const FILTER_TAU: f64 = 0.08;
const PAN_TAU: f64 = 0.1;

/// One set of engine-sound parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioParams {
    /// Output gain, 0 when muted.
    pub volume: f64,
    /// Oscillator frequency, Hz.
    pub osc_hz: f64,
    /// Low-pass cutoff, Hz.
    pub filter_hz: f64,
    /// Stereo pan, -1 (left) to 1 (right).
    pub pan: f64,
}

impl AudioParams {
    /// Values the graph holds before the first update.
    pub const SILENT: Self = Self {
        volume: 0.0,
        osc_hz: 120.0,
        filter_hz: 600.0,
        pan: 0.0,
    };

    /// Target parameters for `state`, with volume scaled by `master_volume`.
    pub fn from_state(state: &FlightState, master_volume: f64) -> Self {
        let boost = if state.boost { 1.0 } else { 0.0 };
        let volume = if state.muted {
            0.0
        } else {
            (0.12 + state.throttle * 0.65 + boost * 0.15) * master_volume
        };
        Self {
            volume,
            osc_hz: 120.0 + state.throttle * 320.0 + boost * 140.0,
            filter_hz: 600.0 + state.throttle * 1500.0,
            pan: (state.roll / 90.0).clamp(-1.0, 1.0),
        }
    }
}

/// A parameter that approaches its target exponentially.
#[derive(Debug, Clone, Copy)]
struct SmoothedParam {
    value: f64,
    tau: f64,
}

impl SmoothedParam {
    fn new(value: f64, tau: f64) -> Self {
        Self { value, tau }
    }

    fn step(&mut self, target: f64, dt: f64) -> f64 {
        let alpha = 1.0 - (-dt / self.tau).exp();
        self.value += (target - self.value) * alpha;
        self.value
    }
}

/// Where finished parameters go.
pub trait AudioOutput {
    fn apply(&mut self, params: &AudioParams);
}

/// Output that keeps the latest parameters and a count of updates.
#[derive(Debug, Default)]
pub struct RecordingOutput {
    last: Option<AudioParams>,
    updates: u64,
}

impl RecordingOutput {
    pub fn last(&self) -> Option<&AudioParams> {
        self.last.as_ref()
    }

    pub fn updates(&self) -> u64 {
        self.updates
    }
}

impl AudioOutput for RecordingOutput {
    fn apply(&mut self, params: &AudioParams) {
        self.last = Some(*params);
        self.updates += 1;
    }
}

/// Lifecycle of the audio subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioStatus {
    /// Nothing started yet; waits for a user click.
    Dormant,
    Running,
    /// Paused by the platform (focus loss); a click resumes.
    Suspended,
}

/// Engine-sound driver.
pub struct EngineAudio<O: AudioOutput = RecordingOutput> {
    output: O,
    status: AudioStatus,
    enabled: bool,
    master_volume: f64,
    volume: SmoothedParam,
    osc: SmoothedParam,
    filter: SmoothedParam,
    pan: SmoothedParam,
}

impl<O: AudioOutput> EngineAudio<O> {
    /// A dormant driver. When `enabled` is false it never starts.
    pub fn new(output: O, enabled: bool, master_volume: f64) -> Self {
        let silent = AudioParams::SILENT;
        Self {
            output,
            status: AudioStatus::Dormant,
            enabled,
            master_volume: master_volume.clamp(0.0, 1.0),
            volume: SmoothedParam::new(silent.volume, VOLUME_TAU),
            osc: SmoothedParam::new(silent.osc_hz, OSC_TAU),
            filter: SmoothedParam::new(silent.filter_hz, FILTER_TAU),
            pan: SmoothedParam::new(silent.pan, PAN_TAU),
        }
    }

    pub fn status(&self) -> AudioStatus {
        self.status
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn master_volume(&self) -> f64 {
        self.master_volume
    }

    /// Clamped into `[0, 1]`. Takes effect on the next update.
    pub fn set_master_volume(&mut self, master_volume: f64) {
        self.master_volume = master_volume.clamp(0.0, 1.0);
    }

    /// Start or resume in response to a user gesture.
    pub fn activate(&mut self) {
        if !self.enabled {
            return;
        }
        match self.status {
            AudioStatus::Dormant => info!("Engine audio started"),
            AudioStatus::Suspended => debug!("Engine audio resumed"),
            AudioStatus::Running => return,
        }
        self.status = AudioStatus::Running;
    }

    pub fn suspend(&mut self) {
        if self.status == AudioStatus::Running {
            self.status = AudioStatus::Suspended;
            debug!("Engine audio suspended");
        }
    }

    /// Glide toward the parameters for `state` over `dt` seconds. No-op
    /// unless running.
    pub fn update(&mut self, state: &FlightState, dt: f64) {
        if self.status != AudioStatus::Running {
            return;
        }
        let target = AudioParams::from_state(state, self.master_volume);
        let params = AudioParams {
            volume: self.volume.step(target.volume, dt),
            osc_hz: self.osc.step(target.osc_hz, dt),
            filter_hz: self.filter.step(target.filter_hz, dt),
            pan: self.pan.step(target.pan, dt),
        };
        self.output.apply(&params);
    }
}

impl<O: AudioOutput> PresentationSink for EngineAudio<O> {
    fn present(&mut self, state: &FlightState, frame: &FrameContext) {
        if frame.activate_audio {
            self.activate();
        }
        self.update(state, frame.dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(dt: f64, click: bool) -> FrameContext {
        FrameContext {
            dt,
            frame: 1,
            sim_time: dt,
            activate_audio: click,
        }
    }

    fn audio() -> EngineAudio {
        EngineAudio::new(RecordingOutput::default(), true, 1.0)
    }

    #[test]
    fn test_targets() {
        let state = FlightState {
            throttle: 1.0,
            boost: true,
            roll: -45.0,
            ..FlightState::default()
        };
        let p = AudioParams::from_state(&state, 1.0);
        assert!((p.volume - 0.92).abs() < 1e-12);
        assert!((p.osc_hz - 580.0).abs() < 1e-12);
        assert!((p.filter_hz - 2100.0).abs() < 1e-12);
        assert!((p.pan + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_muted_volume_is_zero() {
        let state = FlightState {
            muted: true,
            ..FlightState::default()
        };
        assert_eq!(AudioParams::from_state(&state, 1.0).volume, 0.0);
    }

    #[test]
    fn test_master_volume_scales() {
        let state = FlightState::default();
        let full = AudioParams::from_state(&state, 1.0).volume;
        let half = AudioParams::from_state(&state, 0.5).volume;
        assert!((half * 2.0 - full).abs() < 1e-12);
    }

    #[test]
    fn test_set_master_volume_clamps() {
        let mut audio = audio();
        audio.set_master_volume(0.25);
        assert_eq!(audio.master_volume(), 0.25);
        audio.set_master_volume(3.0);
        assert_eq!(audio.master_volume(), 1.0);
    }

    #[test]
    fn test_dormant_until_click() {
        let mut audio = audio();
        audio.present(&FlightState::default(), &frame(0.016, false));
        assert_eq!(audio.status(), AudioStatus::Dormant);
        assert_eq!(audio.output().updates(), 0);

        audio.present(&FlightState::default(), &frame(0.016, true));
        assert_eq!(audio.status(), AudioStatus::Running);
        assert_eq!(audio.output().updates(), 1);
    }

    #[test]
    fn test_suspend_and_resume() {
        let mut audio = audio();
        audio.activate();
        audio.suspend();
        assert_eq!(audio.status(), AudioStatus::Suspended);
        audio.update(&FlightState::default(), 0.016);
        assert_eq!(audio.output().updates(), 0);
        audio.activate();
        assert_eq!(audio.status(), AudioStatus::Running);
    }

    #[test]
    fn test_disabled_never_starts() {
        let mut audio = EngineAudio::new(RecordingOutput::default(), false, 1.0);
        audio.present(&FlightState::default(), &frame(0.016, true));
        assert_eq!(audio.status(), AudioStatus::Dormant);
    }

    #[test]
    fn test_params_glide_toward_target() {
        let mut audio = audio();
        audio.activate();
        let state = FlightState::default();
        let target = AudioParams::from_state(&state, 1.0);

        audio.update(&state, 0.06);
        let first = *audio.output().last().unwrap();
        let expected = target.volume * (1.0 - (-1.0_f64).exp());
        assert!((first.volume - expected).abs() < 1e-12);

        for _ in 0..200 {
            audio.update(&state, 0.016);
        }
        let settled = *audio.output().last().unwrap();
        assert!((settled.volume - target.volume).abs() < 1e-6);
        assert!((settled.osc_hz - target.osc_hz).abs() < 1e-6);
        assert!((settled.filter_hz - target.filter_hz).abs() < 1e-6);
    }
}
