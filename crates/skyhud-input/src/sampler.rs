//! The Input Sampler: held keys plus the single-shot intents gathered
//! between two ticks.

use tracing::{debug, trace};

use crate::bindings::{ControlAction, ControlBindings};
use crate::events::{InputEvent, InputQueue};
use crate::keyboard::{KeyboardState, RawKeyEvent};

/// Single-shot intents accumulated since the previous tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameIntents {
    /// Fresh presses of the mute key.
    pub mute_toggles: u32,
    /// Sum of throttle nudges requested by the wheel.
    pub throttle_nudge: f64,
    /// A click asked the audio subsystem to start or resume.
    pub activate_audio: bool,
}

impl FrameIntents {
    /// Whether the mute flag should flip this tick.
    pub fn flips_mute(&self) -> bool {
        self.mute_toggles % 2 == 1
    }
}

/// Held keys, bindings, and pending intents.
#[derive(Debug, Clone)]
pub struct InputSampler {
    keyboard: KeyboardState,
    bindings: ControlBindings,
    scroll_step: f64,
    pending: FrameIntents,
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new(ControlBindings::default(), 0.04)
    }
}

impl InputSampler {
    /// A sampler with the given bindings and throttle change per wheel line.
    pub fn new(bindings: ControlBindings, scroll_step: f64) -> Self {
        Self {
            keyboard: KeyboardState::new(),
            bindings,
            scroll_step,
            pending: FrameIntents::default(),
        }
    }

    /// Apply one event.
    pub fn apply(&mut self, event: InputEvent) {
        trace!(?event, "input event");
        match event {
            InputEvent::KeyDown { label, repeat } => {
                let raw = RawKeyEvent {
                    repeat,
                    ..RawKeyEvent::pressed(label)
                };
                let fresh = self.keyboard.process_raw(&raw);
                if fresh && raw.label == self.bindings.label(ControlAction::Mute) {
                    self.pending.mute_toggles += 1;
                }
            }
            InputEvent::KeyUp { label } => {
                self.keyboard.process_raw(&RawKeyEvent::released(label));
            }
            InputEvent::Scroll(lines) if lines.is_finite() => {
                self.pending.throttle_nudge += lines * self.scroll_step;
            }
            InputEvent::Scroll(lines) => debug!(lines, "Ignoring non-finite scroll"),
            InputEvent::Click => self.pending.activate_audio = true,
            InputEvent::FocusLost => {
                debug!("Focus lost, releasing {} held keys", self.keyboard.held_count());
                self.keyboard.release_all();
            }
        }
    }

    /// Drain every queued event into the sampler.
    pub fn drain(&mut self, queue: &InputQueue) {
        for event in queue.drain() {
            self.apply(event);
        }
    }

    /// Hand over the pending intents and reset them for the next tick.
    pub fn take_intents(&mut self) -> FrameIntents {
        std::mem::take(&mut self.pending)
    }

    /// The held-key set.
    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    /// Active control bindings.
    pub fn bindings(&self) -> &ControlBindings {
        &self.bindings
    }

    /// Swap in new bindings and wheel step. Held keys are kept.
    pub fn rebind(&mut self, bindings: ControlBindings, scroll_step: f64) {
        self.bindings = bindings;
        self.scroll_step = scroll_step;
    }

    /// Whether the key bound to `action` is held.
    pub fn is_held(&self, action: ControlAction) -> bool {
        self.bindings.is_active(&self.keyboard, action)
    }

    /// Signed intent from an opposing pair of actions.
    pub fn axis(&self, negative: ControlAction, positive: ControlAction) -> f64 {
        self.bindings.axis(&self.keyboard, negative, positive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(label: &str) -> InputEvent {
        InputEvent::KeyDown {
            label: label.to_string(),
            repeat: false,
        }
    }

    #[test]
    fn test_mute_fires_once_per_press() {
        let mut sampler = InputSampler::default();
        sampler.apply(down("m"));
        sampler.apply(InputEvent::KeyDown {
            label: "m".to_string(),
            repeat: true,
        });
        let intents = sampler.take_intents();
        assert_eq!(intents.mute_toggles, 1);
        assert!(intents.flips_mute());
    }

    #[test]
    fn test_two_presses_cancel() {
        let mut sampler = InputSampler::default();
        sampler.apply(down("M"));
        sampler.apply(InputEvent::KeyUp {
            label: "m".to_string(),
        });
        sampler.apply(down("m"));
        let intents = sampler.take_intents();
        assert_eq!(intents.mute_toggles, 2);
        assert!(!intents.flips_mute());
    }

    #[test]
    fn test_scroll_accumulates_and_resets() {
        let mut sampler = InputSampler::default();
        sampler.apply(InputEvent::Scroll(1.0));
        sampler.apply(InputEvent::Scroll(2.0));
        let intents = sampler.take_intents();
        assert!((intents.throttle_nudge - 0.12).abs() < 1e-12);
        assert_eq!(sampler.take_intents(), FrameIntents::default());
    }

    #[test]
    fn test_scroll_direction() {
        let mut sampler = InputSampler::default();
        sampler.apply(InputEvent::Scroll(-1.0));
        assert!((sampler.take_intents().throttle_nudge + 0.04).abs() < 1e-12);
        sampler.apply(InputEvent::Scroll(1.0));
        assert!((sampler.take_intents().throttle_nudge - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_scroll_ignored() {
        let mut sampler = InputSampler::default();
        sampler.apply(InputEvent::Scroll(1.0));
        sampler.apply(InputEvent::Scroll(f64::NAN));
        sampler.apply(InputEvent::Scroll(f64::INFINITY));
        sampler.apply(InputEvent::Scroll(f64::NEG_INFINITY));
        assert!((sampler.take_intents().throttle_nudge - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_click_requests_audio() {
        let mut sampler = InputSampler::default();
        sampler.apply(InputEvent::Click);
        assert!(sampler.take_intents().activate_audio);
    }

    #[test]
    fn test_held_keys_survive_take_intents() {
        let mut sampler = InputSampler::default();
        sampler.apply(down("shift"));
        sampler.take_intents();
        assert!(sampler.is_held(ControlAction::Boost));
        sampler.apply(InputEvent::FocusLost);
        assert!(!sampler.is_held(ControlAction::Boost));
    }

    #[test]
    fn test_drain_from_queue() {
        let queue = InputQueue::new();
        let tx = queue.sender();
        tx.send(down("a"));
        tx.send(down("d"));
        tx.send(InputEvent::KeyUp {
            label: "d".to_string(),
        });

        let mut sampler = InputSampler::default();
        sampler.drain(&queue);
        assert_eq!(
            sampler.axis(ControlAction::RollLeft, ControlAction::RollRight),
            -1.0
        );
    }

    #[test]
    fn test_rebind_keeps_held_keys() {
        let mut sampler = InputSampler::default();
        sampler.apply(down("b"));
        assert!(!sampler.is_held(ControlAction::Brake));

        let mut bindings = ControlBindings::default();
        bindings.bind(ControlAction::Brake, "b");
        sampler.rebind(bindings, 0.1);
        assert!(sampler.is_held(ControlAction::Brake));
        sampler.apply(InputEvent::Scroll(1.0));
        assert!((sampler.take_intents().throttle_nudge - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_rebound_mute_key() {
        let mut bindings = ControlBindings::default();
        bindings.bind(ControlAction::Mute, "n");
        let mut sampler = InputSampler::new(bindings, 0.04);
        sampler.apply(down("m"));
        sampler.apply(down("n"));
        assert_eq!(sampler.take_intents().mute_toggles, 1);
    }
}
