//! Discrete input edge-events and the queue that carries them to the tick.
//!
//! Platform callbacks push into an [`InputSender`]; the simulation drains the
//! [`InputQueue`] synchronously at the start of each tick, so event timing
//! never interleaves with a half-applied tick.

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use winit::event::ElementState;

use crate::keyboard::RawKeyEvent;

/// One user-input edge.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key went down. `repeat` marks OS auto-repeat.
    KeyDown { label: String, repeat: bool },
    /// A key went up.
    KeyUp { label: String },
    /// Wheel movement in lines; positive = rotated away from the user.
    Scroll(f64),
    /// A pointer click (audio activation gesture).
    Click,
    /// The window lost focus; held keys can no longer be trusted.
    FocusLost,
}

impl From<RawKeyEvent> for InputEvent {
    fn from(raw: RawKeyEvent) -> Self {
        match raw.state {
            ElementState::Pressed => Self::KeyDown {
                label: raw.label,
                repeat: raw.repeat,
            },
            ElementState::Released => Self::KeyUp { label: raw.label },
        }
    }
}

/// Cloneable producer half of the queue.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<InputEvent>,
}

impl InputSender {
    /// Queue an event. Events sent after the queue is dropped are discarded.
    pub fn send(&self, event: InputEvent) {
        let _ = self.tx.send(event);
    }
}

/// Single-consumer end of the input queue.
#[derive(Debug)]
pub struct InputQueue {
    rx: Receiver<InputEvent>,
    tx: Sender<InputEvent>,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    /// Create an empty unbounded queue.
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { rx, tx }
    }

    /// A new producer handle.
    pub fn sender(&self) -> InputSender {
        InputSender {
            tx: self.tx.clone(),
        }
    }

    /// Take every event queued so far, in arrival order.
    pub fn drain(&self) -> impl Iterator<Item = InputEvent> + '_ {
        std::iter::from_fn(move || match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        })
    }

    /// Number of events waiting.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Whether no events are waiting.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
