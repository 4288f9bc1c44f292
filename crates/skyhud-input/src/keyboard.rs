//! Held-key tracker.
//!
//! Keys are identified by case-normalised *labels* derived from the logical
//! key: `"w"`, `"shift"`, `" "` for space, `"arrowup"`. Membership is all that
//! is tracked; press order is not preserved.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{Key, NamedKey};

/// Minimal description of a key event for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyEvent {
    /// Normalised key label.
    pub label: String,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Whether this is an auto-repeat event.
    pub repeat: bool,
}

impl RawKeyEvent {
    /// A non-repeat key-down.
    pub fn pressed(label: impl Into<String>) -> Self {
        Self {
            label: normalize(label.into()),
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    /// A key-up.
    pub fn released(label: impl Into<String>) -> Self {
        Self {
            label: normalize(label.into()),
            state: ElementState::Released,
            repeat: false,
        }
    }

    /// Build from a winit [`KeyEvent`]; `None` for keys without a label.
    pub fn from_winit(event: &KeyEvent) -> Option<Self> {
        Some(Self {
            label: key_label(&event.logical_key)?,
            state: event.state,
            repeat: event.repeat,
        })
    }
}

fn normalize(label: String) -> String {
    if label == " " {
        label
    } else {
        label.to_lowercase()
    }
}

/// Translate a winit logical key into a normalised label.
pub fn key_label(key: &Key) -> Option<String> {
    match key {
        Key::Character(c) => Some(c.to_lowercase()),
        Key::Named(NamedKey::Space) => Some(" ".to_string()),
        Key::Named(named) => Some(format!("{named:?}").to_lowercase()),
        Key::Unidentified(_) | Key::Dead(_) => None,
    }
}

/// Tracks which labelled keys are held.
///
/// Forward key events to [`process_raw`](Self::process_raw) and query with
/// [`is_held`](Self::is_held).
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<String>,
}

impl KeyboardState {
    /// Creates a new `KeyboardState` with no keys held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes a [`RawKeyEvent`]. Returns `true` if it was a fresh press.
    ///
    /// Repeat events are ignored; a release of a key that is not held is a no-op.
    pub fn process_raw(&mut self, event: &RawKeyEvent) -> bool {
        if event.repeat {
            return false;
        }
        match event.state {
            ElementState::Pressed => self.held.insert(event.label.clone()),
            ElementState::Released => {
                self.held.remove(&event.label);
                false
            }
        }
    }

    /// Returns `true` while the key is held down.
    #[must_use]
    pub fn is_held(&self, label: &str) -> bool {
        self.held.contains(label)
    }

    /// Number of keys currently held.
    #[must_use]
    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    /// Forget every held key, e.g. after the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}
