//! Control bindings: which key label drives which flight control.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::keyboard::KeyboardState;

/// Every bindable flight control.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum ControlAction {
    /// Pitch intent -1.
    PitchDown,
    /// Pitch intent +1.
    PitchUp,
    /// Roll intent -1.
    RollLeft,
    /// Roll intent +1.
    RollRight,
    /// Yaw intent -1.
    YawLeft,
    /// Yaw intent +1.
    YawRight,
    /// Afterburner modifier.
    Boost,
    /// Throttle brake.
    Brake,
    /// Toggle engine audio mute.
    Mute,
}

impl ControlAction {
    /// All actions, in declaration order.
    pub const ALL: [ControlAction; 9] = [
        ControlAction::PitchDown,
        ControlAction::PitchUp,
        ControlAction::RollLeft,
        ControlAction::RollRight,
        ControlAction::YawLeft,
        ControlAction::YawRight,
        ControlAction::Boost,
        ControlAction::Brake,
        ControlAction::Mute,
    ];

    /// The default key label for this action.
    pub fn default_label(self) -> &'static str {
        match self {
            ControlAction::PitchDown => "w",
            ControlAction::PitchUp => "s",
            ControlAction::RollLeft => "a",
            ControlAction::RollRight => "d",
            ControlAction::YawLeft => "q",
            ControlAction::YawRight => "e",
            ControlAction::Boost => "shift",
            ControlAction::Brake => " ",
            ControlAction::Mute => "m",
        }
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl FromStr for ControlAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ControlAction::ALL
            .into_iter()
            .find(|action| action.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown control action: {s}"))
    }
}

/// Maps each [`ControlAction`] to one key label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlBindings {
    labels: HashMap<ControlAction, String>,
}

impl Default for ControlBindings {
    fn default() -> Self {
        let labels = ControlAction::ALL
            .into_iter()
            .map(|action| (action, action.default_label().to_string()))
            .collect();
        Self { labels }
    }
}

impl ControlBindings {
    /// Defaults with `overrides` (action name -> key label) applied.
    ///
    /// Unknown action names and empty labels are logged and skipped.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut bindings = Self::default();
        for (name, label) in overrides {
            match name.parse::<ControlAction>() {
                Ok(_) if label.is_empty() => {
                    warn!("Ignoring empty key label for action {name}");
                }
                Ok(action) => bindings.bind(action, label),
                Err(e) => warn!("Ignoring keybinding override: {e}"),
            }
        }
        bindings
    }

    /// Rebind `action` to `label` (case-normalised, space kept as-is).
    pub fn bind(&mut self, action: ControlAction, label: &str) {
        let label = if label == " " {
            label.to_string()
        } else {
            label.to_lowercase()
        };
        self.labels.insert(action, label);
    }

    /// The key label bound to `action`.
    pub fn label(&self, action: ControlAction) -> &str {
        self.labels
            .get(&action)
            .map_or(action.default_label(), String::as_str)
    }

    /// Whether the key bound to `action` is held.
    pub fn is_active(&self, keyboard: &KeyboardState, action: ControlAction) -> bool {
        keyboard.is_held(self.label(action))
    }

    /// Signed intent from an opposing pair: -1, 0 or +1. Both held cancels.
    pub fn axis(
        &self,
        keyboard: &KeyboardState,
        negative: ControlAction,
        positive: ControlAction,
    ) -> f64 {
        let neg = if self.is_active(keyboard, negative) { -1.0 } else { 0.0 };
        let pos = if self.is_active(keyboard, positive) { 1.0 } else { 0.0 };
        neg + pos
    }
}
