//! Input mapping
//!
//! Device events are reduced to a small set of discrete [`InputEvent`]s,
//! each of which maps to one call on the game.

/// Discrete input the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Start, restart or jump depending on the phase
    Action,
    CrouchBegin,
    CrouchEnd,
    /// Restart button
    Restart,
    ToggleSound,
    ToggleDarkMode,
}

/// Map a keyboard `code` to an input event.
///
/// Auto-repeat of the action key is ignored so holding space does not
/// bounce the runner.
pub fn map_key(code: &str, repeat: bool, pressed: bool) -> Option<InputEvent> {
    match (code, pressed) {
        ("Space" | "ArrowUp", true) if !repeat => Some(InputEvent::Action),
        ("ArrowDown", true) => Some(InputEvent::CrouchBegin),
        ("ArrowDown", false) => Some(InputEvent::CrouchEnd),
        _ => None,
    }
}

/// Two taps closer than this are a double tap (ms)
pub const DOUBLE_TAP_MS: f64 = 300.0;
/// How long a double-tap crouch lasts (ms)
pub const TAP_CROUCH_MS: f64 = 500.0;

/// Turns touch taps into actions; a double tap is a short crouch.
///
/// The crouch release is a polled deadline, checked every frame, rather
/// than a host timer.
#[derive(Debug, Clone, Default)]
pub struct TapTracker {
    last_tap_ms: Option<f64>,
    release_at_ms: Option<f64>,
}

impl TapTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tap(&mut self, now_ms: f64) -> InputEvent {
        let gap = self.last_tap_ms.map(|last| now_ms - last);
        self.last_tap_ms = Some(now_ms);

        match gap {
            Some(gap) if gap > 0.0 && gap < DOUBLE_TAP_MS => {
                self.release_at_ms = Some(now_ms + TAP_CROUCH_MS);
                InputEvent::CrouchBegin
            }
            _ => InputEvent::Action,
        }
    }

    /// Returns `CrouchEnd` once the double-tap crouch has expired
    pub fn poll(&mut self, now_ms: f64) -> Option<InputEvent> {
        match self.release_at_ms {
            Some(at) if now_ms >= at => {
                self.release_at_ms = None;
                Some(InputEvent::CrouchEnd)
            }
            _ => None,
        }
    }
}
