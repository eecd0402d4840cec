//! Key bindings: maps key events to control events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Control events triggered by key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Lower the volume one increment.
    VolumeDown,
    /// Raise the volume one increment.
    VolumeUp,
    /// Lower the phase step one increment (lower pitch).
    StepDown,
    /// Raise the phase step one increment (higher pitch).
    StepUp,
    /// Stop playback and exit.
    Stop,
}

/// Map a key event to a control event. Unbound keys map to `None` and are
/// ignored by the control loop.
///
/// Raw mode delivers Ctrl+C as an ordinary key event rather than a signal,
/// so it is bound here as a second way to stop.
pub fn map_key(key: KeyEvent) -> Option<ControlEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(ControlEvent::Stop),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('-') => Some(ControlEvent::VolumeDown),
        // '+' is shifted '=' on common layouts; accept both.
        KeyCode::Char('=') | KeyCode::Char('+') => Some(ControlEvent::VolumeUp),
        KeyCode::Char('[') => Some(ControlEvent::StepDown),
        KeyCode::Char(']') => Some(ControlEvent::StepUp),
        KeyCode::Char('q') => Some(ControlEvent::Stop),
        _ => None,
    }
}
