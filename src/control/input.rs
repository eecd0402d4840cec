//! Terminal input: raw mode guard and non-blocking key polling.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;

use super::keys::{map_key, ControlEvent};

/// A source of control events, polled once per rendered block.
pub trait ControlSource {
    /// Return the next pending control event, or `None` when no bound key
    /// is waiting. Must not block; the render loop provides the pacing.
    fn poll_event(&mut self) -> io::Result<Option<ControlEvent>>;
}

/// Keyboard input in terminal raw mode.
///
/// Raw mode delivers single key presses immediately, without line buffering
/// or echo. It is restored on drop, so the terminal comes back even when an
/// error unwinds the main loop.
pub struct KeyInput;

impl KeyInput {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for KeyInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl ControlSource for KeyInput {
    fn poll_event(&mut self) -> io::Result<Option<ControlEvent>> {
        // Zero timeout: report a pending event or return immediately.
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key)),
            // Resize, focus, and key-release events are of no use here.
            _ => Ok(None),
        }
    }
}
