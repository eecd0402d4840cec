//! Control loop: poll one key per block, apply it, render the next block.
//!
//! The loop runs on the main thread. Between blocks it polls the control
//! source once, adjusts the tunables, and prints the status line; the
//! blocking acquire inside [`render_block`] paces the whole loop at the
//! rate the audio device drains buffers, so key handling stays responsive
//! without a timer of its own.

pub mod input;
pub mod keys;

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::audio::BufferPool;
use crate::synth::{render_block, Oscillator, Tunables, WaveTable, PHASE_FRAC_BITS};

pub use input::{ControlSource, KeyInput};
pub use keys::{map_key, ControlEvent};

/// Owns the oscillator and tunables and drives rendering until stopped.
pub struct ControlLoop {
    tunables: Tunables,
    oscillator: Oscillator,
    stopping: bool,
    interrupt: Arc<AtomicBool>,
}

impl ControlLoop {
    pub fn new() -> Self {
        Self {
            tunables: Tunables::new(),
            oscillator: Oscillator::new(),
            stopping: false,
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that stops the loop when set from another thread, for wiring
    /// into a signal handler.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    /// Current tunables.
    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    /// Whether a stop has been requested.
    pub fn is_stopping(&self) -> bool {
        self.stopping
    }

    /// Run until a stop event or the interrupt flag ends the loop.
    ///
    /// Exactly one poll per rendered block. After a stop no further buffer
    /// is rendered or submitted; whatever is already queued drains on the
    /// audio side.
    pub fn run(
        &mut self,
        source: &mut impl ControlSource,
        pool: &mut BufferPool,
        table: &WaveTable,
    ) -> io::Result<()> {
        loop {
            if self.interrupt.load(Ordering::Relaxed) {
                self.stopping = true;
            } else if let Some(event) = source.poll_event()? {
                self.apply_event(event);
            }
            if self.stopping {
                return Ok(());
            }
            render_block(pool, &mut self.oscillator, table, &self.tunables);
        }
    }

    /// Apply one control event. Adjustments update the tunables and echo
    /// the status line; a stop just marks the loop for exit.
    fn apply_event(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::VolumeDown => self.tunables.volume_down(),
            ControlEvent::VolumeUp => self.tunables.volume_up(),
            ControlEvent::StepDown => self.tunables.step_down(),
            ControlEvent::StepUp => self.tunables.step_up(),
            ControlEvent::Stop => {
                self.stopping = true;
                return;
            }
        }
        self.print_status();
    }

    /// Status line, carriage return and no newline: each print overwrites
    /// the previous one in place. The step is shown in whole table entries.
    fn status_line(&self) -> String {
        format!(
            "vol = {}, step = {}      \r",
            self.tunables.volume(),
            self.tunables.step() >> PHASE_FRAC_BITS
        )
    }

    fn print_status(&self) {
        print!("{}", self.status_line());
        let _ = io::stdout().flush();
    }
}

impl Default for ControlLoop {
    fn default() -> Self {
        Self::new()
    }
}
