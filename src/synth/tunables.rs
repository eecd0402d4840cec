//! Live performance parameters: output volume and phase step.
//!
//! Both values move in fixed increments and are clamped to their legal
//! ranges inside the adjusting methods, so the rest of the crate can read
//! them without re-validating.

use super::oscillator::PHASE_FRAC_BITS;
use super::wavetable::TABLE_LEN;

/// Loudest volume: unity gain once shifted back down by the oscillator.
pub const VOLUME_MAX: u16 = 1 << super::oscillator::VOLUME_SHIFT;
/// Volume change per key press.
pub const VOLUME_DELTA: u16 = 4;
/// Startup volume.
pub const VOLUME_DEFAULT: u16 = 32;

/// Slowest step: one table entry per sample.
pub const STEP_MIN: u32 = 1 << PHASE_FRAC_BITS;
/// Fastest step: an eighth of the table per sample, well under Nyquist.
pub const STEP_MAX: u32 = (TABLE_LEN as u32 / 8) << PHASE_FRAC_BITS;
/// Step change per key press.
pub const STEP_DELTA: u32 = 1 << PHASE_FRAC_BITS;
/// Startup step: 32 table entries per sample.
pub const STEP_DEFAULT: u32 = 32 << PHASE_FRAC_BITS;

/// Volume and step with clamped adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tunables {
    volume: u16,
    step: u32,
}

impl Tunables {
    pub fn new() -> Self {
        Self {
            volume: VOLUME_DEFAULT,
            step: STEP_DEFAULT,
        }
    }

    pub fn volume(&self) -> u16 {
        self.volume
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Raise the volume by one increment, capped at [`VOLUME_MAX`].
    pub fn volume_up(&mut self) {
        self.volume = self.volume.saturating_add(VOLUME_DELTA).min(VOLUME_MAX);
    }

    /// Lower the volume by one increment, down to silence.
    pub fn volume_down(&mut self) {
        self.volume = self.volume.saturating_sub(VOLUME_DELTA);
    }

    /// Raise the step by one increment, capped at [`STEP_MAX`].
    pub fn step_up(&mut self) {
        self.step = self.step.saturating_add(STEP_DELTA).min(STEP_MAX);
    }

    /// Lower the step by one increment, floored at [`STEP_MIN`].
    pub fn step_down(&mut self) {
        self.step = self.step.saturating_sub(STEP_DELTA).max(STEP_MIN);
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self::new()
    }
}
