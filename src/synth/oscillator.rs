//! Fixed-point phase accumulator and wavetable lookup.
//!
//! The accumulator is a `u32` holding a table position in Q16 fixed point:
//! the upper bits are the table index, the low [`PHASE_FRAC_BITS`] bits are
//! the sub-entry fraction, so even the smallest step moves the phase
//! smoothly. One full table period spans `TABLE_LEN << PHASE_FRAC_BITS`
//! accumulator units, and because that is a power of two dividing 2^32,
//! natural `u32` wrapping keeps the phase exact modulo one period.

use super::wavetable::{WaveTable, TABLE_LEN};

/// Fractional bits of the phase accumulator (Q16: 1.0 table entry = 0x10000).
pub const PHASE_FRAC_BITS: u32 = 16;

/// Right shift applied to `volume * sample`. With volume capped at
/// `1 << VOLUME_SHIFT`, the product of the loudest volume and the largest
/// table magnitude shifts back down to exactly the i16 range.
pub const VOLUME_SHIFT: u32 = 8;

/// One full table period in accumulator units (2^27).
pub const PHASE_PERIOD: u32 = (TABLE_LEN as u32) << PHASE_FRAC_BITS;

const INDEX_MASK: usize = TABLE_LEN - 1;

/// Derive the wavetable index from an accumulator value: shift out the
/// fractional bits, then mask to the table length. The mask is the
/// modulo-`TABLE_LEN` wrap, so overflow of the accumulator is seamless.
#[inline]
fn table_index(phase: u32) -> usize {
    ((phase >> PHASE_FRAC_BITS) as usize) & INDEX_MASK
}

/// Single-voice oscillator: owns the phase accumulator, borrows the table.
#[derive(Debug, Default)]
pub struct Oscillator {
    phase: u32,
}

impl Oscillator {
    /// Create an oscillator at phase zero (the table's positive peak).
    pub fn new() -> Self {
        Self { phase: 0 }
    }

    /// Produce one output sample and advance the phase by `step`.
    ///
    /// Looks up the table at the current phase, advances, then scales by
    /// `volume`: `(volume * sample) >> VOLUME_SHIFT`. The shift truncates
    /// (arithmetic shift, floor division), it does not round; callers that
    /// need bit-exact output rely on that. Handles `step == 0` (held DC
    /// sample) and the maximum step through the same arithmetic, with no
    /// special cases and no allocation.
    #[inline]
    pub fn next_sample(&mut self, table: &WaveTable, step: u32, volume: u16) -> i16 {
        let sample = table.sample(table_index(self.phase));
        self.phase = self.phase.wrapping_add(step);
        ((i32::from(volume) * i32::from(sample)) >> VOLUME_SHIFT) as i16
    }

    /// Current raw accumulator value.
    pub fn phase(&self) -> u32 {
        self.phase
    }
}
