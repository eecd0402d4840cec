//! Precomputed one-period cosine table for wavetable synthesis.

use std::f64::consts::PI;

/// Number of table entries. Power of two so an index mask doubles as
/// modulo-length wraparound.
pub const TABLE_LEN: usize = 2048;

/// Peak table amplitude, the full signed 16-bit range.
pub const AMPLITUDE_MAX: i16 = i16::MAX;

/// One full period of a cosine, sampled at [`TABLE_LEN`] points and scaled
/// to [`AMPLITUDE_MAX`]. Built once at startup, immutable afterwards.
#[derive(Debug)]
pub struct WaveTable {
    samples: Box<[i16; TABLE_LEN]>,
}

impl WaveTable {
    /// Build the table: entry `i` is `round(AMPLITUDE_MAX * cos(2*pi*i/TABLE_LEN))`.
    ///
    /// Pure and deterministic; every value fits `[-AMPLITUDE_MAX, AMPLITUDE_MAX]`.
    pub fn build() -> Self {
        let mut samples = Box::new([0i16; TABLE_LEN]);
        for (i, slot) in samples.iter_mut().enumerate() {
            let angle = 2.0 * PI * i as f64 / TABLE_LEN as f64;
            *slot = (f64::from(AMPLITUDE_MAX) * angle.cos()).round() as i16;
        }
        Self { samples }
    }

    /// Table entry at `index`. Callers derive `index` from a phase
    /// accumulator already masked to `[0, TABLE_LEN)`.
    #[inline]
    pub fn sample(&self, index: usize) -> i16 {
        self.samples[index]
    }
}
