//! Tone synthesis: wavetable, phase accumulator, tunable parameters, and
//! block rendering.

pub mod oscillator;
pub mod render;
pub mod tunables;
pub mod wavetable;

pub use oscillator::{Oscillator, PHASE_FRAC_BITS, PHASE_PERIOD, VOLUME_SHIFT};
pub use render::{fill_buffer, render_block};
pub use tunables::{
    Tunables, STEP_DEFAULT, STEP_DELTA, STEP_MAX, STEP_MIN, VOLUME_DEFAULT, VOLUME_DELTA,
    VOLUME_MAX,
};
pub use wavetable::{WaveTable, AMPLITUDE_MAX, TABLE_LEN};
