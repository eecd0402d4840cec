//! Tonewheel: a terminal-native real-time sine tone generator.
//!
//! A precomputed wavetable, a fixed-point phase accumulator, and a pooled
//! buffer exchange feed a continuously variable sine tone to the default
//! audio output device. Volume and pitch are adjusted live from keyboard
//! characters.

pub mod audio;
pub mod control;
pub mod synth;
