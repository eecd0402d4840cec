//! Full pipeline integration tests: control events -> tunables -> oscillator
//! -> buffer pool -> (drain thread standing in for the audio callback).
//!
//! These tests verify the entire rendering pipeline without requiring audio
//! hardware (no AudioEngine involved). A collector thread plays the role of
//! the device: it drains ready buffers and recycles them, which is exactly
//! what unblocks the control loop's acquire.

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use assert_approx_eq::assert_approx_eq;

use tonewheel::audio::{buffer_pool, OutputCallback, POOL_BUFFERS, SAMPLES_PER_BUFFER};
use tonewheel::control::{ControlEvent, ControlLoop, ControlSource};
use tonewheel::synth::{
    render_block, Oscillator, Tunables, WaveTable, PHASE_FRAC_BITS, STEP_DEFAULT, VOLUME_MAX,
};

/// Plays back a fixed sequence of polls, then stops the loop.
struct ScriptedSource {
    polls: VecDeque<Option<ControlEvent>>,
}

impl ScriptedSource {
    fn new(polls: impl IntoIterator<Item = Option<ControlEvent>>) -> Self {
        Self {
            polls: polls.into_iter().collect(),
        }
    }
}

impl ControlSource for ScriptedSource {
    fn poll_event(&mut self) -> io::Result<Option<ControlEvent>> {
        Ok(self.polls.pop_front().unwrap_or(Some(ControlEvent::Stop)))
    }
}

/// Helper: run the control loop against a script while a collector thread
/// drains and recycles buffers. Returns the loop state and every rendered
/// block in submission order.
fn run_session(
    polls: impl IntoIterator<Item = Option<ControlEvent>>,
) -> (ControlLoop, Vec<Vec<i16>>) {
    let (mut pool, mut consumer) = buffer_pool(POOL_BUFFERS, SAMPLES_PER_BUFFER);
    let done = Arc::new(AtomicBool::new(false));
    let done_reader = Arc::clone(&done);

    let collector = thread::spawn(move || {
        let mut blocks: Vec<Vec<i16>> = Vec::new();
        loop {
            match consumer.next_ready() {
                Some(buffer) => {
                    blocks.push(buffer.samples().to_vec());
                    consumer.recycle(buffer);
                }
                None => {
                    if done_reader.load(Ordering::Acquire) {
                        // The flag is set after the last submit, so one
                        // final sweep sees everything.
                        while let Some(buffer) = consumer.next_ready() {
                            blocks.push(buffer.samples().to_vec());
                            consumer.recycle(buffer);
                        }
                        return blocks;
                    }
                    thread::sleep(Duration::from_micros(200));
                }
            }
        }
    });

    let mut control = ControlLoop::new();
    let mut source = ScriptedSource::new(polls);
    let table = WaveTable::build();
    control
        .run(&mut source, &mut pool, &table)
        .expect("control loop failed");
    done.store(true, Ordering::Release);

    let blocks = collector.join().expect("collector thread panicked");
    (control, blocks)
}

/// Helper: what a lone oscillator would render for `count` blocks with
/// fixed tunables.
fn reference_blocks(tunables: &Tunables, count: usize) -> Vec<Vec<i16>> {
    let table = WaveTable::build();
    let mut osc = Oscillator::new();
    (0..count)
        .map(|_| {
            (0..SAMPLES_PER_BUFFER)
                .map(|_| osc.next_sample(&table, tunables.step(), tunables.volume()))
                .collect()
        })
        .collect()
}

/// Helper: walk `Tunables` to specific values the way key presses would.
fn tunables_with(volume: u16, step: u32) -> Tunables {
    let mut t = Tunables::new();
    while t.volume() < volume {
        t.volume_up();
    }
    while t.volume() > volume {
        t.volume_down();
    }
    while t.step() < step {
        t.step_up();
    }
    while t.step() > step {
        t.step_down();
    }
    assert_eq!((t.volume(), t.step()), (volume, step));
    t
}

// =============================================================================
// Test 1: An idle session streams one continuous waveform
// =============================================================================

#[test]
fn idle_session_renders_continuous_waveform() {
    let (_control, blocks) = run_session(vec![None; 40]);

    assert_eq!(blocks.len(), 40, "one block per idle poll");
    for block in &blocks {
        assert_eq!(block.len(), SAMPLES_PER_BUFFER);
    }

    // The stream must be exactly what a lone oscillator produces: no gaps,
    // repeats, or phase resets at block boundaries.
    let expected = reference_blocks(&Tunables::new(), 40);
    for (i, (got, want)) in blocks.iter().zip(expected.iter()).enumerate() {
        assert_eq!(got, want, "block {i} diverged");
    }
}

// =============================================================================
// Test 2: Volume keys change amplitude between blocks
// =============================================================================

#[test]
fn volume_keys_change_amplitude_mid_stream() {
    let (control, blocks) = run_session([
        None,
        None,
        Some(ControlEvent::VolumeUp),
        Some(ControlEvent::VolumeUp),
        None,
        Some(ControlEvent::Stop),
    ]);

    assert_eq!(blocks.len(), 5);
    assert_eq!(control.tunables().volume(), 40);

    // At 32 entries per sample every block hits the table peak and trough,
    // so per-block extremes expose the volume directly.
    let peak = |block: &[i16]| block.iter().copied().max().unwrap_or(0);
    let trough = |block: &[i16]| block.iter().copied().min().unwrap_or(0);

    // Blocks rendered at the default volume of 32.
    assert_eq!(peak(&blocks[0]), 4095);
    assert_eq!(trough(&blocks[1]), -4096);
    // Block rendered after two volume-up presses (volume 40).
    assert_eq!(peak(&blocks[4]), 5119);
    assert_eq!(trough(&blocks[4]), -5120);
    // Louder, in order.
    assert!(peak(&blocks[4]) > peak(&blocks[0]));
}

// =============================================================================
// Test 3: Step keys change pitch between blocks
// =============================================================================

#[test]
fn step_keys_change_pitch_mid_stream() {
    let (control, blocks) = run_session([
        Some(ControlEvent::StepUp),
        Some(ControlEvent::StepUp),
        Some(ControlEvent::Stop),
    ]);

    assert_eq!(blocks.len(), 2);
    assert_eq!(
        control.tunables().step(),
        STEP_DEFAULT + (2 << PHASE_FRAC_BITS)
    );

    // First block was rendered after one press, second after two. Rebuild
    // the same walk with a fresh oscillator.
    let table = WaveTable::build();
    let mut osc = Oscillator::new();
    let volume = Tunables::new().volume();
    let first: Vec<i16> = (0..SAMPLES_PER_BUFFER)
        .map(|_| osc.next_sample(&table, 33 << PHASE_FRAC_BITS, volume))
        .collect();
    let second: Vec<i16> = (0..SAMPLES_PER_BUFFER)
        .map(|_| osc.next_sample(&table, 34 << PHASE_FRAC_BITS, volume))
        .collect();

    assert_eq!(blocks[0], first);
    assert_eq!(blocks[1], second);
}

// =============================================================================
// Test 4: Stop ends the stream with no further buffers
// =============================================================================

#[test]
fn stop_ends_stream_promptly() {
    let (control, blocks) = run_session([None, None, Some(ControlEvent::Stop)]);
    assert!(control.is_stopping());
    assert_eq!(blocks.len(), 2, "no block may follow the stop event");
}

// =============================================================================
// Test 5: The interrupt latch stops a session before its script runs out
// =============================================================================

#[test]
fn interrupt_latch_stops_the_session() {
    let (mut pool, mut consumer) = buffer_pool(POOL_BUFFERS, SAMPLES_PER_BUFFER);
    let mut control = ControlLoop::new();
    control.interrupt_flag().store(true, Ordering::Relaxed);

    let mut source = ScriptedSource::new(vec![None; 100]);
    let table = WaveTable::build();
    control
        .run(&mut source, &mut pool, &table)
        .expect("control loop failed");

    assert!(control.is_stopping());
    assert!(consumer.next_ready().is_none(), "nothing was rendered");
}

// =============================================================================
// Test 6: Same script renders bit-identical sessions
// =============================================================================

#[test]
fn deterministic_across_sessions() {
    let script = || {
        [
            None,
            Some(ControlEvent::VolumeDown),
            None,
            Some(ControlEvent::StepUp),
            None,
            Some(ControlEvent::Stop),
        ]
    };
    let (_, blocks_a) = run_session(script());
    let (_, blocks_b) = run_session(script());

    assert_eq!(blocks_a.len(), blocks_b.len());
    for (i, (a, b)) in blocks_a.iter().zip(blocks_b.iter()).enumerate() {
        assert_eq!(a, b, "block {i} must be bit-identical across sessions");
    }
}

// =============================================================================
// Test 7: Rendered blocks play back as a cosine through the callback
// =============================================================================

#[test]
fn callback_plays_rendered_blocks_as_cosine() {
    let (mut pool, consumer) = buffer_pool(POOL_BUFFERS, SAMPLES_PER_BUFFER);
    let table = WaveTable::build();
    let mut osc = Oscillator::new();
    // Eight table entries per sample: one full cycle per 256-slot buffer.
    let tunables = tunables_with(VOLUME_MAX, 8 << PHASE_FRAC_BITS);

    let channels = 2u16;
    let mut callback = OutputCallback::new(consumer, channels);
    let mut output = vec![0.0f32; SAMPLES_PER_BUFFER * channels as usize];
    let mut rendered = Vec::new();

    for _ in 0..POOL_BUFFERS {
        render_block(&mut pool, &mut osc, &table, &tunables);
        callback.process(&mut output);
        rendered.extend_from_slice(&output);
    }

    // At full volume the stream is the table itself: compare against the
    // closed-form cosine, duplicated into both channels.
    for (frame_idx, frame) in rendered.chunks(channels as usize).enumerate() {
        let angle =
            2.0 * std::f64::consts::PI * (frame_idx as f64) / SAMPLES_PER_BUFFER as f64;
        let expected = (angle.cos() * 32767.0 / 32768.0) as f32;
        assert_approx_eq!(frame[0], expected, 1e-3);
        assert_approx_eq!(frame[1], expected, 1e-3);
    }
}
