//! Binary entry point: start the audio engine, enter raw mode, and run the
//! control loop until the user quits.

use std::process;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use clap::Parser;

use tonewheel::audio::AudioEngine;
use tonewheel::control::{ControlLoop, KeyInput};
use tonewheel::synth::WaveTable;

/// Playback takes no options yet; clap still provides `--help` and
/// `--version`.
#[derive(Parser)]
#[command(name = "tonewheel", version, about = "Interactive sine tone generator")]
struct Cli {}

fn main() {
    Cli::parse();

    println!("tonewheel v{}", env!("CARGO_PKG_VERSION"));

    // 1. Build the wavetable; it lives for the rest of the process and is
    // only ever borrowed.
    let table = WaveTable::build();

    // 2. Start the audio stream. The pool handle stays on this thread.
    let (engine, mut pool) = match AudioEngine::start() {
        Ok(started) => started,
        Err(e) => {
            eprintln!("failed to start audio engine: {e}");
            process::exit(1);
        }
    };
    println!(
        "audio: {} Hz, {} ch",
        engine.sample_rate(),
        engine.channels()
    );
    println!("keys: -/= volume down/up, [/] pitch down/up, q quit");

    // 3. Control state, with the interrupt latch wired to SIGINT. Raw mode
    // delivers Ctrl+C as a key, so this only fires for signals from outside
    // the terminal; losing the handler is not fatal.
    let mut control = ControlLoop::new();
    let interrupt = control.interrupt_flag();
    if let Err(e) = ctrlc::set_handler(move || interrupt.store(true, Ordering::Relaxed)) {
        eprintln!("warning: interrupt handler not installed: {e}");
    }

    // 4. Raw mode for single-key input, restored when `input` drops.
    let mut input = match KeyInput::new() {
        Ok(input) => input,
        Err(e) => {
            eprintln!("failed to enter raw mode: {e}");
            process::exit(1);
        }
    };

    let result = control.run(&mut input, &mut pool, &table);

    // Leave raw mode before printing anything further.
    drop(input);
    if let Err(e) = result {
        eprintln!("input error: {e}");
        process::exit(1);
    }

    // Let queued audio drain.
    thread::sleep(Duration::from_millis(50));
    println!();
    println!("done.");
}
