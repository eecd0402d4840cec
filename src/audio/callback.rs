//! Audio callback that runs on the cpal audio thread.
//!
//! Pulls filled buffers from the pool, converts their samples to `f32`, and
//! spreads the mono signal across the device's output channels. Spent
//! buffers go straight back to the free ring. No locks, no allocation.

use super::pool::{AudioBuffer, PoolConsumer};

/// State that lives on the audio thread. Accessed only from the cpal callback.
pub struct OutputCallback {
    consumer: PoolConsumer,
    active: Option<AudioBuffer>,
    read_pos: usize,
    channels: usize,
}

impl OutputCallback {
    /// Create a callback reading from `consumer` and writing frames of
    /// `channels` interleaved samples.
    pub fn new(consumer: PoolConsumer, channels: u16) -> Self {
        Self {
            consumer,
            active: None,
            read_pos: 0,
            channels: usize::from(channels),
        }
    }

    /// Called by cpal for each output period. Fills `output` with frames,
    /// duplicating the mono source into every channel of a frame.
    pub fn process(&mut self, output: &mut [f32]) {
        for frame in output.chunks_mut(self.channels) {
            let value = match self.next_sample() {
                Some(sample) => f32::from(sample) / 32768.0,
                None => 0.0,
            };
            for out in frame.iter_mut() {
                *out = value;
            }
        }
    }

    /// Next mono sample, or `None` when no filled buffer is waiting.
    /// On `None` the caller emits silence; playback resumes as soon as the
    /// render thread submits again.
    fn next_sample(&mut self) -> Option<i16> {
        loop {
            match self.active.take() {
                Some(buffer) => {
                    if self.read_pos < buffer.sample_count() {
                        let sample = buffer.samples()[self.read_pos];
                        self.read_pos += 1;
                        self.active = Some(buffer);
                        return Some(sample);
                    }
                    // Spent. Hand it back for refilling, then try the next.
                    self.consumer.recycle(buffer);
                }
                None => match self.consumer.next_ready() {
                    Some(buffer) => {
                        self.read_pos = 0;
                        self.active = Some(buffer);
                    }
                    None => return None,
                },
            }
        }
    }
}
