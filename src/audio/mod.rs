//! Audio output: cpal stream, buffer pool, and the audio-thread callback.
//!
//! The engine owns the cpal output stream and wires the pool's consumer end
//! into the stream callback. The render thread keeps the producer end and
//! feeds it filled buffers; the callback plays them and recycles the empties.

pub mod callback;
pub mod pool;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

pub use callback::OutputCallback;
pub use pool::{buffer_pool, AudioBuffer, BufferPool, PoolConsumer};

/// Output sample rate. The stream is opened at this rate regardless of the
/// device default, so a given step always lands on the same pitch.
pub const SAMPLE_RATE: u32 = 44_100;

/// Samples per pool buffer (mono, before channel duplication).
pub const SAMPLES_PER_BUFFER: usize = 256;

/// Number of buffers in the pool. Three gives the renderer one buffer to
/// fill while one plays and one waits, without adding audible latency.
pub const POOL_BUFFERS: usize = 3;

/// Audio engine errors.
#[derive(Debug)]
pub enum AudioError {
    /// No audio output device found.
    NoOutputDevice,
    /// Failed to query device configuration.
    DeviceConfig(String),
    /// Failed to build the audio stream.
    StreamBuild(String),
    /// Failed to start the audio stream.
    StreamPlay(String),
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::NoOutputDevice => write!(f, "no audio output device found"),
            AudioError::DeviceConfig(e) => write!(f, "device config error: {e}"),
            AudioError::StreamBuild(e) => write!(f, "stream build error: {e}"),
            AudioError::StreamPlay(e) => write!(f, "stream play error: {e}"),
        }
    }
}

impl std::error::Error for AudioError {}

/// The audio engine. Owns the cpal stream; playback runs for as long as the
/// engine is alive.
pub struct AudioEngine {
    // Kept alive for the duration of playback. The device stops when the
    // stream drops.
    #[allow(dead_code)]
    stream: cpal::Stream,
    sample_rate: u32,
    channels: u16,
}

impl AudioEngine {
    /// Open the default output device at [`SAMPLE_RATE`], start the stream,
    /// and return the engine together with the render thread's pool handle.
    ///
    /// The channel count follows the device's default configuration; the
    /// callback duplicates the mono signal into every channel.
    pub fn start() -> Result<(Self, BufferPool), AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;
        let channels = config.channels();

        let (pool, consumer) = buffer_pool(POOL_BUFFERS, SAMPLES_PER_BUFFER);
        let mut callback = OutputCallback::new(consumer, channels);

        let stream_config = cpal::StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Default,
        };

        let err_fn = |err: cpal::StreamError| {
            eprintln!("audio stream error: {err}");
        };

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    callback.process(data);
                },
                err_fn,
                None,
            )
            .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamPlay(e.to_string()))?;

        Ok((
            Self {
                stream,
                sample_rate: SAMPLE_RATE,
                channels,
            },
            pool,
        ))
    }

    /// Sample rate of the running stream.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of output channels.
    pub fn channels(&self) -> u16 {
        self.channels
    }
}
