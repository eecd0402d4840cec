//! Fixed pool of sample buffers passed between the render thread and the
//! audio thread.
//!
//! Two lock-free SPSC rings carry whole buffers by value: `free` flows from
//! the audio side back to the renderer, `ready` flows filled buffers the
//! other way. Every buffer is allocated up front and the rings are sized to
//! hold the entire pool, so neither side allocates or pushes into a full
//! ring once the pool is running.

use std::thread;
use std::time::Duration;

use ringbuf::{
    traits::{Consumer, Producer, Split},
    HeapCons, HeapProd, HeapRb,
};

/// How long [`BufferPool::acquire`] sleeps between polls of the free ring.
const ACQUIRE_BACKOFF: Duration = Duration::from_micros(500);

/// One block of mono samples plus a count of how many are valid.
#[derive(Debug)]
pub struct AudioBuffer {
    samples: Box<[i16]>,
    sample_count: usize,
}

impl AudioBuffer {
    /// Allocate a zeroed buffer holding up to `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: vec![0; capacity].into_boxed_slice(),
            sample_count: 0,
        }
    }

    /// Maximum number of samples the buffer can hold.
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Number of valid samples currently in the buffer.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Declare how many samples are valid after writing via
    /// [`samples_mut`](AudioBuffer::samples_mut).
    pub fn set_sample_count(&mut self, count: usize) {
        debug_assert!(count <= self.samples.len());
        self.sample_count = count;
    }

    /// The valid samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples[..self.sample_count]
    }

    /// The whole backing store, for filling.
    pub fn samples_mut(&mut self) -> &mut [i16] {
        &mut self.samples
    }
}

/// Render-thread handle: take free buffers, submit filled ones.
pub struct BufferPool {
    free: HeapCons<AudioBuffer>,
    ready: HeapProd<AudioBuffer>,
}

/// Audio-thread handle: take filled buffers, recycle spent ones.
pub struct PoolConsumer {
    ready: HeapCons<AudioBuffer>,
    free: HeapProd<AudioBuffer>,
}

/// Create a pool of `count` buffers of `capacity` samples each, all of them
/// initially free. Returns the two endpoints, one per thread.
pub fn buffer_pool(count: usize, capacity: usize) -> (BufferPool, PoolConsumer) {
    let (mut free_prod, free_cons) = HeapRb::<AudioBuffer>::new(count).split();
    let (ready_prod, ready_cons) = HeapRb::<AudioBuffer>::new(count).split();
    for _ in 0..count {
        // The ring was sized for exactly this many buffers.
        let _ = free_prod.try_push(AudioBuffer::new(capacity));
    }
    (
        BufferPool {
            free: free_cons,
            ready: ready_prod,
        },
        PoolConsumer {
            ready: ready_cons,
            free: free_prod,
        },
    )
}

impl BufferPool {
    /// Take a free buffer, sleeping until the audio side recycles one.
    ///
    /// This is the render thread's pacing mechanism: once all buffers are
    /// queued, the renderer sits here until playback frees one, so the
    /// render loop naturally runs at the speed the device consumes audio.
    pub fn acquire(&mut self) -> AudioBuffer {
        loop {
            if let Some(buffer) = self.free.try_pop() {
                return buffer;
            }
            thread::sleep(ACQUIRE_BACKOFF);
        }
    }

    /// Take a free buffer if one is available right now.
    pub fn try_acquire(&mut self) -> Option<AudioBuffer> {
        self.free.try_pop()
    }

    /// Queue a filled buffer for playback.
    pub fn submit(&mut self, buffer: AudioBuffer) {
        // Total buffers in circulation never exceeds the ring capacity,
        // so this push cannot fail.
        let _ = self.ready.try_push(buffer);
    }
}

impl PoolConsumer {
    /// Take the next filled buffer, if any. Never blocks.
    pub fn next_ready(&mut self) -> Option<AudioBuffer> {
        self.ready.try_pop()
    }

    /// Return a spent buffer to the free ring for reuse.
    pub fn recycle(&mut self, mut buffer: AudioBuffer) {
        buffer.set_sample_count(0);
        // Same invariant as submit: the free ring holds the whole pool.
        let _ = self.free.try_push(buffer);
    }
}
