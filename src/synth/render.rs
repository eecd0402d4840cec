//! Block rendering: pull a free buffer, fill it sample by sample, hand it
//! to the audio side.

use crate::audio::pool::{AudioBuffer, BufferPool};

use super::oscillator::Oscillator;
use super::tunables::Tunables;
use super::wavetable::WaveTable;

/// Fill every slot of `buffer` from the oscillator and mark it full.
pub fn fill_buffer(
    buffer: &mut AudioBuffer,
    oscillator: &mut Oscillator,
    table: &WaveTable,
    tunables: &Tunables,
) {
    let capacity = buffer.capacity();
    for slot in buffer.samples_mut() {
        *slot = oscillator.next_sample(table, tunables.step(), tunables.volume());
    }
    buffer.set_sample_count(capacity);
}

/// Render one block: block until a free buffer is available, fill it,
/// submit it for playback. The oscillator's phase carries over from the
/// previous block, so consecutive blocks form one continuous waveform.
pub fn render_block(
    pool: &mut BufferPool,
    oscillator: &mut Oscillator,
    table: &WaveTable,
    tunables: &Tunables,
) {
    let mut buffer = pool.acquire();
    fill_buffer(&mut buffer, oscillator, table, tunables);
    pool.submit(buffer);
}
