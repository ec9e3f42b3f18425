//! Precomputed low-frequency-oscillator table for delay modulation.
//!
//! [`LfoTable`] stores one modulation period as delay-in-samples values.
//! A single read cursor advances once per frame; channels read the same
//! table at a fixed rotation so that multi-channel sweeps can be
//! decorrelated (stereo widening) or kept in unison.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use crate::wavetable::{WaveShape, WaveTableGenerator};
use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::PI;

/// Initial sweep phase: places the first table entry at the minimum delay.
pub const SWEEP_START_PHASE: f64 = 3.0 * PI / 2.0;

/// One period of delay modulation, indexed by a wrapping cursor.
///
/// # Example
///
/// ```rust
/// use flange_core::{LfoTable, StandardWaveTable, WaveShape};
///
/// let mut lfo = LfoTable::build(&StandardWaveTable, WaveShape::Sine, 100, 2.0, 40.0, 0.5, 2);
/// assert_eq!(lfo.read(0), 2.0);
/// assert_eq!(lfo.channel_offset(1), 50);
///
/// for _ in 0..100 {
///     lfo.advance();
/// }
/// assert_eq!(lfo.pos(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct LfoTable {
    table: Vec<f32>,
    pos: usize,
    offsets: [usize; crate::delay::MAX_CHANNELS],
}

impl LfoTable {
    /// Generate a table of `len` entries sweeping `shape` over
    /// `[min_delay, max_delay]` samples, starting at `min_delay`.
    ///
    /// `channel_phase` (0..=1) rotates the read index of channel `c` by
    /// `round(c · len · channel_phase)` entries.
    ///
    /// # Panics
    ///
    /// Panics if `len` is 0 or `channels` exceeds
    /// [`MAX_CHANNELS`](crate::delay::MAX_CHANNELS).
    pub fn build<G: WaveTableGenerator + ?Sized>(
        generator: &G,
        shape: WaveShape,
        len: usize,
        min_delay: f64,
        max_delay: f64,
        channel_phase: f64,
        channels: usize,
    ) -> Self {
        assert!(len > 0, "LFO table length must be > 0");
        assert!(channels <= crate::delay::MAX_CHANNELS);

        let mut table = vec![0.0f32; len];
        generator.generate(shape, &mut table, min_delay, max_delay, SWEEP_START_PHASE);

        let mut offsets = [0; crate::delay::MAX_CHANNELS];
        for (c, offset) in offsets.iter_mut().enumerate().take(channels) {
            *offset = (c as f64 * len as f64 * channel_phase + 0.5) as usize;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "lfo_build: {shape} {len} entries, delay {min_delay}..{max_delay}, offsets {:?}",
            &offsets[..channels]
        );

        Self {
            table,
            pos: 0,
            offsets,
        }
    }

    /// Table length (frames per modulation period).
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always false for a built table.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Current read cursor.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Raw table contents.
    pub fn values(&self) -> &[f32] {
        &self.table
    }

    /// Read-index rotation applied to `channel`.
    #[inline]
    pub fn channel_offset(&self, channel: usize) -> usize {
        self.offsets[channel]
    }

    /// Table index `channel` reads at the current cursor.
    #[inline]
    pub fn read_index(&self, channel: usize) -> usize {
        (self.pos + self.offsets[channel]) % self.table.len()
    }

    /// Delay in samples for `channel` at the current cursor.
    #[inline]
    pub fn read(&self, channel: usize) -> f32 {
        self.table[self.read_index(channel)]
    }

    /// Step the cursor one frame forward, wrapping at the table length.
    #[inline]
    pub fn advance(&mut self) {
        self.pos = (self.pos + 1) % self.table.len();
    }

    /// Rewind the cursor to the start of the period.
    pub fn reset(&mut self) {
        self.pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wavetable::StandardWaveTable;

    #[test]
    fn test_sweep_starts_at_min_delay() {
        for shape in WaveShape::ALL {
            let lfo = LfoTable::build(&StandardWaveTable, shape, 1000, 5.0, 50.0, 0.0, 1);
            assert!((lfo.read(0) - 5.0).abs() < 1e-4, "{shape}: {}", lfo.read(0));
        }
    }

    #[test]
    fn test_unison_channels_read_same_value() {
        let mut lfo = LfoTable::build(&StandardWaveTable, WaveShape::Sine, 257, 0.0, 88.0, 0.0, 4);
        for _ in 0..lfo.len() {
            let v = lfo.read(0);
            for c in 1..4 {
                assert_eq!(lfo.read(c), v);
            }
            lfo.advance();
        }
    }

    #[test]
    fn test_half_phase_offsets_by_half_period() {
        let mut lfo = LfoTable::build(&StandardWaveTable, WaveShape::Triangle, 88200, 0.0, 88.0, 0.5, 2);
        assert_eq!(lfo.channel_offset(1), 44100);
        for _ in 0..1000 {
            let expected = (lfo.read_index(0) + 44100) % lfo.len();
            assert_eq!(lfo.read_index(1), expected);
            lfo.advance();
        }
    }

    #[test]
    fn test_full_phase_is_unison() {
        let lfo = LfoTable::build(&StandardWaveTable, WaveShape::Sine, 100, 0.0, 10.0, 1.0, 3);
        assert_eq!(lfo.read_index(1), lfo.read_index(0));
        assert_eq!(lfo.read_index(2), lfo.read_index(0));
    }

    #[test]
    fn test_cursor_period() {
        let mut lfo = LfoTable::build(&StandardWaveTable, WaveShape::Sine, 37, 0.0, 10.0, 0.25, 2);
        for _ in 0..37 {
            lfo.advance();
        }
        assert_eq!(lfo.pos(), 0);
        lfo.advance();
        lfo.reset();
        assert_eq!(lfo.pos(), 0);
    }

    #[test]
    #[should_panic]
    fn test_zero_length_panics() {
        let _ = LfoTable::build(&StandardWaveTable, WaveShape::Sine, 0, 0.0, 1.0, 0.0, 1);
    }
}
