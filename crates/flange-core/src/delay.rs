//! Multi-channel circular delay line with fractional-delay taps.
//!
//! All channels share a single write cursor. The cursor moves *backwards*:
//! [`DelayLine::rotate`] decrements it once per frame, the current frame's
//! sample is stored at the cursor, and older samples sit at increasing
//! offsets from it. A delay of `n` samples is therefore read at
//! `(pos + n) % len`.
//!
//! # Interpolation
//!
//! | Mode | Taps | Notes |
//! |------|------|-------|
//! | [`Interpolation::Linear`] | 2 | straight line between neighbours |
//! | [`Interpolation::Quadratic`] | 3 | parabola through three taps, needs one extra slot |

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Maximum number of channels a [`DelayLine`] can hold.
pub const MAX_CHANNELS: usize = 4;

/// Interpolation method for fractional delay taps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Interpolation {
    /// Two-tap linear interpolation.
    #[default]
    Linear,
    /// Three-tap quadratic interpolation.
    Quadratic,
}

impl Interpolation {
    /// All modes, in keyword order.
    pub const ALL: [Interpolation; 2] = [Interpolation::Linear, Interpolation::Quadratic];

    /// Keyword used on command lines and in presets.
    pub const fn keyword(self) -> &'static str {
        match self {
            Interpolation::Linear => "linear",
            Interpolation::Quadratic => "quadratic",
        }
    }

    /// Number of consecutive taps the method reads.
    pub const fn taps(self) -> usize {
        match self {
            Interpolation::Linear => 2,
            Interpolation::Quadratic => 3,
        }
    }
}

impl core::fmt::Display for Interpolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Linear interpolation between `tap0` and `tap1` at `frac` in `[0, 1)`.
#[inline]
pub fn interpolate_linear(tap0: f64, tap1: f64, frac: f64) -> f64 {
    tap0 + (tap1 - tap0) * frac
}

/// Quadratic interpolation through three equally spaced taps, evaluated
/// `frac` samples past `tap0`.
///
/// Fits `y(x) = tap0 + b·x + a·x²` through `(0, tap0)`, `(1, tap1)` and
/// `(2, tap2)`.
#[inline]
pub fn interpolate_quadratic(tap0: f64, tap1: f64, tap2: f64, frac: f64) -> f64 {
    let d1 = tap1 - tap0;
    let d2 = tap2 - tap0;
    let a = d2 * 0.5 - d1;
    let b = d1 * 2.0 - d2 * 0.5;
    tap0 + (a * frac + b) * frac
}

/// Per-channel circular sample history with a shared, decrementing cursor.
///
/// Buffers are allocated once in [`DelayLine::new`] and never reallocated.
/// Each channel also keeps the last interpolated output so that effects can
/// feed it back on the next frame.
///
/// # Example
///
/// ```rust
/// use flange_core::{DelayLine, Interpolation};
///
/// let mut line = DelayLine::new(1, 8);
/// for v in [1.0, 2.0, 3.0] {
///     line.rotate();
///     line.write(0, v);
/// }
/// // One sample back, half way to two samples back.
/// assert_eq!(line.tap(0, 1, 0.5, Interpolation::Linear), 1.5);
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffers: [Vec<f64>; MAX_CHANNELS],
    channels: usize,
    len: usize,
    pos: usize,
    last: [f64; MAX_CHANNELS],
}

impl DelayLine {
    /// Allocate `channels` zeroed buffers of `len` samples.
    ///
    /// # Panics
    ///
    /// Panics if `channels` is 0 or exceeds [`MAX_CHANNELS`], or if `len` is 0.
    pub fn new(channels: usize, len: usize) -> Self {
        assert!(
            (1..=MAX_CHANNELS).contains(&channels),
            "Channel count must be 1..={MAX_CHANNELS}"
        );
        assert!(len > 0, "Delay length must be > 0");

        let buffers =
            core::array::from_fn(|c| if c < channels { vec![0.0; len] } else { Vec::new() });

        Self {
            buffers,
            channels,
            len,
            pos: 0,
            last: [0.0; MAX_CHANNELS],
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Buffer length in samples (shared by all channels).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: a delay line holds at least one slot.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current write cursor.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Move the cursor back one slot, wrapping at zero.
    ///
    /// Call once per frame before any channel is written.
    #[inline]
    pub fn rotate(&mut self) {
        self.pos = (self.pos + self.len - 1) % self.len;
    }

    /// Store `value` for `channel` at the cursor.
    #[inline]
    pub fn write(&mut self, channel: usize, value: f64) {
        self.buffers[channel][self.pos] = value;
    }

    /// Read the sample `offset` slots after the cursor (i.e. `offset`
    /// samples ago).
    #[inline]
    pub fn read_at(&self, channel: usize, offset: usize) -> f64 {
        self.buffers[channel][(self.pos + offset) % self.len]
    }

    /// Interpolated read `int_delay + frac` samples back.
    #[inline]
    pub fn tap(&self, channel: usize, int_delay: usize, frac: f64, interp: Interpolation) -> f64 {
        let tap0 = self.read_at(channel, int_delay);
        let tap1 = self.read_at(channel, int_delay + 1);
        match interp {
            Interpolation::Linear => interpolate_linear(tap0, tap1, frac),
            Interpolation::Quadratic => {
                let tap2 = self.read_at(channel, int_delay + 2);
                interpolate_quadratic(tap0, tap1, tap2, frac)
            }
        }
    }

    /// Previous interpolated output of `channel`.
    #[inline]
    pub fn last_output(&self, channel: usize) -> f64 {
        self.last[channel]
    }

    /// Remember `value` as the latest interpolated output of `channel`.
    #[inline]
    pub fn set_last_output(&mut self, channel: usize, value: f64) {
        self.last[channel] = value;
    }

    /// Zero all history and rewind the cursor.
    pub fn clear(&mut self) {
        for buffer in &mut self.buffers {
            buffer.fill(0.0);
        }
        self.last = [0.0; MAX_CHANNELS];
        self.pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(values: &[f64]) -> DelayLine {
        let mut line = DelayLine::new(1, 16);
        for &v in values {
            line.rotate();
            line.write(0, v);
        }
        line
    }

    #[test]
    fn test_rotate_wraps_downwards() {
        let mut line = DelayLine::new(2, 3);
        assert_eq!(line.pos(), 0);
        line.rotate();
        assert_eq!(line.pos(), 2);
        line.rotate();
        line.rotate();
        assert_eq!(line.pos(), 0);
    }

    #[test]
    fn test_read_at_offsets_are_history() {
        let line = filled(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(line.read_at(0, 0), 4.0);
        assert_eq!(line.read_at(0, 1), 3.0);
        assert_eq!(line.read_at(0, 3), 1.0);
        assert_eq!(line.read_at(0, 4), 0.0);
    }

    #[test]
    fn test_channels_share_cursor() {
        let mut line = DelayLine::new(2, 4);
        line.rotate();
        line.write(0, 1.0);
        line.write(1, -1.0);
        line.rotate();
        line.write(0, 2.0);
        line.write(1, -2.0);
        assert_eq!(line.read_at(0, 1), 1.0);
        assert_eq!(line.read_at(1, 1), -1.0);
    }

    #[test]
    fn test_wrap_around_history() {
        let mut line = DelayLine::new(1, 3);
        for v in 1..=7 {
            line.rotate();
            line.write(0, f64::from(v));
        }
        assert_eq!(line.read_at(0, 0), 7.0);
        assert_eq!(line.read_at(0, 2), 5.0);
        assert_eq!(line.read_at(0, 3), 7.0);
    }

    #[test]
    fn test_linear_and_quadratic_agree_at_zero_frac() {
        let line = filled(&[0.3, -0.7, 0.9, 0.1]);
        for d in 0..3 {
            let lin = line.tap(0, d, 0.0, Interpolation::Linear);
            let quad = line.tap(0, d, 0.0, Interpolation::Quadratic);
            assert_eq!(lin, quad);
            assert_eq!(lin, line.read_at(0, d));
        }
    }

    #[test]
    fn test_quadratic_exact_on_parabola() {
        // y = x^2 sampled at x = 0, 1, 2
        let y = interpolate_quadratic(0.0, 1.0, 4.0, 0.5);
        assert!((y - 0.25).abs() < 1e-12);
        let y = interpolate_quadratic(0.0, 1.0, 4.0, 1.5);
        assert!((y - 2.25).abs() < 1e-12);
    }

    #[test]
    fn test_linear_midpoint() {
        assert_eq!(interpolate_linear(2.0, 4.0, 0.5), 3.0);
        assert_eq!(interpolate_linear(2.0, 4.0, 0.0), 2.0);
    }

    #[test]
    fn test_last_output_and_clear() {
        let mut line = filled(&[1.0, 2.0]);
        line.set_last_output(0, 0.75);
        assert_eq!(line.last_output(0), 0.75);
        line.clear();
        assert_eq!(line.last_output(0), 0.0);
        assert_eq!(line.read_at(0, 0), 0.0);
        assert_eq!(line.pos(), 0);
    }

    #[test]
    #[should_panic]
    fn test_too_many_channels_panics() {
        let _line = DelayLine::new(MAX_CHANNELS + 1, 8);
    }

    #[test]
    #[should_panic]
    fn test_zero_length_panics() {
        let _line = DelayLine::new(1, 0);
    }

    #[test]
    fn test_interpolation_keywords() {
        assert_eq!(Interpolation::Linear.keyword(), "linear");
        assert_eq!(Interpolation::Quadratic.to_string(), "quadratic");
        assert_eq!(Interpolation::Quadratic.taps(), 3);
    }
}
