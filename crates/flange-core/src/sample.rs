//! Stream sample representation and output conversion.
//!
//! Streams carry signed 32-bit full-scale integer samples. Internal
//! processing runs in `f64`; converting back to the stream domain rounds
//! half away from zero and saturates at the representable range.
//!
//! Saturation is never an error. Each saturated sample increments a
//! [`ClipCounter`] so callers can report it after the fact.

/// A single stream sample: signed 32-bit, full scale at `i32::MAX`.
pub type Sample = i32;

/// Smallest representable sample value.
pub const SAMPLE_MIN: Sample = i32::MIN;

/// Largest representable sample value.
pub const SAMPLE_MAX: Sample = i32::MAX;

/// Running count of saturated output samples.
///
/// # Example
///
/// ```rust
/// use flange_core::{ClipCounter, round_clip};
///
/// let mut clips = ClipCounter::new();
/// assert_eq!(round_clip(1.5, &mut clips), 2);
/// assert_eq!(round_clip(1e12, &mut clips), i32::MAX);
/// assert_eq!(clips.count(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClipCounter(u64);

impl ClipCounter {
    /// Create a counter at zero.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Number of samples saturated so far.
    pub const fn count(&self) -> u64 {
        self.0
    }

    /// Record one saturated sample.
    #[inline]
    pub fn record(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Reset to zero.
    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Round to the nearest sample (half away from zero), saturating at the
/// sample range and counting each saturation.
///
/// Values within half a step of the limits saturate too, so that
/// `i32::MAX as f64 + 0.5` already counts as a clip.
#[inline]
pub fn round_clip(value: f64, clips: &mut ClipCounter) -> Sample {
    if value < 0.0 {
        if value <= SAMPLE_MIN as f64 - 0.5 {
            clips.record();
            SAMPLE_MIN
        } else {
            (value - 0.5) as Sample
        }
    } else if value >= SAMPLE_MAX as f64 + 0.5 {
        clips.record();
        SAMPLE_MAX
    } else {
        (value + 0.5) as Sample
    }
}

/// Convert a normalized `f32` (nominally `[-1.0, 1.0]`) to a stream sample.
#[inline]
pub fn from_f32(value: f32, clips: &mut ClipCounter) -> Sample {
    round_clip(f64::from(value) * 2_147_483_648.0, clips)
}

/// Convert a stream sample to a normalized `f32`.
#[inline]
pub fn to_f32(sample: Sample) -> f32 {
    (f64::from(sample) / 2_147_483_648.0) as f32
}

/// Convert a left-justified integer PCM sample of `bits` width to a
/// stream sample.
#[inline]
pub fn from_pcm(value: i32, bits: u16) -> Sample {
    debug_assert!((1..=32).contains(&bits));
    value << (32 - u32::from(bits))
}

/// Reduce a stream sample to `bits` wide integer PCM, rounding to nearest
/// and saturating (counted) at the top of the range.
#[inline]
pub fn to_pcm(sample: Sample, bits: u16, clips: &mut ClipCounter) -> i32 {
    debug_assert!((1..=32).contains(&bits));
    let shift = 32 - u32::from(bits);
    if shift == 0 {
        return sample;
    }
    let half = 1i64 << (shift - 1);
    let max = (1i64 << (bits - 1)) - 1;
    let rounded = (i64::from(sample) + half) >> shift;
    if rounded > max {
        clips.record();
        max as i32
    } else {
        rounded as i32
    }
}
