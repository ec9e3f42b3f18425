//! Block-streaming effect trait.
//!
//! The [`Effect`] trait describes an effect as a lifecycle rather than a
//! pure function: it is started against a signal format, fed interleaved
//! blocks through [`Effect::flow`], and stopped to release its buffers.
//!
//! ## Design Decisions
//!
//! - **Interleaved integer blocks**: `flow` takes interleaved [`Sample`]
//!   slices so the effect sees every channel of a frame together.
//!
//! - **Whole frames only**: an effect consumes and produces the same number
//!   of samples per call, always a multiple of the channel count.
//!
//! - **No allocations in `flow`**: all storage is sized in `start`.

use crate::sample::Sample;

/// Format of the signal an effect is started against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalInfo {
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Interleaved channel count.
    pub channels: usize,
}

impl SignalInfo {
    /// Create a signal description.
    pub const fn new(sample_rate: f64, channels: usize) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }
}

/// Samples taken from the input and written to the output by one
/// [`Effect::flow`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowCount {
    /// Input samples consumed.
    pub consumed: usize,
    /// Output samples produced.
    pub produced: usize,
}

impl FlowCount {
    /// Count for `frames` whole frames of `channels` samples on both sides.
    pub const fn frames(frames: usize, channels: usize) -> Self {
        Self {
            consumed: frames * channels,
            produced: frames * channels,
        }
    }
}

/// Number of whole frames shared by an input of `input` samples and an
/// output capacity of `output` samples.
#[inline]
pub fn whole_frames(input: usize, output: usize, channels: usize) -> usize {
    input.min(output) / channels
}

/// Core trait for streaming effects.
///
/// # Example
///
/// ```rust
/// use flange_core::{Effect, FlowCount, Sample, SignalInfo, whole_frames};
///
/// struct Invert {
///     channels: usize,
/// }
///
/// impl Effect for Invert {
///     type Error = core::convert::Infallible;
///
///     fn start(&mut self, signal: SignalInfo) -> Result<(), Self::Error> {
///         self.channels = signal.channels;
///         Ok(())
///     }
///
///     fn flow(&mut self, input: &[Sample], output: &mut [Sample]) -> Result<FlowCount, Self::Error> {
///         let frames = whole_frames(input.len(), output.len(), self.channels);
///         let n = frames * self.channels;
///         for (o, i) in output[..n].iter_mut().zip(&input[..n]) {
///             *o = i.saturating_neg();
///         }
///         Ok(FlowCount::frames(frames, self.channels))
///     }
///
///     fn stop(&mut self) {}
/// }
///
/// let mut fx = Invert { channels: 0 };
/// fx.start(SignalInfo::new(48000.0, 2)).unwrap();
/// let mut out = [0; 4];
/// let n = fx.flow(&[1, 2, 3], &mut out).unwrap();
/// assert_eq!(n.produced, 2);
/// assert_eq!(out[..2], [-1, -2]);
/// ```
pub trait Effect {
    /// Error raised by `start` or by `flow` outside a started state.
    type Error;

    /// Allocate state for `signal`. Failures are terminal for this start.
    fn start(&mut self, signal: SignalInfo) -> Result<(), Self::Error>;

    /// Process `min(input, output)` whole frames of interleaved samples.
    fn flow(&mut self, input: &[Sample], output: &mut [Sample]) -> Result<FlowCount, Self::Error>;

    /// Release buffers allocated by `start`.
    fn stop(&mut self);

    /// Make a stopped effect startable again with its current settings.
    ///
    /// Effects that need configuration re-run between runs do it here.
    /// Fails if the effect is still started.
    fn reset(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Output samples saturated since `start`.
    fn clips(&self) -> u64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_frames_truncates_partial() {
        assert_eq!(whole_frames(7, 100, 2), 3);
        assert_eq!(whole_frames(100, 9, 4), 2);
        assert_eq!(whole_frames(0, 9, 1), 0);
    }

    #[test]
    fn test_flow_count_frames() {
        let n = FlowCount::frames(3, 2);
        assert_eq!(n.consumed, 6);
        assert_eq!(n.produced, 6);
    }
}
