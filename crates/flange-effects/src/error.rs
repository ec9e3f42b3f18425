//! Error types for flanger configuration and lifecycle.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::string::String;
use flange_core::MAX_CHANNELS;
use thiserror::Error;

/// A parameter value could not be accepted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Numeric parameter outside its allowed range.
    #[error("parameter '{param}' must be between {min} and {max} (got {value})")]
    OutOfRange {
        /// Parameter name.
        param: &'static str,
        /// Rejected value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// Token starts like a number but carries trailing junk.
    #[error("parameter '{param}' is not a valid number: '{token}'")]
    InvalidNumber {
        /// Parameter name.
        param: &'static str,
        /// Offending token.
        token: String,
    },

    /// Keyword parameter with an unrecognized or ambiguous value.
    #[error("unknown {param} '{token}' (expected one of: {expected})")]
    UnknownKeyword {
        /// Parameter name.
        param: &'static str,
        /// Offending token.
        token: String,
        /// Accepted keywords, `|`-separated.
        expected: &'static str,
    },

    /// The sweep period rounds to zero samples at this sample rate.
    #[error("speed {speed} Hz is too fast for {sample_rate} Hz: LFO period rounds to 0 samples")]
    DegenerateLfo {
        /// Sweep speed in Hz.
        speed: f64,
        /// Sample rate in Hz.
        sample_rate: f64,
    },

    /// Sample rate is not a positive finite number.
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(f64),
}

/// Errors raised by the flanger engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlangerError {
    /// Invalid parameter or signal configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unconsumed arguments after all positional parameters.
    #[error("unexpected argument(s): {trailing}\nusage: {usage}")]
    Usage {
        /// The leftover arguments, space-separated.
        trailing: String,
        /// Usage line for the effect.
        usage: &'static str,
    },

    /// Channel count outside `1..=MAX_CHANNELS`.
    #[error("can not operate with {channels} channels (supported: 1 to {max})", max = MAX_CHANNELS)]
    ChannelLimit {
        /// Requested channel count.
        channels: usize,
    },

    /// Operation not valid in the engine's current state.
    #[error("cannot {operation} while {state}")]
    InvalidState {
        /// Attempted operation.
        operation: &'static str,
        /// Current engine state.
        state: crate::flanger::EngineState,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flanger::EngineState;
    use alloc::string::ToString;

    #[test]
    fn out_of_range_display() {
        let err = ConfigError::OutOfRange {
            param: "regen",
            value: 120.0,
            min: -95.0,
            max: 95.0,
        };
        assert_eq!(
            err.to_string(),
            "parameter 'regen' must be between -95 and 95 (got 120)"
        );
    }

    #[test]
    fn unknown_keyword_display() {
        let err = ConfigError::UnknownKeyword {
            param: "shape",
            token: "square".into(),
            expected: "sine|triangle",
        };
        assert_eq!(
            err.to_string(),
            "unknown shape 'square' (expected one of: sine|triangle)"
        );
    }

    #[test]
    fn channel_limit_display() {
        let err = FlangerError::ChannelLimit { channels: 5 };
        assert_eq!(
            err.to_string(),
            "can not operate with 5 channels (supported: 1 to 4)"
        );
    }

    #[test]
    fn config_error_is_transparent() {
        let inner = ConfigError::InvalidSampleRate(0.0);
        let msg = inner.to_string();
        let err: FlangerError = inner.into();
        assert_eq!(err.to_string(), msg);
    }

    #[test]
    fn invalid_state_display() {
        let err = FlangerError::InvalidState {
            operation: "flow",
            state: EngineState::Stopped,
        };
        assert_eq!(err.to_string(), "cannot flow while stopped");
    }
}
