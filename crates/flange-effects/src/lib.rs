//! Flange Effects - Modulated-delay flanger engine
//!
//! This crate turns the primitives of `flange-core` into a complete effect:
//!
//! - [`ParameterSet`] - Eight positional parameters with defaults, range
//!   checks and a builder
//! - [`FlangerEngine`] - Start/flow/stop engine implementing
//!   [`flange_core::Effect`] for 1 to 4 interleaved channels
//!
//! ## Example
//!
//! ```rust
//! use flange_core::{Effect, SignalInfo};
//! use flange_effects::{FlangerEngine, ParameterSet};
//!
//! // delay 1ms, depth 3ms, regen -50%, triangle sweep
//! let params = ParameterSet::parse(&["1", "3", "-50", "tri"]).unwrap();
//! let mut flanger = FlangerEngine::new(params);
//! flanger.start(SignalInfo::new(48000.0, 2)).unwrap();
//!
//! let input = vec![0; 512];
//! let mut output = vec![0; 512];
//! flanger.flow(&input, &mut output).unwrap();
//! flanger.stop();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod error;
pub mod flanger;
pub mod params;

pub use error::{ConfigError, FlangerError};
pub use flanger::{EngineState, FlangerEngine};
pub use params::{
    NUMERIC_PARAMS, NumericParam, ParameterSet, ParameterSetBuilder, USAGE, parse_interpolation,
    parse_shape,
};
