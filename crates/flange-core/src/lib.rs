//! Flange Core - DSP primitives for the flange delay-line flanger
//!
//! This crate provides the building blocks of a modulated delay effect,
//! designed for streaming use with zero allocation once started.
//!
//! # Core Abstractions
//!
//! ## Streaming
//!
//! - [`Effect`] - Start/flow/stop lifecycle over interleaved sample blocks
//! - [`Sample`] - 32-bit full-scale stream sample, with [`round_clip`] and a
//!   [`ClipCounter`] for saturation
//!
//! ## Delay & Modulation
//!
//! - [`DelayLine`] - Multi-channel circular history with a shared cursor
//! - [`Interpolation`] - Linear (2-tap) or quadratic (3-tap) fractional reads
//! - [`LfoTable`] - Precomputed sweep with per-channel phase rotation
//! - [`generate_wave_table`] / [`WaveTableGenerator`] - Sine and triangle tables
//!
//! ## Gain
//!
//! - [`GainBalance`] - Dry/wet normalisation and feedback compensation
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build for embedded targets:
//!
//! ```toml
//! [dependencies]
//! flange-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod delay;
pub mod effect;
pub mod gain;
pub mod lfo;
pub mod sample;
pub mod wavetable;

pub use delay::{DelayLine, Interpolation, MAX_CHANNELS, interpolate_linear, interpolate_quadratic};
pub use effect::{Effect, FlowCount, SignalInfo, whole_frames};
pub use gain::GainBalance;
pub use lfo::{LfoTable, SWEEP_START_PHASE};
pub use sample::{
    ClipCounter, SAMPLE_MAX, SAMPLE_MIN, Sample, from_f32, from_pcm, round_clip, to_f32, to_pcm,
};
pub use wavetable::{
    StandardWaveTable, WaveShape, WaveTableGenerator, WaveTableSample, generate_wave_table,
};
