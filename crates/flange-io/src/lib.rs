//! WAV I/O and block streaming for the flange flanger.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for interleaved,
//!   full-scale 32-bit stream samples
//! - **Block streaming**: [`StreamProcessor`] drives any
//!   [`flange_core::Effect`] through start, block-wise flow and stop
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flange_effects::{FlangerEngine, ParameterSet};
//! use flange_io::{StreamProcessor, read_wav, write_wav};
//!
//! # fn main() -> flange_io::Result<()> {
//! let (samples, spec) = read_wav("input.wav")?;
//!
//! let flanger = FlangerEngine::new(ParameterSet::default());
//! let mut processor = StreamProcessor::new(flanger, 1024);
//! let (processed, stats) = processor.process(&samples, spec.signal_info())?;
//!
//! write_wav("output.wav", &processed, spec)?;
//! println!("{} frames, {} clipped", stats.frames, stats.clips);
//! # Ok(())
//! # }
//! ```

mod engine;
mod wav;

pub use engine::{StreamProcessor, StreamStats};
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The effect refused to start or process.
    #[error("Effect error: {0}")]
    Effect(Box<dyn std::error::Error + Send + Sync>),

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an effect's own error type.
    pub fn effect<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Effect(Box::new(err))
    }
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
