//! Stereo-capable flanger over a precomputed LFO table.
//!
//! A flanger mixes the input with a copy of itself delayed by a few
//! milliseconds, where the delay sweeps periodically. The moving comb
//! filter this creates gives the characteristic "jet plane" sweep.
//!
//! ## Signal flow
//!
//! ```text
//!          +--( regen )----------------+
//!          v                           |
//!  in --> (+) --> [ delay : depth ] ---+--> ( width ) --> (+) --> out
//!   |               ^ speed/shape/phase                   ^
//!   +-----------------------------------------------------+
//! ```
//!
//! ## Lifecycle
//!
//! | State | Entered by | Allows |
//! |-------|------------|--------|
//! | Unconfigured | [`FlangerEngine::new`], [`FlangerEngine::reconfigure`], `reset` | `start`, `reconfigure`, `stop` (no-op) |
//! | Ready | `start` | `flow`, `stop` |
//! | Streaming | first `flow` | `flow`, `stop` |
//! | Stopped | `stop` | `reconfigure`, `reset`, `stop` (no-op) |
//!
//! Streaming cannot fail: once started, `flow` always succeeds and output
//! overflow is absorbed by saturation, counted in [`FlangerEngine::clips`].

use crate::error::{ConfigError, FlangerError};
use crate::params::ParameterSet;
use flange_core::{
    ClipCounter, DelayLine, Effect, FlowCount, GainBalance, LfoTable, MAX_CHANNELS, Sample,
    SignalInfo, StandardWaveTable, WaveTableGenerator, round_clip, whole_frames,
};

/// Observable lifecycle state of a [`FlangerEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Parameters set, no buffers allocated.
    Unconfigured,
    /// Buffers allocated, nothing processed yet.
    Ready,
    /// At least one block processed.
    Streaming,
    /// Buffers released; needs `reconfigure` or `reset` before the next `start`.
    Stopped,
}

impl core::fmt::Display for EngineState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            EngineState::Unconfigured => "unconfigured",
            EngineState::Ready => "ready",
            EngineState::Streaming => "streaming",
            EngineState::Stopped => "stopped",
        })
    }
}

/// Storage allocated by `start`.
#[derive(Debug, Clone)]
struct Buffers {
    delay: DelayLine,
    lfo: LfoTable,
}

#[derive(Debug, Clone)]
enum Stage {
    Unconfigured,
    Active { buffers: Buffers, streaming: bool },
    Stopped,
}

/// Multi-channel flanger engine.
///
/// Up to [`MAX_CHANNELS`] interleaved channels share one delay cursor and
/// one LFO cursor; each channel reads the LFO at its own phase rotation.
///
/// # Example
///
/// ```rust
/// use flange_core::{Effect, SignalInfo};
/// use flange_effects::{FlangerEngine, ParameterSet};
///
/// let params = ParameterSet::parse(&["0", "2", "50"]).unwrap();
/// let mut flanger = FlangerEngine::new(params);
/// flanger.start(SignalInfo::new(44100.0, 2)).unwrap();
/// assert_eq!(flanger.delay_len(), Some(90));
///
/// let input = [1 << 20; 64];
/// let mut output = [0; 64];
/// let n = flanger.flow(&input, &mut output).unwrap();
/// assert_eq!(n.produced, 64);
///
/// flanger.stop();
/// ```
#[derive(Debug, Clone)]
pub struct FlangerEngine<G = StandardWaveTable> {
    params: ParameterSet,
    gains: GainBalance,
    generator: G,
    stage: Stage,
    clips: ClipCounter,
}

impl FlangerEngine {
    /// Create an unconfigured engine using the built-in sine/triangle tables.
    pub fn new(params: ParameterSet) -> Self {
        Self::with_generator(params, StandardWaveTable)
    }
}

impl Default for FlangerEngine {
    fn default() -> Self {
        Self::new(ParameterSet::default())
    }
}

impl<G: WaveTableGenerator> FlangerEngine<G> {
    /// Create an unconfigured engine that fills its LFO table with `generator`.
    pub fn with_generator(params: ParameterSet, generator: G) -> Self {
        Self {
            params,
            gains: params.gains(),
            generator,
            stage: Stage::Unconfigured,
            clips: ClipCounter::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        match self.stage {
            Stage::Unconfigured => EngineState::Unconfigured,
            Stage::Active { streaming: false, .. } => EngineState::Ready,
            Stage::Active { streaming: true, .. } => EngineState::Streaming,
            Stage::Stopped => EngineState::Stopped,
        }
    }

    /// Configured parameters.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Derived dry/wet/feedback coefficients.
    pub fn gains(&self) -> GainBalance {
        self.gains
    }

    /// Output samples saturated since `start`.
    pub fn clips(&self) -> u64 {
        self.clips.count()
    }

    /// Delay buffer length, once started.
    pub fn delay_len(&self) -> Option<usize> {
        self.buffers().map(|b| b.delay.len())
    }

    /// Delay write cursor, once started.
    pub fn delay_pos(&self) -> Option<usize> {
        self.buffers().map(|b| b.delay.pos())
    }

    /// LFO table length, once started.
    pub fn lfo_len(&self) -> Option<usize> {
        self.buffers().map(|b| b.lfo.len())
    }

    /// LFO read cursor, once started.
    pub fn lfo_pos(&self) -> Option<usize> {
        self.buffers().map(|b| b.lfo.pos())
    }

    /// LFO table index `channel` reads on the next frame, once started.
    pub fn lfo_read_index(&self, channel: usize) -> Option<usize> {
        self.buffers().map(|b| b.lfo.read_index(channel))
    }

    /// Swept delay in samples `channel` uses on the next frame, once started.
    pub fn current_delay(&self, channel: usize) -> Option<f32> {
        self.buffers().map(|b| b.lfo.read(channel))
    }

    /// Replace the parameters of an unconfigured or stopped engine.
    pub fn reconfigure(&mut self, params: ParameterSet) -> Result<(), FlangerError> {
        match self.stage {
            Stage::Unconfigured | Stage::Stopped => {
                self.params = params;
                self.gains = params.gains();
                self.stage = Stage::Unconfigured;
                Ok(())
            }
            Stage::Active { .. } => Err(FlangerError::InvalidState {
                operation: "reconfigure",
                state: self.state(),
            }),
        }
    }

    fn buffers(&self) -> Option<&Buffers> {
        match &self.stage {
            Stage::Active { buffers, .. } => Some(buffers),
            _ => None,
        }
    }
}

impl<G: WaveTableGenerator> Effect for FlangerEngine<G> {
    type Error = FlangerError;

    fn start(&mut self, signal: SignalInfo) -> Result<(), FlangerError> {
        if !matches!(self.stage, Stage::Unconfigured) {
            return Err(FlangerError::InvalidState {
                operation: "start",
                state: self.state(),
            });
        }

        let channels = signal.channels;
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(FlangerError::ChannelLimit { channels });
        }

        let sample_rate = signal.sample_rate;
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate(sample_rate).into());
        }

        let lfo_len = self.params.lfo_len(sample_rate);
        if lfo_len == 0 {
            return Err(ConfigError::DegenerateLfo {
                speed: self.params.speed_hz(),
                sample_rate,
            }
            .into());
        }

        let delay_len = self.params.delay_len(sample_rate);
        let min_delay = self.params.min_delay_samples(sample_rate) as f64;
        let max_delay = (delay_len - 2) as f64;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            in_gain = self.gains.in_gain,
            feedback_gain = self.gains.feedback_gain,
            mix_gain = self.gains.mix_gain,
            delay_len,
            lfo_len,
            "flanger start"
        );

        let delay = DelayLine::new(channels, delay_len);
        let lfo = LfoTable::build(
            &self.generator,
            self.params.shape(),
            lfo_len,
            min_delay,
            max_delay,
            self.gains.channel_phase,
            channels,
        );

        self.clips.reset();
        self.stage = Stage::Active {
            buffers: Buffers { delay, lfo },
            streaming: false,
        };
        Ok(())
    }

    fn flow(&mut self, input: &[Sample], output: &mut [Sample]) -> Result<FlowCount, FlangerError> {
        let state = self.state();
        let Stage::Active { buffers, streaming } = &mut self.stage else {
            return Err(FlangerError::InvalidState {
                operation: "flow",
                state,
            });
        };
        *streaming = true;

        let Buffers { delay, lfo } = buffers;
        let channels = delay.channels();
        let frames = whole_frames(input.len(), output.len(), channels);
        let interp = self.params.interpolation();
        let gains = self.gains;

        for (in_frame, out_frame) in input
            .chunks_exact(channels)
            .zip(output.chunks_exact_mut(channels))
            .take(frames)
        {
            delay.rotate();
            for (c, (&sample, out)) in in_frame.iter().zip(out_frame.iter_mut()).enumerate() {
                let swept = f64::from(lfo.read(c));
                let int_delay = libm::floor(swept);
                let frac = swept - int_delay;

                let dry = f64::from(sample);
                delay.write(c, dry + delay.last_output(c) * gains.feedback_gain);

                let delayed = delay.tap(c, int_delay as usize, frac, interp);
                delay.set_last_output(c, delayed);

                *out = round_clip(dry * gains.in_gain + delayed * gains.mix_gain, &mut self.clips);
            }
            lfo.advance();
        }

        Ok(FlowCount::frames(frames, channels))
    }

    fn stop(&mut self) {
        if matches!(self.stage, Stage::Active { .. }) {
            #[cfg(feature = "tracing")]
            tracing::debug!(clips = self.clips.count(), "flanger stop");

            self.stage = Stage::Stopped;
            self.clips.reset();
        }
    }

    /// Reconfigure with the parameters already held.
    fn reset(&mut self) -> Result<(), FlangerError> {
        self.reconfigure(self.params)
    }

    fn clips(&self) -> u64 {
        self.clips.count()
    }
}
