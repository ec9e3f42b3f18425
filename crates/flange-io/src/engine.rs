//! Block streaming driver.

use crate::{Error, Result};
use flange_core::{Effect, Sample, SignalInfo};

/// Totals reported after a stream has been processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Frames written to the output.
    pub frames: u64,
    /// Output samples the effect saturated.
    pub clips: u64,
}

/// Runs an effect over a whole buffer in fixed-size blocks.
///
/// Each call to [`process`](Self::process) is one complete effect lifecycle:
/// `reset`, `start`, `flow` per block, then `stop`. A processor can
/// therefore be reused for any number of streams, each starting from clean
/// effect state. A trailing partial frame in the input is dropped.
pub struct StreamProcessor<E> {
    effect: E,
    block_frames: usize,
}

impl<E> StreamProcessor<E>
where
    E: Effect,
    E::Error: std::error::Error + Send + Sync + 'static,
{
    /// Create a processor feeding `block_frames` frames per `flow` call.
    pub fn new(effect: E, block_frames: usize) -> Self {
        Self {
            effect,
            block_frames: block_frames.max(1),
        }
    }

    /// Frames per `flow` call.
    pub fn block_frames(&self) -> usize {
        self.block_frames
    }

    /// The wrapped effect.
    pub fn effect(&self) -> &E {
        &self.effect
    }

    /// Mutable access to the wrapped effect, e.g. to reconfigure it.
    pub fn effect_mut(&mut self) -> &mut E {
        &mut self.effect
    }

    /// Unwrap the effect.
    pub fn into_inner(self) -> E {
        self.effect
    }

    /// Process `input` (interleaved per `signal.channels`) and return the
    /// output buffer with totals.
    pub fn process(&mut self, input: &[Sample], signal: SignalInfo) -> Result<(Vec<Sample>, StreamStats)> {
        self.process_with_progress(input, signal, |_| {})
    }

    /// Like [`process`](Self::process), calling `progress` with the number
    /// of frames completed after every block.
    pub fn process_with_progress<F>(
        &mut self,
        input: &[Sample],
        signal: SignalInfo,
        mut progress: F,
    ) -> Result<(Vec<Sample>, StreamStats)>
    where
        F: FnMut(u64),
    {
        let channels = signal.channels;
        if channels == 0 {
            return Err(Error::UnsupportedFormat("0 channels".into()));
        }
        self.effect.reset().map_err(Error::effect)?;
        self.effect.start(signal).map_err(Error::effect)?;

        let frames = input.len() / channels;
        let mut output = vec![0; frames * channels];
        let block = self.block_frames * channels;

        tracing::info!(
            frames,
            channels,
            sample_rate = signal.sample_rate,
            block_frames = self.block_frames,
            "stream start"
        );

        let mut done = 0u64;
        for (in_block, out_block) in input[..output.len()]
            .chunks(block)
            .zip(output.chunks_mut(block))
        {
            match self.effect.flow(in_block, out_block) {
                Ok(n) => done += (n.produced / channels) as u64,
                Err(err) => {
                    self.effect.stop();
                    return Err(Error::effect(err));
                }
            }
            progress(done);
        }

        let stats = StreamStats {
            frames: done,
            clips: self.effect.clips(),
        };
        self.effect.stop();

        tracing::info!(frames = stats.frames, clips = stats.clips, "stream done");
        Ok((output, stats))
    }
}
