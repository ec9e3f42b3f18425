//! WAV file reading and writing.
//!
//! Samples cross this boundary as interleaved full-scale `i32` stream
//! samples. Integer PCM is left-justified on read and rounded back down on
//! write; 32-bit files are written as IEEE float.

use crate::{Error, Result};
use flange_core::{ClipCounter, Sample, SignalInfo, from_f32, from_pcm, to_f32, to_pcm};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Sample encoding of a WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Integer PCM.
    Pcm,
    /// IEEE float.
    IeeeFloat,
}

impl core::fmt::Display for WavFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            WavFormat::Pcm => "PCM",
            WavFormat::IeeeFloat => "float",
        })
    }
}

/// Header summary of a WAV file, read without decoding samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavInfo {
    /// Layout of the stored samples.
    pub spec: WavSpec,
    /// Sample encoding.
    pub format: WavFormat,
    /// Whole frames in the file.
    pub frames: u64,
}

impl WavInfo {
    /// Playing time at the file's sample rate.
    pub fn duration_secs(&self) -> f64 {
        self.frames as f64 / f64::from(self.spec.sample_rate)
    }
}

impl core::fmt::Display for WavInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} frames, {} channel(s), {} Hz, {}-bit {}, {:.2}s",
            self.frames,
            self.spec.channels,
            self.spec.sample_rate,
            self.spec.bits_per_sample,
            self.format,
            self.duration_secs()
        )
    }
}

/// Read the header of a WAV file.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let format = match reader.spec().sample_format {
        SampleFormat::Int => WavFormat::Pcm,
        SampleFormat::Float => WavFormat::IeeeFloat,
    };
    // hound counts samples across all channels
    let frames = u64::from(reader.len()) / u64::from(spec.channels.max(1));
    Ok(WavInfo {
        spec,
        format,
        frames,
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of interleaved channels.
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (8, 16, 24 or 32).
    pub bits_per_sample: u16,
}

impl WavSpec {
    /// Signal description for starting an effect on this file's samples.
    pub fn signal_info(&self) -> SignalInfo {
        SignalInfo::new(f64::from(self.sample_rate), usize::from(self.channels))
    }

    /// Same format with a different bit depth.
    pub fn with_bits(self, bits_per_sample: u16) -> Self {
        Self {
            bits_per_sample,
            ..self
        }
    }

    fn validate(&self) -> Result<()> {
        if self.channels == 0 {
            return Err(Error::UnsupportedFormat("0 channels".into()));
        }
        if !matches!(self.bits_per_sample, 8 | 16 | 24 | 32) {
            return Err(Error::UnsupportedFormat(format!(
                "{}-bit samples",
                self.bits_per_sample
            )));
        }
        Ok(())
    }
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file as interleaved stream samples along with its spec.
///
/// Integer PCM of any width is left-justified to 32 bits. Float PCM is
/// scaled by 2^31; values at or beyond full scale saturate.
///
/// # Example
/// ```ignore
/// let (samples, spec) = read_wav("input.wav")?;
/// println!("{} frames at {} Hz", samples.len() / spec.channels as usize, spec.sample_rate);
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<Sample>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let format = reader.spec().sample_format;
    let spec = WavSpec::from(reader.spec());

    let samples = match format {
        SampleFormat::Float => {
            if spec.bits_per_sample != 32 {
                return Err(Error::UnsupportedFormat(format!(
                    "{}-bit float samples",
                    spec.bits_per_sample
                )));
            }
            let mut clips = ClipCounter::new();
            let samples = reader
                .into_samples::<f32>()
                .map(|s| s.map(|v| from_f32(v, &mut clips)))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            if clips.count() > 0 {
                tracing::warn!(clips = clips.count(), "float input exceeded full scale");
            }
            samples
        }
        SampleFormat::Int => {
            spec.validate()?;
            let bits = spec.bits_per_sample;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| from_pcm(v, bits)))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    tracing::debug!(
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        samples = samples.len(),
        "read_wav"
    );

    Ok((samples, spec))
}

/// Write interleaved stream samples to a WAV file.
///
/// 32-bit output is IEEE float; narrower output is rounded integer PCM.
/// Returns the number of samples that saturated while narrowing.
///
/// # Example
/// ```ignore
/// let samples = vec![0; 2 * 44100]; // 1 second of stereo silence
/// write_wav("output.wav", &samples, WavSpec::default())?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[Sample], spec: WavSpec) -> Result<u64> {
    spec.validate()?;
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;
    let mut clips = ClipCounter::new();

    if spec.bits_per_sample == 32 {
        for &sample in samples {
            writer.write_sample(to_f32(sample))?;
        }
    } else {
        for &sample in samples {
            writer.write_sample(to_pcm(sample, spec.bits_per_sample, &mut clips))?;
        }
    }

    writer.finalize()?;
    Ok(clips.count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_roundtrip_i16_stereo() {
        let samples: Vec<Sample> = (0..1000).map(|i| ((i * 37) % 65536 - 32768) << 16).collect();
        let spec = WavSpec::default();

        let file = NamedTempFile::new().unwrap();
        let clips = write_wav(file.path(), &samples, spec).unwrap();
        assert_eq!(clips, 0);

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec, spec);
        assert_eq!(loaded, samples);
    }

    #[test]
    fn test_i24_is_left_justified() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 24,
        };
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[1 << 8, -(1 << 8)], spec).unwrap();

        let (loaded, _) = read_wav(file.path()).unwrap();
        assert_eq!(loaded, vec![1 << 8, -(1 << 8)]);
    }

    #[test]
    fn test_float_output_for_32_bit() {
        let spec = WavSpec::default().with_bits(32);
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[1 << 30, -(1 << 30)], spec).unwrap();

        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.format, WavFormat::IeeeFloat);
        assert_eq!(info.frames, 1);
        assert_eq!(info.spec.bits_per_sample, 32);

        let (loaded, _) = read_wav(file.path()).unwrap();
        assert_eq!(loaded, vec![1 << 30, -(1 << 30)]);
    }

    #[test]
    fn test_narrowing_counts_clips() {
        let spec = WavSpec::default();
        let file = NamedTempFile::new().unwrap();
        let clips = write_wav(file.path(), &[i32::MAX, 0, i32::MIN, i32::MAX], spec).unwrap();
        assert_eq!(clips, 2);
    }

    #[test]
    fn test_rejects_unsupported_depth() {
        let spec = WavSpec::default().with_bits(12);
        let file = NamedTempFile::new().unwrap();
        assert!(matches!(
            write_wav(file.path(), &[0], spec),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_info_summary() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 24,
        };
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[0; 4000], spec).unwrap();

        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.spec, spec);
        assert_eq!(info.format, WavFormat::Pcm);
        assert_eq!(info.duration_secs(), 0.5);
        assert_eq!(
            info.to_string(),
            "4000 frames, 1 channel(s), 8000 Hz, 24-bit PCM, 0.50s"
        );
    }

    #[test]
    fn test_signal_info() {
        let info = WavSpec::default().signal_info();
        assert_eq!(info, SignalInfo::new(44100.0, 2));
    }
}
