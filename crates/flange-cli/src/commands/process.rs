//! File-based flanger processing command.

use crate::preset::FlangerPreset;
use clap::Args;
use flange_effects::{FlangerEngine, ParameterSet};
use flange_io::{StreamProcessor, read_wav, read_wav_info, write_wav};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Flanger parameters: [delay depth regen width speed shape phase interp]
    #[arg(value_name = "PARAM", allow_negative_numbers = true)]
    params: Vec<String>,

    /// Preset file (TOML) to take parameters from
    #[arg(short, long, conflicts_with = "params")]
    preset: Option<PathBuf>,

    /// Save the resolved parameters as a preset file (TOML)
    #[arg(long, value_name = "FILE")]
    save_preset: Option<PathBuf>,

    /// Frames per processing block
    #[arg(long, default_value = "1024")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32); defaults to the input's
    #[arg(long, value_parser = parse_bit_depth)]
    bit_depth: Option<u16>,
}

fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("Invalid bit depth: '{}' (expected 16, 24 or 32)", s)),
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let params = match &args.preset {
        Some(path) => {
            let preset = FlangerPreset::load(path)?;
            println!(
                "Loading preset: {}",
                preset.name.as_deref().unwrap_or("(unnamed)")
            );
            preset.to_params()?
        }
        None => ParameterSet::parse(&args.params)?,
    };

    if let Some(path) = &args.save_preset {
        let name = path.file_stem().map(|s| s.to_string_lossy().into_owned());
        FlangerPreset::from_params(name, &params).save(path)?;
        println!("Saved preset to {}", path.display());
    }

    println!("Reading {}...", args.input.display());
    let info = read_wav_info(&args.input)?;
    println!("  {info}");
    let (samples, spec) = read_wav(&args.input)?;

    let pb = ProgressBar::new(info.frames);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut processor = StreamProcessor::new(FlangerEngine::new(params), args.block_size);
    let (output, stats) =
        processor.process_with_progress(&samples, spec.signal_info(), |done| pb.set_position(done))?;

    pb.finish_with_message("done");

    let out_spec = spec.with_bits(args.bit_depth.unwrap_or(spec.bits_per_sample));

    println!("\nWriting {}...", args.output.display());
    let narrowed = write_wav(&args.output, &output, out_spec)?;

    println!("\nStats:");
    println!("  Frames:  {}", stats.frames);
    println!("  Clipped: {}", stats.clips + narrowed);

    if stats.clips > 0 {
        tracing::warn!(clips = stats.clips, "flanger clipped samples; decrease volume?");
    }
    if narrowed > 0 {
        tracing::warn!(clips = narrowed, bits = out_spec.bits_per_sample, "output clipped while narrowing");
    }

    println!("Done!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_depth_parser() {
        assert_eq!(parse_bit_depth("24"), Ok(24));
        assert!(parse_bit_depth("8").is_err());
        assert!(parse_bit_depth("sixteen").is_err());
    }
}
