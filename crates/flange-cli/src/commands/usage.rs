//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings

use crate::preset::FlangerPreset;
use clap::Args;
use flange_core::{Interpolation, WaveShape};
use flange_effects::{NUMERIC_PARAMS, NumericParam, ParameterSet, USAGE};

#[derive(Args)]
pub struct UsageArgs {
    /// Print a preset file holding every default instead of the table
    #[arg(long)]
    preset_template: bool,
}

pub fn run(args: UsageArgs) -> anyhow::Result<()> {
    if args.preset_template {
        let preset = FlangerPreset::from_params(Some("default".into()), &ParameterSet::default());
        print!("{}", preset.to_toml()?);
        return Ok(());
    }

    println!("flanger {USAGE}");
    println!();
    println!(
        "  {:8}  {:20}  {:9}  {}",
        "Name", "Range", "Default", "Description"
    );
    println!(
        "  {:8}  {:20}  {:9}  {}",
        "----", "-----", "-------", "-----------"
    );

    // Keyword slots sit between the numeric ones on the command line
    let params = NUMERIC_PARAMS;
    let (before, after) = params.split_at(5);
    for param in before {
        print_numeric(param);
    }
    print_keyword(
        "shape",
        &WaveShape::ALL.map(WaveShape::keyword),
        WaveShape::default().keyword(),
        "LFO wave shape",
    );
    for param in after {
        print_numeric(param);
    }
    print_keyword(
        "interp",
        &Interpolation::ALL.map(Interpolation::keyword),
        Interpolation::default().keyword(),
        "Delay-line interpolation",
    );

    println!();
    println!("Every argument is optional; keywords accept unambiguous prefixes.");
    println!();
    println!("Example usage:");
    println!();
    println!("  flange process input.wav output.wav 0 3 50 71 0.5 tri");
    println!("  flange process input.wav output.wav --preset jet.toml");

    Ok(())
}

fn print_numeric(param: &NumericParam) {
    let range = format!("{} to {} {}", param.min, param.max, param.unit);
    println!(
        "  {:8}  {:20}  {:9}  {}",
        param.name, range, param.default, param.description
    );
}

fn print_keyword(name: &str, keywords: &[&str], default: &str, description: &str) {
    println!(
        "  {:8}  {:20}  {:9}  {}",
        name,
        keywords.join(", "),
        default,
        description
    );
}
