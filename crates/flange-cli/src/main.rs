//! Flange CLI - apply the flanger to WAV files.

mod commands;
mod preset;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flange")]
#[command(author, version, about = "Stereo delay-line flanger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the flanger
    Process(commands::process::ProcessArgs),

    /// Show the flanger's parameters, ranges and defaults
    Usage(commands::usage::UsageArgs),
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so stdout stays clean for reports
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    tracing_log::LogTracer::init().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Usage(args) => commands::usage::run(args),
    }
}
