//! Cartograph CLI - Command-line interface for map and icon extraction

pub mod commands;
pub mod progress;

use std::path::PathBuf;

use clap::{Args, Parser};
use commands::Commands;

#[derive(Parser)]
#[command(name = "cartograph")]
#[command(about = "Cartograph: continent maps and POI icons from WoW 3.3.5a MPQs", long_about = None)]
struct Cli {
    #[command(flatten)]
    globals: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Extraction config (TOML); the bundled 3.3.5a config is used if omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output directory (overrides the config's output_dir)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Run the Cartograph CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute(&cli.globals)?;

    Ok(())
}
