//! rsvg-batch - Run SVG conversions the way a host build tool would.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use rsvg_batch::HostConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    rsvg_batch::logger::set_verbose(cli.command.verbose());

    let mut config = HostConfig::load(&cli.config)?;
    if let Some(public) = &cli.public {
        config.set_public_dir(public);
    }

    match &cli.command {
        Commands::Build { args } => cli::build::run_build(&mut config, args).map(|_| ()),
        Commands::Check { .. } => cli::check::run_check(&config),
    }
}
