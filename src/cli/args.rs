//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use rsvg_batch::config::Backend;
use std::path::PathBuf;

/// Render SVG sources to raster images after a build
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = "rsvg.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Base output directory (relative to project root)
    #[arg(short = 'o', long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub public: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run every configured conversion once
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// Validate configuration and probe the rasterizer
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },
}

impl Commands {
    pub fn verbose(&self) -> bool {
        match self {
            Self::Build { args } => args.verbose,
            Self::Check { args } => args.verbose,
        }
    }
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Rasterizer to use instead of the configured one
    #[arg(short, long, value_enum)]
    pub backend: Option<Backend>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}
