//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// renderall: data + jinja templates -> static site
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Data directory path (relative to project root)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Template directory path (relative to project root)
    #[arg(short, long)]
    pub templates: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name (default: renderall.toml)
    #[arg(short = 'C', long, default_value = "renderall.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared render arguments for Build and Watch commands
#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Minify rendered html
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Treat undefined template variables as errors
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub strict: Option<bool>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create renderall.toml, data/ and templates/ with a starter page
    Init {
        /// the name(path) of site directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Render the whole site once
    Build {
        #[command(flatten)]
        render_args: RenderArgs,
    },

    /// Render the whole site, then re-render on every change until Ctrl+C
    Watch {
        #[command(flatten)]
        render_args: RenderArgs,

        /// Seconds during which repeated events on the same file are ignored
        #[arg(long)]
        debounce: Option<u64>,
    },
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }

    /// Render arguments of the current command, if it renders.
    pub fn render_args(&self) -> Option<&RenderArgs> {
        match &self.command {
            Commands::Build { render_args } | Commands::Watch { render_args, .. } => {
                Some(render_args)
            }
            Commands::Init { .. } => None,
        }
    }
}
