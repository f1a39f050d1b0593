//! renderall - merge data files, render Jinja templates into a static site.

mod assets;
mod build;
mod cli;
mod config;
mod data;
mod init;
mod render;
mod templates;
mod utils;
mod watch;

use anyhow::{Result, bail};
use build::rebuild;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use init::new_site;
use watch::watch_for_changes_blocking;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Init { name } => new_site(&config, name.is_some()),
        Commands::Build { .. } => {
            let report = rebuild(&config, None);
            let failures = report.failure_count();
            if failures > 0 {
                bail!("build finished with {failures} failed file(s)");
            }
            Ok(())
        }
        Commands::Watch { .. } => {
            rebuild(&config, None);
            watch_for_changes_blocking(&config)
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let config = SiteConfig::load(cli)?;

    if cli.is_init() && config.config_path.exists() {
        bail!("Config file already exists. Remove it manually or init in a different path.");
    }
    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}
