//! Site configuration management for `renderall.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[build]`   | Data, template and output roots; build switches|
//! | `[render]`  | Template evaluation (strict undefined)         |
//! | `[watch]`   | Change watcher (debounce window)               |
//!
//! The file is optional: without it every field takes its default and the
//! project uses `data/`, `templates/` and `site/` under the root.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "build"
//! minify = true
//!
//! [render]
//! strict = true
//!
//! [watch]
//! debounce = 2
//! ```

mod build;
pub mod defaults;
mod error;
mod render;
mod watch;

pub use error::ConfigError;

use build::BuildConfig;
use render::RenderConfig;
use watch::WatchConfig;

use crate::{cli::Cli, utils::fs::normalize_path};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing renderall.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Source/output roots and build switches
    #[serde(default)]
    pub build: BuildConfig,

    /// Template evaluation settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Change watcher settings
    #[serde(default)]
    pub watch: WatchConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Build the effective configuration for a CLI invocation.
    ///
    /// Reads `<root>/<config>` when it exists, falls back to defaults
    /// otherwise, then applies CLI overrides and resolves every path against
    /// the root.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.is_file() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let base = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            crate::cli::Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        Self::update_option(&mut self.build.data, cli.data.as_ref());
        Self::update_option(&mut self.build.templates, cli.templates.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        if let Some(args) = cli.render_args() {
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            Self::update_option(&mut self.render.strict, args.strict.as_ref());
        }
        if let crate::cli::Commands::Watch { debounce, .. } = &cli.command {
            Self::update_option(&mut self.watch.debounce, debounce.as_ref());
        }

        self.update_path_with_root(&root);
        self.config_path = normalize_path(&self.get_root().join(&cli.config));
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve the data, template and output roots against `root` and
    /// normalize them to absolute paths.
    pub fn update_path_with_root(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.set_root(&root);

        self.build.data = normalize_path(&root.join(&self.build.data));
        self.build.templates = normalize_path(&root.join(&self.build.templates));
        self.build.output = normalize_path(&root.join(&self.build.output));
    }

    /// Reject layouts where writing output would feed back into the sources.
    pub fn validate(&self) -> Result<()> {
        let output = &self.build.output;

        for (source_root, path) in [("templates", &self.build.templates), ("data", &self.build.data)] {
            if output.starts_with(path) {
                bail!(ConfigError::OutputInsideSource { source_root, output: output.clone() });
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
