//! Errors raised while loading or checking `renderall.toml`.

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Writing the site there would feed every build back into the watcher.
    #[error("[build.output] `{}` must not be inside [build.{source_root}]", output.display())]
    OutputInsideSource {
        source_root: &'static str,
        output: PathBuf,
    },
}
