//! Per-file results of a rebuild.

use std::path::{Path, PathBuf};

/// Result of processing one source file.
#[derive(Debug)]
pub struct Outcome<E> {
    /// Source file (data file, template or raw asset).
    pub source: PathBuf,
    /// Destination under the output root, for render and copy steps.
    pub dest: Option<PathBuf>,
    pub result: Result<(), E>,
}

impl<E> Outcome<E> {
    pub fn ok(source: &Path, dest: Option<PathBuf>) -> Self {
        Self { source: source.to_path_buf(), dest, result: Ok(()) }
    }

    pub fn failed(source: &Path, dest: Option<PathBuf>, err: E) -> Self {
        Self { source: source.to_path_buf(), dest, result: Err(err) }
    }

    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Which path a rebuild took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildMode {
    /// Data load, template render (and raw-asset copy when enabled).
    Full,
    /// A raw `.html` file changed: copy raw assets only.
    AssetsOnly,
}

/// Everything one `rebuild()` call did, file by file.
#[derive(Debug)]
pub struct BuildReport {
    pub mode: RebuildMode,
    pub data: Vec<Outcome<crate::data::DataError>>,
    pub pages: Vec<Outcome<crate::render::RenderError>>,
    pub assets: Vec<Outcome<std::io::Error>>,
}

impl BuildReport {
    pub const fn new(mode: RebuildMode) -> Self {
        Self { mode, data: Vec::new(), pages: Vec::new(), assets: Vec::new() }
    }

    /// Number of files that failed in any step.
    pub fn failure_count(&self) -> usize {
        let failed = |ok: bool| usize::from(!ok);
        self.data.iter().map(|o| failed(o.is_ok())).sum::<usize>()
            + self.pages.iter().map(|o| failed(o.is_ok())).sum::<usize>()
            + self.assets.iter().map(|o| failed(o.is_ok())).sum::<usize>()
    }

    /// Destinations written successfully by the render and copy steps.
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        let pages = self.pages.iter().filter(|o| o.is_ok()).filter_map(|o| o.dest.as_deref());
        let assets = self.assets.iter().filter(|o| o.is_ok()).filter_map(|o| o.dest.as_deref());
        pages.chain(assets)
    }
}
