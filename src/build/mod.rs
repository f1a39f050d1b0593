//! Rebuild coordination.
//!
//! # Architecture
//!
//! ```text
//! rebuild(trigger)
//!     │
//!     ├── ensure output root exists
//!     │
//!     ├── trigger ends in `.html` ──► copy_raw_assets()            (AssetsOnly)
//!     │
//!     └── otherwise ──► load_data() ──► render_all() ──► copy_raw_assets()
//!                                                       (if copy_assets) (Full)
//! ```
//!
//! Per-file failures are logged and recorded in the [`BuildReport`]; nothing
//! aborts the rebuild. Each call starts from scratch: the data context and
//! the template environment live only for the duration of one call.

pub mod report;

pub use report::{BuildReport, RebuildMode};

use crate::{
    assets::copy_raw_assets,
    config::SiteConfig,
    data::load_data,
    log,
    render::{JinjaEngine, RenderOptions, render_all},
    templates::RAW_ASSET_SUFFIX,
    utils::fs::rel_display,
};
use std::{fs, path::Path};

/// Rebuild the site, optionally because `trigger` changed.
pub fn rebuild(config: &SiteConfig, trigger: Option<&Path>) -> BuildReport {
    let build = &config.build;

    if let Some(path) = trigger {
        log!("watch"; "rebuild triggered by {}", rel_display(path, config.get_root()));
    }

    if let Err(e) = fs::create_dir_all(&build.output) {
        log!("error"; "cannot create {}: {e}", build.output.display());
    }

    let report = match trigger {
        Some(path) if is_raw_asset(path) => {
            let mut report = BuildReport::new(RebuildMode::AssetsOnly);
            report.assets = copy_raw_assets(&build.templates, &build.output);
            report
        }
        _ => full_rebuild(config),
    };

    log_summary(&report);
    report
}

fn full_rebuild(config: &SiteConfig) -> BuildReport {
    let build = &config.build;
    let mut report = BuildReport::new(RebuildMode::Full);

    let data = load_data(&build.data, build.data_recursive);
    report.data = data.outcomes;

    let engine = JinjaEngine::new(&build.templates, config.render.strict);
    let options = RenderOptions { minify: build.minify };
    report.pages = render_all(&engine, &data.context, &build.templates, &build.output, options);

    if build.copy_assets {
        report.assets = copy_raw_assets(&build.templates, &build.output);
    }

    report
}

/// A change to a raw `.html` file only needs the copy step.
fn is_raw_asset(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().ends_with(RAW_ASSET_SUFFIX)
}

fn log_summary(report: &BuildReport) {
    let failed = report.failure_count();
    let written = report.written().count();
    match (report.mode, failed) {
        (RebuildMode::AssetsOnly, 0) => log!("build"; "copied {written} raw files"),
        (RebuildMode::Full, 0) => log!("build"; "done, {written} files written"),
        (_, n) => log!("build"; "done, {written} files written, {n} failed"),
    }
}
