//! Render every discovered template into the output tree.
//!
//! ```text
//! discover_templates(templates/)
//!     │  blog/post.jinja, index.html.j2, ...
//!     ▼
//! engine.render(name, context) ──► minify (optional) ──► write_atomic(site/...)
//!     │
//!     └── any failure: log it, keep the old output file, go on with the next
//! ```

pub mod engine;

pub use engine::{JinjaEngine, RenderError, TemplateEngine};

use crate::{
    build::report::Outcome,
    data::DataContext,
    log,
    templates::{discover_templates, mapping::output_path},
    utils::{
        fs::{rel_display, slash_path, write_atomic},
        minify::minify_rendered,
    },
};
use std::path::{Path, PathBuf};

/// Render-time switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub minify: bool,
}

/// Render all renderable templates under `templates_root` into `output_root`.
///
/// Returns one outcome per template, in discovery order.
pub fn render_all<E: TemplateEngine + ?Sized>(
    engine: &E,
    context: &DataContext,
    templates_root: &Path,
    output_root: &Path,
    options: RenderOptions,
) -> Vec<Outcome<RenderError>> {
    discover_templates(templates_root)
        .iter()
        .map(|rel| {
            let source = templates_root.join(rel);
            let dest = output_path(rel, output_root);
            match render_one(engine, context, rel, dest.as_deref(), options) {
                Ok(dest) => {
                    log!("render"; "{} -> {}", slash_path(rel), rel_display(&dest, output_root));
                    Outcome::ok(&source, Some(dest))
                }
                Err(e) => {
                    log_failure(rel, &e);
                    Outcome::failed(&source, dest, e)
                }
            }
        })
        .collect()
}

fn render_one<E: TemplateEngine + ?Sized>(
    engine: &E,
    context: &DataContext,
    rel: &Path,
    dest: Option<&Path>,
    options: RenderOptions,
) -> Result<PathBuf, RenderError> {
    let dest = dest.ok_or_else(|| RenderError::Other("no output mapping".into()))?;
    if rel.to_str().is_none() {
        return Err(RenderError::Other("template path is not valid UTF-8".into()));
    }

    let rendered = engine.render(&slash_path(rel), context)?;
    let bytes = minify_rendered(dest, rendered.as_bytes(), options.minify);
    write_atomic(dest, &bytes)?;
    Ok(dest.to_path_buf())
}

fn log_failure(rel: &Path, err: &RenderError) {
    let name = slash_path(rel);
    match err {
        RenderError::Template(e) => log!("error"; "template {name}: {e}"),
        RenderError::Io(e) => log!("error"; "write {name}: {e}"),
        RenderError::Other(e) => log!("error"; "unexpected {name}: {e}"),
    }
}
