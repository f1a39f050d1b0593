//! The template-rendering capability.
//!
//! [`TemplateEngine`] is the seam between the build pipeline and the template
//! language. [`JinjaEngine`] implements it with minijinja, loading templates
//! by their `/`-separated path relative to the template root so that
//! `{% include %}` and `{% extends %}` can reach partials.

use crate::data::DataContext;
use minijinja::{AutoEscape, Environment, UndefinedBehavior, path_loader};
use std::{io, path::Path};
use thiserror::Error;

/// Why a single template produced no output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Problem inside the template: syntax, undefined value in strict mode,
    /// missing include, failing filter.
    #[error("{0}")]
    Template(#[from] minijinja::Error),

    /// Output directory or file could not be written.
    #[error("{0}")]
    Io(#[from] io::Error),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

/// Renders a template identified by its root-relative name.
pub trait TemplateEngine {
    fn render(&self, name: &str, context: &DataContext) -> Result<String, RenderError>;
}

/// minijinja-backed engine. Build a new one per full rebuild: it reads
/// templates lazily and keeps them for its own lifetime.
pub struct JinjaEngine {
    env: Environment<'static>,
}

impl JinjaEngine {
    pub fn new(templates_root: &Path, strict: bool) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(templates_root));
        // output is written exactly as the template produces it
        env.set_auto_escape_callback(|_| AutoEscape::None);
        if strict {
            env.set_undefined_behavior(UndefinedBehavior::Strict);
        }
        Self { env }
    }
}

impl TemplateEngine for JinjaEngine {
    fn render(&self, name: &str, context: &DataContext) -> Result<String, RenderError> {
        let template = self.env.get_template(name)?;
        Ok(template.render(context)?)
    }
}
