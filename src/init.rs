//! Site initialization module.
//!
//! Scaffolds a project that builds out of the box: config file, one data
//! file, a base layout partial and an index page extending it.

use crate::{config::SiteConfig, log, utils::fs::rel_display};
use anyhow::{Context, Result, bail};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore"];

const SITE_JSON: &str = r#"{
  "title": "My Site",
  "description": "Rendered with renderall"
}
"#;

const BASE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{% block title %}{{ title }}{% endblock %}</title>
</head>
<body>
{% block content %}{% endblock %}
</body>
</html>
"#;

const INDEX_TEMPLATE: &str = r#"{% extends "partials/base.j2" %}
{% block content %}
<h1>{{ title }}</h1>
<p>{{ description }}</p>
{% endblock %}
"#;

/// Create a new site with default structure.
///
/// Without a `name` the root must be empty. Existing files are never
/// overwritten: if any scaffold file is already present nothing is written.
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `renderall init <SITE_NAME>` to create in a subdirectory."
        );
    }

    let files = scaffold_files(config)?;
    if let Some((path, _)) = files.iter().find(|(path, _)| path.exists()) {
        bail!(
            "Path `{}` already exists. Try `renderall init <SITE_NAME>` instead.",
            path.display()
        );
    }

    for (path, content) in &files {
        write_new(path, content)?;
        log!("init"; "created {}", rel_display(path, root));
    }
    init_ignored_files(root, &config.build.output)?;

    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Every file the scaffold writes, with its content.
fn scaffold_files(config: &SiteConfig) -> Result<Vec<(PathBuf, String)>> {
    let default_config = toml::to_string_pretty(&SiteConfig::default())?;
    let templates = &config.build.templates;

    Ok(vec![
        (config.config_path.clone(), default_config),
        (config.build.data.join("site.json"), SITE_JSON.to_owned()),
        (templates.join("partials/base.j2"), BASE_TEMPLATE.to_owned()),
        (templates.join("index.html.j2"), INDEX_TEMPLATE.to_owned()),
    ])
}

fn write_new(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Ignore the output root in version control
fn init_ignored_files(root: &Path, output: &Path) -> Result<()> {
    let content = format!("/{}/\n", rel_display(output, root));

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}
