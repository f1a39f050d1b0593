//! Template discovery and classification.
//!
//! Every file under the template root falls into one of three kinds:
//!
//! | Kind         | Rule                                      | Build action          |
//! |--------------|-------------------------------------------|-----------------------|
//! | `Partial`    | any path component is `partials`          | include/extend only   |
//! | `Renderable` | name ends in `.j2` or `.jinja`            | render to `.html`     |
//! | `RawAsset`   | name ends in `.html`                      | copy byte-for-byte    |
//!
//! Anything else is ignored.

pub mod mapping;

use crate::utils::fs::collect_files;
use std::path::{Component, Path, PathBuf};

/// Directory (or file) name that marks include-only templates.
pub const PARTIALS_DIR: &str = "partials";

/// Suffixes that make a file a renderable template.
const TEMPLATE_SUFFIXES: &[&str] = &[".j2", ".jinja"];

/// Suffix of files copied verbatim.
pub const RAW_ASSET_SUFFIX: &str = ".html";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Renderable,
    Partial,
    RawAsset,
}

impl TemplateKind {
    /// Classify a path relative to the template root.
    ///
    /// Returns `None` for files that are neither templates nor raw assets.
    pub fn classify(rel: &Path) -> Option<Self> {
        let name = rel.file_name()?.to_str()?;
        let is_template = is_template_name(name);
        let is_raw = name.ends_with(RAW_ASSET_SUFFIX);

        if !is_template && !is_raw {
            None
        } else if is_partial(rel) {
            Some(Self::Partial)
        } else if is_template {
            Some(Self::Renderable)
        } else {
            Some(Self::RawAsset)
        }
    }
}

/// True when the file name carries a recognized template suffix.
pub fn is_template_name(name: &str) -> bool {
    TEMPLATE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

fn is_partial(rel: &Path) -> bool {
    rel.components()
        .any(|c| matches!(c, Component::Normal(seg) if seg == PARTIALS_DIR))
}

/// Renderable templates under `root`, relative to it, in sorted walk order.
pub fn discover_templates(root: &Path) -> Vec<PathBuf> {
    discover(root, TemplateKind::Renderable)
}

/// Raw `.html` assets under `root` (partials excluded), relative to it.
pub fn discover_raw_assets(root: &Path) -> Vec<PathBuf> {
    discover(root, TemplateKind::RawAsset)
}

fn discover(root: &Path, kind: TemplateKind) -> Vec<PathBuf> {
    collect_files(root, true)
        .into_iter()
        .filter_map(|path| path.strip_prefix(root).ok().map(Path::to_path_buf))
        .filter(|rel| TemplateKind::classify(rel) == Some(kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_classify() {
        use TemplateKind::*;
        let cases = [
            ("index.html.j2", Some(Renderable)),
            ("blog/post.jinja", Some(Renderable)),
            ("about.html", Some(RawAsset)),
            ("partials/nav.j2", Some(Partial)),
            ("blog/partials/card.html.jinja", Some(Partial)),
            ("partials/footer.html", Some(Partial)),
            ("style.css", None),
            ("partials/readme.md", None),
        ];
        for (path, expected) in cases {
            assert_eq!(TemplateKind::classify(Path::new(path)), expected, "{path}");
        }
    }

    #[test]
    fn test_partials_must_be_a_whole_component() {
        assert_eq!(
            TemplateKind::classify(Path::new("mypartials/page.j2")),
            Some(TemplateKind::Renderable)
        );
        assert_eq!(
            TemplateKind::classify(Path::new("partials_old/page.j2")),
            Some(TemplateKind::Renderable)
        );
    }

    #[test]
    fn test_discover_excludes_partials() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "index.html.j2");
        touch(root, "blog/post.jinja");
        touch(root, "partials/nav.j2");
        touch(root, "blog/partials/card.j2");
        touch(root, "about.html");
        touch(root, "partials/raw.html");
        touch(root, "notes.txt");

        let templates = discover_templates(root);
        assert_eq!(
            templates,
            [PathBuf::from("blog/post.jinja"), PathBuf::from("index.html.j2")]
        );

        let assets = discover_raw_assets(root);
        assert_eq!(assets, [PathBuf::from("about.html")]);
    }

    #[test]
    fn test_discover_missing_root() {
        let dir = TempDir::new().unwrap();
        assert!(discover_templates(&dir.path().join("templates")).is_empty());
        assert!(discover_raw_assets(&dir.path().join("templates")).is_empty());
    }
}
