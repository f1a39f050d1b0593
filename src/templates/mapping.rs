//! Template path to output path mapping.
//!
//! Rules are tried in order against the file name and the first matching
//! suffix is replaced, so `index.html.j2` becomes `index.html` (not
//! `index.html.html`). Directory components are kept as they are.

use std::path::{Path, PathBuf};

/// `(suffix, replacement)`, most specific first.
const SUFFIX_RULES: &[(&str, &str)] = &[
    (".html.j2", ".html"),
    (".j2", ".html"),
    (".html.jinja", ".html"),
    (".jinja", ".html"),
];

/// Output file name for a template file name, or `None` if it is not a
/// template.
pub fn output_name(name: &str) -> Option<String> {
    SUFFIX_RULES.iter().find_map(|(suffix, replacement)| {
        name.strip_suffix(suffix)
            .map(|stem| format!("{stem}{replacement}"))
    })
}

/// Destination of the renderable template `rel` under `output_root`.
pub fn output_path(rel: &Path, output_root: &Path) -> Option<PathBuf> {
    let name = rel.file_name()?.to_str()?;
    let mapped = output_name(name)?;
    Some(output_root.join(rel.with_file_name(mapped)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_name_rules() {
        assert_eq!(output_name("index.html.j2").as_deref(), Some("index.html"));
        assert_eq!(output_name("page.j2").as_deref(), Some("page.html"));
        assert_eq!(output_name("note.jinja").as_deref(), Some("note.html"));
        assert_eq!(output_name("note.html.jinja").as_deref(), Some("note.html"));
    }

    #[test]
    fn test_output_name_other_inner_suffix() {
        // only the template suffix is replaced
        assert_eq!(output_name("feed.xml.j2").as_deref(), Some("feed.xml.html"));
        assert_eq!(output_name("about.html"), None);
    }

    #[test]
    fn test_output_path_keeps_directories() {
        let out = Path::new("/site");
        assert_eq!(
            output_path(Path::new("blog/2024/post.html.j2"), out),
            Some(PathBuf::from("/site/blog/2024/post.html"))
        );
        // directory names that look like suffixes are never rewritten
        assert_eq!(
            output_path(Path::new("docs.j2/page.jinja"), out),
            Some(PathBuf::from("/site/docs.j2/page.html"))
        );
    }
}
