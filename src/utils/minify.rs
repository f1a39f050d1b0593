//! HTML minification for rendered output.
//!
//! Only rendered templates whose destination is an `.html` file are touched;
//! raw assets are copied byte-for-byte and never pass through here.

use std::{borrow::Cow, path::Path};

/// Minify `content` when enabled and `dest` is an HTML file.
///
/// Returns `Cow::Borrowed` when nothing was changed.
pub fn minify_rendered<'a>(dest: &Path, content: &'a [u8], enabled: bool) -> Cow<'a, [u8]> {
    let is_html = dest.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
    if enabled && is_html {
        Cow::Owned(minify_html_inner(content))
    } else {
        Cow::Borrowed(content)
    }
}

fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    minify_html::minify(html, &cfg)
}
