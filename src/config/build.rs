//! `[build]` section configuration.
//!
//! Source and output roots plus the switches that shape a full rebuild.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in renderall.toml.
///
/// # Example
/// ```toml
/// [build]
/// data = "data"            # JSON / YAML files merged into the context
/// templates = "templates"  # .j2 / .jinja templates, partials, raw .html
/// output = "site"          # rendered site
/// minify = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root", skip_serializing_if = "Option::is_none")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Data directory (`*.json`, `*.yaml`).
    #[serde(default = "defaults::build::data")]
    #[educe(Default = defaults::build::data())]
    pub data: PathBuf,

    /// Template directory.
    #[serde(default = "defaults::build::templates")]
    #[educe(Default = defaults::build::templates())]
    pub templates: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Also load data files from sub-directories of `data`.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub data_recursive: bool,

    /// Copy raw `.html` files during full rebuilds, not only when one changes.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub copy_assets: bool,

    /// Minify rendered HTML.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub minify: bool,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_build_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.build.data, PathBuf::from("data"));
        assert_eq!(config.build.templates, PathBuf::from("templates"));
        assert_eq!(config.build.output, PathBuf::from("site"));
        assert!(!config.build.data_recursive);
        assert!(!config.build.copy_assets);
        assert!(!config.build.minify);
    }

    #[test]
    fn test_build_config_override() {
        let config: SiteConfig = toml::from_str(
            r#"
            [build]
            output = "build"
            data_recursive = true
            copy_assets = true
        "#,
        )
        .unwrap();

        assert_eq!(config.build.output, PathBuf::from("build"));
        assert!(config.build.data_recursive);
        assert!(config.build.copy_assets);
        // untouched fields keep their defaults
        assert_eq!(config.build.templates, PathBuf::from("templates"));
    }

    #[test]
    fn test_unknown_field_rejection() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
            [build]
            content = "content"
        "#,
        );
        assert!(result.is_err());
    }
}
