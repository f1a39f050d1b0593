//! Data loading: merge every data file into one template context.
//!
//! # Merge Order
//!
//! ```text
//! data/
//! ├── a.json   ─┐
//! ├── b.JSON   ─┤ 1. JSON files, sorted by path
//! ├── a.yaml   ─┤
//! └── z.YAML   ─┘ 2. YAML files, sorted by path
//!                      │
//!                      ▼
//!            context.extend(top-level keys)   (later file wins, no deep merge)
//! ```
//!
//! A file that cannot be read or parsed is logged and skipped. A missing data
//! directory is an empty context.

mod error;

pub use error::DataError;

use crate::{
    build::report::Outcome,
    log,
    utils::fs::{collect_files, rel_display},
};
use serde_json::{Map, Value};
use std::{fs, path::Path};

/// Merged template context.
pub type DataContext = Map<String, Value>;

/// Data file format, detected from the extension (case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Json,
    Yaml,
}

impl DataKind {
    /// Merge precedence: JSON first, YAML second.
    const MERGE_ORDER: [Self; 2] = [Self::Json, Self::Yaml];

    pub fn detect(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("yaml") {
            Some(Self::Yaml)
        } else {
            None
        }
    }

    fn parse(self, text: &str) -> Result<Value, DataError> {
        Ok(match self {
            Self::Json => serde_json::from_str(text)?,
            Self::Yaml => serde_yaml::from_str(text)?,
        })
    }
}

/// Result of [`load_data`]: the merged context plus one outcome per file.
#[derive(Debug, Default)]
pub struct DataLoad {
    pub context: DataContext,
    pub outcomes: Vec<Outcome<DataError>>,
}

/// Load and merge every JSON then YAML file in `dir`.
pub fn load_data(dir: &Path, recursive: bool) -> DataLoad {
    let files = collect_files(dir, recursive);
    let mut load = DataLoad::default();

    for kind in DataKind::MERGE_ORDER {
        for path in files.iter().filter(|p| DataKind::detect(p) == Some(kind)) {
            let name = rel_display(path, dir);
            match read_mapping(path, kind) {
                Ok(mapping) => {
                    load.context.extend(mapping);
                    log!("data"; "loaded {name}");
                    load.outcomes.push(Outcome::ok(path, None));
                }
                Err(e) => {
                    log!("error"; "data {name}: {e}");
                    load.outcomes.push(Outcome::failed(path, None, e));
                }
            }
        }
    }

    load
}

/// Parse one file and require a mapping at the top level.
fn read_mapping(path: &Path, kind: DataKind) -> Result<DataContext, DataError> {
    let text = fs::read_to_string(path)?;
    match kind.parse(&text)? {
        Value::Object(map) => Ok(map),
        other => Err(DataError::NotMapping(value_kind(&other))),
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_detect_kind_case_insensitive() {
        assert_eq!(DataKind::detect(Path::new("a.json")), Some(DataKind::Json));
        assert_eq!(DataKind::detect(Path::new("a.JSON")), Some(DataKind::Json));
        assert_eq!(DataKind::detect(Path::new("a.Yaml")), Some(DataKind::Yaml));
        assert_eq!(DataKind::detect(Path::new("a.yml")), None);
        assert_eq!(DataKind::detect(Path::new("a.toml")), None);
        assert_eq!(DataKind::detect(Path::new("json")), None);
    }

    #[test]
    fn test_later_file_overrides_earlier() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.json", r#"{"title": "Home"}"#);
        write(dir.path(), "b.json", r#"{"title": "Override", "author": "Jane"}"#);

        let load = load_data(dir.path(), false);

        assert_eq!(
            Value::Object(load.context),
            json!({"title": "Override", "author": "Jane"})
        );
        assert_eq!(load.outcomes.len(), 2);
        assert!(load.outcomes.iter().all(Outcome::is_ok));
    }

    #[test]
    fn test_yaml_merged_after_json() {
        let dir = TempDir::new().unwrap();
        // "a.yaml" sorts before "z.json" but YAML still wins
        write(dir.path(), "a.yaml", "title: From YAML\nnav:\n  - home\n");
        write(dir.path(), "z.json", r#"{"title": "From JSON", "nav": {"x": 1}}"#);

        let load = load_data(dir.path(), false);

        assert_eq!(load.context["title"], json!("From YAML"));
        // shallow merge: nested value replaced wholesale
        assert_eq!(load.context["nav"], json!(["home"]));
        assert!(load.outcomes[0].source.ends_with("z.json"));
        assert!(load.outcomes[1].source.ends_with("a.yaml"));
    }

    #[test]
    fn test_bad_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.json", r#"{"site": "ok"}"#);
        write(dir.path(), "b.json", r#"{"broken": "#);
        write(dir.path(), "c.yaml", "- just\n- a list\n");
        write(dir.path(), "d.yaml", "extra: true\n");

        let load = load_data(dir.path(), false);

        assert_eq!(Value::Object(load.context), json!({"site": "ok", "extra": true}));
        let failed: Vec<_> = load.outcomes.iter().filter(|o| !o.is_ok()).collect();
        assert_eq!(failed.len(), 2);
        assert!(matches!(failed[0].result, Err(DataError::Json(_))));
        assert!(matches!(failed[1].result, Err(DataError::NotMapping("a sequence"))));
    }

    #[test]
    fn test_empty_yaml_is_a_failure() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "empty.yaml", "");

        let load = load_data(dir.path(), false);

        assert!(load.context.is_empty());
        assert_eq!(load.outcomes.len(), 1);
        assert!(!load.outcomes[0].is_ok());
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let load = load_data(&dir.path().join("data"), false);

        assert!(load.context.is_empty());
        assert!(load.outcomes.is_empty());
    }

    #[test]
    fn test_recursive_flag() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "top.json", r#"{"top": 1}"#);
        write(dir.path(), "nested/deep.json", r#"{"deep": 2}"#);
        write(dir.path(), "notes.txt", "ignored");

        assert!(!load_data(dir.path(), false).context.contains_key("deep"));

        let load = load_data(dir.path(), true);
        assert_eq!(Value::Object(load.context), json!({"top": 1, "deep": 2}));
    }
}
