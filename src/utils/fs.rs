//! Filesystem helpers shared by the loader, renderer and asset copier.

use crate::log;
use std::{
    env, fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Collect every file under `dir`, sorted by path.
///
/// Returns an empty list when `dir` does not exist. With `recursive` off only
/// the direct children of `dir` are considered. Symlinks are followed; entries
/// that cannot be read are logged and skipped.
pub fn collect_files(dir: &Path, recursive: bool) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let walker = WalkDir::new(dir).follow_links(true).sort_by_file_name();
    let walker = if recursive { walker } else { walker.max_depth(1) };

    walker
        .into_iter()
        .filter_map(|entry| {
            entry
                .map_err(|e| log!("error"; "walk {}: {e}", dir.display()))
                .ok()
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Normalize a path to absolute form for reliable comparison.
///
/// Paths that exist are canonicalized; others are joined onto the current
/// directory.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Replace `dest` with `content` in one step.
///
/// The bytes go to a temporary file next to `dest` which is then renamed over
/// it, so readers never observe a half-written file and a failed write leaves
/// the previous version in place. Parent directories are created as needed.
pub fn write_atomic(dest: &Path, content: &[u8]) -> io::Result<()> {
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    // temp files are created owner-only; output is meant to be served
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file().set_permissions(fs::Permissions::from_mode(0o644))?;
    }
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}

/// Path of `path` relative to `root` with forward slashes, for log lines.
pub fn rel_display(path: &Path, root: &Path) -> String {
    slash_path(path.strip_prefix(root).unwrap_or(path))
}

/// Join the components of a relative path with `/` on every platform.
pub fn slash_path(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_files_sorted_and_shallow() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join(".DS_Store"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.json"), "{}").unwrap();

        let shallow = collect_files(dir.path(), false);
        let names: Vec<_> = shallow
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["a.json", "b.json"]);

        let deep = collect_files(dir.path(), true);
        assert_eq!(deep.len(), 3);
        assert!(deep.iter().any(|p| p.ends_with("nested/c.json")));
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_files_follows_symlinks() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        let shared = dir.path().join("shared");
        fs::create_dir(&shared).unwrap();
        fs::write(shared.join("page.j2"), "x").unwrap();
        fs::create_dir(shared.join("blog")).unwrap();
        fs::write(shared.join("blog/post.j2"), "x").unwrap();

        let root = dir.path().join("templates");
        fs::create_dir(&root).unwrap();
        symlink(shared.join("page.j2"), root.join("page.j2")).unwrap();
        symlink(shared.join("blog"), root.join("blog")).unwrap();

        let files = collect_files(&root, true);
        assert_eq!(files, [root.join("blog/post.j2"), root.join("page.j2")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_files_skips_broken_entries() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        symlink(dir.path().join("missing.json"), dir.path().join("b.json")).unwrap();

        let files = collect_files(dir.path(), false);
        assert_eq!(files, [dir.path().join("a.json")]);
    }

    #[test]
    fn test_collect_files_missing_dir() {
        let dir = TempDir::new().unwrap();
        assert!(collect_files(&dir.path().join("nope"), true).is_empty());
    }

    #[test]
    fn test_write_atomic_creates_parents_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("a/b/index.html");

        write_atomic(&dest, b"first").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "first");

        write_atomic(&dest, b"second").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "second");

        // no temp files left behind
        let leftovers = fs::read_dir(dest.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_rel_display() {
        let root = Path::new("/proj/templates");
        assert_eq!(rel_display(Path::new("/proj/templates/blog/post.j2"), root), "blog/post.j2");
        assert_eq!(rel_display(Path::new("/proj/templates/index.html.j2"), root), "index.html.j2");
    }

    #[test]
    fn test_normalize_path_relative() {
        assert!(normalize_path(Path::new("relative/file.txt")).is_absolute());
    }
}
