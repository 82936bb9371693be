use std::io;
use std::path::{Path, PathBuf};

use crate::effects::FileSystem;

/// A missing file counts as empty.
pub(crate) fn file_is_empty(fs: &dyn FileSystem, path: &Path) -> io::Result<bool> {
    match fs.metadata(path) {
        Ok(meta) => Ok(meta.len() == 0),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(true),
        Err(err) => Err(err),
    }
}

pub(crate) fn file_ends_with(fs: &dyn FileSystem, path: &Path, suffix: &[u8]) -> io::Result<bool> {
    match fs.read(path) {
        Ok(contents) => Ok(contents.ends_with(suffix)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Absolute form of `path` without resolving symlinks.
pub(crate) fn absolute(path: &Path) -> io::Result<PathBuf> {
    std::path::absolute(path)
}

/// Whether two paths name the same file, comparing canonical forms when both exist.
pub(crate) fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => absolute(a).ok().is_some_and(|a| absolute(b).ok() == Some(a)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{Effects, SystemEffects};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn ends_with_checks_trailing_bytes() {
        let effects = SystemEffects::new();
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("example.txt");
        fs::write(&path, "hello world!\n").unwrap();

        assert!(file_ends_with(effects.fs(), &path, b"\n").unwrap());
        assert!(!file_ends_with(effects.fs(), &path, b"!").unwrap());
        assert!(file_ends_with(effects.fs(), &path, b"hello world!\n").unwrap());
        assert!(!file_ends_with(effects.fs(), &path, b"xhello world!\n").unwrap());

        fs::write(&path, "").unwrap();
        assert!(!file_ends_with(effects.fs(), &path, b"\n").unwrap());
    }

    #[test]
    fn missing_file_is_empty_and_has_no_suffix() {
        let effects = SystemEffects::new();
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("absent.tf");
        assert!(file_is_empty(effects.fs(), &path).unwrap());
        assert!(!file_ends_with(effects.fs(), &path, b"\n").unwrap());

        fs::write(&path, "x").unwrap();
        assert!(!file_is_empty(effects.fs(), &path).unwrap());
    }

    #[test]
    fn same_file_sees_through_relative_segments() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("main.tf");
        fs::write(&path, "").unwrap();
        let dotted = tmp.path().join(".").join("main.tf");
        assert!(same_file(&path, &dotted));
        assert!(!same_file(&path, &tmp.path().join("other.tf")));
    }
}
