use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Extension (without the dot) of the files a workspace tracks.
pub const TERRAFORM_EXTENSION: &str = "tf";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceFile {
    pub name: String,
    pub digest: String,
}

/// A directory of Terraform files and the digests recorded when it was registered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    #[serde(rename = "absolute_path")]
    pub root: PathBuf,
    pub files: Vec<WorkspaceFile>,
}

impl Workspace {
    /// Builds a workspace snapshot from a `{base name -> digest}` mapping.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        root: impl Into<PathBuf>,
        digests: BTreeMap<String, String>,
    ) -> Self {
        let files = digests
            .into_iter()
            .map(|(name, digest)| WorkspaceFile { name, digest })
            .collect();
        Self {
            id: id.into(),
            root: root.into(),
            files,
        }
    }

    #[must_use]
    pub fn file(&self, name: &str) -> Option<&WorkspaceFile> {
        self.files.iter().find(|file| file.name == name)
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Streams a file through SHA-256 and returns the lowercase hex digest.
pub fn compute_file_digest(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0_u8; 64 * 1024];
    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn digest_is_stable_and_content_sensitive() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("hi.tf");
        fs::write(&path, "foo").unwrap();
        let first = compute_file_digest(&path).unwrap();
        assert_eq!(
            first,
            "2c26b46b68ffc68ff99b453c1d30413413422d706483bfa0f98a5e886266e7ae"
        );
        assert_eq!(first, compute_file_digest(&path).unwrap());

        fs::write(&path, "fop").unwrap();
        assert_ne!(first, compute_file_digest(&path).unwrap());
    }

    #[test]
    fn digest_of_missing_file_fails() {
        let tmp = tempdir().unwrap();
        assert!(compute_file_digest(&tmp.path().join("gone.tf")).is_err());
    }

    #[test]
    fn files_are_ordered_by_name() {
        let digests = BTreeMap::from([
            ("main.tf".to_string(), "b".to_string()),
            ("backend.tf".to_string(), "a".to_string()),
        ]);
        let ws = Workspace::new("id", "/tmp/ws", digests);
        let names = ws.files.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["backend.tf", "main.tf"]);
        assert_eq!(ws.file("main.tf").map(|f| f.digest.as_str()), Some("b"));
        assert_eq!(ws.file_count(), 2);
    }
}
