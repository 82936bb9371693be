//! Reading and writing the migration state file.

use std::io;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tracing::info;
use tuf_domain::StateDocument;

use crate::diagnostics::state as codes;
use crate::effects::FileSystem;

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("state file {} already exists", .path.display())]
    AlreadyExists { path: PathBuf },
    #[error("state file {} does not exist", .path.display())]
    Missing { path: PathBuf },
    #[error("state file {} is not valid: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize migration state: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to {action} state file {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StateError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyExists { .. } => codes::ALREADY_EXISTS,
            Self::Missing { .. } => codes::MISSING,
            Self::Corrupt { .. } => codes::CORRUPT,
            Self::Serialize(_) | Self::Io { .. } => codes::IO_FAILURE,
        }
    }

    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::AlreadyExists { .. } => "state_exists",
            Self::Missing { .. } => "state_missing",
            Self::Corrupt { .. } => "state_corrupt",
            Self::Serialize(_) => "state_serialize_failed",
            Self::Io { .. } => "io_failure",
        }
    }

    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::AlreadyExists { .. } => {
                Some("A migration is already initialized here; remove the state file to start over.")
            }
            Self::Missing { .. } => Some("Run `tuf init` first, or point --state at the right file."),
            Self::Corrupt { .. } => Some("Restore the state file or remove it and run `tuf init` again."),
            Self::Serialize(_) | Self::Io { .. } => None,
        }
    }

    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::AlreadyExists { .. } | Self::Missing { .. } | Self::Corrupt { .. }
        )
    }

    #[must_use]
    pub fn details(&self) -> Value {
        let mut details = json!({
            "code": self.code(),
            "reason": self.reason(),
        });
        if let Value::Object(map) = &mut details {
            if let Some(hint) = self.hint() {
                map.insert("hint".into(), json!(hint));
            }
            match self {
                Self::AlreadyExists { path }
                | Self::Missing { path }
                | Self::Corrupt { path, .. }
                | Self::Io { path, .. } => {
                    map.insert("path".into(), json!(path.display().to_string()));
                }
                Self::Serialize(_) => {}
            }
        }
        details
    }
}

/// Writes `document` to `path`, refusing to replace an existing state file.
pub fn write_state(fs: &dyn FileSystem, path: &Path, document: &StateDocument) -> Result<(), StateError> {
    let contents = document.to_json().map_err(StateError::Serialize)?;
    fs.create_new(path, contents.as_bytes())
        .map_err(|source| match source.kind() {
            io::ErrorKind::AlreadyExists => StateError::AlreadyExists {
                path: path.to_path_buf(),
            },
            _ => StateError::Io {
                action: "write",
                path: path.to_path_buf(),
                source,
            },
        })?;
    info!(
        path = %path.display(),
        workspaces = document.workspaces.len(),
        "wrote migration state"
    );
    Ok(())
}

pub fn load_state(fs: &dyn FileSystem, path: &Path) -> Result<StateDocument, StateError> {
    let contents = fs.read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => StateError::Missing {
            path: path.to_path_buf(),
        },
        _ => StateError::Io {
            action: "read",
            path: path.to_path_buf(),
            source,
        },
    })?;
    StateDocument::from_json(&contents).map_err(|source| StateError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{Effects, SystemEffects};
    use std::fs;
    use tempfile::tempdir;
    use tuf_domain::TerraformMetadata;

    #[test]
    fn state_is_written_once_and_read_back() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("tuf.state");
        let effects = SystemEffects::new();
        let document = StateDocument::new(Vec::new(), TerraformMetadata::default());

        write_state(effects.fs(), &path, &document).unwrap();
        assert_eq!(load_state(effects.fs(), &path).unwrap(), document);

        let err = write_state(effects.fs(), &path, &document).unwrap_err();
        assert!(matches!(err, StateError::AlreadyExists { .. }));
        assert_eq!(err.code(), "TUF130");
        assert!(err.is_user_error());
    }

    #[test]
    fn missing_and_corrupt_files_are_distinguished() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("tuf.state");
        let effects = SystemEffects::new();
        assert!(matches!(
            load_state(effects.fs(), &path).unwrap_err(),
            StateError::Missing { .. }
        ));

        fs::write(&path, "{ not json").unwrap();
        let err = load_state(effects.fs(), &path).unwrap_err();
        assert!(matches!(err, StateError::Corrupt { .. }));
        assert_eq!(err.details()["reason"], "state_corrupt");
    }

    #[test]
    fn write_into_missing_directory_is_io_failure() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("tuf.state");
        let document = StateDocument::new(Vec::new(), TerraformMetadata::default());
        let err = write_state(SystemEffects::new().fs(), &path, &document).unwrap_err();
        assert!(matches!(err, StateError::Io { action: "write", .. }), "{err:?}");
        assert!(!err.is_user_error());
    }
}
