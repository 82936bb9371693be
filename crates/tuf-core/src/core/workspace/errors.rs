use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{json, Value};

use crate::diagnostics::{integrity, workspace as codes};

/// A recorded file whose live contents no longer match its digest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileMismatch {
    pub name: String,
    pub expected: String,
    /// `None` when the file has disappeared.
    pub actual: Option<String>,
}

impl fmt::Display for FileMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.actual {
            Some(actual) => write!(
                f,
                "{}: digest changed (expected {}, found {actual})",
                self.name, self.expected
            ),
            None => write!(f, "{}: recorded file is missing", self.name),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CountMismatch {
    pub expected: usize,
    pub found: usize,
}

impl fmt::Display for CountMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "file count changed (expected {}, found {})",
            self.expected, self.found
        )
    }
}

/// Every way a workspace has drifted from its recorded snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("workspace {} has drifted{}", .root.display(), self.indented_problems())]
pub struct IntegrityError {
    pub root: PathBuf,
    pub mismatches: Vec<FileMismatch>,
    pub count: Option<CountMismatch>,
}

impl IntegrityError {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty() && self.count.is_none()
    }

    /// One line per problem, count mismatch last.
    #[must_use]
    pub fn problems(&self) -> Vec<String> {
        self.mismatches
            .iter()
            .map(ToString::to_string)
            .chain(self.count.iter().map(ToString::to_string))
            .collect()
    }

    fn indented_problems(&self) -> String {
        self.problems()
            .iter()
            .map(|problem| format!("\n  {problem}"))
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("{} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },
    #[error("workspace {} is already registered", .path.display())]
    DuplicateWorkspace { path: PathBuf },
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
}

impl WorkspaceError {
    pub(crate) fn io<'a>(
        action: &'static str,
        path: &'a Path,
    ) -> impl FnOnce(io::Error) -> Self + 'a {
        move |source| Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotADirectory { .. } => codes::NOT_A_DIRECTORY,
            Self::DuplicateWorkspace { .. } => codes::DUPLICATE,
            Self::Io { .. } => codes::IO_FAILURE,
            Self::Integrity(_) => integrity::DRIFT,
        }
    }

    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NotADirectory { .. } => "not_a_directory",
            Self::DuplicateWorkspace { .. } => "duplicate_workspace",
            Self::Io { .. } => "io_failure",
            Self::Integrity(_) => "workspace_drift",
        }
    }

    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NotADirectory { .. } => Some("Pass the directory that holds the .tf files."),
            Self::DuplicateWorkspace { .. } => Some("List each workspace only once."),
            Self::Io { .. } => None,
            Self::Integrity(_) => Some(
                "Revert the listed changes, or remove the state file and run `tuf init` again.",
            ),
        }
    }

    #[must_use]
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Io { .. })
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
                Self::NotADirectory { path } | Self::DuplicateWorkspace { path } => {
                    map.insert("path".into(), json!(path.display().to_string()));
                }
                Self::Io {
                    action,
                    path,
                    source,
                } => {
                    map.insert("path".into(), json!(path.display().to_string()));
                    map.insert("action".into(), json!(action));
                    map.insert("error".into(), json!(source.to_string()));
                }
                Self::Integrity(err) => {
                    map.insert("path".into(), json!(err.root.display().to_string()));
                    map.insert("mismatches".into(), json!(err.mismatches));
                    map.insert("count".into(), json!(err.count));
                }
            }
        }
        details
    }
}

/// A workspace that failed validation.
#[derive(Debug)]
pub struct WorkspaceFailure {
    pub id: String,
    pub root: PathBuf,
    pub error: WorkspaceError,
}

/// Failures of a multi-workspace validation, in registration order.
#[derive(Debug, thiserror::Error)]
#[error("{} workspace(s) failed validation", .failures.len())]
pub struct WorkspaceFailures {
    pub failures: Vec<WorkspaceFailure>,
}

impl WorkspaceFailures {
    /// Whether every failure is drift rather than an I/O problem.
    #[must_use]
    pub fn is_drift_only(&self) -> bool {
        self.failures
            .iter()
            .all(|failure| matches!(failure.error, WorkspaceError::Integrity(_)))
    }

    #[must_use]
    pub fn details(&self) -> Value {
        let failures = self
            .failures
            .iter()
            .map(|failure| {
                json!({
                    "id": failure.id,
                    "root": failure.root.display().to_string(),
                    "error": failure.error.to_string(),
                    "details": failure.error.details(),
                })
            })
            .collect::<Vec<_>>();
        json!({
            "code": integrity::DRIFT,
            "reason": "workspace_validation_failed",
            "failures": failures,
        })
    }
}
