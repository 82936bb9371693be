//! Recording and re-checking the contents of Terraform workspaces.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use tuf_domain::Workspace;
use uuid::Uuid;

use crate::core::fs::absolute;
use crate::effects::Effects;

mod errors;

pub use errors::{
    CountMismatch, FileMismatch, IntegrityError, WorkspaceError, WorkspaceFailure,
    WorkspaceFailures,
};

/// Snapshots every `.tf` file directly under `root` under a fresh identity.
pub fn register_workspace(effects: &dyn Effects, root: &Path) -> Result<Workspace, WorkspaceError> {
    let root = absolute(root).map_err(WorkspaceError::io("resolve", root))?;
    let meta = effects
        .fs()
        .metadata(&root)
        .map_err(WorkspaceError::io("inspect", &root))?;
    if !meta.is_dir() {
        return Err(WorkspaceError::NotADirectory { path: root });
    }
    let digests = live_digests(effects, &root)?;
    let workspace = Workspace::new(Uuid::new_v4().to_string(), root, digests);
    info!(
        id = %workspace.id,
        root = %workspace.root.display(),
        files = workspace.file_count(),
        "registered workspace"
    );
    Ok(workspace)
}

/// Compares the live contents of `workspace.root` against its snapshot.
///
/// Drift comes back as [`WorkspaceError::Integrity`]; the snapshot itself is
/// never touched.
pub fn validate_workspace(effects: &dyn Effects, workspace: &Workspace) -> Result<(), WorkspaceError> {
    let live = live_digests(effects, &workspace.root)?;
    let mismatches = workspace
        .files
        .iter()
        .filter_map(|file| {
            let actual = live.get(&file.name);
            (actual != Some(&file.digest)).then(|| FileMismatch {
                name: file.name.clone(),
                expected: file.digest.clone(),
                actual: actual.cloned(),
            })
        })
        .collect::<Vec<_>>();
    let count = (live.len() != workspace.file_count()).then_some(CountMismatch {
        expected: workspace.file_count(),
        found: live.len(),
    });
    let report = IntegrityError {
        root: workspace.root.clone(),
        mismatches,
        count,
    };
    if report.is_clean() {
        debug!(id = %workspace.id, root = %workspace.root.display(), "workspace unchanged");
        return Ok(());
    }
    warn!(
        id = %workspace.id,
        root = %workspace.root.display(),
        problems = report.problems().len(),
        "workspace drifted"
    );
    Err(report.into())
}

fn live_digests(effects: &dyn Effects, root: &Path) -> Result<BTreeMap<String, String>, WorkspaceError> {
    let files = effects
        .lister()
        .list(root)
        .map_err(|source| match source.kind() {
            io::ErrorKind::NotADirectory => WorkspaceError::NotADirectory {
                path: root.to_path_buf(),
            },
            _ => WorkspaceError::Io {
                action: "list",
                path: root.to_path_buf(),
                source,
            },
        })?;
    let mut digests = BTreeMap::new();
    for path in files {
        // non-UTF-8 names are keyed lossily so they still take part in drift checks
        let Some(name) = path.file_name().map(|name| name.to_string_lossy().into_owned()) else {
            continue;
        };
        let digest = effects
            .digest()
            .digest(&path)
            .map_err(WorkspaceError::io("digest", &path))?;
        digests.insert(name, digest);
    }
    Ok(digests)
}

/// The workspaces taking part in one migration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkspaceSet {
    workspaces: Vec<Workspace>,
}

impl WorkspaceSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the directory at `path` unless it is already part of the set.
    pub fn add_workspace(
        &mut self,
        effects: &dyn Effects,
        path: &Path,
    ) -> Result<&Workspace, WorkspaceError> {
        let root = absolute(path).map_err(WorkspaceError::io("resolve", path))?;
        if self.contains(&root) {
            return Err(WorkspaceError::DuplicateWorkspace { path: root });
        }
        let workspace = register_workspace(effects, &root)?;
        self.workspaces.push(workspace);
        Ok(&self.workspaces[self.workspaces.len() - 1])
    }

    #[must_use]
    pub fn contains(&self, root: &Path) -> bool {
        self.workspaces.iter().any(|workspace| workspace.root == root)
    }

    /// Validates every workspace, collecting failures instead of stopping at the first.
    pub fn validate(&self, effects: &dyn Effects) -> Result<(), WorkspaceFailures> {
        let failures = self
            .workspaces
            .iter()
            .filter_map(|workspace| {
                validate_workspace(effects, workspace)
                    .err()
                    .map(|error| WorkspaceFailure {
                        id: workspace.id.clone(),
                        root: workspace.root.clone(),
                        error,
                    })
            })
            .collect::<Vec<_>>();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(WorkspaceFailures { failures })
        }
    }

    #[must_use]
    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    #[must_use]
    pub fn roots(&self) -> Vec<PathBuf> {
        self.workspaces
            .iter()
            .map(|workspace| workspace.root.clone())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }

    #[must_use]
    pub fn into_workspaces(self) -> Vec<Workspace> {
        self.workspaces
    }
}

impl From<Vec<Workspace>> for WorkspaceSet {
    fn from(workspaces: Vec<Workspace>) -> Self {
        Self { workspaces }
    }
}
