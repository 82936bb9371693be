use std::path::PathBuf;

use anyhow::Result;
use serde_json::json;
use tuf_domain::{StateDocument, TerraformMetadata, DEFAULT_STATE_FILE_NAME};

use super::error_outcome;
use crate::config::context::CommandContext;
use crate::core::state::{write_state, StateError};
use crate::core::workspace::WorkspaceSet;
use crate::diagnostics::commands;
use crate::outcome::ExecutionOutcome;

#[derive(Clone, Debug)]
pub struct InitRequest {
    pub workspaces: Vec<PathBuf>,
    pub state_pull_command: String,
    pub state_file_name: String,
}

impl Default for InitRequest {
    fn default() -> Self {
        Self {
            workspaces: Vec::new(),
            state_pull_command: String::new(),
            state_file_name: DEFAULT_STATE_FILE_NAME.to_string(),
        }
    }
}

/// Registers every workspace and records them in a new state file.
///
/// # Errors
/// Returns an error only for failures that are not tied to a specific input.
pub fn init_migration(ctx: &CommandContext, request: &InitRequest) -> Result<ExecutionOutcome> {
    if request.workspaces.is_empty() {
        return Ok(ExecutionOutcome::user_error(
            "at least one workspace is required",
            json!({
                "code": commands::INIT,
                "reason": "missing_workspace",
                "hint": "pass --workspace <DIR> once per workspace, or a comma-separated list",
            }),
        ));
    }
    if request.state_file_name.trim().is_empty() {
        return Ok(ExecutionOutcome::user_error(
            "the Terraform state file name must not be empty",
            json!({
                "code": commands::INIT,
                "reason": "missing_state_file_name",
                "hint": "pass --terraform-state-file with the file your pull command writes",
            }),
        ));
    }

    let state_path = ctx.config().state_file();
    if ctx.fs().metadata(state_path).is_ok() {
        let err = StateError::AlreadyExists {
            path: state_path.clone(),
        };
        return Ok(ExecutionOutcome::user_error(err.to_string(), err.details()));
    }

    let mut set = WorkspaceSet::new();
    for path in &request.workspaces {
        if let Err(err) = set.add_workspace(ctx.effects(), path) {
            return Ok(error_outcome(
                format!("failed to add workspace {}: {err}", path.display()),
                err.is_user_error(),
                err.details(),
            ));
        }
    }

    let summary = set
        .workspaces()
        .iter()
        .map(|workspace| {
            json!({
                "id": workspace.id,
                "root": workspace.root.display().to_string(),
                "files": workspace.file_count(),
            })
        })
        .collect::<Vec<_>>();
    let document = StateDocument::new(
        set.into_workspaces(),
        TerraformMetadata {
            state_pull_command: request.state_pull_command.clone(),
            state_file_name: request.state_file_name.clone(),
        },
    );
    if let Err(err) = write_state(ctx.fs(), state_path, &document) {
        return Ok(error_outcome(err.to_string(), err.is_user_error(), err.details()));
    }

    Ok(ExecutionOutcome::success(
        format!(
            "initialized migration across {} workspace(s)",
            document.workspaces.len()
        ),
        json!({
            "state_file": state_path.display().to_string(),
            "workspaces": summary,
            "terraform": document.terraform,
        }),
    ))
}
