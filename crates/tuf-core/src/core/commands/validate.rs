use anyhow::Result;
use serde_json::json;

use super::error_outcome;
use crate::config::context::CommandContext;
use crate::core::state::load_state;
use crate::core::workspace::WorkspaceSet;
use crate::outcome::ExecutionOutcome;

#[derive(Clone, Debug, Default)]
pub struct ValidateRequest;

/// Checks every recorded workspace against its snapshot.
///
/// # Errors
/// Never fails outright; state and drift problems become outcomes.
pub fn validate_migration(ctx: &CommandContext, _request: &ValidateRequest) -> Result<ExecutionOutcome> {
    let state_path = ctx.config().state_file();
    let document = match load_state(ctx.fs(), state_path) {
        Ok(document) => document,
        Err(err) => return Ok(error_outcome(err.to_string(), err.is_user_error(), err.details())),
    };
    let set = WorkspaceSet::from(document.workspaces);
    match set.validate(ctx.effects()) {
        Ok(()) => Ok(ExecutionOutcome::success(
            format!("{} workspace(s) unchanged", set.len()),
            json!({
                "state_file": state_path.display().to_string(),
                "workspaces": set.roots(),
            }),
        )),
        Err(failures) => {
            let mut details = failures.details();
            let problems = failures
                .failures
                .iter()
                .flat_map(|failure| {
                    failure
                        .error
                        .to_string()
                        .lines()
                        .map(|line| line.trim().to_string())
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>();
            details["problems"] = json!(problems);
            details["hint"] = json!(
                "Revert the listed changes, or remove the state file and run `tuf init` again."
            );
            Ok(error_outcome(
                failures.to_string(),
                failures.is_drift_only(),
                details,
            ))
        }
    }
}
