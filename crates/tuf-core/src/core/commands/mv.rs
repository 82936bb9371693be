use std::path::PathBuf;

use anyhow::Result;
use serde_json::json;

use super::error_outcome;
use crate::config::context::CommandContext;
use crate::core::relocate::{move_block, MoveRequest};
use crate::outcome::ExecutionOutcome;

#[derive(Clone, Debug, Default)]
pub struct MoveCommandRequest {
    pub address: String,
    pub from_file: Option<PathBuf>,
    pub from_dir: Option<PathBuf>,
    pub to_file: Option<PathBuf>,
    pub to_dir: Option<PathBuf>,
}

impl From<&MoveCommandRequest> for MoveRequest {
    fn from(request: &MoveCommandRequest) -> Self {
        MoveRequest {
            address: Some(request.address.clone()),
            descriptor: None,
            source_file: request.from_file.clone(),
            source_dir: request.from_dir.clone(),
            destination_file: request.to_file.clone(),
            destination_dir: request.to_dir.clone(),
        }
    }
}

/// Moves one block and reports where it went.
///
/// # Errors
/// Never fails outright; relocation errors become outcomes.
pub fn move_block_command(
    ctx: &CommandContext,
    request: &MoveCommandRequest,
) -> Result<ExecutionOutcome> {
    let move_request = MoveRequest::from(request);
    match move_block(ctx.effects(), &move_request, ctx.config().candidate_order()) {
        Ok(report) => Ok(ExecutionOutcome::success(
            format!(
                "moved {} from {} to {}",
                report.address,
                report.source.display(),
                report.destination.display()
            ),
            json!(report),
        )),
        Err(err) => Ok(error_outcome(
            err.to_string(),
            err.is_user_error(),
            err.details(),
        )),
    }
}
