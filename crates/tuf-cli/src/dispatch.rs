use color_eyre::Result;
use serde_json::json;
use tuf_core::{
    diag_commands, CommandContext, CommandGroup, CommandInfo, ExecutionOutcome, InitRequest,
    MoveCommandRequest, ValidateRequest,
};

use crate::{CommandGroupCli, InitArgs, MvArgs};

pub fn dispatch_command(
    ctx: &CommandContext,
    group: &CommandGroupCli,
) -> Result<(CommandInfo, ExecutionOutcome)> {
    match group {
        CommandGroupCli::Init(args) => {
            let info = CommandInfo::new(CommandGroup::Init, "init");
            let request = init_request_from_args(args);
            core_call(info, || tuf_core::init_migration(ctx, &request))
        }
        CommandGroupCli::Mv(args) => {
            let info = CommandInfo::new(CommandGroup::Mv, "mv");
            let request = move_request_from_args(args);
            core_call(info, || tuf_core::move_block_command(ctx, &request))
        }
        CommandGroupCli::Validate(_args) => {
            let info = CommandInfo::new(CommandGroup::Validate, "validate");
            core_call(info, || {
                tuf_core::validate_migration(ctx, &ValidateRequest)
            })
        }
    }
}

fn init_request_from_args(args: &InitArgs) -> InitRequest {
    InitRequest {
        workspaces: args
            .workspaces
            .iter()
            .filter(|path| !path.as_os_str().is_empty())
            .cloned()
            .collect(),
        state_pull_command: args.terraform_state_pull_command.clone(),
        state_file_name: args.terraform_state_file.clone(),
    }
}

fn move_request_from_args(args: &MvArgs) -> MoveCommandRequest {
    MoveCommandRequest {
        address: args.address.clone(),
        from_file: args.from_file.clone(),
        from_dir: args.from_dir.clone(),
        to_file: args.to_file.clone(),
        to_dir: args.to_dir.clone(),
    }
}

fn core_call<F>(info: CommandInfo, action: F) -> Result<(CommandInfo, ExecutionOutcome)>
where
    F: FnOnce() -> anyhow::Result<ExecutionOutcome>,
{
    match action() {
        Ok(outcome) => Ok((info, outcome)),
        Err(err) => {
            let issues: Vec<String> = err.chain().map(std::string::ToString::to_string).collect();
            Ok((
                info,
                ExecutionOutcome::failure(
                    err.to_string(),
                    json!({
                        "code": diag_commands::GENERIC,
                        "reason": "internal_error",
                        "error": err.to_string(),
                        "issues": issues,
                        "hint": "Re-run with -vv or --trace for more detail.",
                    }),
                ),
            ))
        }
    }
}
