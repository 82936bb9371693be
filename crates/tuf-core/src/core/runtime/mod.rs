use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::context::CommandInfo;
use crate::outcome::{CommandStatus, ExecutionOutcome};

pub(crate) mod effects;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandGroup {
    Init,
    Mv,
    Validate,
}

impl fmt::Display for CommandGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandGroup::Init => "init",
            CommandGroup::Mv => "mv",
            CommandGroup::Validate => "validate",
        };
        f.write_str(name)
    }
}

#[must_use]
pub fn to_json_response(info: CommandInfo, outcome: &ExecutionOutcome) -> Value {
    let status = match outcome.status {
        CommandStatus::Ok => "ok",
        CommandStatus::UserError => "user-error",
        CommandStatus::Failure => "error",
    };
    let details = match &outcome.details {
        Value::Object(_) => outcome.details.clone(),
        Value::Null => json!({}),
        other => json!({ "value": other }),
    };
    json!({
        "status": status,
        "message": format_status_message(info, &outcome.message),
        "details": details,
    })
}

#[must_use]
pub fn format_status_message(info: CommandInfo, message: &str) -> String {
    let group_name = info.group.to_string();
    let prefix = if group_name == info.name {
        format!("tuf {}", info.name)
    } else {
        format!("tuf {} {}", group_name, info.name)
    };
    if message.is_empty() {
        prefix
    } else if message.starts_with(&prefix) {
        message.to_string()
    } else {
        format!("{prefix}: {message}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_is_prefixed_once() {
        let info = CommandInfo::new(CommandGroup::Mv, "mv");
        assert_eq!(format_status_message(info, "moved"), "tuf mv: moved");
        assert_eq!(format_status_message(info, "tuf mv: moved"), "tuf mv: moved");
        assert_eq!(format_status_message(info, ""), "tuf mv");
    }

    #[test]
    fn json_response_wraps_non_object_details() {
        let info = CommandInfo::new(CommandGroup::Validate, "validate");
        let outcome = ExecutionOutcome::user_error("drift", json!(["a.tf"]));
        let payload = to_json_response(info, &outcome);
        assert_eq!(payload["status"], "user-error");
        assert_eq!(payload["message"], "tuf validate: drift");
        assert_eq!(payload["details"]["value"][0], "a.tf");
    }
}
