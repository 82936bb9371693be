use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::workspace::Workspace;

pub const STATE_FORMAT_VERSION: u32 = 1;
pub const DEFAULT_STATE_FILE_NAME: &str = "terraform.tfstate";

/// How Terraform state is pulled for each workspace of a migration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerraformMetadata {
    #[serde(default)]
    pub state_pull_command: String,
    #[serde(default = "default_state_file_name")]
    pub state_file_name: String,
}

impl Default for TerraformMetadata {
    fn default() -> Self {
        Self {
            state_pull_command: String::new(),
            state_file_name: default_state_file_name(),
        }
    }
}

fn default_state_file_name() -> String {
    DEFAULT_STATE_FILE_NAME.to_string()
}

/// Everything a migration records on disk when it is initialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDocument {
    pub version: u32,
    pub created_at: String,
    pub workspaces: Vec<Workspace>,
    #[serde(default)]
    pub terraform: TerraformMetadata,
}

impl StateDocument {
    #[must_use]
    pub fn new(workspaces: Vec<Workspace>, terraform: TerraformMetadata) -> Self {
        let created_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown".to_string());
        Self {
            version: STATE_FORMAT_VERSION,
            created_at,
            workspaces,
            terraform,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn terraform_metadata_defaults_state_file_name() {
        let meta: TerraformMetadata = serde_json::from_str("{}").unwrap();
        assert_eq!(meta.state_file_name, "terraform.tfstate");
        assert!(meta.state_pull_command.is_empty());
    }

    #[test]
    fn state_document_survives_json() {
        let ws = Workspace::new(
            "0b7f",
            "/srv/infra/network",
            BTreeMap::from([("main.tf".to_string(), "abc".to_string())]),
        );
        let doc = StateDocument::new(
            vec![ws],
            TerraformMetadata {
                state_pull_command: "terraform state pull > state.tfstate".into(),
                state_file_name: "state.tfstate".into(),
            },
        );
        let json = doc.to_json().unwrap();
        assert!(json.contains("\"absolute_path\": \"/srv/infra/network\""));
        assert_eq!(StateDocument::from_json(&json).unwrap(), doc);
    }
}
