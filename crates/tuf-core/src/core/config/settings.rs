use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use crate::core::relocate::CandidateOrder;

/// File the migration state is written to when nothing else is configured.
pub const STATE_FILE_NAME: &str = "tuf.state";

const LOG_MODE_VAR: &str = "TUF_LOG_MODE";
const STATE_FILE_VAR: &str = "TUF_STATE_FILE";
const UNSORTED_SCAN_VAR: &str = "TUF_UNSORTED_SCAN";

/// Command-line overrides that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub state_file: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    pub(crate) fn capture() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    pub(crate) fn flag_is_enabled(&self, key: &str) -> bool {
        matches!(self.vars.get(key).map(String::as_str), Some("1"))
    }

    pub(crate) fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn testing(pairs: &[(&str, &str)]) -> Self {
        let vars = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self { vars }
    }
}

/// How diagnostics are rendered by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// Plain, info-level output for pipelines.
    Ci,
    #[default]
    Development,
}

impl LogMode {
    pub(crate) fn from_snapshot(snapshot: &EnvSnapshot) -> Self {
        snapshot.var(LOG_MODE_VAR).map_or_else(Self::default, Self::from_value)
    }

    /// Anything other than `CI` (any case) selects development mode.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("ci") {
            Self::Ci
        } else {
            Self::Development
        }
    }

    #[must_use]
    pub fn is_ci(self) -> bool {
        self == Self::Ci
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) log_mode: LogMode,
    pub(crate) state_file: PathBuf,
    pub(crate) sort_candidates: bool,
}

impl Config {
    /// Builds a configuration snapshot from the current process environment.
    #[must_use]
    pub fn from_env(global: &GlobalOptions) -> Self {
        Self::from_snapshot(&EnvSnapshot::capture(), global)
    }

    pub(crate) fn from_snapshot(snapshot: &EnvSnapshot, global: &GlobalOptions) -> Self {
        let state_file = global
            .state_file
            .as_deref()
            .filter(|value| !value.is_empty())
            .or_else(|| snapshot.var(STATE_FILE_VAR).filter(|value| !value.is_empty()))
            .unwrap_or(STATE_FILE_NAME);
        Self {
            log_mode: LogMode::from_snapshot(snapshot),
            state_file: PathBuf::from(state_file),
            sort_candidates: !snapshot.flag_is_enabled(UNSORTED_SCAN_VAR),
        }
    }

    #[must_use]
    pub fn log_mode(&self) -> LogMode {
        self.log_mode
    }

    #[must_use]
    pub fn state_file(&self) -> &PathBuf {
        &self.state_file
    }

    pub(crate) fn candidate_order(&self) -> CandidateOrder {
        if self.sort_candidates {
            CandidateOrder::Lexicographic
        } else {
            CandidateOrder::Listing
        }
    }
}
