use std::io;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tuf_domain::AddressError;

use crate::diagnostics::relocate as codes;

/// Failures while resolving, locating, or relocating a block.
#[derive(Debug, thiserror::Error)]
pub enum RelocateError {
    #[error(transparent)]
    InvalidAddress(#[from] AddressError),
    #[error("invalid move request: {0}")]
    InvalidRequest(String),
    #[error("no block matching '{address}' was found in {searched} candidate file(s)")]
    BlockNotFound { address: String, searched: usize },
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RelocateError {
    pub(crate) fn request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

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
            Self::InvalidAddress(_) => codes::INVALID_ADDRESS,
            Self::InvalidRequest(_) => codes::INVALID_REQUEST,
            Self::BlockNotFound { .. } => codes::BLOCK_NOT_FOUND,
            Self::Parse { .. } => codes::PARSE_FAILURE,
            Self::Io { .. } => codes::IO_FAILURE,
        }
    }

    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidAddress(_) => "invalid_address",
            Self::InvalidRequest(_) => "invalid_request",
            Self::BlockNotFound { .. } => "block_not_found",
            Self::Parse { .. } => "parse_failure",
            Self::Io { .. } => "io_failure",
        }
    }

    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidAddress(_) => {
                Some("Use 'module.<name>' or '<resource_type>.<name>'; data sources cannot be moved.")
            }
            Self::InvalidRequest(_) => {
                Some("Pass exactly one of --from-file/--from-dir and one of --to-file/--to-dir.")
            }
            Self::BlockNotFound { .. } => {
                Some("Check the address spelling and that the source holds the block.")
            }
            Self::Parse { .. } => Some("Fix the HCL syntax error; unparsable files are never skipped."),
            Self::Io { .. } => None,
        }
    }

    /// Whether the caller can fix this by changing their input.
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
                Self::InvalidAddress(err) => {
                    map.insert("address".into(), json!(err.address()));
                }
                Self::InvalidRequest(_) => {}
                Self::BlockNotFound { address, searched } => {
                    map.insert("address".into(), json!(address));
                    map.insert("searched".into(), json!(searched));
                }
                Self::Parse { path, message } => {
                    map.insert("path".into(), json!(path.display().to_string()));
                    map.insert("error".into(), json!(message));
                }
                Self::Io { action, path, source } => {
                    map.insert("path".into(), json!(path.display().to_string()));
                    map.insert("action".into(), json!(action));
                    map.insert("error".into(), json!(source.to_string()));
                }
            }
        }
        details
    }
}
