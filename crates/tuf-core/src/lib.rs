#![deny(clippy::all, warnings)]

mod core;

pub(crate) use crate::core::config;
pub(crate) use crate::core::runtime::effects;
pub(crate) use crate::core::tooling::{diagnostics, outcome};

pub use crate::core::commands::{
    init_migration, move_block_command, validate_migration, InitRequest, MoveCommandRequest,
    ValidateRequest,
};
pub use crate::core::config::context::{CommandContext, CommandInfo};
pub use crate::core::config::{Config, GlobalOptions, LogMode, STATE_FILE_NAME};
pub use crate::core::relocate::{
    locate, move_block, CandidateOrder, MoveReport, MoveRequest, RelocateError, ResolvedMove,
};
pub use crate::core::runtime::effects::{
    ContentDigest, DirectoryLister, DocumentParser, Effects, FileSystem, HclDocumentParser,
    ParseFailure, SharedEffects, SystemEffects,
};
pub use crate::core::runtime::{format_status_message, to_json_response, CommandGroup};
pub use crate::core::state::{load_state, write_state, StateError};
pub use crate::core::tooling::diagnostics::commands as diag_commands;
pub use crate::core::tooling::outcome::{CommandStatus, ExecutionOutcome};
pub use crate::core::workspace::{
    register_workspace, validate_workspace, CountMismatch, FileMismatch, IntegrityError,
    WorkspaceError, WorkspaceFailure, WorkspaceFailures, WorkspaceSet,
};

pub use tuf_domain::{
    BlockDescriptor, ByteRange, CandidateBlock, StateDocument, TerraformMetadata, Workspace,
    WorkspaceFile,
};
