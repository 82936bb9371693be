#![deny(clippy::all, warnings)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

pub mod address;
pub mod block;
pub mod normalize;
pub mod state;
pub mod workspace;

pub use address::{
    AddressError, BlockDescriptor, ModuleDescriptor, ResourceDescriptor, MODULE_KEYWORD,
    RESOURCE_KEYWORD,
};
pub use block::{ByteRange, CandidateBlock};
pub use normalize::{cap_run, excess_span, LINE_SEPARATOR};
pub use state::{StateDocument, TerraformMetadata, DEFAULT_STATE_FILE_NAME, STATE_FORMAT_VERSION};
pub use workspace::{compute_file_digest, Workspace, WorkspaceFile, TERRAFORM_EXTENSION};
