//! Moving a single top-level block from one Terraform file to another.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};
use tuf_domain::{BlockDescriptor, LINE_SEPARATOR};

use crate::core::fs::{file_ends_with, file_is_empty, same_file};
use crate::effects::{DirectoryLister, Effects};

mod errors;
mod locate;
mod splice;

pub use errors::RelocateError;
pub use locate::locate;

/// Order in which files of a source directory are scanned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CandidateOrder {
    /// Whatever order the directory lister returns.
    Listing,
    #[default]
    Lexicographic,
}

/// What to move and where. Each of the three pairs must have exactly one side set.
#[derive(Clone, Debug, Default)]
pub struct MoveRequest {
    pub address: Option<String>,
    pub descriptor: Option<BlockDescriptor>,
    pub source_file: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub destination_file: Option<PathBuf>,
    pub destination_dir: Option<PathBuf>,
}

impl MoveRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn with_descriptor(mut self, descriptor: BlockDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    #[must_use]
    pub fn with_source_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_source_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_destination_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.destination_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_destination_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.destination_dir = Some(path.into());
        self
    }

    /// Checks the exclusivity rules and turns the request into concrete inputs.
    ///
    /// Empty strings and paths count as unset.
    pub fn resolve(
        &self,
        lister: &dyn DirectoryLister,
        order: CandidateOrder,
    ) -> Result<ResolvedMove, RelocateError> {
        let source_file = non_empty(self.source_file.as_deref());
        let source_dir = non_empty(self.source_dir.as_deref());
        let destination_file = non_empty(self.destination_file.as_deref());
        let destination_dir = non_empty(self.destination_dir.as_deref());
        let address = self.address.as_deref().filter(|value| !value.is_empty());

        let candidates = match (source_file, source_dir) {
            (Some(_), Some(_)) => {
                return Err(RelocateError::request(
                    "a source file and a source directory are mutually exclusive",
                ))
            }
            (None, None) => {
                return Err(RelocateError::request(
                    "either a source file or a source directory is required",
                ))
            }
            (Some(file), None) => vec![file.to_path_buf()],
            (None, Some(dir)) => {
                let mut files = lister.list(dir).map_err(RelocateError::io("list", dir))?;
                if order == CandidateOrder::Lexicographic {
                    files.sort();
                }
                files
            }
        };

        let descriptor = match (address, &self.descriptor) {
            (Some(_), Some(_)) => {
                return Err(RelocateError::request(
                    "an address and a block descriptor are mutually exclusive",
                ))
            }
            (None, None) => {
                return Err(RelocateError::request(
                    "either an address or a block descriptor is required",
                ))
            }
            (Some(address), None) => BlockDescriptor::resolve(address)?,
            (None, Some(descriptor)) => descriptor.clone(),
        };

        let destination = match (destination_file, destination_dir) {
            (Some(_), Some(_)) => {
                return Err(RelocateError::request(
                    "a destination file and a destination directory are mutually exclusive",
                ))
            }
            (None, None) => {
                return Err(RelocateError::request(
                    "either a destination file or a destination directory is required",
                ))
            }
            (Some(file), None) => file.to_path_buf(),
            (None, Some(dir)) => dir.join(descriptor.destination_file_name()),
        };

        debug!(
            address = %descriptor,
            candidates = candidates.len(),
            destination = %destination.display(),
            "resolved move request"
        );
        Ok(ResolvedMove {
            descriptor,
            candidates,
            destination,
        })
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|path| !path.as_os_str().is_empty())
}

/// A validated request: one descriptor, the files to scan, and one destination file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedMove {
    pub descriptor: BlockDescriptor,
    pub candidates: Vec<PathBuf>,
    pub destination: PathBuf,
}

/// What a completed move touched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub address: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub start: usize,
    pub end: usize,
    pub bytes_moved: usize,
}

/// Resolves `request` and moves the block it names.
///
/// The destination receives its append before the source is rewritten, so a
/// failure while rewriting the source leaves the block in both files.
pub fn move_block(
    effects: &dyn Effects,
    request: &MoveRequest,
    order: CandidateOrder,
) -> Result<MoveReport, RelocateError> {
    let resolved = request.resolve(effects.lister(), order)?;
    relocate(effects, &resolved)
}

pub(crate) fn relocate(
    effects: &dyn Effects,
    resolved: &ResolvedMove,
) -> Result<MoveReport, RelocateError> {
    let range = locate(effects.parser(), &resolved.descriptor, &resolved.candidates)?;
    let source_path = range.path();
    if same_file(source_path, &resolved.destination) {
        return Err(RelocateError::request(format!(
            "{} is both the source and the destination",
            source_path.display()
        )));
    }

    let fs = effects.fs();
    let source = fs.read(source_path).map_err(RelocateError::io("read", source_path))?;
    if !range.fits(source.len()) {
        return Err(RelocateError::Parse {
            path: source_path.to_path_buf(),
            message: format!(
                "block range {}..{} lies outside the {}-byte file",
                range.start,
                range.end,
                source.len()
            ),
        });
    }
    let block = &source[range.as_range()];
    let remaining = splice::excise(&source, range.as_range());

    let destination = resolved.destination.as_path();
    let destination_empty =
        file_is_empty(fs, destination).map_err(RelocateError::io("inspect", destination))?;
    let destination_terminated = file_ends_with(fs, destination, LINE_SEPARATOR)
        .map_err(RelocateError::io("read", destination))?;
    let insertion = splice::prettify_insertion(block, destination_empty, destination_terminated);

    fs.append(destination, &insertion)
        .map_err(RelocateError::io("append to", destination))?;
    fs.replace(source_path, &remaining)
        .map_err(RelocateError::io("rewrite", source_path))?;

    info!(
        address = %resolved.descriptor,
        source = %source_path.display(),
        destination = %destination.display(),
        bytes = block.len(),
        "moved block"
    );
    Ok(MoveReport {
        address: resolved.descriptor.address(),
        source: source_path.to_path_buf(),
        destination: destination.to_path_buf(),
        start: range.start,
        end: range.end,
        bytes_moved: block.len(),
    })
}
