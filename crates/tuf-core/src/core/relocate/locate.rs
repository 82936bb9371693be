use std::path::PathBuf;

use tracing::debug;
use tuf_domain::{BlockDescriptor, ByteRange};

use super::RelocateError;
use crate::effects::{DocumentParser, ParseFailure};

/// Finds the first block matching `descriptor`, scanning `candidates` in order.
///
/// Every candidate up to the match must parse; a syntax error in any of them
/// aborts the search instead of being skipped.
pub fn locate(
    parser: &dyn DocumentParser,
    descriptor: &BlockDescriptor,
    candidates: &[PathBuf],
) -> Result<ByteRange, RelocateError> {
    for path in candidates {
        let blocks = parser.parse(path).map_err(|err| match err {
            ParseFailure::Read(source) => RelocateError::Io {
                action: "read",
                path: path.clone(),
                source,
            },
            ParseFailure::Syntax(message) => RelocateError::Parse {
                path: path.clone(),
                message,
            },
        })?;
        debug!(file = %path.display(), blocks = blocks.len(), "scanned candidate");
        if let Some(block) = blocks.into_iter().find(|block| descriptor.matches(block)) {
            debug!(
                address = %descriptor,
                file = %path.display(),
                start = block.range.start,
                end = block.range.end,
                "found matching block"
            );
            return Ok(block.range);
        }
    }
    Err(RelocateError::BlockNotFound {
        address: descriptor.address(),
        searched: candidates.len(),
    })
}
