use std::ops::Range;

use tuf_domain::{cap_run, LINE_SEPARATOR};

/// Blank lines left between the neighbours of an excised block.
const SEPARATORS_KEPT_AT_CUT: usize = 2;
/// Newlines a rewritten file may end with.
const SEPARATORS_KEPT_AT_END: usize = 1;

/// Source contents once `range` is removed, with the gap and the tail tidied.
pub(crate) fn excise(content: &[u8], range: Range<usize>) -> Vec<u8> {
    let anchor = range.start;
    let remaining = [&content[..range.start], &content[range.end..]].concat();
    let remaining = cap_run(&remaining, LINE_SEPARATOR, anchor, SEPARATORS_KEPT_AT_CUT);
    let tail = remaining.len().saturating_sub(1);
    cap_run(&remaining, LINE_SEPARATOR, tail, SEPARATORS_KEPT_AT_END)
}

/// Bytes to append so the block starts on its own line and ends with a newline.
pub(crate) fn prettify_insertion(
    block: &[u8],
    destination_empty: bool,
    destination_ends_with_separator: bool,
) -> Vec<u8> {
    let mut insertion = Vec::with_capacity(block.len() + 2 * LINE_SEPARATOR.len());
    if !destination_empty && !destination_ends_with_separator {
        insertion.extend_from_slice(LINE_SEPARATOR);
    }
    insertion.extend_from_slice(block);
    insertion.extend_from_slice(LINE_SEPARATOR);
    insertion
}
