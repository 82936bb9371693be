//! Capping runs of a repeated byte sequence.
//!
//! Removing a block from a file leaves its surrounding blank lines behind.
//! [`cap_run`] trims such a run back down to a fixed number of repeats without
//! touching anything else in the buffer.

use std::ops::Range;

pub const LINE_SEPARATOR: &[u8] = b"\n";

/// Locates the span that [`cap_run`] would delete.
///
/// Returns `None` whenever the request is ill-defined (anchor out of bounds,
/// pattern longer than the content, no run near the anchor, or a run with
/// fewer than `keep` repeats) or when there is nothing to delete.
#[must_use]
pub fn excess_span(
    content: &[u8],
    pattern: &[u8],
    anchor: usize,
    keep: usize,
) -> Option<Range<usize>> {
    let width = pattern.len();
    if width == 0 || anchor >= content.len() || width > content.len() {
        return None;
    }
    let matches_at = |pos: usize| content.get(pos..pos + width) == Some(pattern);

    // the anchor may sit anywhere inside one copy of the pattern
    let mut run_start = (0..width)
        .map_while(|step| anchor.checked_sub(step))
        .find(|&pos| matches_at(pos))?;
    while run_start >= width && matches_at(run_start - width) {
        run_start -= width;
    }

    let mut boundary = run_start;
    for _ in 0..keep {
        if !matches_at(boundary) {
            return None;
        }
        boundary += width;
    }

    let mut cut = boundary;
    while matches_at(cut) {
        cut += width;
    }
    (cut > boundary).then_some(boundary..cut)
}

/// Keeps at most `keep` back-to-back copies of `pattern` in the run at or just
/// before `anchor`, deleting the trailing excess. Any ill-defined request
/// returns the content unchanged.
#[must_use]
pub fn cap_run(content: &[u8], pattern: &[u8], anchor: usize, keep: usize) -> Vec<u8> {
    match excess_span(content, pattern, anchor, keep) {
        Some(span) => [&content[..span.start], &content[span.end..]].concat(),
        None => content.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNIPPET_FOO: &str = "resource \"aws_security_group\" \"foo\" {\n\tcount = 1\n\tname  = \"test\"\n}";
    const SNIPPET_BAR: &str = "resource \"aws_security_group\" \"bar\" {\n\tcount = 2\n\tname = baz\n}";

    fn capped(content: &str, pattern: &str, anchor: usize, keep: usize) -> String {
        String::from_utf8(cap_run(content.as_bytes(), pattern.as_bytes(), anchor, keep)).unwrap()
    }

    #[test]
    fn caps_simple_run() {
        assert_eq!(capped("aaaa", "a", 0, 2), "aa");
    }

    #[test]
    fn caps_multibyte_pattern_from_inside_run() {
        assert_eq!(capped("bcaxyzxyzxyzdd", "xyz", 5, 1), "bcaxyzdd");
    }

    #[test]
    fn keep_zero_removes_whole_run() {
        assert_eq!(capped("ababab", "ab", 0, 0), "");
        assert_eq!(capped("abcxyzxyz", "xyz", 5, 0), "abc");
    }

    #[test]
    fn ill_defined_requests_are_noops() {
        assert_eq!(capped("xyz", "xyza", 0, 1), "xyz");
        assert_eq!(capped("abc", "a", 3, 1), "abc");
        assert_eq!(capped("bbb", "a", 0, 1), "bbb");
        assert_eq!(capped("abc", "", 0, 0), "abc");
    }

    #[test]
    fn anchor_past_last_full_window_probes_backwards() {
        assert_eq!(capped("aaaa", "aaa", 3, 0), "a");
    }

    #[test]
    fn walks_back_to_start_of_run() {
        assert_eq!(capped("ababababab", "ab", 9, 1), "ab");
    }

    #[test]
    fn short_run_is_never_padded_or_trimmed() {
        assert_eq!(capped("x\n\ny", "\n", 1, 3), "x\n\ny");
        assert_eq!(capped("x\ny", "\n", 1, 1), "x\ny");
    }

    #[test]
    fn collapses_blank_lines_between_blocks() {
        let input = format!("{SNIPPET_FOO}\n\n\n\n{SNIPPET_BAR}\n");
        let want = format!("{SNIPPET_FOO}\n\n{SNIPPET_BAR}\n");
        assert_eq!(capped(&input, "\n", SNIPPET_FOO.len() + 1, 2), want);
        assert_eq!(capped(&input, "\n\n", SNIPPET_FOO.len(), 1), want);
    }

    #[test]
    fn collapses_trailing_blank_lines() {
        let input = format!("{SNIPPET_FOO}\n\n\n\n");
        assert_eq!(
            capped(&input, "\n\n", SNIPPET_FOO.len(), 1),
            format!("{SNIPPET_FOO}\n\n")
        );
        assert_eq!(
            capped(&input, "\n", input.len() - 1, 1),
            format!("{SNIPPET_FOO}\n")
        );
    }

    #[test]
    fn capping_is_idempotent_and_never_grows() {
        let cases: &[(&str, &str, usize, usize)] = &[
            ("aaaa", "a", 0, 2),
            ("bcaxyzxyzxyzdd", "xyz", 5, 1),
            ("ababab", "ab", 0, 0),
            ("x\n\n\n\n\ny\n\n\n", "\n", 2, 2),
            ("no run here", "\n", 4, 1),
        ];
        for &(content, pattern, anchor, keep) in cases {
            let once = cap_run(content.as_bytes(), pattern.as_bytes(), anchor, keep);
            assert!(once.len() <= content.len(), "grew for {content:?}");
            let anchor_again = anchor.min(once.len().saturating_sub(1));
            let twice = cap_run(&once, pattern.as_bytes(), anchor_again, keep);
            assert_eq!(once, twice, "not idempotent for {content:?}");
        }
    }

    #[test]
    fn leaves_bytes_outside_the_run_alone() {
        let content = b"head\n\n\n\n\ntail\n\n\n";
        let span = excess_span(content, b"\n", 5, 2).unwrap();
        assert_eq!(span, 6..9);
        let out = cap_run(content, b"\n", 5, 2);
        assert_eq!(&out[..6], &content[..6]);
        assert_eq!(&out[6..], &content[9..]);
    }
}
