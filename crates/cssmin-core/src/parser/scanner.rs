//! Scanner — flattens raw stylesheet text into one comment-free buffer
//!
//! Two passes run before any rule is extracted:
//!
//! 1. [`normalize_lines`] drops blank lines, strips tabs and halves runs of
//!    spaces, then joins the surviving lines with no separator.
//! 2. [`strip_comments`] deletes every `/* ... */` block from that buffer.
//!
//! Neither pass knows about strings or `url(...)`: a `/*` inside quotes is
//! still treated as a comment start.

use crate::{Error, Result};

const COMMENT_OPEN: &str = "/*";
const COMMENT_CLOSE: &str = "*/";

/// Characters removed by [`trim`]: everything at or below U+0020.
pub(crate) fn is_trimmable(c: char) -> bool {
    c <= ' '
}

/// Trim control characters and spaces from both ends.
///
/// Narrower than [`str::trim`], which would also eat non-ASCII whitespace
/// such as U+00A0 that may be meaningful inside a value.
pub(crate) fn trim(text: &str) -> &str {
    text.trim_matches(is_trimmable)
}

// ── Line Normalizer ────────────────────────────────────────

/// Normalize raw stylesheet text into a single flat buffer
///
/// Lines are split on `\n`, `\r` and `\r\n`. Blank lines vanish, tabs are
/// removed, and each pair of adjacent spaces becomes one space. The pair
/// collapse runs once, so three spaces shrink to two rather than one.
pub fn normalize_lines(text: &str) -> String {
    let mut buffer = String::with_capacity(text.len());

    for line in text.split(['\r', '\n']) {
        if trim(line).is_empty() {
            continue;
        }
        let line = line.replace('\t', "");
        buffer.push_str(&line.replace("  ", " "));
    }

    buffer
}

// ── Comment Stripper ───────────────────────────────────────

/// Remove every block comment from the buffer
///
/// A comment runs from `/*` to the first `*/` found after it, so
/// `/* a /* b */` is one comment.
///
/// # Errors
/// Returns [`Error::UnterminatedComment`] if any `/*` has no closing `*/`.
/// Nothing of the buffer is returned in that case.
pub fn strip_comments(buffer: &str) -> Result<String> {
    let mut out = buffer.to_string();
    let mut from = 0;

    while let Some(found) = out[from..].find(COMMENT_OPEN) {
        let start = from + found;
        let body = start + COMMENT_OPEN.len();
        let end = match out[body..].find(COMMENT_CLOSE) {
            Some(close) => body + close + COMMENT_CLOSE.len(),
            None => return Err(Error::UnterminatedComment { offset: start }),
        };

        tracing::trace!("removing comment {}..{}", start, end);
        out.replace_range(start..end, "");

        // Splicing can pair a '/' just before `start` with a '*' just after
        // it; nothing earlier can open a comment.
        from = floor_char_boundary(&out, start.saturating_sub(1));
    }

    Ok(out)
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Line normalization ─────────────────────────────

    #[test]
    fn test_blank_lines_dropped() {
        assert_eq!(normalize_lines("a{\n\n   \n\t\nb:c}\n"), "a{b:c}");
    }

    #[test]
    fn test_line_endings_normalized() {
        assert_eq!(normalize_lines("a{\r\nb:c;\rd:e}\r\n"), "a{b:c;d:e}");
    }

    #[test]
    fn test_tabs_removed() {
        assert_eq!(normalize_lines("\tcolor:\tred;"), "color:red;");
    }

    #[test]
    fn test_double_spaces_collapse_once() {
        assert_eq!(normalize_lines("a  b"), "a b");
        assert_eq!(normalize_lines("a   b"), "a  b");
        assert_eq!(normalize_lines("a    b"), "a  b");
    }

    #[test]
    fn test_lines_joined_without_separator() {
        assert_eq!(normalize_lines("div\n{\ncolor: red\n}"), "div{color: red}");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_lines(""), "");
        assert_eq!(normalize_lines("\n\r\n \t \n"), "");
    }

    #[test]
    fn test_trim_keeps_non_ascii_whitespace() {
        assert_eq!(trim(" \u{a0}x\u{a0}\t"), "\u{a0}x\u{a0}");
    }

    // ── Comment stripping ──────────────────────────────

    #[test]
    fn test_strip_comment_inside_rule() {
        assert_eq!(strip_comments("a/*x*/b").unwrap(), "ab");
    }

    #[test]
    fn test_strip_comment_only() {
        assert_eq!(strip_comments("/*x*/").unwrap(), "");
    }

    #[test]
    fn test_strip_multiple_comments() {
        assert_eq!(
            strip_comments("/* one */a{b:c}/* two */d{e:f}/**/").unwrap(),
            "a{b:c}d{e:f}"
        );
    }

    #[test]
    fn test_nested_looking_markers_stop_at_first_close() {
        assert_eq!(strip_comments("/* a /* b */c").unwrap(), "c");
        assert_eq!(strip_comments("/* a /* b */ c */").unwrap(), " c */");
    }

    #[test]
    fn test_close_marker_must_follow_open_marker() {
        // "/*/" does not close itself
        let err = strip_comments("/*/").unwrap_err();
        assert_eq!(err, Error::UnterminatedComment { offset: 0 });
    }

    #[test]
    fn test_comment_formed_by_splice_is_removed() {
        // Removing "/*x*/" leaves "a/" + "*b*/", which opens a new comment.
        assert_eq!(strip_comments("a//*x*/*b*/c").unwrap(), "ac");
    }

    #[test]
    fn test_unterminated_comment_is_error() {
        let err = strip_comments("a{b:c}/* never closed").unwrap_err();
        assert_eq!(err, Error::UnterminatedComment { offset: 6 });
        assert!(err.is_fatal());
    }

    #[test]
    fn test_comment_inside_string_not_special() {
        assert_eq!(
            strip_comments("a{content:\"/*\"}b{c:d}/**/").unwrap(),
            "a{content:\""
        );
    }

    #[test]
    fn test_no_comments_unchanged() {
        assert_eq!(strip_comments("a{b:c}").unwrap(), "a{b:c}");
    }

    #[test]
    fn test_multibyte_text_around_comments() {
        assert_eq!(strip_comments("é/*x*/ü").unwrap(), "éü");
    }
}
