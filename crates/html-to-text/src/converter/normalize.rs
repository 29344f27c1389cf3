//! Final clean-up of the rendered buffer.

use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\n+").expect("valid regex"));
static SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \r\n\t]+").expect("valid regex"));

/// Post-process walker output into the final text.
///
/// Drops the space after each newline, collapses blank-line runs to a single blank
/// line and trims the result.
pub(crate) fn finish(raw: &str) -> String {
    let unindented = raw.replace("\n ", "\n");
    BLANK_RUN.replace_all(&unindented, "\n\n").trim().to_string()
}

/// Collapse whitespace runs in ordinary text to single spaces and trim the edges.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    SPACING.replace_all(text, " ").trim().to_string()
}

/// Tidy an isolated sub-render before it is decorated.
pub(crate) fn tidy_fragment(raw: &str) -> String {
    raw.trim().replace("\n ", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_blank_line_runs() {
        assert_eq!(finish("a\n\n\n\nb\n\n\nc"), "a\n\nb\n\nc");
    }

    #[test]
    fn removes_space_after_newline_and_trims() {
        assert_eq!(finish("  \n first\n second  \n\n"), "first\nsecond");
    }

    #[test]
    fn newline_space_runs_collapse_too() {
        assert_eq!(finish("a\n \n \n b"), "a\n\nb");
    }

    #[test]
    fn collapse_whitespace_joins_runs() {
        assert_eq!(collapse_whitespace("  one \n\t two\r\n three "), "one two three");
        assert_eq!(collapse_whitespace(" \n "), "");
    }

    #[test]
    fn tidy_fragment_matches_final_layout() {
        assert_eq!(tidy_fragment(" Title\n sub "), "Title\nsub");
    }
}
