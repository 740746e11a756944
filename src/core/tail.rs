// Useful Tools - core/tail.rs
//
// "Last N lines" view over an in-memory text buffer.
//
// There is no live filesystem watch: the tailed view is recomputed from the
// complete buffer on every render, so `tail_lines` must stay a cheap borrow
// of the original string rather than an allocation.

use crate::util::constants::{DEFAULT_TAIL_LINES, MAX_TAIL_LINES};

/// Return the final `n` newline-delimited segments of `content`.
///
/// Splitting is strictly on `'\n'`: a trailing newline produces a final empty
/// segment, so `tail_lines("a\nb\n", 1)` is `""`. Content with `n` or fewer
/// segments is returned whole, as is any content when `n == 0`.
pub fn tail_lines(content: &str, n: usize) -> &str {
    if n == 0 {
        return content;
    }
    // The n-th newline from the end starts the tail.
    match content.rmatch_indices('\n').nth(n - 1) {
        Some((pos, _)) => &content[pos + 1..],
        None => content,
    }
}

/// Line count and on/off switch for the viewer's tail mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailState {
    line_count: usize,
    enabled: bool,
}

impl TailState {
    /// Create a disabled tail state. `line_count` is clamped to `1..=MAX_TAIL_LINES`.
    pub fn new(line_count: usize) -> Self {
        Self {
            line_count: line_count.clamp(1, MAX_TAIL_LINES),
            enabled: false,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Set the line count. Values `<= 0` are rejected and leave the state
    /// unchanged; values above `MAX_TAIL_LINES` are clamped.
    ///
    /// Returns `true` if the value was accepted.
    pub fn set_line_count(&mut self, value: i64) -> bool {
        if value <= 0 {
            return false;
        }
        self.line_count = usize::try_from(value)
            .unwrap_or(MAX_TAIL_LINES)
            .min(MAX_TAIL_LINES);
        true
    }

    /// Apply raw text from the line-count input field.
    ///
    /// Anything that is not a base-10 integer (after trimming) is ignored.
    pub fn apply_line_count_input(&mut self, input: &str) -> bool {
        match input.trim().parse::<i64>() {
            Ok(value) => self.set_line_count(value),
            Err(_) => false,
        }
    }

    /// The text to display: the tailed view when enabled, else everything.
    pub fn display<'a>(&self, content: &'a str) -> &'a str {
        if self.enabled {
            tail_lines(content, self.line_count)
        } else {
            content
        }
    }
}

impl Default for TailState {
    fn default() -> Self {
        Self::new(DEFAULT_TAIL_LINES)
    }
}

/// Summary figures shown above the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentStats {
    /// Number of `'\n'`-delimited segments.
    pub lines: usize,
    /// Number of Unicode scalar values.
    pub characters: usize,
    /// Size in KiB, rounded up.
    pub kib: usize,
}

impl ContentStats {
    pub fn of(text: &str) -> Self {
        Self {
            lines: text.split('\n').count(),
            characters: text.chars().count(),
            kib: text.len().div_ceil(1024),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_returns_last_n_lines() {
        assert_eq!(tail_lines("a\nb\nc\nd", 2), "c\nd");
        assert_eq!(tail_lines("a\nb\nc\nd", 1), "d");
    }

    #[test]
    fn test_tail_with_fewer_lines_returns_everything() {
        assert_eq!(tail_lines("a\nb", 5), "a\nb");
        assert_eq!(tail_lines("a\nb", 2), "a\nb");
        assert_eq!(tail_lines("", 3), "");
    }

    #[test]
    fn test_tail_keeps_trailing_empty_segment() {
        assert_eq!(tail_lines("a\nb\n", 1), "");
        assert_eq!(tail_lines("a\nb\n", 2), "b\n");
    }

    #[test]
    fn test_tail_zero_returns_everything() {
        assert_eq!(tail_lines("a\nb\nc", 0), "a\nb\nc");
    }

    #[test]
    fn test_tail_matches_split_semantics() {
        let content = "one\ntwo\n\nfour\nfive\n";
        let segments: Vec<&str> = content.split('\n').collect();
        for n in 1..=segments.len() + 1 {
            let start = segments.len().saturating_sub(n);
            let expected = segments[start..].join("\n");
            assert_eq!(tail_lines(content, n), expected, "n = {n}");
        }
    }

    #[test]
    fn test_invalid_line_counts_are_ignored() {
        let mut state = TailState::new(7);
        assert!(!state.set_line_count(0));
        assert!(!state.set_line_count(-3));
        assert!(!state.apply_line_count_input("abc"));
        assert!(!state.apply_line_count_input(""));
        assert!(!state.apply_line_count_input("2.5"));
        assert_eq!(state.line_count(), 7);

        assert!(state.apply_line_count_input(" 12 "));
        assert_eq!(state.line_count(), 12);
    }

    #[test]
    fn test_large_line_counts_are_clamped() {
        let mut state = TailState::default();
        assert!(state.set_line_count(1_000_000));
        assert_eq!(state.line_count(), MAX_TAIL_LINES);
    }

    #[test]
    fn test_disabled_tail_shows_full_content() {
        let mut state = TailState::new(1);
        assert_eq!(state.display("a\nb\nc"), "a\nb\nc");
        state.enable();
        assert_eq!(state.display("a\nb\nc"), "c");
        state.disable();
        assert_eq!(state.display("a\nb\nc"), "a\nb\nc");
    }

    #[test]
    fn test_content_stats() {
        let stats = ContentStats::of("héllo\nworld");
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.characters, 11);
        assert_eq!(stats.kib, 1);
        assert_eq!(ContentStats::of("").kib, 0);
    }
}
