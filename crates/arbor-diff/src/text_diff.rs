//! Line diff between two serialized orders.
//!
//! Used to explain why a computed order does not match an expected fixture.
//! Uses the `similar` crate (Myers diff algorithm) to produce hunks with
//! three lines of context.

use std::fmt;

use similar::{ChangeTag, TextDiff};

/// Number of unchanged lines shown around each change.
const CONTEXT_LINES: usize = 3;

/// The result of diffing an expected order text against an actual one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderTextDiff {
    pub hunks: Vec<DiffHunk>,
}

impl OrderTextDiff {
    /// Returns `true` if the two texts are identical.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Lines present only in the actual text.
    pub fn additions(&self) -> usize {
        self.lines()
            .filter(|l| matches!(l, DiffLine::Added(_)))
            .count()
    }

    /// Lines present only in the expected text.
    pub fn deletions(&self) -> usize {
        self.lines()
            .filter(|l| matches!(l, DiffLine::Removed(_)))
            .count()
    }

    fn lines(&self) -> impl Iterator<Item = &DiffLine> {
        self.hunks.iter().flat_map(|h| &h.lines)
    }
}

/// A contiguous region of changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunk {
    /// First expected line covered (1-based).
    pub old_start: usize,
    pub old_count: usize,
    /// First actual line covered (1-based).
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<DiffLine>,
}

impl DiffHunk {
    /// The `@@ -a,b +c,d @@` header for this hunk.
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_count, self.new_start, self.new_count
        )
    }
}

/// A single line in a hunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    Context(String),
    Added(String),
    Removed(String),
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffLine::Context(text) => write!(f, " {text}"),
            DiffLine::Added(text) => write!(f, "+{text}"),
            DiffLine::Removed(text) => write!(f, "-{text}"),
        }
    }
}

impl fmt::Display for OrderTextDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hunk in &self.hunks {
            writeln!(f, "{}", hunk.header())?;
            for line in &hunk.lines {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

/// Compute a line-by-line diff from `expected` to `actual`.
pub fn diff_orders(expected: &str, actual: &str) -> OrderTextDiff {
    if expected == actual {
        return OrderTextDiff { hunks: Vec::new() };
    }

    let text_diff = TextDiff::from_lines(expected, actual);
    let mut hunks = Vec::new();

    for group in text_diff.grouped_ops(CONTEXT_LINES) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old_range = first.old_range().start..last.old_range().end;
        let new_range = first.new_range().start..last.new_range().end;

        let mut lines = Vec::new();
        for op in &group {
            for change in text_diff.iter_changes(op) {
                let text = change.value().trim_end_matches('\n').to_string();
                lines.push(match change.tag() {
                    ChangeTag::Equal => DiffLine::Context(text),
                    ChangeTag::Delete => DiffLine::Removed(text),
                    ChangeTag::Insert => DiffLine::Added(text),
                });
            }
        }

        hunks.push(DiffHunk {
            old_start: old_range.start + 1,
            old_count: old_range.len(),
            new_start: new_range.start + 1,
            new_count: new_range.len(),
            lines,
        });
    }

    OrderTextDiff { hunks }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_no_diff() {
        let text = "{\n  \"id\": \"a\"\n}";
        let diff = diff_orders(text, text);
        assert!(diff.is_empty());
        assert_eq!(diff.to_string(), "");
    }

    #[test]
    fn changed_operation_shows_remove_and_add() {
        let expected = "{\n  \"id\": \"a\",\n  \"operation\": \"UPDATE\"\n}";
        let actual = "{\n  \"id\": \"a\",\n  \"operation\": \"NO_ACTION\"\n}";

        let diff = diff_orders(expected, actual);
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.deletions(), 1);
        assert!(diff
            .hunks[0]
            .lines
            .contains(&DiffLine::Removed("  \"operation\": \"UPDATE\"".into())));
    }

    #[test]
    fn hunk_header_counts() {
        let expected = "a\nb\nc\nd\ne\n";
        let actual = "a\nb\nX\nd\ne\n";

        let diff = diff_orders(expected, actual);
        assert_eq!(diff.hunks.len(), 1);
        assert_eq!(diff.hunks[0].header(), "@@ -1,5 +1,5 @@");
    }

    #[test]
    fn context_is_limited() {
        let expected = "1\n2\n3\n4\n5\n6\n7\n8\n9\n10\n";
        let actual = "1\n2\n3\n4\n5\n6\n7\n8\n9\nX\n";

        let diff = diff_orders(expected, actual);
        let hunk = &diff.hunks[0];
        let context = hunk
            .lines
            .iter()
            .filter(|l| matches!(l, DiffLine::Context(_)))
            .count();
        assert_eq!(context, CONTEXT_LINES);
        assert_eq!(hunk.old_start, 7);
    }

    #[test]
    fn display_prefixes_lines() {
        let diff = diff_orders("a\n", "b\n");
        assert_eq!(diff.to_string(), "@@ -1,1 +1,1 @@\n-a\n+b\n");
    }
}
