use super::{FileSearcher, MatchResult, literal_pattern};
use crate::context::{LineIndex, MatchLine, extract};
use crate::error::Result;
use regex::{Regex, RegexBuilder};
use std::path::Path;

/// Whole-buffer search, shared by snippet and regex modes so both translate offsets and
/// build context windows the same way.
pub struct ContentSearcher {
    pattern: Regex,
    name: &'static str,
}

impl ContentSearcher {
    /// Literal text that may contain line breaks. Each `\n` in the snippet also matches a
    /// `\r\n` terminator in the file.
    pub fn snippet(snippet: &str, case_sensitive: bool) -> Result<Self> {
        let escaped = literal_pattern(snippet, "snippet")?.replace('\n', r"\r?\n");
        let pattern = RegexBuilder::new(&escaped)
            .case_insensitive(!case_sensitive)
            .build()?;
        Ok(Self {
            pattern,
            name: "snippet",
        })
    }

    /// `.` also matches newlines and `^`/`$` anchor at every line.
    pub fn regex(pattern: &str) -> Result<Self> {
        let pattern = RegexBuilder::new(pattern)
            .dot_matches_new_line(true)
            .multi_line(true)
            .crlf(true)
            .build()?;
        Ok(Self {
            pattern,
            name: "regex",
        })
    }
}

impl FileSearcher for ContentSearcher {
    fn search_text(
        &self,
        path: &Path,
        text: &str,
        context_lines: usize,
        limit: usize,
    ) -> Vec<MatchResult> {
        let index = LineIndex::new(text);
        let lines = index.lines();

        self.pattern
            .find_iter(text)
            .filter_map(|m| index.span(m.start(), m.end()).map(|span| (m, span)))
            .take(limit)
            .map(|(m, span)| {
                let mut context = extract(&lines, &span, context_lines);
                context.matched = MatchLine::from_byte_columns(
                    span.first_line,
                    index.spanned_text(&span, m.end()).to_string(),
                    span.column_start,
                    span.column_end,
                );
                MatchResult {
                    path: path.to_path_buf(),
                    line_number: span.first_line,
                    matched_text: m.as_str().to_string(),
                    context,
                }
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
