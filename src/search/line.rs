use super::{FileSearcher, MatchResult, literal_pattern};
use crate::context::{LineIndex, MatchSpan, extract};
use crate::error::Result;
use regex::{Regex, RegexBuilder};
use std::path::Path;

/// Literal keyword search, one line at a time.
pub struct LineSearcher {
    pattern: Regex,
}

impl LineSearcher {
    pub fn new(keyword: &str, case_sensitive: bool) -> Result<Self> {
        let pattern = RegexBuilder::new(&literal_pattern(keyword, "keyword")?)
            .case_insensitive(!case_sensitive)
            .build()?;
        Ok(Self { pattern })
    }
}

impl FileSearcher for LineSearcher {
    fn search_text(
        &self,
        path: &Path,
        text: &str,
        context_lines: usize,
        limit: usize,
    ) -> Vec<MatchResult> {
        let index = LineIndex::new(text);
        let lines = index.lines();

        lines
            .iter()
            .enumerate()
            .flat_map(|(i, line)| self.pattern.find_iter(line).map(move |m| (i, m)))
            .take(limit)
            .map(|(i, m)| {
                let span = MatchSpan::single_line(i + 1, m.start(), m.end());
                MatchResult {
                    path: path.to_path_buf(),
                    line_number: i + 1,
                    matched_text: m.as_str().to_string(),
                    context: extract(&lines, &span, context_lines),
                }
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}
