//! Keyword, snippet and regex search over a directory tree
pub mod content;
pub mod engine;
pub mod line;

use crate::context::ContextWindow;
use crate::error::{Result, ScanError};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub use content::ContentSearcher;
pub use engine::{SearchEngine, SearchReport};
pub use line::LineSearcher;

pub const DEFAULT_CONTEXT_LINES: usize = 3;
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// How the pattern of a request is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Literal text, matched line by line.
    Keyword,
    /// Literal text that may span several lines.
    Snippet,
    /// User-supplied regular expression over the whole file.
    Regex,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Keyword => write!(f, "keyword"),
            SearchMode::Snippet => write!(f, "snippet"),
            SearchMode::Regex => write!(f, "regex"),
        }
    }
}

/// Search configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Logical type tags; empty means every file is scanned.
    pub types: Vec<String>,
    /// Ignored in regex mode, where the pattern carries its own flags.
    pub case_sensitive: bool,
    pub context_lines: usize,
    /// Global cap across the whole traversal.
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            types: Vec::new(),
            case_sensitive: false,
            context_lines: DEFAULT_CONTEXT_LINES,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// One located occurrence of the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Path relative to the search root.
    pub path: PathBuf,
    /// 1-based line where the match starts.
    pub line_number: usize,
    pub matched_text: String,
    pub context: ContextWindow,
}

/// Per-file matching strategy.
pub trait FileSearcher {
    /// Find at most `limit` matches in `text`, reporting them against `path`.
    fn search_text(
        &self,
        path: &Path,
        text: &str,
        context_lines: usize,
        limit: usize,
    ) -> Vec<MatchResult>;

    fn name(&self) -> &'static str;
}

/// Compile the searcher for `mode`. Pattern errors surface here, before any file is read.
pub fn build_searcher(
    mode: SearchMode,
    pattern: &str,
    case_sensitive: bool,
) -> Result<Box<dyn FileSearcher>> {
    match mode {
        SearchMode::Keyword => Ok(Box::new(LineSearcher::new(pattern, case_sensitive)?)),
        SearchMode::Snippet => Ok(Box::new(ContentSearcher::snippet(pattern, case_sensitive)?)),
        SearchMode::Regex => Ok(Box::new(ContentSearcher::regex(pattern)?)),
    }
}

/// Escape `literal` into a pattern, rejecting the empty string.
pub(crate) fn literal_pattern(literal: &str, what: &'static str) -> Result<String> {
    if literal.is_empty() {
        return Err(ScanError::EmptyPattern(what));
    }
    Ok(regex::escape(literal))
}
