//! Local code search: keyword, snippet and regex scans over a directory tree with context
//! windows around every match, plus depth-bounded structure summaries.
//!
//! Every call is a fresh traversal; nothing is indexed or kept between calls.
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod file_types;
pub mod output;
pub mod processor;
pub mod resolver;
pub mod search;
pub mod structure;
pub mod walker;

pub use crate::context::{ContextLine, ContextWindow, MatchLine};
pub use crate::error::{Result, ScanError};
pub use crate::file_types::FileTypeClassifier;
pub use crate::resolver::RepoResolver;
pub use crate::search::{MatchResult, SearchEngine, SearchMode, SearchOptions, SearchReport};
pub use crate::structure::{StructureNode, StructureOptions};
use std::path::Path;

/// Literal keyword search, line by line.
pub fn search_keyword(
    root: &Path,
    keyword: &str,
    options: &SearchOptions,
) -> Result<Vec<MatchResult>> {
    SearchEngine::new(SearchMode::Keyword, keyword, options.clone())?.run(root)
}

/// Literal snippet search over whole files; the snippet may contain newlines.
pub fn search_snippet(
    root: &Path,
    snippet: &str,
    options: &SearchOptions,
) -> Result<Vec<MatchResult>> {
    SearchEngine::new(SearchMode::Snippet, snippet, options.clone())?.run(root)
}

/// Regular expression search. `options.case_sensitive` is ignored; use `(?i)` instead.
///
/// An invalid pattern fails with [`ScanError::InvalidPattern`] before any file is read.
pub fn search_regex(
    root: &Path,
    pattern: &str,
    options: &SearchOptions,
) -> Result<Vec<MatchResult>> {
    SearchEngine::new(SearchMode::Regex, pattern, options.clone())?.run(root)
}

/// Nested description of the files and directories under `root`.
pub fn get_structure(root: &Path, options: &StructureOptions) -> Result<StructureNode> {
    structure::build_structure(root, options)
}
