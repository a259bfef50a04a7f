//! Core search engine: walks the tree and accumulates matches up to the global cap
use super::{FileSearcher, MatchResult, SearchMode, SearchOptions, build_searcher};
use crate::error::Result;
use crate::file_types::FileTypeClassifier;
use crate::processor::{FileOutcome, read_text};
use crate::walker::{check_root, walk_files};
use log::{debug, warn};
use std::path::Path;

/// Matches of one search plus what it took to find them.
#[derive(Debug, Clone, Default)]
pub struct SearchReport {
    pub matches: Vec<MatchResult>,
    pub files_scanned: usize,
    pub files_skipped: usize,
    /// The cap cut the search short: the last file held more matches, or candidate files
    /// were left unvisited.
    pub truncated: bool,
}

/// Drives one search request over a directory tree
pub struct SearchEngine {
    searcher: Box<dyn FileSearcher>,
    classifier: FileTypeClassifier,
    options: SearchOptions,
}

impl SearchEngine {
    /// Compile `pattern` for `mode`. Fails immediately on an invalid pattern.
    pub fn new(mode: SearchMode, pattern: &str, options: SearchOptions) -> Result<Self> {
        let searcher = build_searcher(mode, pattern, options.case_sensitive)?;
        Ok(Self::with_searcher(searcher, options))
    }

    pub fn with_searcher(searcher: Box<dyn FileSearcher>, options: SearchOptions) -> Self {
        Self {
            searcher,
            classifier: FileTypeClassifier::new(),
            options,
        }
    }

    pub fn run(&self, root: &Path) -> Result<Vec<MatchResult>> {
        Ok(self.run_with_summary(root)?.matches)
    }

    /// Search every file under `root`, stopping the whole walk once `max_results` is hit.
    pub fn run_with_summary(&self, root: &Path) -> Result<SearchReport> {
        check_root(root)?;

        let max_results = self.options.max_results;
        let mut report = SearchReport::default();
        if max_results == 0 {
            return Ok(report);
        }

        let mut candidates = walk_files(root)
            .filter(|path| self.classifier.matches(path, self.options.types.as_slice()))
            .peekable();

        while let Some(path) = candidates.next() {
            let text = match read_text(&path) {
                FileOutcome::Text(text) => text,
                FileOutcome::Skipped(reason) => {
                    warn!("Skipping {}: {}", path.display(), reason);
                    report.files_skipped += 1;
                    continue;
                }
            };
            report.files_scanned += 1;

            let relative = path.strip_prefix(root).unwrap_or(&path);
            let remaining = max_results - report.matches.len();
            // One past the cap tells a full file apart from one that had more to give.
            let mut found = self.searcher.search_text(
                relative,
                &text,
                self.options.context_lines,
                remaining.saturating_add(1),
            );
            let overflowed = found.len() > remaining;
            found.truncate(remaining);
            report.matches.extend(found);

            if report.matches.len() >= max_results {
                report.truncated = overflowed || candidates.peek().is_some();
                break;
            }
        }

        debug!(
            "{} search under {}: {} match(es), {} file(s) scanned, {} skipped{}",
            self.searcher.name(),
            root.display(),
            report.matches.len(),
            report.files_scanned,
            report.files_skipped,
            if report.truncated { " (result cap reached)" } else { "" }
        );

        Ok(report)
    }
}
