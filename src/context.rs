//! Context windows around matches and byte-offset to line translation
use memchr::memchr_iter;
use serde::Serialize;

/// A line surrounding a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextLine {
    pub line_number: usize,
    pub content: String,
}

/// The matched line(s). Columns count characters, not bytes, from the start of `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchLine {
    pub line_number: usize,
    pub content: String,
    pub column_start: usize,
    pub column_end: usize,
}

impl MatchLine {
    /// Build from byte columns into `content`, converting them to character columns.
    pub fn from_byte_columns(
        line_number: usize,
        content: String,
        byte_start: usize,
        byte_end: usize,
    ) -> Self {
        let column_start = char_column(&content, byte_start);
        let column_end = char_column(&content, byte_end);
        Self {
            line_number,
            content,
            column_start,
            column_end,
        }
    }

    /// `content` split into the text before, inside and after the match.
    pub fn split_match(&self) -> Option<(&str, &str, &str)> {
        let start = byte_offset(&self.content, self.column_start)?;
        let end = byte_offset(&self.content, self.column_end)?;
        let hit = self.content.get(start..end)?;
        Some((&self.content[..start], hit, &self.content[end..]))
    }

    /// The matched characters, sliced out of `content`.
    pub fn matched_text(&self) -> Option<&str> {
        self.split_match().map(|(_, hit, _)| hit)
    }
}

/// Characters before byte `offset`. Offsets that are not on a boundary are kept as given.
fn char_column(content: &str, offset: usize) -> usize {
    content
        .get(..offset)
        .map_or(offset, |prefix| prefix.chars().count())
}

fn byte_offset(content: &str, column: usize) -> Option<usize> {
    content
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(content.len()))
        .nth(column)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextWindow {
    pub before: Vec<ContextLine>,
    #[serde(rename = "match")]
    pub matched: MatchLine,
    pub after: Vec<ContextLine>,
}

/// Where a match sits in a file: 1-based first/last line, byte columns relative to the first
/// line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub first_line: usize,
    pub last_line: usize,
    pub column_start: usize,
    pub column_end: usize,
}

impl MatchSpan {
    pub fn single_line(line_number: usize, column_start: usize, column_end: usize) -> Self {
        Self {
            first_line: line_number,
            last_line: line_number,
            column_start,
            column_end,
        }
    }
}

/// Build the window for `span` over `lines`, taking up to `context_lines` on either side.
///
/// The match line content is every line from `first_line` to `last_line` joined with `\n`.
/// Context is clipped at the start and end of the file, never padded.
pub fn extract(lines: &[&str], span: &MatchSpan, context_lines: usize) -> ContextWindow {
    let first_idx = span.first_line.saturating_sub(1).min(lines.len());
    let last_idx = span
        .last_line
        .saturating_sub(1)
        .max(first_idx)
        .min(lines.len().saturating_sub(1));

    let before_start = first_idx.saturating_sub(context_lines);
    let before = (before_start..first_idx)
        .map(|i| ContextLine {
            line_number: i + 1,
            content: lines[i].to_string(),
        })
        .collect();

    let after_end = (last_idx + context_lines + 1).min(lines.len());
    let after = ((last_idx + 1)..after_end)
        .map(|i| ContextLine {
            line_number: i + 1,
            content: lines[i].to_string(),
        })
        .collect();

    let content = lines
        .get(first_idx..=last_idx)
        .map(|spanned| spanned.join("\n"))
        .unwrap_or_default();

    ContextWindow {
        before,
        matched: MatchLine::from_byte_columns(
            span.first_line,
            content,
            span.column_start,
            span.column_end,
        ),
        after,
    }
}

/// Precomputed line starts for one file buffer.
pub struct LineIndex<'a> {
    text: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut starts = vec![0];
        starts.extend(memchr_iter(b'\n', text.as_bytes()).map(|pos| pos + 1));
        // A terminator at the very end does not open another line.
        if starts.last() == Some(&text.len()) {
            starts.pop();
        }
        Self { text, starts }
    }

    /// Number of real lines (an empty buffer has none).
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// 0-based line holding `offset`, or `None` past the last line.
    pub fn line_of(&self, offset: usize) -> Option<usize> {
        if offset > self.text.len() || self.starts.is_empty() {
            return None;
        }
        let idx = self.starts.partition_point(|&start| start <= offset) - 1;
        // Only the final unterminated line may own the end-of-buffer offset.
        if offset == self.text.len() && self.text.ends_with('\n') {
            return None;
        }
        Some(idx)
    }

    /// Line-relative column of `offset`, measured from the start of `line`.
    pub fn column(&self, line: usize, offset: usize) -> usize {
        offset - self.starts[line]
    }

    /// Translate a byte range of the buffer into a [`MatchSpan`].
    ///
    /// The last line is the one holding `end`, so a match that consumes a line terminator
    /// extends onto the following line. Returns `None` for ranges that begin past the last
    /// line.
    pub fn span(&self, start: usize, end: usize) -> Option<MatchSpan> {
        let first = self.line_of(start)?;
        let last = self
            .line_of(end)
            .unwrap_or(self.line_count() - 1)
            .max(first);
        let column_start = self.column(first, start);
        Some(MatchSpan {
            first_line: first + 1,
            last_line: last + 1,
            column_start,
            column_end: column_start + (end - start),
        })
    }

    /// Offset just past the content of `line`, before its `\n` or `\r\n`.
    fn line_end(&self, line: usize) -> usize {
        let text = self.text;
        let end = self
            .starts
            .get(line + 1)
            .map(|&next| next - 1)
            .unwrap_or_else(|| text.strip_suffix('\n').map_or(text.len(), str::len));
        if end > self.starts[line] && text.as_bytes()[end - 1] == b'\r' {
            end - 1
        } else {
            end
        }
    }

    /// Line contents without terminators.
    pub fn lines(&self) -> Vec<&'a str> {
        (0..self.starts.len())
            .map(|line| &self.text[self.starts[line]..self.line_end(line)])
            .collect()
    }

    /// Raw text of the lines `span` covers, extended to `end` when the match itself
    /// consumes a terminator, so `column_start..column_end` always slices the match.
    pub fn spanned_text(&self, span: &MatchSpan, end: usize) -> &'a str {
        let start = self.starts[span.first_line - 1];
        let stop = self.line_end(span.last_line - 1).max(end);
        &self.text[start..stop]
    }
}
