use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

const BINARY_CHECK_SIZE: usize = 8000;
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Why a file was left out of a search.
#[derive(Debug)]
pub enum SkipReason {
    Unreadable(io::Error),
    Binary,
    NotUtf8,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable(e) => write!(f, "unreadable: {e}"),
            SkipReason::Binary => write!(f, "binary content"),
            SkipReason::NotUtf8 => write!(f, "not valid UTF-8"),
        }
    }
}

/// Result of loading one file for searching.
#[derive(Debug)]
pub enum FileOutcome {
    Text(String),
    Skipped(SkipReason),
}

/// True when the sampled prefix of `bytes` contains a NUL byte.
pub fn is_binary(bytes: &[u8]) -> bool {
    let sample = &bytes[..bytes.len().min(BINARY_CHECK_SIZE)];
    memchr::memchr(0, sample).is_some()
}

/// Read the whole file and decide whether it is searchable text.
///
/// The handle is closed before this returns.
pub fn read_text(path: &Path) -> FileOutcome {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return FileOutcome::Skipped(SkipReason::Unreadable(e)),
    };

    if is_binary(&bytes) {
        return FileOutcome::Skipped(SkipReason::Binary);
    }

    let bytes = if bytes.starts_with(UTF8_BOM) {
        bytes[UTF8_BOM.len()..].to_vec()
    } else {
        bytes
    };

    match String::from_utf8(bytes) {
        Ok(text) => FileOutcome::Text(text),
        Err(_) => FileOutcome::Skipped(SkipReason::NotUtf8),
    }
}
