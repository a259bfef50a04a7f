use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid pattern: {0} must not be empty")]
    EmptyPattern(&'static str),

    #[error("Search root does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Search root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid repository '{owner}/{repo}': {reason}")]
    InvalidRepository {
        owner: String,
        repo: String,
        reason: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("An unexpected error occurred: {0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl ScanError {
    /// Errors that abort a whole search rather than a single file.
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, ScanError::InvalidPattern(_) | ScanError::EmptyPattern(_))
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
