use crate::error::{Result, ScanError};
use log::warn;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Fail unless `root` exists and is a directory.
pub fn check_root(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(ScanError::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(ScanError::RootNotFound(root.to_path_buf()))
        }
        Err(e) => Err(ScanError::Io(e)),
    }
}

/// Lazily yield every file under `root`, directories in file-name order.
///
/// Entries that cannot be listed are logged and skipped; the walk carries on with the
/// rest of the tree. Links to files are yielded, links to directories are not descended.
/// A dangling link is yielded too, so the read that follows reports it.
pub fn walk_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                let location = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                warn!("Skipping unreadable entry {location}: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() || is_file_link(entry))
        .map(|entry| entry.into_path())
}

fn is_file_link(entry: &DirEntry) -> bool {
    entry.path_is_symlink() && !fs::metadata(entry.path()).is_ok_and(|m| m.is_dir())
}
