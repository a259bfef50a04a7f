//! Logical file type tags and the extension rules behind them
use lazy_static::lazy_static;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

lazy_static! {
    /// Static tag -> extension table. Extensions are lowercase with the leading dot.
    static ref TYPE_RULES: BTreeMap<&'static str, BTreeSet<&'static str>> = {
        let rules: &[(&str, &[&str])] = &[
            ("python", &[".py", ".pyi"]),
            ("javascript", &[".js", ".jsx", ".mjs", ".cjs"]),
            ("typescript", &[".ts", ".tsx"]),
            ("java", &[".java"]),
            ("kotlin", &[".kt", ".kts"]),
            ("csharp", &[".cs"]),
            ("c", &[".c", ".h"]),
            ("cpp", &[".cpp", ".cc", ".cxx", ".h", ".hpp"]),
            ("go", &[".go"]),
            ("rust", &[".rs"]),
            ("ruby", &[".rb"]),
            ("php", &[".php"]),
            ("swift", &[".swift"]),
            ("shell", &[".sh", ".bash", ".zsh"]),
            ("sql", &[".sql"]),
            ("html", &[".html", ".htm"]),
            ("css", &[".css", ".scss"]),
            ("markdown", &[".md"]),
            ("json", &[".json"]),
            ("yaml", &[".yaml", ".yml"]),
            ("toml", &[".toml"]),
            ("xml", &[".xml"]),
        ];
        rules
            .iter()
            .map(|(tag, exts)| (*tag, exts.iter().copied().collect()))
            .collect()
    };
}

/// Decides which files a type filter lets through.
///
/// The classifier only reads the shared rule table, so one instance (or many) can be used
/// from any number of concurrent searches.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTypeClassifier;

impl FileTypeClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Extensions registered for `tag`. Unknown tags yield an empty set.
    pub fn extensions_for(&self, tag: &str) -> BTreeSet<&'static str> {
        TYPE_RULES
            .get(tag.to_ascii_lowercase().as_str())
            .cloned()
            .unwrap_or_default()
    }

    /// True when `tags` is empty, otherwise when the last extension of `path` belongs to
    /// any of the tags.
    pub fn matches<S: AsRef<str>>(&self, path: &Path, tags: &[S]) -> bool {
        if tags.is_empty() {
            return true;
        }

        let Some(ext) = extension_of(path) else {
            return false;
        };

        tags.iter()
            .any(|tag| self.extensions_for(tag.as_ref()).contains(ext.as_str()))
    }

    /// Every known tag with its extensions, in tag order.
    pub fn rules(&self) -> impl Iterator<Item = (&'static str, &'static BTreeSet<&'static str>)> {
        TYPE_RULES.iter().map(|(tag, exts)| (*tag, exts))
    }

    pub fn is_known_tag(&self, tag: &str) -> bool {
        TYPE_RULES.contains_key(tag.to_ascii_lowercase().as_str())
    }
}

/// Lowercased final extension with its leading dot (`archive.tar.gz` -> `.gz`).
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
}
