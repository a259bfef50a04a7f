//! Depth-bounded directory tree summaries
use crate::error::Result;
use crate::file_types::FileTypeClassifier;
use crate::walker::check_root;
use log::warn;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_MAX_DEPTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureOptions {
    /// Logical type tags applied to files; directories are always kept.
    pub types: Vec<String>,
    /// Directories at this depth (root = 0) or deeper are listed but not expanded.
    pub max_depth: usize,
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            types: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StructureNode {
    Directory {
        name: String,
        children: Vec<StructureNode>,
    },
    File {
        name: String,
        size: u64,
    },
}

impl StructureNode {
    pub fn name(&self) -> &str {
        match self {
            StructureNode::Directory { name, .. } | StructureNode::File { name, .. } => name,
        }
    }

    pub fn children(&self) -> &[StructureNode] {
        match self {
            StructureNode::Directory { children, .. } => children,
            StructureNode::File { .. } => &[],
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, StructureNode::Directory { .. })
    }

    /// Child with the given name, if this is a directory holding one.
    pub fn child(&self, name: &str) -> Option<&StructureNode> {
        self.children().iter().find(|c| c.name() == name)
    }
}

/// Build the tree under `root`.
pub fn build_structure(root: &Path, options: &StructureOptions) -> Result<StructureNode> {
    check_root(root)?;
    let builder = StructureBuilder {
        classifier: FileTypeClassifier::new(),
        options,
    };
    Ok(builder.directory(root, 0))
}

struct StructureBuilder<'a> {
    classifier: FileTypeClassifier,
    options: &'a StructureOptions,
}

impl StructureBuilder<'_> {
    fn directory(&self, dir: &Path, depth: usize) -> StructureNode {
        let name = node_name(dir);
        let mut children = Vec::new();

        if depth < self.options.max_depth {
            self.list_children(dir, depth, &mut children);
        }

        StructureNode::Directory { name, children }
    }

    /// Fill `children` with whatever could be read; listing errors stop here, not above.
    fn list_children(&self, dir: &Path, depth: usize, children: &mut Vec<StructureNode>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot list directory {}: {}", dir.display(), e);
                return;
            }
        };

        let mut paths = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => paths.push(entry.path()),
                Err(e) => {
                    warn!("Error while listing {}: {}", dir.display(), e);
                    break;
                }
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        for path in paths {
            let metadata = match fs::metadata(&path).or_else(|_| fs::symlink_metadata(&path)) {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!("Cannot stat {}: {}", path.display(), e);
                    continue;
                }
            };

            if metadata.is_dir() {
                children.push(self.directory(&path, depth + 1));
            } else if self
                .classifier
                .matches(&path, self.options.types.as_slice())
            {
                children.push(StructureNode::File {
                    name: node_name(&path),
                    size: metadata.len(),
                });
            }
        }
    }
}

fn node_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_children_sorted_by_name() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("b.txt"), "bb").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::create_dir(root.join("c")).unwrap();

        let tree = build_structure(root, &StructureOptions::default()).unwrap();
        let names: Vec<_> = tree.children().iter().map(|c| c.name()).collect();

        assert_eq!(names, vec!["a.txt", "b.txt", "c"]);
        assert_eq!(
            tree.child("b.txt"),
            Some(&StructureNode::File {
                name: "b.txt".to_string(),
                size: 2
            })
        );
    }

    #[test]
    fn test_zero_depth_lists_root_only() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();

        let options = StructureOptions {
            max_depth: 0,
            ..Default::default()
        };
        let tree = build_structure(temp_dir.path(), &options).unwrap();

        assert!(tree.is_dir());
        assert!(tree.children().is_empty());
    }

    #[test]
    fn test_filter_keeps_directories() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("docs")).unwrap();
        fs::write(root.join("docs/guide.md"), "# guide").unwrap();
        fs::write(root.join("main.rs"), "fn main() {}").unwrap();
        fs::write(root.join("notes.md"), "notes").unwrap();

        let options = StructureOptions {
            types: vec!["rust".to_string()],
            ..Default::default()
        };
        let tree = build_structure(root, &options).unwrap();

        let docs = tree.child("docs").unwrap();
        assert!(docs.is_dir());
        assert!(docs.children().is_empty());
        assert!(tree.child("main.rs").is_some());
        assert!(tree.child("notes.md").is_none());
    }

    #[test]
    fn test_serializes_tagged() {
        let node = StructureNode::Directory {
            name: "src".to_string(),
            children: vec![StructureNode::File {
                name: "lib.rs".to_string(),
                size: 10,
            }],
        };
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["type"], "directory");
        assert_eq!(json["children"][0]["type"], "file");
        assert_eq!(json["children"][0]["size"], 10);
    }
}
