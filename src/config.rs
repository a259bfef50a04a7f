use crate::search::{DEFAULT_CONTEXT_LINES, DEFAULT_MAX_RESULTS};
use crate::structure::DEFAULT_MAX_DEPTH;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub repos: RepoConfig,
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub context_lines: usize,
    pub max_results: usize,
    pub case_sensitive: bool,
    pub max_depth: usize,
    pub default_types: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT_LINES,
            max_results: DEFAULT_MAX_RESULTS,
            case_sensitive: false,
            max_depth: DEFAULT_MAX_DEPTH,
            default_types: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    pub base_dir: PathBuf,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("./repos"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            repos: RepoConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from `explicit` if given, otherwise from the first config file found.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_config_path(),
        };

        match config_path {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Some(xdg_config) = dirs::config_dir() {
            let xdg_path = xdg_config.join("codescan/config.toml");
            if xdg_path.exists() {
                return Some(xdg_path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let home_path = home.join(".codescan.toml");
            if home_path.exists() {
                return Some(home_path);
            }
        }

        let current_path = Path::new(".codescan.toml");
        if current_path.exists() {
            return Some(current_path.to_path_buf());
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "log_level = \"debug\"\n\n[search]\nmax_results = 20\ndefault_types = [\"rust\"]\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.search.max_results, 20);
        assert_eq!(config.search.default_types, vec!["rust".to_string()]);
        assert_eq!(config.search.context_lines, DEFAULT_CONTEXT_LINES);
        assert_eq!(config.repos, RepoConfig::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[search\nmax_results = ").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        assert!(Config::load(Some(&temp_dir.path().join("nope.toml"))).is_err());
    }
}
