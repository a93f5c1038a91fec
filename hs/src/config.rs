//! Configuration for historystore

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the history file
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Name of the history file inside `dir`
    #[serde(default = "default_file_name", rename = "file-name")]
    pub file_name: String,

    /// Number of entries retained
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("historystore")
}

fn default_file_name() -> String {
    crate::DEFAULT_FILE_NAME.to_string()
}

fn default_capacity() -> usize {
    crate::DEFAULT_CAPACITY
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            file_name: default_file_name(),
            capacity: default_capacity(),
        }
    }
}

impl Config {
    /// Load config from `path`, else the first existing default location, else defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        let found = match path {
            Some(explicit) => Some(explicit.clone()),
            None => Self::default_locations().into_iter().find(|p| p.exists()),
        };
        match found {
            Some(file) => Self::read(&file),
            None => Ok(Config::default()),
        }
    }

    fn default_locations() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("historystore").join("config.yml")),
            Some(PathBuf::from("historystore.yml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn read(file: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", file.display()))
    }
}
