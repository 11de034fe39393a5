//! Where the tracker keeps its files.

use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "RETRO_TRACKER_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "data";

const ACCOUNTS_FILE: &str = "accounts.json";
const PROJECTS_FILE: &str = "projects.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `accounts.json` and `projects.json`
    pub data_dir: PathBuf,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Reads `RETRO_TRACKER_DATA_DIR`, falling back to `./data`.
    pub fn from_env() -> Self {
        Self::new(std::env::var_os(DATA_DIR_ENV).unwrap_or_else(|| DEFAULT_DATA_DIR.into()))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn accounts_path(&self) -> PathBuf {
        self.data_dir.join(ACCOUNTS_FILE)
    }

    pub fn projects_path(&self) -> PathBuf {
        self.data_dir.join(PROJECTS_FILE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_paths() {
        let config = Config::new("/tmp/retro");
        assert_eq!(config.accounts_path(), Path::new("/tmp/retro/accounts.json"));
        assert_eq!(config.projects_path(), Path::new("/tmp/retro/projects.json"));
    }

    #[test]
    fn test_default_dir() {
        assert_eq!(Config::default().data_dir(), Path::new("data"));
    }
}
