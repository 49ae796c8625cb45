//! Configuration loading and management
//!
//! Handles parsing of the `config.toml` configuration file. Every key
//! is optional; a missing file means defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Config file name inside the platform config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Default tasks file name inside the platform data directory
pub const TASKS_FILE: &str = "tasks.json";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backing tasks file; the platform data directory when unset
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Save on UI quit
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

fn default_autosave() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: None,
            autosave: default_autosave(),
        }
    }
}

impl Config {
    /// Load configuration from the given path, defaults when absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Default config file location for this platform.
    pub fn default_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
    }

    /// Resolve the tasks file: explicit path first, then the config
    /// entry, then the platform data directory.
    pub fn resolve_tasks_file(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = &self.file {
            return Ok(path.clone());
        }
        Ok(project_dirs()?.data_dir().join(TASKS_FILE))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "tl").ok_or_else(|| {
        Error::InvalidConfig("cannot determine a home directory for this platform".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_expected() {
        let cfg = Config::default();
        assert!(cfg.file.is_none());
        assert!(cfg.autosave);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load(&dir.path().join("config.toml")).expect("load");
        assert!(cfg.file.is_none());
        assert!(cfg.autosave);
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let content = r#"
file = "/tmp/elsewhere/tasks.json"
autosave = false
"#;
        fs::write(&path, content).expect("write config");

        let cfg = Config::load(&path).expect("load");
        assert_eq!(cfg.file, Some(PathBuf::from("/tmp/elsewhere/tasks.json")));
        assert!(!cfg.autosave);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "autosave = false\n").expect("write config");

        let cfg = Config::load(&path).expect("load");
        assert!(cfg.file.is_none());
        assert!(!cfg.autosave);
    }

    #[test]
    fn malformed_config_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "autosave = maybe\n").expect("write config");
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn explicit_path_wins_over_config_entry() {
        let cfg = Config {
            file: Some(PathBuf::from("/from/config.json")),
            autosave: true,
        };
        let explicit = PathBuf::from("/from/flag.json");
        let resolved = cfg.resolve_tasks_file(Some(&explicit)).expect("resolve");
        assert_eq!(resolved, explicit);

        let resolved = cfg.resolve_tasks_file(None).expect("resolve");
        assert_eq!(resolved, PathBuf::from("/from/config.json"));
    }
}
