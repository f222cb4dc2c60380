use crate::controller::Timing;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_DIR: &str = "pausa";
const CONFIG_FILE: &str = "config.json";

/// Problems with otherwise well-formed config values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("undo_window_ms must be greater than zero")]
    ZeroUndoWindow,
    #[error("tick_ms must be greater than zero")]
    ZeroTick,
    #[error("categories must not be empty")]
    NoCategories,
}

/// User configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Delay before a completed task leaves the list
    pub completing_delay_ms: u64,
    /// How long a completed task can be restored
    pub undo_window_ms: u64,
    /// Pause gate countdown length
    pub pause_seconds: u32,
    /// Delay between countdown end and the continue button
    pub reveal_delay_ms: u64,
    /// Event loop poll interval
    pub tick_ms: u64,
    /// Tag used when a task is added without one
    pub default_tag: String,
    /// Category chips offered by the add form, first is the default
    pub categories: Vec<String>,
    /// Seed the list with a couple of example tasks
    pub sample_tasks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            completing_delay_ms: 500,
            undo_window_ms: 3000,
            pause_seconds: 5,
            reveal_delay_ms: 500,
            tick_ms: 250,
            default_tag: "Inbox".to_string(),
            categories: vec!["Today".to_string(), "Upcoming".to_string(), "Someday".to_string()],
            sample_tasks: true,
        }
    }
}

impl Config {
    /// Load config from a file. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Write the config as pretty JSON, refusing to overwrite an existing file
    pub fn write_new<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if path.exists() {
            anyhow::bail!("Config file already exists: {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.undo_window_ms == 0 {
            return Err(ConfigError::ZeroUndoWindow);
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.categories.is_empty() {
            return Err(ConfigError::NoCategories);
        }
        Ok(())
    }

    pub fn timing(&self) -> Timing {
        Timing {
            completing_delay: Duration::from_millis(self.completing_delay_ms),
            undo_window: Duration::from_millis(self.undo_window_ms),
        }
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    /// Category preselected in the add form
    pub fn default_category(&self) -> &str {
        self.categories.first().map(String::as_str).unwrap_or("Today")
    }
}

/// Resolve the config path: explicit override, else the platform config dir
pub fn config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(CONFIG_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "undo_window_ms": 5000, "default_tag": "Home" }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.undo_window_ms, 5000);
        assert_eq!(config.default_tag, "Home");
        assert_eq!(config.completing_delay_ms, 500);
        assert_eq!(config.timing().undo_window, Duration::from_secs(5));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        assert_eq!(config.validate(), Ok(()));

        config.undo_window_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroUndoWindow));

        config.undo_window_ms = 3000;
        config.tick_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTick));

        config.tick_ms = 250;
        config.categories.clear();
        assert_eq!(config.validate(), Err(ConfigError::NoCategories));
    }

    #[test]
    fn test_invalid_values_rejected_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "tick_ms": 0 }"#).unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_write_new_round_trip_and_no_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        Config::default().write_new(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());
        assert!(Config::default().write_new(&path).is_err());
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let path = PathBuf::from("/tmp/custom.json");
        assert_eq!(config_path(Some(path.clone())).unwrap(), path);
    }

    #[test]
    fn test_default_category() {
        let mut config = Config::default();
        assert_eq!(config.default_category(), "Today");
        config.categories = vec!["Work".to_string()];
        assert_eq!(config.default_category(), "Work");
    }
}
