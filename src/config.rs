use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::models::TaskList;

/// Application settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// List assigned to blank tasks created from the `completed` view.
    pub default_list: TaskList,
    /// Start with the built-in demo reminders instead of an empty list.
    pub seed_demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_list: TaskList::Reminders,
            seed_demo_data: true,
        }
    }
}

/// Returns the path to the configuration file (`config.json`).
///
/// The path is determined in the following order:
/// 1. `REMINDRS_CONFIG` environment variable.
/// 2. `~/.config/remindrs/config.json` (on Linux).
/// 3. `./config.json` (fallback).
pub fn config_path() -> PathBuf {
    std::env::var("REMINDRS_CONFIG").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("remindrs");
        p.push("config.json");
        p
    })
}

/// Loads the configuration from [`config_path`].
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path())
}

/// Loads the configuration from `path`.
///
/// A missing file yields the defaults; an unreadable or malformed one is an error.
pub fn load_config_from(path: &Path) -> Result<Config> {
    let raw = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };
    let config: Config = serde_json::from_str(&raw).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    if config.default_list == TaskList::Completed {
        warn!(path = %path.display(), "rejecting 'completed' as default list");
        return Err(Error::InvalidDefaultList);
    }
    info!(path = %path.display(), default_list = ?config.default_list, "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let mut p = env::temp_dir();
        p.push(format!("remindrs_config_{}_{}.json", name, std::process::id()));
        fs::write(&p, contents).unwrap();
        p
    }

    #[test]
    fn missing_file_gives_defaults() {
        let mut p = env::temp_dir();
        p.push("remindrs_config_definitely_missing.json");
        let config = load_config_from(&p).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let p = write_temp("partial", r#"{ "default_list": "flagged" }"#);
        let config = load_config_from(&p).unwrap();
        fs::remove_file(&p).unwrap();
        assert_eq!(config.default_list, TaskList::Flagged);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn completed_default_list_is_rejected() {
        let p = write_temp("completed", r#"{ "default_list": "completed" }"#);
        let result = load_config_from(&p);
        fs::remove_file(&p).unwrap();
        assert!(matches!(result, Err(Error::InvalidDefaultList)));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let p = write_temp("malformed", "{ not json");
        let result = load_config_from(&p);
        fs::remove_file(&p).unwrap();
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }
}
