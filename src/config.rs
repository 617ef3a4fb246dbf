use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Environment variable overriding the configured base URL.
pub const API_URL_ENV: &str = "TASKDECK_API_URL";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// On-disk shape of `config.toml`. Every field is optional; unknown keys
/// are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub ui: UiConfig,
}

/// UI overrides from the `[ui]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Hex color overrides keyed by theme slot name, e.g. `background = "#0C001B"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base path of the remote task service, without a trailing slash
    pub api_url: String,
    pub ui: UiConfig,
}

impl Config {
    /// Resolve the effective config: CLI flag, then environment, then the
    /// user config file, then the built-in default.
    pub fn load(flag_url: Option<&str>) -> Result<Config, ConfigError> {
        let file = match config_path() {
            Some(path) if path.exists() => Some(read_config_file(&path)?),
            _ => None,
        };
        Ok(Self::resolve(flag_url, env::var(API_URL_ENV).ok(), file))
    }

    /// Pure resolution step, separated from filesystem/environment access.
    pub fn resolve(
        flag_url: Option<&str>,
        env_url: Option<String>,
        file: Option<ConfigFile>,
    ) -> Config {
        let file = file.unwrap_or_default();
        let api_url = flag_url
            .map(str::to_string)
            .or(env_url)
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Config {
            api_url: api_url.trim_end_matches('/').to_string(),
            ui: file.ui,
        }
    }
}

/// Parse a config file from disk.
pub fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// `$XDG_CONFIG_HOME/taskdeck/config.toml`, falling back to
/// `~/.config/taskdeck/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join("taskdeck").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_when_nothing_configured() {
        let config = Config::resolve(None, None, None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn flag_wins_over_env_and_file() {
        let file = ConfigFile {
            api_url: Some("http://file:1/api".into()),
            ui: UiConfig::default(),
        };
        let config = Config::resolve(
            Some("http://flag:1/api"),
            Some("http://env:1/api".into()),
            Some(file),
        );
        assert_eq!(config.api_url, "http://flag:1/api");
    }

    #[test]
    fn env_wins_over_file() {
        let file = ConfigFile {
            api_url: Some("http://file:1/api".into()),
            ui: UiConfig::default(),
        };
        let config = Config::resolve(None, Some("http://env:1/api".into()), Some(file));
        assert_eq!(config.api_url, "http://env:1/api");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = Config::resolve(Some("http://host:5000/api/"), None, None);
        assert_eq!(config.api_url, "http://host:5000/api");
    }

    #[test]
    fn parse_config_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r##"api_url = "http://tasks.local/api"

[ui.colors]
background = "#000000"

[future_section]
unknown = true
"##,
        )
        .unwrap();

        let file = read_config_file(&path).unwrap();
        assert_eq!(file.api_url.as_deref(), Some("http://tasks.local/api"));
        assert_eq!(file.ui.colors.get("background").unwrap(), "#000000");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "api_url = [not a string").unwrap();
        assert!(read_config_file(&path).is_err());
    }
}
