use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub const DEFAULT_API_BASE_URL: &str = "https://hn.algolia.com/api/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_FILTER: &str = "hn_scout=info";

/// Settings read from `config.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub data_dir: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            data_dir: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Loads `explicit` if given (it must exist), else the per-user config file if
    /// present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };
        match path {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Logs the effective settings. Called once tracing is up.
    pub fn log_summary(&self) {
        info!(
            api_base_url = %self.api_base_url,
            timeout_secs = self.request_timeout().as_secs(),
            data_dir = ?self.data_dir,
            "Configuration"
        );
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let home_dir = dirs_next::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
        Ok(home_dir.join(".hn_scout"))
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join("hn_scout").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "request_timeout_secs = 5\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.log_filter, "hn_scout=info");
    }

    #[test]
    fn full_file_overrides_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
api_base_url = "http://localhost:9000/api"
request_timeout_secs = 0
data_dir = "/tmp/scout"
log_filter = "hn_scout=debug"
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:9000/api");
        // zero would disable the timeout entirely
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
        assert_eq!(config.resolved_data_dir().unwrap(), PathBuf::from("/tmp/scout"));
        assert_eq!(config.log_filter, "hn_scout=debug");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(dir.path().join("absent.toml").as_path())).is_err());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "request_timeout_secs = \"soon\"").unwrap();
        assert!(Config::load(Some(path.as_path())).is_err());
    }
}
