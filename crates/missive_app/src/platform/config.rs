//! Application configuration, read from a RON file with environment overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use missive_core::Locale;
use missive_engine::DispatchSettings;
use serde::Deserialize;
use thiserror::Error;

use super::logging::LogDestination;

const DEFAULT_CONFIG_FILENAME: &str = "missive.ron";
const CONFIG_PATH_VAR: &str = "MISSIVE_CONFIG";
const ENDPOINT_VAR: &str = "MISSIVE_ENDPOINT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("no endpoint configured; set `endpoint` in the config file or MISSIVE_ENDPOINT")]
    MissingEndpoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LocaleSetting {
    English,
    Japanese,
}

impl From<LocaleSetting> for Locale {
    fn from(setting: LocaleSetting) -> Self {
        match setting {
            LocaleSetting::English => Locale::English,
            LocaleSetting::Japanese => Locale::Japanese,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    /// `None` picks the locale from `LC_ALL`, `LC_MESSAGES` or `LANG`.
    pub locale: Option<LocaleSetting>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: u64,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let dispatch = DispatchSettings::new("");
        Self {
            endpoint: String::new(),
            locale: None,
            connect_timeout_secs: dispatch.connect_timeout.as_secs(),
            request_timeout_secs: dispatch.request_timeout.map(|timeout| timeout.as_secs()),
            max_response_bytes: dispatch.max_bytes,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
            color: true,
        }
    }
}

/// A resolved config and the file it came from, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
}

impl AppConfig {
    /// Loads `$MISSIVE_CONFIG` (or `./missive.ron`) and applies `$MISSIVE_ENDPOINT`.
    ///
    /// Runs before logging is set up, so it reports through its return value only.
    pub fn load() -> Result<LoadedConfig, ConfigError> {
        let explicit = env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
        let path = explicit
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));
        let endpoint_override = env::var(ENDPOINT_VAR).ok();
        Self::load_from(&path, explicit.is_some(), endpoint_override)
    }

    /// A missing file is only an error when the path was given explicitly.
    pub fn load_from(
        path: &Path,
        required: bool,
        endpoint_override: Option<String>,
    ) -> Result<LoadedConfig, ConfigError> {
        let (mut config, source) = match fs::read_to_string(path) {
            Ok(text) => {
                let config = Self::from_ron_str(&text).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
                (config, Some(path.to_path_buf()))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
                (Self::default(), None)
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if let Some(endpoint) = endpoint_override.filter(|value| !value.trim().is_empty()) {
            config.endpoint = endpoint;
        }
        config.endpoint = config.endpoint.trim().to_string();
        if config.endpoint.is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        Ok(LoadedConfig { config, source })
    }

    pub fn from_ron_str(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_bytes: self.max_response_bytes,
            ..DispatchSettings::new(self.endpoint.clone())
        }
    }

    pub fn resolve_locale(&self) -> Locale {
        match self.locale {
            Some(setting) => setting.into(),
            None => detect_locale(|key| env::var(key).ok()),
        }
    }
}

fn detect_locale(lookup: impl Fn(&str) -> Option<String>) -> Locale {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(lookup)
        .find(|value| !value.trim().is_empty())
        .and_then(|value| Locale::from_tag(&value))
        .unwrap_or_default()
}
