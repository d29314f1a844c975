//! Layered configuration.
//!
//! Values come from, in order of precedence: command-line flags (and their
//! environment variables), the JSON config file, then built-in defaults.
//! A missing API key is not an error here; it is reported through
//! [`Config::require_api_key`] so the UI can show it instead of exiting.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::fetch::RetentionPolicy;
use crate::location::Location;
use crate::weather::{ClientSettings, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

/// One source of settings. Every field is optional so layers can be merged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Seconds between automatic refreshes; 0 disables.
    pub refresh_interval: Option<u64>,
    pub on_error: Option<RetentionPolicy>,
    /// Request timeout in seconds.
    pub timeout: Option<u64>,
}

impl ConfigLayer {
    /// Fill every unset field of `self` from `lower`.
    pub fn or(self, lower: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            api_key: self.api_key.or(lower.api_key),
            endpoint: self.endpoint.or(lower.endpoint),
            latitude: self.latitude.or(lower.latitude),
            longitude: self.longitude.or(lower.longitude),
            refresh_interval: self.refresh_interval.or(lower.refresh_interval),
            on_error: self.on_error.or(lower.on_error),
            timeout: self.timeout.or(lower.timeout),
        }
    }

    /// Read a layer from a JSON file.
    pub fn from_file(path: &Path) -> Result<ConfigLayer, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub start: Location,
    pub refresh_interval: Option<Duration>,
    pub retention: RetentionPolicy,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            start: Location::SEOUL,
            refresh_interval: None,
            retention: RetentionPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// `<config_dir>/globe-weather/config.json`, when the platform has a
    /// config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("globe-weather").join("config.json"))
    }

    /// Resolve `overrides` on top of the config file.
    ///
    /// An explicit `path` must exist. The default path is optional: if it is
    /// absent the file layer is empty.
    pub fn load(overrides: ConfigLayer, path: Option<&Path>) -> Result<Config, ConfigError> {
        let file = match path {
            Some(path) => ConfigLayer::from_file(path)?,
            None => match Self::default_path() {
                Some(path) => match ConfigLayer::from_file(&path) {
                    Err(ConfigError::Read { source, .. })
                        if source.kind() == io::ErrorKind::NotFound =>
                    {
                        debug!(path = %path.display(), "no config file");
                        ConfigLayer::default()
                    }
                    other => other?,
                },
                None => ConfigLayer::default(),
            },
        };
        Self::resolve(overrides.or(file))
    }

    /// Apply defaults to a merged layer and validate it.
    pub fn resolve(layer: ConfigLayer) -> Result<Config, ConfigError> {
        let defaults = Config::default();
        let start = Location::new(
            layer.latitude.unwrap_or(defaults.start.latitude),
            layer.longitude.unwrap_or(defaults.start.longitude),
        )?;
        Ok(Config {
            api_key: layer.api_key.filter(|key| !key.trim().is_empty()),
            endpoint: layer
                .endpoint
                .filter(|endpoint| !endpoint.is_empty())
                .unwrap_or(defaults.endpoint),
            start,
            refresh_interval: layer
                .refresh_interval
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            retention: layer.on_error.unwrap_or(defaults.retention),
            timeout: layer
                .timeout
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        })
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LocationError;

    #[test]
    fn test_defaults() {
        let config = Config::resolve(ConfigLayer::default()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.start, Location::SEOUL);
        assert!(matches!(config.require_api_key(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_upper_layer_wins() {
        let cli = ConfigLayer {
            api_key: Some("cli".into()),
            latitude: Some(10.0),
            ..ConfigLayer::default()
        };
        let file = ConfigLayer {
            api_key: Some("file".into()),
            latitude: Some(20.0),
            longitude: Some(30.0),
            on_error: Some(RetentionPolicy::Clear),
            ..ConfigLayer::default()
        };
        let config = Config::resolve(cli.or(file)).unwrap();
        assert_eq!(config.require_api_key().unwrap(), "cli");
        assert_eq!(config.start, Location::new(10.0, 30.0).unwrap());
        assert_eq!(config.retention, RetentionPolicy::Clear);
    }

    #[test]
    fn test_blank_key_is_missing() {
        let layer = ConfigLayer {
            api_key: Some("  ".into()),
            ..ConfigLayer::default()
        };
        let config = Config::resolve(layer).unwrap();
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_zero_refresh_disables() {
        let layer = ConfigLayer {
            refresh_interval: Some(0),
            timeout: Some(0),
            ..ConfigLayer::default()
        };
        let config = Config::resolve(layer).unwrap();
        assert_eq!(config.refresh_interval, None);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);

        let layer = ConfigLayer {
            refresh_interval: Some(300),
            ..ConfigLayer::default()
        };
        let config = Config::resolve(layer).unwrap();
        assert_eq!(config.refresh_interval, Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_invalid_start_location() {
        let layer = ConfigLayer {
            latitude: Some(120.0),
            ..ConfigLayer::default()
        };
        assert!(matches!(
            Config::resolve(layer),
            Err(ConfigError::InvalidLocation(LocationError::LatitudeOutOfRange(_)))
        ));
    }

    #[test]
    fn test_parse_layer_json() {
        let layer: ConfigLayer = serde_json::from_str(
            r#"{"api_key": "abc", "on_error": "clear", "refresh_interval": 600}"#,
        )
        .unwrap();
        assert_eq!(layer.api_key.as_deref(), Some("abc"));
        assert_eq!(layer.on_error, Some(RetentionPolicy::Clear));
        assert_eq!(layer.refresh_interval, Some(600));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(serde_json::from_str::<ConfigLayer>(r#"{"apikey": "abc"}"#).is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let path = std::env::temp_dir().join("globe-weather-does-not-exist.json");
        let result = Config::load(ConfigLayer::default(), Some(&path));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "globe-weather-config-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{"api_key": "from-file", "latitude": -33.87, "longitude": 151.21}"#)
            .unwrap();

        let overrides = ConfigLayer {
            endpoint: Some("http://localhost:1234/weather".into()),
            ..ConfigLayer::default()
        };
        let config = Config::load(overrides, Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.endpoint, "http://localhost:1234/weather");
        assert_eq!(config.start, Location::new(-33.87, 151.21).unwrap());
    }

    #[test]
    fn test_parse_error_names_path() {
        let path = std::env::temp_dir().join(format!(
            "globe-weather-bad-{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ not json").unwrap();
        let result = Config::load(ConfigLayer::default(), Some(&path));
        fs::remove_file(&path).unwrap();

        match result {
            Err(err @ ConfigError::Parse { .. }) => {
                assert!(err.to_string().contains("globe-weather-bad-"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
