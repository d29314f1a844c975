//! Error types for locations, configuration and weather fetching.

use std::path::PathBuf;

use thiserror::Error;

/// A coordinate pair that cannot be a [`Location`](crate::Location).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("coordinates must be finite numbers")]
    NotFinite,

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Configuration problems detected at startup, before any network call.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No weather provider key in flags, environment or config file.
    #[error("OpenWeather API key is not configured")]
    MissingApiKey,

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid start location: {0}")]
    InvalidLocation(#[from] LocationError),
}

/// Why a single weather fetch failed. All variants are terminal for that
/// request; nothing is retried.
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("OpenWeather API key is not configured.")]
    MissingApiKey,

    #[error("Failed to fetch weather data: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered outside 2xx. The body is not inspected.
    #[error("Failed to fetch weather data (HTTP {0}).")]
    Status(reqwest::StatusCode),

    #[error("Unexpected weather response: {0}")]
    Decode(String),

    #[error("Weather response contained no conditions.")]
    EmptyConditions,
}
