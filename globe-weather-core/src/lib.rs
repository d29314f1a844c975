//! UI-free core of globe-weather.
//!
//! This crate knows how to turn a [`Location`] into a globe rotation, how to
//! animate toward it, how to fetch current weather for it and how to keep
//! track of which fetch is the one that counts. Rendering lives in the
//! `globe-weather` crate.
//!
//! # Example
//!
//! ```
//! use globe_weather_core::{orientation, Location, RequestId, WeatherTracker};
//!
//! let rotation = orientation::target_rotation(Location::SEOUL);
//! assert!(rotation.is_finite());
//!
//! let mut tracker = WeatherTracker::default();
//! let first: RequestId = tracker.begin();
//! let second = tracker.begin();
//! // The first request is stale once the second is issued.
//! assert!(!tracker.resolve(first, Err("late".into())));
//! assert!(tracker.resolve(second, Err("failed".into())));
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod location;
pub mod orientation;
pub mod tween;
pub mod weather;

pub use config::{Config, ConfigLayer};
pub use error::{ConfigError, LocationError, WeatherError};
pub use fetch::{FetchStatus, RequestId, RetentionPolicy, WeatherTracker};
pub use location::Location;
pub use orientation::Vec3;
pub use tween::{Animator, Easing, Lerp, Tween, GLOBE_TWEEN_DURATION};
pub use weather::{ClientSettings, WeatherClient, WeatherSnapshot, WeatherSource};
