//! globe-weather: a terminal globe and world map that show current weather
//! wherever you click.
//!
//! The app is a single-store loop run by `tui_dispatch::EffectRuntime`:
//!
//! 1. Terminal input -> component `handle_event` -> [`Action`]s
//! 2. [`reducer`] updates [`AppState`] and declares [`Effect`]s
//! 3. Effects spawn keyed tasks that send result actions back
//! 4. If state changed, re-render
//!
//! ```
//! use globe_weather::{reducer, Action, AppState, Effect};
//!
//! let mut state = AppState::default();
//! let result = reducer(&mut state, Action::WeatherFetch);
//! assert!(state.weather.is_loading());
//! assert!(matches!(result.effects[..], [Effect::FetchWeather { .. }]));
//! ```

pub mod action;
pub mod components;
pub mod effect;
pub mod input;
pub mod land;
pub mod middleware;
pub mod reducer;
pub mod state;

pub use action::Action;
pub use effect::{spawn_effect, weather_effects, Effect, WEATHER_TASK};
pub use middleware::TracingMiddleware;
pub use reducer::reducer;
pub use state::{AppState, FrameClock, Overlay};
