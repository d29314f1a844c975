//! Actions: every state change goes through one of these.
//!
//! Naming follows a category prefix (`Weather*`, `Picker*`, `Card*`, `Ui*`)
//! and `Did` marks the result of async work. Categories the prefix rule
//! can't infer are spelled out.

use std::time::Duration;

use globe_weather_core::{Location, RequestId, WeatherSnapshot};
use tui_dispatch::ActionSummary;

/// Application actions with category inference
///
/// # Categories:
/// - `location`: LocationSelect
/// - `weather`: WeatherFetch, WeatherDidLoad, WeatherDidError
/// - `card`: CardDismiss
/// - `picker`: PickerOpen, PickerClose, PickerMove, PickerMark, PickerConfirm
/// - `ui`: UiHelpToggle, UiTerminalResize
/// - `uncategorized`: Tick, Quit
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
pub enum Action {
    // ===== Location =====
    /// Make `Location` the active one: rotates the globe and fetches weather.
    LocationSelect(Location),

    // ===== Weather =====
    /// Fetch weather for the active location again.
    #[action(category = "weather")]
    WeatherFetch,

    /// Result: weather for `location` arrived.
    #[action(category = "weather")]
    WeatherDidLoad {
        request: RequestId,
        location: Location,
        snapshot: WeatherSnapshot,
    },

    #[action(category = "weather")]
    WeatherDidError {
        request: RequestId,
        message: String,
    },

    // ===== Card =====
    /// Hide the weather card. The snapshot stays.
    #[action(category = "card")]
    CardDismiss,

    // ===== Picker (modal) =====
    PickerOpen,
    PickerClose,
    /// Nudge the pending marker by whole degrees.
    PickerMove {
        d_lat: f64,
        d_lng: f64,
    },
    /// Put the pending marker at a clicked location.
    #[action(category = "picker")]
    PickerMark(Location),
    /// Select the pending marker, if any.
    PickerConfirm,

    // ===== UI =====
    #[action(category = "ui")]
    UiHelpToggle,
    #[action(category = "ui")]
    UiTerminalResize(u16, u16),

    // ===== Global =====
    /// Animation frame, carrying the wall time since the previous one.
    Tick(Duration),
    Quit,
}

/// Short form for the action log: no full snapshots, no long messages.
impl ActionSummary for Action {
    fn summary(&self) -> String {
        match self {
            Action::LocationSelect(location) => format!("LocationSelect({location})"),
            Action::WeatherDidLoad {
                request,
                location,
                snapshot,
            } => format!(
                "WeatherDidLoad {{ request: {request}, at: {location}, place: {:?}, temp: {} }}",
                snapshot.place_name,
                snapshot.temperature_label()
            ),
            Action::WeatherDidError { request, message } => {
                let msg = if message.chars().count() > 40 {
                    format!("{}...", message.chars().take(37).collect::<String>())
                } else {
                    message.clone()
                };
                format!("WeatherDidError {{ request: {request}, message: {msg:?} }}")
            }
            _ => format!("{:?}", self),
        }
    }
}
