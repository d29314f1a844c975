//! Reducer: `(state, action) -> (changed, effects)`.
//!
//! All state transitions happen here. Async work is only ever requested by
//! returning an [`Effect`].

use globe_weather_core::orientation;
use globe_weather_core::WeatherError;
use tracing::{debug, info};
use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Overlay, PickerState};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Location =====
        Action::LocationSelect(location) => select_location(state, location),

        // ===== Weather =====
        Action::WeatherFetch => match begin_fetch(state) {
            Some(effect) => DispatchResult::changed_with(effect),
            None => DispatchResult::changed(),
        },

        Action::WeatherDidLoad {
            request,
            location,
            snapshot,
        } => {
            if state.weather.resolve(request, Ok((location, snapshot))) {
                state.overlay.insert(Overlay::CARD);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::WeatherDidError { request, message } => {
            if state.weather.resolve(request, Err(message)) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Card =====
        Action::CardDismiss => {
            if state.overlay.contains(Overlay::CARD) {
                state.overlay.remove(Overlay::CARD);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Picker =====
        Action::PickerOpen => {
            if state.is_picker_open() {
                return DispatchResult::unchanged();
            }
            state.picker = PickerState::opened_at(state.location);
            state.overlay.insert(Overlay::PICKER);
            DispatchResult::changed()
        }

        Action::PickerClose => {
            if !state.is_picker_open() {
                return DispatchResult::unchanged();
            }
            state.overlay.remove(Overlay::PICKER);
            DispatchResult::changed()
        }

        Action::PickerMove { d_lat, d_lng } => {
            if !state.is_picker_open() {
                return DispatchResult::unchanged();
            }
            state.picker.pending = Some(state.picker.cursor().offset(d_lat, d_lng));
            DispatchResult::changed()
        }

        Action::PickerMark(location) => {
            if !state.is_picker_open() {
                return DispatchResult::unchanged();
            }
            state.picker.pending = Some(location);
            DispatchResult::changed()
        }

        Action::PickerConfirm => {
            let Some(location) = state.picker.pending.filter(|_| state.is_picker_open()) else {
                return DispatchResult::unchanged();
            };
            state.overlay.remove(Overlay::PICKER);
            select_location(state, location)
        }

        // ===== UI =====
        Action::UiHelpToggle => {
            state.overlay.toggle(Overlay::HELP);
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Global =====
        Action::Tick(elapsed) => {
            state.tick_count = state.tick_count.wrapping_add(1);
            let turning = state.globe.advance(elapsed);
            // Only re-render while something moves
            if turning || state.weather.is_loading() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // Handled by the runtime loop
        Action::Quit => DispatchResult::unchanged(),
    }
}

fn select_location(
    state: &mut AppState,
    location: globe_weather_core::Location,
) -> DispatchResult<Effect> {
    info!(%location, "location selected");
    state.location = location;

    let current = state.globe.value();
    let target = orientation::target_rotation(location).unwound_toward(current);
    state.globe.retarget(target);

    match begin_fetch(state) {
        Some(effect) => DispatchResult::changed_with(effect),
        None => DispatchResult::changed(),
    }
}

/// Start a fetch for the active location. Returns `None` when the fetch
/// failed before it could be sent.
fn begin_fetch(state: &mut AppState) -> Option<Effect> {
    if state.config_error.is_some() {
        state.weather.fail_now(WeatherError::MissingApiKey.to_string());
        return None;
    }
    let request = state.weather.begin();
    debug!(request = %request, location = %state.location, "weather fetch issued");
    Some(Effect::FetchWeather {
        request,
        location: state.location,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FRAME_INTERVAL;
    use globe_weather_core::{FetchStatus, Location, RequestId, WeatherSnapshot, GLOBE_TWEEN_DURATION};

    fn seoul_snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            place_name: "Seoul".into(),
            temperature_celsius: 15.2,
            humidity_percent: 60,
            wind_speed_mps: 3.1,
            condition_description: "clear sky".into(),
            icon_id: "01d".into(),
        }
    }

    fn fetch_request(result: &DispatchResult<Effect>) -> RequestId {
        match result.effects.as_slice() {
            [Effect::FetchWeather { request, .. }] => *request,
            other => panic!("expected one fetch effect, got {other:?}"),
        }
    }

    #[test]
    fn test_weather_fetch_sets_loading_and_emits_effect() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::WeatherFetch);

        assert!(result.changed);
        assert!(state.weather.is_loading());
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather {
                request: state.weather.pending().unwrap(),
                location: Location::SEOUL,
            }]
        );
    }

    #[test]
    fn test_missing_key_fails_without_effect() {
        let mut state = AppState::default().with_config_error("missing");

        let result = reducer(&mut state, Action::WeatherFetch);

        assert!(result.changed);
        assert!(!result.has_effects());
        assert!(!state.weather.is_loading());
        assert_eq!(
            state.weather.status().error(),
            Some("OpenWeather API key is not configured.")
        );
    }

    #[test]
    fn test_location_select_retargets_and_fetches() {
        let mut state = AppState::default();
        let paris = Location::new(48.85, 2.35).unwrap();

        let result = reducer(&mut state, Action::LocationSelect(paris));

        assert!(result.changed);
        assert_eq!(state.location, paris);
        assert!(state.globe.is_animating());
        match result.effects.as_slice() {
            [Effect::FetchWeather { location, .. }] => assert_eq!(*location, paris),
            other => panic!("unexpected effects {other:?}"),
        }
    }

    #[test]
    fn test_load_shows_card() {
        let mut state = AppState::default();
        let request = fetch_request(&reducer(&mut state, Action::WeatherFetch));

        let result = reducer(
            &mut state,
            Action::WeatherDidLoad {
                request,
                location: Location::SEOUL,
                snapshot: seoul_snapshot(),
            },
        );

        assert!(result.changed);
        assert!(state.overlay.contains(Overlay::CARD));
        assert_eq!(state.card(), Some((Location::SEOUL, &seoul_snapshot())));
    }

    #[test]
    fn test_stale_load_is_ignored() {
        let mut state = AppState::default();
        let a = fetch_request(&reducer(
            &mut state,
            Action::LocationSelect(Location::new(10.0, 10.0).unwrap()),
        ));
        let b = fetch_request(&reducer(
            &mut state,
            Action::LocationSelect(Location::new(20.0, 20.0).unwrap()),
        ));

        let mut b_snapshot = seoul_snapshot();
        b_snapshot.place_name = "B".into();
        let mut a_snapshot = seoul_snapshot();
        a_snapshot.place_name = "A".into();

        reducer(
            &mut state,
            Action::WeatherDidLoad {
                request: b,
                location: Location::new(20.0, 20.0).unwrap(),
                snapshot: b_snapshot.clone(),
            },
        );
        let late = reducer(
            &mut state,
            Action::WeatherDidLoad {
                request: a,
                location: Location::new(10.0, 10.0).unwrap(),
                snapshot: a_snapshot,
            },
        );

        assert!(!late.changed);
        assert_eq!(state.weather.snapshot(), Some(&b_snapshot));
    }

    #[test]
    fn test_error_status_is_failed_not_loading() {
        let mut state = AppState::default();
        let request = fetch_request(&reducer(&mut state, Action::WeatherFetch));

        reducer(
            &mut state,
            Action::WeatherDidError {
                request,
                message: "Failed to fetch weather data (HTTP 500 Internal Server Error).".into(),
            },
        );

        assert!(!state.weather.is_loading());
        assert!(matches!(state.weather.status(), FetchStatus::Failed(_)));
    }

    #[test]
    fn test_dismiss_keeps_snapshot_and_next_success_reshows() {
        let mut state = AppState::default();
        let request = fetch_request(&reducer(&mut state, Action::WeatherFetch));
        reducer(
            &mut state,
            Action::WeatherDidLoad {
                request,
                location: Location::SEOUL,
                snapshot: seoul_snapshot(),
            },
        );

        assert!(reducer(&mut state, Action::CardDismiss).changed);
        assert!(!state.overlay.contains(Overlay::CARD));
        assert_eq!(state.card(), None);
        assert_eq!(state.weather.snapshot(), Some(&seoul_snapshot()));

        // Dismissing again is a no-op
        assert!(!reducer(&mut state, Action::CardDismiss).changed);

        let request = fetch_request(&reducer(&mut state, Action::WeatherFetch));
        reducer(
            &mut state,
            Action::WeatherDidLoad {
                request,
                location: Location::SEOUL,
                snapshot: seoul_snapshot(),
            },
        );
        assert!(state.overlay.contains(Overlay::CARD));
    }

    #[test]
    fn test_card_hidden_while_loading() {
        let mut state = AppState::default();
        let request = fetch_request(&reducer(&mut state, Action::WeatherFetch));
        reducer(
            &mut state,
            Action::WeatherDidLoad {
                request,
                location: Location::SEOUL,
                snapshot: seoul_snapshot(),
            },
        );

        reducer(&mut state, Action::WeatherFetch);
        assert_eq!(state.card(), None);
        assert!(state.weather.snapshot().is_some());
    }

    #[test]
    fn test_picker_confirm_requires_pending() {
        let mut state = AppState::default();
        reducer(&mut state, Action::PickerOpen);
        assert!(state.is_picker_open());
        assert_eq!(state.picker.center, Location::SEOUL);

        let result = reducer(&mut state, Action::PickerConfirm);
        assert!(!result.changed);
        assert!(state.is_picker_open());
    }

    #[test]
    fn test_picker_move_then_confirm_selects() {
        let mut state = AppState::default();
        reducer(&mut state, Action::PickerOpen);
        reducer(&mut state, Action::PickerMove { d_lat: -1.0, d_lng: 2.0 });

        let pending = state.picker.pending.unwrap();
        assert!((pending.latitude - (Location::SEOUL.latitude - 1.0)).abs() < 1e-9);

        let result = reducer(&mut state, Action::PickerConfirm);
        assert!(result.changed);
        assert!(!state.is_picker_open());
        assert_eq!(state.location, pending);
        assert_eq!(result.effects.len(), 1);
    }

    #[test]
    fn test_picker_close_keeps_location() {
        let mut state = AppState::default();
        reducer(&mut state, Action::PickerOpen);
        reducer(&mut state, Action::PickerMark(Location::new(0.0, 0.0).unwrap()));
        reducer(&mut state, Action::PickerClose);

        assert!(!state.is_picker_open());
        assert_eq!(state.location, Location::SEOUL);
    }

    #[test]
    fn test_picker_actions_ignored_when_closed() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::PickerMark(Location::SEOUL)).changed);
        assert!(!reducer(&mut state, Action::PickerConfirm).changed);
    }

    #[test]
    fn test_tick_animates_then_settles() {
        let mut state = AppState::default();
        assert!(state.globe.is_animating());

        let mut frames = 0;
        while reducer(&mut state, Action::Tick(FRAME_INTERVAL)).changed {
            frames += 1;
            assert!(frames < 1000, "animation never settled");
        }

        let target = orientation::target_rotation(Location::SEOUL);
        let rotation = state.rotation();
        assert!((rotation.x - target.x).abs() < 1e-9);
        assert!((rotation.y - target.y).abs() < 1e-9);
    }

    #[test]
    fn test_tick_rerenders_while_loading() {
        let mut state = AppState::default();
        state.globe.snap_to(state.rotation());
        assert!(!reducer(&mut state, Action::Tick(FRAME_INTERVAL)).changed);

        reducer(&mut state, Action::WeatherFetch);
        assert!(reducer(&mut state, Action::Tick(FRAME_INTERVAL)).changed);
    }

    #[test]
    fn test_tick_advances_by_measured_time() {
        // Two ticks covering the whole tween finish it, however few frames
        // actually arrived.
        let mut state = AppState::default();
        let half = GLOBE_TWEEN_DURATION / 2;
        reducer(&mut state, Action::Tick(half));
        assert!(state.globe.is_animating());
        reducer(&mut state, Action::Tick(half));
        assert!(!state.globe.is_animating());

        let target = orientation::target_rotation(Location::SEOUL);
        assert!((state.rotation().x - target.x).abs() < 1e-9);

        // A zero-length frame moves nothing
        let mut state = AppState::default();
        let before = state.rotation();
        reducer(&mut state, Action::Tick(std::time::Duration::ZERO));
        assert_eq!(state.rotation(), before);
    }

    #[test]
    fn test_failed_fetch_keeps_card_paired_with_its_location() {
        let mut state = AppState::default();
        let request = fetch_request(&reducer(&mut state, Action::WeatherFetch));
        reducer(
            &mut state,
            Action::WeatherDidLoad {
                request,
                location: Location::SEOUL,
                snapshot: seoul_snapshot(),
            },
        );

        let paris = Location::new(48.85, 2.35).unwrap();
        let request = fetch_request(&reducer(&mut state, Action::LocationSelect(paris)));
        reducer(
            &mut state,
            Action::WeatherDidError {
                request,
                message: "boom".into(),
            },
        );

        assert_eq!(state.location, paris);
        assert_eq!(state.card(), Some((Location::SEOUL, &seoul_snapshot())));
    }

    #[test]
    fn test_terminal_resize() {
        let mut state = AppState::default();
        assert!(reducer(&mut state, Action::UiTerminalResize(100, 40)).changed);
        assert!(!reducer(&mut state, Action::UiTerminalResize(100, 40)).changed);
    }

    #[test]
    fn test_help_toggle() {
        let mut state = AppState::default();
        reducer(&mut state, Action::UiHelpToggle);
        assert!(state.overlay.contains(Overlay::HELP));
        reducer(&mut state, Action::UiHelpToggle);
        assert!(!state.overlay.contains(Overlay::HELP));
    }
}
