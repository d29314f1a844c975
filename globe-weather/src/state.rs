//! Application state: single source of truth.
//!
//! Components receive `&AppState` (or pieces of it) as props; only the
//! reducer mutates it.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use bitflags::bitflags;
use globe_weather_core::orientation::{self, Vec3};
use globe_weather_core::{
    Animator, Easing, Location, RetentionPolicy, WeatherSnapshot, WeatherTracker,
    GLOBE_TWEEN_DURATION,
};

/// Interval between animation frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Frames per spinner step.
pub const SPINNER_FRAMES_PER_STEP: u32 = 4;

/// Longest step a single frame may take. A frame arriving after a stall
/// (suspended terminal, debugger) moves the globe at most this far.
pub const MAX_FRAME_STEP: Duration = Duration::from_millis(250);

/// Measures wall time between animation frames, so the globe turns at the
/// same speed however many frame ticks the timer drops.
#[derive(Debug)]
pub struct FrameClock {
    last: Mutex<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            last: Mutex::new(start),
        }
    }

    /// Time since the previous lap (or since the clock started), capped at
    /// [`MAX_FRAME_STEP`].
    pub fn lap(&self) -> Duration {
        self.lap_at(Instant::now())
    }

    pub fn lap_at(&self, now: Instant) -> Duration {
        let mut last = match self.last.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let elapsed = now.saturating_duration_since(*last);
        *last = now;
        elapsed.min(MAX_FRAME_STEP)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

bitflags! {
    /// Which overlays are showing.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Overlay: u8 {
        /// Weather card over the map.
        const CARD = 1;
        /// Modal map picker.
        const PICKER = 1 << 1;
        /// Key help.
        const HELP = 1 << 2;
    }
}

/// Modal picker state. `pending` stays `None` until the user chooses a point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PickerState {
    pub center: Location,
    pub pending: Option<Location>,
}

impl PickerState {
    pub fn opened_at(center: Location) -> Self {
        Self {
            center,
            pending: None,
        }
    }

    /// Where the cursor is: the pending marker, else the center.
    pub fn cursor(&self) -> Location {
        self.pending.unwrap_or(self.center)
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    /// The active location.
    pub location: Location,

    /// Globe rotation, animated toward the active location.
    pub globe: Animator<Vec3>,

    pub weather: WeatherTracker,

    pub overlay: Overlay,

    pub picker: PickerState,

    /// Blocking configuration problem. Nothing is fetched while set.
    pub config_error: Option<String>,

    /// Frame counter for the spinner.
    pub tick_count: u32,

    pub terminal_size: (u16, u16),
}

impl AppState {
    /// State for a fresh start at `location`. The globe starts unrotated and
    /// turns toward `location` on the first frames.
    pub fn new(location: Location, retention: RetentionPolicy) -> Self {
        let mut globe = Animator::new(Vec3::ZERO, GLOBE_TWEEN_DURATION, Easing::CubicInOut);
        globe.retarget(orientation::target_rotation(location).unwound_toward(Vec3::ZERO));
        Self {
            location,
            globe,
            weather: WeatherTracker::new(retention),
            overlay: Overlay::empty(),
            picker: PickerState::opened_at(location),
            config_error: None,
            tick_count: 0,
            terminal_size: (80, 24),
        }
    }

    pub fn with_config_error(mut self, message: impl Into<String>) -> Self {
        self.config_error = Some(message.into());
        self
    }

    pub fn rotation(&self) -> Vec3 {
        self.globe.value()
    }

    pub fn is_picker_open(&self) -> bool {
        self.overlay.contains(Overlay::PICKER)
    }

    /// What the card should show, if the card is up: the retained snapshot
    /// and the location it was fetched for, which may differ from the
    /// active location after a failed fetch. The card is hidden while a
    /// fetch is in flight.
    pub fn card(&self) -> Option<(Location, &WeatherSnapshot)> {
        if !self.overlay.contains(Overlay::CARD) || self.weather.is_loading() {
            return None;
        }
        self.weather.retained()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Location::SEOUL, RetentionPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_clock_measures_gaps() {
        let start = Instant::now();
        let clock = FrameClock::starting_at(start);

        assert_eq!(clock.lap_at(start + Duration::from_millis(33)), Duration::from_millis(33));
        // Three frames' worth of time passed in one tick
        assert_eq!(clock.lap_at(start + Duration::from_millis(132)), Duration::from_millis(99));
        // Time never runs backwards
        assert_eq!(clock.lap_at(start), Duration::ZERO);
    }

    #[test]
    fn test_frame_clock_caps_stalls() {
        let start = Instant::now();
        let clock = FrameClock::starting_at(start);
        assert_eq!(clock.lap_at(start + Duration::from_secs(5)), MAX_FRAME_STEP);
    }
}
