pub mod app;
pub mod config_error_view;
pub mod globe_panel;
pub mod help_bar;
pub mod map_panel;
pub mod map_picker;
pub mod status_bar;
pub mod weather_card;

use ratatui::style::Color;

// Re-export core Component trait
pub use tui_dispatch::Component;

/// Background fill of modal windows.
pub const MODAL_BG: Color = Color::Rgb(24, 26, 36);

pub use app::App;
pub use config_error_view::{ConfigErrorView, ConfigErrorViewProps};
pub use globe_panel::{GlobePanel, GlobePanelProps};
pub use help_bar::{HelpBar, HelpBarProps, HelpOverlay};
pub use map_panel::{MapPanel, MapPanelProps, MARKER_GLYPH};
pub use map_picker::{MapPicker, MapPickerProps};
pub use status_bar::{StatusBar, StatusBarProps, ERROR_ICON, SPINNERS};
pub use weather_card::{card_area, WeatherCard, WeatherCardProps};
