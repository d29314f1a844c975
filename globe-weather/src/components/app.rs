//! Root component: lays out the panels and routes input by overlay.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};
use tui_dispatch::{EventKind, EventOutcome};

use super::{
    card_area, Component, ConfigErrorView, ConfigErrorViewProps, GlobePanel, GlobePanelProps,
    HelpBar, HelpBarProps, HelpOverlay, MapPanel, MapPanelProps, MapPicker, MapPickerProps,
    StatusBar, StatusBarProps, WeatherCard, WeatherCardProps,
};
use crate::action::Action;
use crate::input::{contains, left_click};
use crate::state::{AppState, Overlay};

/// Below this width the globe and map stack vertically.
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 90;

#[derive(Default)]
pub struct App {
    globe: GlobePanel,
    map: MapPanel,
    card: WeatherCard,
    picker: MapPicker,
    card_area: Option<Rect>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if let Some(message) = &state.config_error {
            ConfigErrorView.render(frame, area, ConfigErrorViewProps { message });
            return;
        }

        let rows = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);
        let panels = if area.width >= SIDE_BY_SIDE_MIN_WIDTH {
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).split(rows[0])
        } else {
            Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).split(rows[0])
        };

        let is_focused = !state.overlay.intersects(Overlay::PICKER | Overlay::HELP);
        self.globe.render(
            frame,
            panels[0],
            GlobePanelProps {
                location: state.location,
                rotation: state.rotation(),
                is_focused,
            },
        );
        self.map.render(
            frame,
            panels[1],
            MapPanelProps {
                location: state.location,
                is_focused,
            },
        );

        self.card_area = None;
        if let Some((location, snapshot)) = state.card() {
            let area = card_area(panels[1]);
            self.card
                .render(frame, area, WeatherCardProps { snapshot, location });
            self.card_area = Some(area);
        }

        StatusBar.render(
            frame,
            rows[1],
            StatusBarProps {
                location: state.location,
                status: state.weather.status(),
                tick_count: state.tick_count,
            },
        );
        HelpBar.render(
            frame,
            rows[2],
            HelpBarProps {
                card_visible: self.card_area.is_some(),
            },
        );

        if state.is_picker_open() {
            self.picker.render(frame, area, MapPickerProps { picker: &state.picker });
        }
        if state.overlay.contains(Overlay::HELP) {
            HelpOverlay.render(frame, area, ());
        }
    }

    pub fn handle_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        if let EventKind::Resize(width, height) = event {
            return EventOutcome::action(Action::UiTerminalResize(*width, *height)).with_render();
        }
        if let EventKind::Key(key) = event {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return EventOutcome::action(Action::Quit);
            }
        }

        if let Some(message) = &state.config_error {
            return EventOutcome::from_actions(
                ConfigErrorView.handle_event(event, ConfigErrorViewProps { message }),
            );
        }

        if state.overlay.contains(Overlay::HELP) {
            return match event {
                EventKind::Key(key) => match key.code {
                    KeyCode::Char('?') | KeyCode::Esc => EventOutcome::action(Action::UiHelpToggle),
                    KeyCode::Char('q') => EventOutcome::action(Action::Quit),
                    _ => EventOutcome::ignored(),
                },
                _ => EventOutcome::ignored(),
            };
        }

        if state.is_picker_open() {
            return EventOutcome::from_actions(
                self.picker
                    .handle_event(event, MapPickerProps { picker: &state.picker }),
            );
        }

        if let Some((location, snapshot)) = state.card() {
            let actions: Vec<Action> = self
                .card
                .handle_event(event, WeatherCardProps { snapshot, location })
                .into_iter()
                .collect();
            if !actions.is_empty() {
                return EventOutcome::from_actions(actions);
            }
            // The card sits over the map; clicks on it stop here.
            if let (Some((column, row)), Some(area)) = (left_click(event), self.card_area) {
                if contains(area, column, row) {
                    return EventOutcome::ignored();
                }
            }
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => EventOutcome::action(Action::Quit),
                KeyCode::Char('r') | KeyCode::F(5) => EventOutcome::action(Action::WeatherFetch),
                KeyCode::Char('p') => EventOutcome::action(Action::PickerOpen),
                KeyCode::Char('?') => EventOutcome::action(Action::UiHelpToggle),
                _ => EventOutcome::ignored(),
            },
            EventKind::Mouse(_) => {
                let rotation = state.rotation();
                let mut actions: Vec<Action> = self
                    .globe
                    .handle_event(
                        event,
                        GlobePanelProps {
                            location: state.location,
                            rotation,
                            is_focused: true,
                        },
                    )
                    .into_iter()
                    .collect();
                actions.extend(self.map.handle_event(
                    event,
                    MapPanelProps {
                        location: state.location,
                        is_focused: true,
                    },
                ));
                EventOutcome::from_actions(actions)
            }
            _ => EventOutcome::ignored(),
        }
    }
}
