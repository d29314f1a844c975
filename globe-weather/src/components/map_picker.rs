//! Modal map picker.
//!
//! A click (or the arrow keys) moves a pending marker; nothing is selected
//! until the user confirms.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{centered_rect, render_modal, ModalStyle};

use super::map_panel::{location_at_cell, world_map};
use super::{Component, MODAL_BG};
use crate::action::Action;
use crate::input::left_click;
use crate::state::PickerState;

/// Degrees per arrow press, and with shift held.
const STEP: f64 = 1.0;
const FAST_STEP: f64 = 10.0;

pub struct MapPickerProps<'a> {
    pub picker: &'a PickerState,
}

#[derive(Default)]
pub struct MapPicker {
    map_area: Rect,
}

impl MapPicker {
    pub fn map_area(&self) -> Rect {
        self.map_area
    }
}

impl Component<Action> for MapPicker {
    type Props<'a> = MapPickerProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if let Some((column, row)) = left_click(event) {
            return location_at_cell(self.map_area, column, row).map(Action::PickerMark);
        }
        let EventKind::Key(key) = event else {
            return None;
        };
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            FAST_STEP
        } else {
            STEP
        };
        match key.code {
            KeyCode::Esc => Some(Action::PickerClose),
            KeyCode::Enter | KeyCode::Char('c') => props
                .picker
                .pending
                .map(|_| Action::PickerConfirm),
            KeyCode::Up => Some(Action::PickerMove { d_lat: step, d_lng: 0.0 }),
            KeyCode::Down => Some(Action::PickerMove { d_lat: -step, d_lng: 0.0 }),
            KeyCode::Left => Some(Action::PickerMove { d_lat: 0.0, d_lng: -step }),
            KeyCode::Right => Some(Action::PickerMove { d_lat: 0.0, d_lng: step }),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let width = area.width.saturating_sub(8).min(96);
        let height = area.height.saturating_sub(4).min(32);
        let modal_area = centered_rect(width, height, area);
        render_modal(frame, modal_area, &ModalStyle::with_bg(MODAL_BG));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Choose a location ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .style(Style::default().bg(MODAL_BG));
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).split(inner);
        self.map_area = chunks[0];

        let marker = props.picker.pending.map(|location| (location, Color::Yellow));
        frame.render_widget(world_map(Block::default(), marker), chunks[0]);

        let key_style = Style::default().fg(Color::Cyan).bold();
        let hint_style = Style::default().fg(Color::Rgb(140, 140, 160));
        let status = match props.picker.pending {
            Some(location) => Line::from(vec![
                Span::styled("Selected ", hint_style),
                Span::styled(location.to_string(), Style::default().fg(Color::Yellow).bold()),
            ]),
            None => Line::from(Span::styled("Click the map to choose a point", hint_style)),
        };
        let confirm_style = if props.picker.pending.is_some() {
            key_style
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT)
        };
        let keys = Line::from(vec![
            Span::styled("←↑↓→", key_style),
            Span::styled(" move  ", hint_style),
            Span::styled("shift", key_style),
            Span::styled(" ×10  ", hint_style),
            Span::styled("enter", confirm_style),
            Span::styled(" confirm  ", hint_style),
            Span::styled("esc", key_style),
            Span::styled(" cancel", hint_style),
        ]);
        frame.render_widget(Paragraph::new(vec![status, keys]), chunks[1]);
    }
}
