//! Weather card shown over the map after a successful fetch.

use crossterm::event::KeyCode;
use globe_weather_core::{Location, WeatherSnapshot};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;
use crate::input::{contains, left_click};

pub const CARD_WIDTH: u16 = 48;
pub const CARD_HEIGHT: u16 = 9;

const CLOSE_BUTTON: &str = "[x]";

/// Where the card goes: the bottom-right corner of `area`, inset by one cell.
pub fn card_area(area: Rect) -> Rect {
    let width = CARD_WIDTH.min(area.width.saturating_sub(2));
    let height = CARD_HEIGHT.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    )
}

pub struct WeatherCardProps<'a> {
    pub snapshot: &'a WeatherSnapshot,
    pub location: Location,
}

#[derive(Default)]
pub struct WeatherCard {
    close_button: Rect,
}

impl Component<Action> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        match event {
            EventKind::Key(key) if key.code == KeyCode::Char('x') => Some(Action::CardDismiss),
            _ => match left_click(event) {
                Some((column, row)) if contains(self.close_button, column, row) => {
                    Some(Action::CardDismiss)
                }
                _ => None,
            },
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let snapshot = props.snapshot;
        let label = Style::default().fg(Color::Rgb(140, 140, 160));
        let value = Style::default().fg(Color::White).bold();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Line::from(format!(" {} {} ", snapshot.condition_glyph(), snapshot.place_name)).bold())
            .title(Line::from(CLOSE_BUTTON).right_aligned().fg(Color::DarkGray))
            .style(Style::default().bg(Color::Rgb(20, 22, 32)));
        self.close_button = Rect::new(
            (area.x + area.width).saturating_sub(CLOSE_BUTTON.len() as u16 + 1),
            area.y,
            CLOSE_BUTTON.len() as u16,
            1.min(area.height),
        );

        let lines = vec![
            Line::from(vec![
                Span::styled(snapshot.temperature_label(), Style::default().fg(Color::Yellow).bold()),
                Span::raw("  "),
                Span::styled(snapshot.condition_description.clone(), value),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Humidity  ", label),
                Span::styled(snapshot.humidity_label(), value),
            ]),
            Line::from(vec![
                Span::styled("Wind      ", label),
                Span::styled(snapshot.wind_label(), value),
            ]),
            Line::from(Span::styled(props.location.to_string(), label)),
            Line::from(Span::styled(snapshot.icon_url(), Style::default().fg(Color::DarkGray))),
        ];

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Left),
            area,
        );
    }
}
