//! Blocking view shown instead of the globe when configuration is unusable.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use tui_dispatch::EventKind;
use tui_dispatch_components::centered_rect;

use super::status_bar::ERROR_ICON;
use super::Component;
use crate::action::Action;

pub struct ConfigErrorViewProps<'a> {
    pub message: &'a str,
}

pub struct ConfigErrorView;

impl Component<Action> for ConfigErrorView {
    type Props<'a> = ConfigErrorViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        match event {
            EventKind::Key(key) if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) => {
                Some(Action::Quit)
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let box_area = centered_rect(64, 9, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" {ERROR_ICON} Configuration "))
            .title_style(Style::default().fg(Color::Red).bold())
            .title_alignment(Alignment::Center);

        let lines = vec![
            Line::from(props.message.to_string()).bold(),
            Line::from(""),
            Line::from("Set OPENWEATHER_API_KEY, pass --api-key, or add \"api_key\" to the config file, then restart.")
                .fg(Color::Rgb(140, 140, 160)),
            Line::from(""),
            Line::from("q quit").fg(Color::DarkGray),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            box_area,
        );
    }
}
