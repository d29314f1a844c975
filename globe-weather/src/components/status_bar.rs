//! One-line status: active coordinates, fetch progress, last error.

use globe_weather_core::{FetchStatus, Location};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::SPINNER_FRAMES_PER_STEP;

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];
pub const ERROR_ICON: &str = "⚠";

pub fn spinner_frame(tick_count: u32) -> &'static str {
    SPINNERS[(tick_count / SPINNER_FRAMES_PER_STEP) as usize % SPINNERS.len()]
}

pub struct StatusBarProps<'a> {
    pub location: Location,
    pub status: &'a FetchStatus,
    pub tick_count: u32,
}

pub struct StatusBar;

impl Component<Action> for StatusBar {
    type Props<'a> = StatusBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let mut spans = vec![
            Span::styled(" ● ", Style::default().fg(Color::Red)),
            Span::styled(props.location.to_string(), Style::default().fg(Color::White).bold()),
            Span::raw("   "),
        ];
        match props.status {
            FetchStatus::Loading => {
                spans.push(Span::styled(
                    format!("{} Fetching weather…", spinner_frame(props.tick_count)),
                    Style::default().fg(Color::Cyan),
                ));
            }
            FetchStatus::Failed(message) => {
                spans.push(Span::styled(
                    format!("{ERROR_ICON} {message}"),
                    Style::default().fg(Color::Red),
                ));
            }
            FetchStatus::Success(snapshot) => {
                spans.push(Span::styled(
                    snapshot.place_name.clone(),
                    Style::default().fg(Color::Rgb(140, 140, 160)),
                ));
            }
            FetchStatus::Idle => {}
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Rgb(30, 30, 40))),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::RenderHarness;

    fn render(status: &FetchStatus, tick_count: u32) -> String {
        let mut harness = RenderHarness::new(80, 1);
        harness.render_to_string_plain(|frame| {
            StatusBar.render(
                frame,
                frame.area(),
                StatusBarProps {
                    location: Location::SEOUL,
                    status,
                    tick_count,
                },
            )
        })
    }

    #[test]
    fn test_spinner_advances_every_few_frames() {
        assert_eq!(spinner_frame(0), SPINNERS[0]);
        assert_eq!(spinner_frame(SPINNER_FRAMES_PER_STEP - 1), SPINNERS[0]);
        assert_eq!(spinner_frame(SPINNER_FRAMES_PER_STEP), SPINNERS[1]);
        assert_eq!(spinner_frame(SPINNER_FRAMES_PER_STEP * 4), SPINNERS[0]);
    }

    #[test]
    fn test_loading() {
        let output = render(&FetchStatus::Loading, 0);
        assert!(output.contains("37.57°N, 126.98°E"));
        assert!(output.contains("◐ Fetching weather"));
    }

    #[test]
    fn test_error_inline() {
        let output = render(&FetchStatus::Failed("HTTP 500".into()), 0);
        assert!(output.contains("⚠ HTTP 500"));
        assert!(!output.contains("Fetching"));
    }

    #[test]
    fn test_idle_shows_only_location() {
        let output = render(&FetchStatus::Idle, 0);
        assert_eq!(output.trim(), "● 37.57°N, 126.98°E");
    }
}
