use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use tui_dispatch_components::{centered_rect, render_modal, ModalStyle};

use super::{Component, MODAL_BG};
use crate::action::Action;

/// Key bindings, shown in the help overlay.
pub const BINDINGS: &[(&str, &str)] = &[
    ("click", "select a point on the globe or map"),
    ("p", "open the map picker"),
    ("r / F5", "refresh weather"),
    ("x", "close the weather card"),
    ("?", "toggle this help"),
    ("q / Esc", "quit"),
];

pub struct HelpBar;

pub struct HelpBarProps {
    pub card_visible: bool,
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let key = Style::default().fg(Color::Cyan).bold();
        let hint = Style::default().fg(Color::DarkGray);
        let mut spans = vec![
            Span::styled(" p", key),
            Span::styled(" picker  ", hint),
            Span::styled("r", key),
            Span::styled(" refresh  ", hint),
        ];
        if props.card_visible {
            spans.push(Span::styled("x", key));
            spans.push(Span::styled(" close card  ", hint));
        }
        spans.extend([
            Span::styled("?", key),
            Span::styled(" help  ", hint),
            Span::styled("q", key),
            Span::styled(" quit ", hint),
        ]);
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}

/// Full key list in a modal.
pub struct HelpOverlay;

impl Component<Action> for HelpOverlay {
    type Props<'a> = ();

    fn render(&mut self, frame: &mut Frame, area: Rect, _props: Self::Props<'_>) {
        let modal_area = centered_rect(52, BINDINGS.len() as u16 + 4, area);
        render_modal(frame, modal_area, &ModalStyle::with_bg(MODAL_BG));

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(keys, what)| {
                Line::from(vec![
                    Span::styled(format!("{keys:>9}  "), Style::default().fg(Color::Cyan).bold()),
                    Span::raw(*what),
                ])
            })
            .collect();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Keys ")
            .title_bottom(Line::from(" ? to close ").right_aligned())
            .style(Style::default().bg(MODAL_BG));
        frame.render_widget(Paragraph::new(lines).block(block), modal_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::RenderHarness;

    #[test]
    fn test_close_card_hint_follows_card() {
        let mut harness = RenderHarness::new(80, 1);
        let with_card = harness.render_to_string_plain(|frame| {
            HelpBar.render(frame, frame.area(), HelpBarProps { card_visible: true })
        });
        assert!(with_card.contains("x close card"));

        let without = harness.render_to_string_plain(|frame| {
            HelpBar.render(frame, frame.area(), HelpBarProps { card_visible: false })
        });
        assert!(!without.contains("close card"));
        assert!(without.contains("q quit"));
    }

    #[test]
    fn test_overlay_lists_bindings() {
        let mut harness = RenderHarness::new(80, 20);
        let output = harness.render_to_string_plain(|frame| HelpOverlay.render(frame, frame.area(), ()));
        assert!(output.contains("Keys"));
        assert!(output.contains("open the map picker"));
        assert!(output.contains("q / Esc  quit"));
    }
}
