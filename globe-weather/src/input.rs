//! Mouse hit-testing on top of [`EventKind`].

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tui_dispatch::EventKind;

/// The cell of a left-button press, if `event` is one.
pub fn left_click(event: &EventKind) -> Option<(u16, u16)> {
    match event {
        EventKind::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some((*column, *row)),
        _ => None,
    }
}

/// Whether `(column, row)` lies in `area`.
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Normalised position of the center of cell `(column, row)` inside `area`:
/// `(0, 0)` is the top-left corner, `(1, 1)` the bottom-right.
pub fn cell_fraction(area: Rect, column: u16, row: u16) -> Option<(f64, f64)> {
    if area.width == 0 || area.height == 0 || !contains(area, column, row) {
        return None;
    }
    let fx = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
    let fy = (f64::from(row - area.y) + 0.5) / f64::from(area.height);
    Some((fx, fy))
}

/// Left click at `(column, row)`, for component tests.
#[cfg(test)]
pub(crate) fn click(column: u16, row: u16) -> EventKind {
    EventKind::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: crossterm::event::KeyModifiers::NONE,
    })
}
