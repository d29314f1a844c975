//! Inline world map. A click selects the clicked point straight away.

use globe_weather_core::Location;
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Context, Map, MapResolution},
        Block, Borders,
    },
    Frame,
};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;
use crate::input::{cell_fraction, left_click};

pub const MARKER_GLYPH: &str = "●";

/// Equirectangular world map canvas with an optional marker.
pub(crate) fn world_map<'a>(
    block: Block<'a>,
    marker: Option<(Location, Color)>,
) -> Canvas<'a, impl Fn(&mut Context<'_>) + 'a> {
    Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-180.0, 180.0])
        .y_bounds([-90.0, 90.0])
        .paint(move |ctx| {
            ctx.draw(&Map {
                color: Color::Rgb(70, 130, 90),
                resolution: MapResolution::High,
            });
            if let Some((location, color)) = marker {
                ctx.layer();
                ctx.print(
                    location.longitude,
                    location.latitude,
                    Span::styled(MARKER_GLYPH, Style::default().fg(color).bold()),
                );
            }
        })
}

/// The location under cell `(column, row)` of a map drawn into `inner`.
pub(crate) fn location_at_cell(inner: Rect, column: u16, row: u16) -> Option<Location> {
    cell_fraction(inner, column, row).map(|(u, v)| Location::from_uv(u, v))
}

pub struct MapPanelProps {
    pub location: Location,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct MapPanel {
    /// Canvas area from the last render, for hit testing.
    inner: Rect,
}

impl MapPanel {
    pub fn inner_area(&self) -> Rect {
        self.inner
    }
}

impl Component<Action> for MapPanel {
    type Props<'a> = MapPanelProps;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let Some((column, row)) = left_click(event) else {
            return None;
        };
        location_at_cell(self.inner, column, row).map(Action::LocationSelect)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(" Map · click to pick ")
            .title_style(Style::default().fg(Color::Cyan).bold());
        self.inner = block.inner(area);

        frame.render_widget(world_map(block, Some((props.location, Color::Red))), area);
    }
}
