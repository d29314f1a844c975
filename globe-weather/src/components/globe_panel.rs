//! The rotating globe.
//!
//! Coastlines and a graticule are projected through the current rotation and
//! plotted where they face the viewer. Clicking a point on the disk selects
//! the location under it.

use globe_weather_core::orientation::{self, Vec3};
use globe_weather_core::Location;
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Painter, Shape},
        Block, Borders,
    },
    Frame,
};
use tui_dispatch::EventKind;

use super::map_panel::MARKER_GLYPH;
use super::Component;
use crate::action::Action;
use crate::input::{cell_fraction, left_click};
use crate::land;

/// Half-height of the canvas in globe radii. Leaves a margin around the rim.
const VERTICAL_EXTENT: f64 = 1.1;

/// Degrees between coastline samples.
const COASTLINE_STEP: f64 = 0.5;

/// Degrees between graticule lines.
const GRATICULE_SPACING: i32 = 30;

const LAND_COLOR: Color = Color::Rgb(90, 170, 110);
const GRID_COLOR: Color = Color::Rgb(50, 60, 90);
const RIM_COLOR: Color = Color::Rgb(90, 120, 200);

/// Points projected onto the visible hemisphere.
struct Projected<'a> {
    points: &'a [Location],
    rotation: Vec3,
    color: Color,
}

impl Shape for Projected<'_> {
    fn draw(&self, painter: &mut Painter) {
        for &location in self.points {
            let p = orientation::project(location, self.rotation);
            if p.z <= 0.0 {
                continue;
            }
            if let Some((x, y)) = painter.get_point(p.x, p.y) {
                painter.paint(x, y, self.color);
            }
        }
    }
}

/// Parallels and meridians, sampled every two degrees.
fn graticule() -> Vec<Location> {
    let mut points = Vec::new();
    let mut lat = -90 + GRATICULE_SPACING;
    while lat < 90 {
        for lng in (-180..180).step_by(2) {
            points.push(Location::clamped(f64::from(lat), f64::from(lng)));
        }
        lat += GRATICULE_SPACING;
    }
    for lng in (-180..180).step_by(GRATICULE_SPACING as usize) {
        for lat in (-88..=88).step_by(2) {
            points.push(Location::clamped(f64::from(lat), f64::from(lng)));
        }
    }
    points
}

/// Canvas half-extents `(x, y)` that keep the globe round in `inner`.
///
/// Terminal cells are about twice as tall as they are wide.
fn extents(inner: Rect) -> (f64, f64) {
    let height = f64::from(inner.height.max(1));
    let width = f64::from(inner.width.max(1));
    (VERTICAL_EXTENT * width / (2.0 * height), VERTICAL_EXTENT)
}

pub struct GlobePanelProps {
    pub location: Location,
    pub rotation: Vec3,
    pub is_focused: bool,
}

pub struct GlobePanel {
    coastline: Vec<Location>,
    graticule: Vec<Location>,
    inner: Rect,
}

impl Default for GlobePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobePanel {
    pub fn new() -> Self {
        Self {
            coastline: land::coastline(COASTLINE_STEP),
            graticule: graticule(),
            inner: Rect::default(),
        }
    }

    pub fn inner_area(&self) -> Rect {
        self.inner
    }

    /// The location under cell `(column, row)`, if the cell is on the disk.
    pub fn location_at(&self, column: u16, row: u16, rotation: Vec3) -> Option<Location> {
        let (fx, fy) = cell_fraction(self.inner, column, row)?;
        let (ax, ay) = extents(self.inner);
        orientation::pick((fx * 2.0 - 1.0) * ax, (1.0 - fy * 2.0) * ay, rotation)
    }
}

impl Component<Action> for GlobePanel {
    type Props<'a> = GlobePanelProps;

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
        self.location_at(column, row, props.rotation)
            .map(Action::LocationSelect)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(" Globe ")
            .title_style(Style::default().fg(Color::Cyan).bold());
        self.inner = block.inner(area);
        let (ax, ay) = extents(self.inner);

        let rotation = props.rotation;
        let marker = orientation::project(props.location, rotation);
        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([-ax, ax])
            .y_bounds([-ay, ay])
            .paint(|ctx| {
                ctx.draw(&Projected {
                    points: &self.graticule,
                    rotation,
                    color: GRID_COLOR,
                });
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: 1.0,
                    color: RIM_COLOR,
                });
                ctx.layer();
                ctx.draw(&Projected {
                    points: &self.coastline,
                    rotation,
                    color: LAND_COLOR,
                });
                if marker.z > 0.0 {
                    ctx.layer();
                    ctx.print(
                        marker.x,
                        marker.y,
                        Span::styled(MARKER_GLYPH, Style::default().fg(Color::Red).bold()),
                    );
                }
            });

        frame.render_widget(canvas, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::click;
    use tui_dispatch::testing::*;

    fn props(rotation: Vec3) -> GlobePanelProps {
        GlobePanelProps {
            location: Location::SEOUL,
            rotation,
            is_focused: true,
        }
    }

    fn rendered(width: u16, height: u16, rotation: Vec3) -> (GlobePanel, String) {
        let mut harness = RenderHarness::new(width, height);
        let mut panel = GlobePanel::new();
        let output = harness.render_to_string_plain(|frame| panel.render(frame, frame.area(), props(rotation)));
        (panel, output)
    }

    #[test]
    fn test_extents_keep_globe_round() {
        let (ax, ay) = extents(Rect::new(0, 0, 40, 20));
        assert_eq!(ay, VERTICAL_EXTENT);
        assert!((ax - VERTICAL_EXTENT).abs() < 1e-9);
    }

    #[test]
    fn test_center_click_picks_facing_location() {
        let rotation = orientation::target_rotation(Location::SEOUL);
        // Odd inner size so one cell sits exactly on the center.
        let (mut panel, _) = rendered(43, 23, rotation);
        let inner = panel.inner_area();
        let (cx, cy) = (inner.x + inner.width / 2, inner.y + inner.height / 2);

        let actions: Vec<_> = panel
            .handle_event(&click(cx, cy), props(rotation))
            .into_iter()
            .collect();
        actions.assert_count(1);
        let Action::LocationSelect(picked) = actions[0] else {
            panic!("expected LocationSelect, got {:?}", actions[0]);
        };
        assert!((picked.latitude - Location::SEOUL.latitude).abs() < 1e-6);
        assert!((picked.longitude - Location::SEOUL.longitude).abs() < 1e-6);
    }

    #[test]
    fn test_corner_click_is_off_the_globe() {
        let (mut panel, _) = rendered(43, 23, Vec3::ZERO);
        let inner = panel.inner_area();
        let actions: Vec<_> = panel
            .handle_event(&click(inner.x, inner.y), props(Vec3::ZERO))
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_unfocused_ignores_clicks() {
        let (mut panel, _) = rendered(43, 23, Vec3::ZERO);
        let mut p = props(Vec3::ZERO);
        p.is_focused = false;
        let actions: Vec<_> = panel.handle_event(&click(21, 11), p).into_iter().collect();
        actions.assert_empty();
    }

    #[test]
    fn test_marker_drawn_only_when_facing() {
        let facing = orientation::target_rotation(Location::SEOUL);
        let (_, output) = rendered(43, 23, facing);
        assert!(output.contains("Globe"));
        assert!(output.contains(MARKER_GLYPH));

        // Opposite side of the planet
        let away = orientation::target_rotation(Location::clamped(-37.5665, -53.022));
        let (_, output) = rendered(43, 23, away);
        assert!(!output.contains(MARKER_GLYPH));
    }

    #[test]
    fn test_graticule_excludes_poles() {
        let points = graticule();
        assert!(points.iter().all(|p| p.latitude.abs() < 90.0));
        assert!(points.iter().any(|p| p.latitude == 0.0));
    }
}
