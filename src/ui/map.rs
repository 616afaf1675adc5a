//! Map view rendering.
//!
//! Draws a world map on a braille canvas and prints one marker glyph per
//! positioned host, colored by the marker's host state.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution},
        Block, Borders,
    },
    Frame,
};

use crate::app::App;
use crate::config::MapSettings;
use crate::source::Position;

/// Deepest zoom level the map allows.
pub const MAX_ZOOM: u8 = 10;

/// Visible part of the world map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    pub center: Position,
    pub zoom: u8,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self {
            center: Position::new(0.0, 0.0),
            zoom: 0,
        }
    }
}

impl From<MapSettings> for MapViewport {
    fn from(settings: MapSettings) -> Self {
        Self {
            center: Position::new(settings.latitude, settings.longitude),
            zoom: settings.zoom.min(MAX_ZOOM),
        }
    }
}

impl MapViewport {
    /// Longitude range `[west, east]` on screen. Each zoom step halves it.
    pub fn x_bounds(&self) -> [f64; 2] {
        let half = 180.0 / f64::from(1u32 << self.zoom);
        [self.center.longitude - half, self.center.longitude + half]
    }

    /// Latitude range `[south, north]` on screen.
    pub fn y_bounds(&self) -> [f64; 2] {
        let half = 90.0 / f64::from(1u32 << self.zoom);
        [self.center.latitude - half, self.center.latitude + half]
    }

    pub fn contains(&self, position: Position) -> bool {
        let [west, east] = self.x_bounds();
        let [south, north] = self.y_bounds();
        (west..=east).contains(&position.longitude) && (south..=north).contains(&position.latitude)
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1);
    }

    pub fn center_on(&mut self, position: Position) {
        self.center = position;
    }
}

/// Render the Map view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app
        .display
        .markers
        .iter()
        .filter(|m| app.map.contains(m.position))
        .count();

    let title = format!(
        " Map · zoom {} · {}/{} markers ",
        app.map.zoom,
        visible,
        app.display.markers.len()
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.decoration_style(app.display.decoration));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(app.map.x_bounds())
        .y_bounds(app.map.y_bounds())
        .paint(|ctx| {
            ctx.draw(&Map {
                color: app.theme.land,
                resolution: MapResolution::High,
            });
            ctx.layer();
            for marker in &app.display.markers {
                if !app.map.contains(marker.position) {
                    continue;
                }
                let glyph = Span::styled(
                    marker.asset.glyph.to_string(),
                    app.theme.marker_style(marker.asset.state),
                );
                ctx.print(
                    marker.position.longitude,
                    marker.position.latitude,
                    Line::from(glyph),
                );
            }
        });

    frame.render_widget(canvas, area);

    if app.display.markers.is_empty() && app.dashboard.snapshot().is_some() {
        let hint = Line::from(Span::styled(
            " No hosts with a position ",
            Style::default().fg(app.theme.highlight),
        ));
        let hint_area = Rect::new(area.x + 2, area.y + 1, area.width.saturating_sub(4).min(28), 1);
        frame.render_widget(ratatui::widgets::Paragraph::new(hint), hint_area);
    }
}
