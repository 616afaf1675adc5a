//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, footer and help overlay.
//! The header and the footer both show the freshness line, read from the
//! same [`DisplayState`](crate::render::DisplayState) slots in the same frame.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::render::FreshnessView;

const WAITING: &str = "Waiting for first report...";

fn freshness_spans<'a>(view: Option<&FreshnessView>, app: &App) -> Vec<Span<'a>> {
    let Some(view) = view else {
        return vec![Span::styled(
            WAITING,
            Style::default().add_modifier(Modifier::DIM),
        )];
    };
    vec![
        Span::raw("Updated "),
        Span::styled(
            view.label.clone(),
            Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" by {} ({}) ", view.host, view.version)),
        // Stands in for the hover tooltip of the raw timestamp
        Span::styled(
            format!("@{}", view.timestamp),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]
}

/// Render the header bar: status word, host counts (invalid ones only when
/// present), freshness line and the "too old" badge when raised.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let decoration = app.display.decoration;
    let decoration_style = app.theme.decoration_style(decoration);
    let summary = app.dashboard.summary();

    let mut spans = vec![
        Span::styled(" ● ", decoration_style),
        Span::styled("HOSTWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("{} ", decoration.symbol()), decoration_style),
        Span::raw("│ "),
        Span::styled(format!("{}", summary.up), Style::default().fg(app.theme.success)),
        Span::raw(" up "),
        if summary.down > 0 {
            Span::styled(
                format!("{}", summary.down),
                Style::default().fg(app.theme.danger).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" down "),
    ];
    if summary.invalid > 0 {
        spans.push(Span::styled(
            format!("{} invalid ", summary.invalid),
            app.theme.invalid_style(),
        ));
    }
    spans.push(Span::raw("│ "));
    spans.extend(freshness_spans(app.display.header(), app));

    if app.display.stale_badge {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            " ⚠ DATA TOO OLD ",
            Style::default()
                .fg(Color::Black)
                .bg(app.theme.warning)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = [View::Map, View::Hosts]
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!(" {}:{} ", i + 1, view.label())))
        .collect();

    let selected = match app.current_view {
        View::Map => 0,
        View::Hosts => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the footer.
///
/// Always starts with the mirrored freshness line. After it comes a
/// temporary status message, the current source error, or the controls.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    spans.extend(freshness_spans(app.display.footer(), app));
    spans.push(Span::raw(" | "));

    let mut style = Style::default().add_modifier(Modifier::DIM);
    if let Some(msg) = app.get_status_message() {
        spans.push(Span::styled(
            msg.to_string(),
            Style::default().fg(app.theme.highlight),
        ));
        style = Style::default();
    } else if let Some(ref err) = app.load_error {
        spans.push(Span::styled(
            format!("{} | Error: {} | r:retry q:quit", app.source_description(), err),
            Style::default().fg(app.theme.danger),
        ));
        style = Style::default();
    } else {
        let controls = match app.current_view {
            View::Map => "+/-:zoom 0:reset Tab:switch ?:help q:quit",
            View::Hosts if app.filter_active => "Type to search | Enter:apply Esc:cancel",
            View::Hosts => "/:search s:sort Enter:locate Tab:switch ?:help q:quit",
        };
        spans.push(Span::raw(controls));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(style), area);
}

/// Ask for a bigger terminal. Works down to a single row or column.
pub fn render_too_small(frame: &mut Frame, area: Rect, min_width: u16, min_height: u16) {
    let msg = format!(
        "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
        area.width, area.height, min_width, min_height
    );
    let height = 5u16.min(area.height);
    let y = area.y + (area.height / 2).saturating_sub(2).min(area.height - height);
    let paragraph = Paragraph::new(msg)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(paragraph, Rect::new(area.x, y, area.width, height));
}

/// Render the help overlay with keyboard shortcuts.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Views",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab         Switch views"),
        Line::from("  1 / 2       Map / Hosts"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Map",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  + / -       Zoom in / out"),
        Line::from("  0           Reset viewport"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Hosts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  Enter       Show host on map"),
        Line::from("  /           Start filter/search"),
        Line::from("  c           Clear filter"),
        Line::from("  s / S       Sort column / direction"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r           Reload data"),
        Line::from("  e           Export to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 28u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
